//! one square region of the board

use crate::coords::{ChunkPos, LocalPos};
use crate::generator;
use crate::tile::Tile;

/// `N × N` tiles plus their generation state.
///
/// Tiles are `None` until the first access; [`Chunk::ensure_generated`] fills
/// them exactly once.
#[derive(Debug, Clone)]
pub struct Chunk {
    pub pos: ChunkPos,
    pub size: u32,
    pub density: f32,
    tiles: Option<Vec<Tile>>,
}

impl Chunk {
    pub fn new(pos: ChunkPos, size: u32, density: f32) -> Self {
        Self { pos, size, density, tiles: None }
    }

    #[inline]
    pub fn is_generated(&self) -> bool {
        self.tiles.is_some()
    }

    pub fn bomb_count(&self) -> usize {
        generator::bomb_count(self.size, self.density)
    }

    /// generate in place; returns `true` only on the call that did the work
    pub fn ensure_generated(&mut self, seed: &str) -> bool {
        let fresh = !self.is_generated();
        self.grid_mut(seed);
        fresh
    }

    fn grid_mut(&mut self, seed: &str) -> &mut Vec<Tile> {
        let (pos, size, density) = (self.pos, self.size, self.density);
        self.tiles.get_or_insert_with(|| {
            log::debug!("generating chunk ({}, {})", pos.x, pos.y);
            generator::generate(seed, pos, size, density)
        })
    }

    pub fn tile(&mut self, seed: &str, local: LocalPos) -> Tile {
        let idx = local.index(self.size);
        self.grid_mut(seed)[idx]
    }

    pub fn set_tile(&mut self, seed: &str, local: LocalPos, tile: Tile) {
        let idx = local.index(self.size);
        self.grid_mut(seed)[idx] = tile;
    }

    /// read‑only view of the grid, `None` while ungenerated
    pub fn tiles(&self) -> Option<&[Tile]> {
        self.tiles.as_deref()
    }
}
