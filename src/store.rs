//! sparse, unbounded chunk cache
//!
//! Chunks are created on first lookup and generated on first tile access.
//! Nothing is ever evicted: tile state of every chunk the player has touched
//! stays resident, so reveals and flags survive scrolling away and back.

use std::collections::HashMap;

use crate::chunk::Chunk;
use crate::coords::{ChunkPos, TilePos};
use crate::tile::Tile;

#[derive(Debug, Clone)]
pub struct ChunkStore {
    seed: String,
    chunk_size: u32,
    density: f32,
    chunks: HashMap<ChunkPos, Chunk>,
}

impl ChunkStore {
    pub fn new(seed: impl Into<String>, chunk_size: u32, density: f32) -> Self {
        assert!(chunk_size > 0, "chunk size must be positive");
        Self {
            seed: seed.into(),
            chunk_size,
            density,
            chunks: HashMap::new(),
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn chunk_size(&self) -> u32 {
        self.chunk_size
    }

    /// chunks known to the store (generated or not)
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn generated_count(&self) -> usize {
        self.chunks.values().filter(|c| c.is_generated()).count()
    }

    fn entry(chunks: &mut HashMap<ChunkPos, Chunk>, pos: ChunkPos, size: u32, density: f32) -> &mut Chunk {
        chunks
            .entry(pos)
            .or_insert_with(|| Chunk::new(pos, size, density))
    }

    /// look up, creating an ungenerated chunk if absent
    pub fn get_or_create(&mut self, pos: ChunkPos) -> &mut Chunk {
        Self::entry(&mut self.chunks, pos, self.chunk_size, self.density)
    }

    pub fn get(&self, pos: ChunkPos) -> Option<&Chunk> {
        self.chunks.get(&pos)
    }

    /// make sure the chunk's bombs exist; `true` if this call generated them
    pub fn ensure_generated(&mut self, pos: ChunkPos) -> bool {
        let Self { seed, chunks, chunk_size, density } = self;
        Self::entry(chunks, pos, *chunk_size, *density).ensure_generated(seed)
    }

    pub fn tile(&mut self, pos: TilePos) -> Tile {
        let (chunk_pos, local) = pos.to_chunk_and_local(self.chunk_size);
        let Self { seed, chunks, chunk_size, density } = self;
        Self::entry(chunks, chunk_pos, *chunk_size, *density).tile(seed, local)
    }

    pub fn set_tile(&mut self, pos: TilePos, tile: Tile) {
        let (chunk_pos, local) = pos.to_chunk_and_local(self.chunk_size);
        let Self { seed, chunks, chunk_size, density } = self;
        Self::entry(chunks, chunk_pos, *chunk_size, *density).set_tile(seed, local, tile);
    }

    /// bombs among the 8 neighbours, generating adjacent chunks as needed
    pub fn neighbor_bombs(&mut self, pos: TilePos) -> u8 {
        pos.neighbors().filter(|&n| self.tile(n).is_bomb()).count() as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bombs_in(store: &ChunkStore, pos: ChunkPos) -> Vec<usize> {
        store
            .get(pos)
            .and_then(Chunk::tiles)
            .map(|tiles| {
                tiles
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.is_bomb())
                    .map(|(i, _)| i)
                    .collect()
            })
            .unwrap_or_default()
    }

    #[test]
    fn abc_seed_scenario_is_reproducible() {
        let mut first = ChunkStore::new("abc", 4, 0.25);
        assert!(first.ensure_generated(ChunkPos::new(0, 0)));
        let a = bombs_in(&first, ChunkPos::new(0, 0));
        assert_eq!(a.len(), 4);

        let mut second = ChunkStore::new("abc", 4, 0.25);
        second.ensure_generated(ChunkPos::new(0, 0));
        assert_eq!(bombs_in(&second, ChunkPos::new(0, 0)), a);
    }

    #[test]
    fn visitation_order_does_not_matter() {
        let mut forward = ChunkStore::new("order", 8, 0.2);
        let mut backward = ChunkStore::new("order", 8, 0.2);
        let positions: Vec<_> = (-2..=2).map(|i| ChunkPos::new(i, -i)).collect();

        for &p in &positions {
            forward.ensure_generated(p);
        }
        for &p in positions.iter().rev() {
            backward.ensure_generated(p);
        }
        for &p in &positions {
            assert_eq!(bombs_in(&forward, p), bombs_in(&backward, p));
        }
    }

    #[test]
    fn get_or_create_does_not_generate() {
        let mut store = ChunkStore::new("s", 4, 0.25);
        assert!(!store.get_or_create(ChunkPos::new(9, 9)).is_generated());
        assert_eq!(store.len(), 1);
        assert_eq!(store.generated_count(), 0);
    }

    #[test]
    fn tile_access_generates_owning_chunk_only() {
        let mut store = ChunkStore::new("s", 4, 0.25);
        let _ = store.tile(TilePos::new(-1, -1));
        assert!(store.get(ChunkPos::new(-1, -1)).is_some_and(Chunk::is_generated));
        assert_eq!(store.generated_count(), 1);
    }

    #[test]
    fn set_tile_roundtrips_through_translation() {
        let mut store = ChunkStore::new("s", 4, 0.0);
        let pos = TilePos::new(-5, 7);
        store.set_tile(pos, Tile::empty().revealed());
        assert!(store.tile(pos).is_revealed());
        assert!(!store.tile(TilePos::new(-4, 7)).is_revealed());
    }

    #[test]
    fn neighbor_count_crosses_chunk_borders() {
        let mut store = ChunkStore::new("s", 4, 0.0);
        // corner tile (0,0) has neighbours in three other chunks
        for p in [TilePos::new(-1, -1), TilePos::new(-1, 0), TilePos::new(0, -1), TilePos::new(1, 1)] {
            store.set_tile(p, Tile::bomb());
        }
        assert_eq!(store.neighbor_bombs(TilePos::new(0, 0)), 4);
        assert_eq!(store.generated_count(), 4);
    }
}
