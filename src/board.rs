//! the board: chunk store + handle pool + viewport, and the reveal / flag rules
//!
//! Everything that mutates tiles or moves render handles goes through
//! [`Board`]. It runs synchronously inside whichever frame calls it.

use std::collections::{HashMap, VecDeque};

use bevy::math::Vec2;
use bevy::prelude::Resource;
use serde::Deserialize;

use crate::constants::{CHUNK_SIZE, MINE_DENSITY, TILE_PIXELS};
use crate::coords::{ChunkPos, LocalPos, TilePos};
use crate::pool::{Handle, HandlePool, PoolError, RenderSlot};
use crate::store::ChunkStore;
use crate::texture::TileTexture;
use crate::tile::Tile;
use crate::viewport::{ViewportTracker, WorldRect};

/// How a direct click treats a flagged tile. Flood fill never touches flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagRule {
    /// flagged tiles ignore reveal
    #[default]
    Protect,
    /// revealing a flagged tile drops the flag first
    RevealClears,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoardSettings {
    pub chunk_size: u32,
    pub mine_density: f32,
    pub tile_pixels: f32,
    /// handle batches the pool is sized for (one batch = one chunk)
    pub pool_chunks: usize,
    pub flag_rule: FlagRule,
    /// tiles one reveal may uncover before the flood is cut off
    pub flood_limit: usize,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            chunk_size: CHUNK_SIZE,
            mine_density: MINE_DENSITY,
            tile_pixels: TILE_PIXELS,
            pool_chunks: 9,
            flag_rule: FlagRule::Protect,
            flood_limit: 250_000,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// flagged, already revealed, …
    Ignored,
    Revealed {
        changed: Vec<TilePos>,
        /// flood hit `flood_limit`; clicking any revealed zero tile on the
        /// edge picks it up again
        truncated: bool,
    },
    /// a bomb was uncovered; the board is finished
    Detonated(TilePos),
    /// the board already detonated
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    Flagged,
    Unflagged,
    Ignored,
    Finished,
}

#[derive(Resource)]
pub struct Board {
    store: ChunkStore,
    pool: HandlePool,
    tracker: ViewportTracker,
    shown: HashMap<ChunkPos, Vec<Handle>>,
    settings: BoardSettings,
    detonated: Option<TilePos>,
}

impl Board {
    pub fn new(seed: impl Into<String>, settings: BoardSettings) -> Self {
        let per_chunk = settings.chunk_size as usize * settings.chunk_size as usize;
        Self {
            store: ChunkStore::new(seed, settings.chunk_size, settings.mine_density),
            pool: HandlePool::new(settings.pool_chunks * per_chunk),
            tracker: ViewportTracker::default(),
            shown: HashMap::new(),
            settings,
            detonated: None,
        }
    }

    /* ---------- read‑only views ---------- */

    pub fn seed(&self) -> &str {
        self.store.seed()
    }

    pub fn settings(&self) -> &BoardSettings {
        &self.settings
    }

    /// chunks whose bombs have been laid so far
    pub fn generated_chunks(&self) -> usize {
        self.store.generated_count()
    }

    pub fn detonated(&self) -> Option<TilePos> {
        self.detonated
    }

    pub fn is_finished(&self) -> bool {
        self.detonated.is_some()
    }

    pub fn chunk_pixels(&self) -> f32 {
        self.settings.chunk_size as f32 * self.settings.tile_pixels
    }

    pub fn pool(&self) -> &HandlePool {
        &self.pool
    }

    pub fn handles(&self, chunk: ChunkPos) -> Option<&[Handle]> {
        self.shown.get(&chunk).map(Vec::as_slice)
    }

    pub fn is_chunk_shown(&self, chunk: ChunkPos) -> bool {
        self.shown.contains_key(&chunk)
    }

    /// tile under a world‑space point
    pub fn tile_at(&self, world: Vec2) -> TilePos {
        let tp = self.settings.tile_pixels;
        TilePos::new((world.x / tp).floor() as i64, (world.y / tp).floor() as i64)
    }

    /* ---------- tile access (generates lazily) ---------- */

    pub fn tile(&mut self, pos: TilePos) -> Tile {
        self.store.tile(pos)
    }

    pub fn neighbor_bombs(&mut self, pos: TilePos) -> u8 {
        self.store.neighbor_bombs(pos)
    }

    pub fn texture_for(&mut self, pos: TilePos) -> TileTexture {
        let tile = self.store.tile(pos);
        TileTexture::for_tile(tile, || self.store.neighbor_bombs(pos))
    }

    /* ---------- input entry points ---------- */

    /// uncover a tile, flooding through zero‑count regions
    pub fn reveal(&mut self, pos: TilePos) -> Result<RevealOutcome, PoolError> {
        if self.is_finished() {
            return Ok(RevealOutcome::Finished);
        }

        let mut tile = self.store.tile(pos);
        if tile.is_flagged() {
            match self.settings.flag_rule {
                FlagRule::Protect => return Ok(RevealOutcome::Ignored),
                FlagRule::RevealClears => {
                    tile = tile.with_flag_toggled();
                    self.store.set_tile(pos, tile);
                }
            }
        }
        if tile.is_revealed() {
            // a cut-off flood leaves zero tiles with hidden neighbours
            if self.store.neighbor_bombs(pos) != 0 {
                return Ok(RevealOutcome::Ignored);
            }
            let (changed, truncated) = self.flood(pos, pos.neighbors());
            if changed.is_empty() {
                return Ok(RevealOutcome::Ignored);
            }
            for &p in &changed {
                self.refresh_tile(p)?;
            }
            return Ok(RevealOutcome::Revealed { changed, truncated });
        }
        if tile.is_bomb() {
            self.store.set_tile(pos, tile.revealed());
            self.detonated = Some(pos);
            log::info!("bomb revealed at ({}, {})", pos.x, pos.y);
            self.refresh_tile(pos)?;
            return Ok(RevealOutcome::Detonated(pos));
        }

        let (changed, truncated) = self.flood(pos, [pos]);
        for &p in &changed {
            self.refresh_tile(p)?;
        }
        Ok(RevealOutcome::Revealed { changed, truncated })
    }

    /// explicit work queue; the revealed / flagged checks stop revisits
    fn flood(&mut self, start: TilePos, frontier: impl IntoIterator<Item = TilePos>) -> (Vec<TilePos>, bool) {
        let limit = self.settings.flood_limit.max(1);
        let mut changed = Vec::new();
        let mut queue: VecDeque<TilePos> = frontier.into_iter().collect();

        while let Some(p) = queue.pop_front() {
            let tile = self.store.tile(p);
            if tile.is_revealed() || tile.is_flagged() || tile.is_bomb() {
                continue;
            }
            if changed.len() == limit {
                log::warn!(
                    "flood from ({}, {}) stopped after {} tiles",
                    start.x,
                    start.y,
                    limit
                );
                return (changed, true);
            }
            self.store.set_tile(p, tile.revealed());
            changed.push(p);
            if self.store.neighbor_bombs(p) == 0 {
                queue.extend(p.neighbors());
            }
        }
        (changed, false)
    }

    pub fn toggle_flag(&mut self, pos: TilePos) -> Result<FlagOutcome, PoolError> {
        if self.is_finished() {
            return Ok(FlagOutcome::Finished);
        }
        let tile = self.store.tile(pos);
        if tile.is_revealed() {
            return Ok(FlagOutcome::Ignored);
        }
        let next = tile.with_flag_toggled();
        self.store.set_tile(pos, next);
        self.refresh_tile(pos)?;
        Ok(if next.is_flagged() { FlagOutcome::Flagged } else { FlagOutcome::Unflagged })
    }

    /// repaint one tile's handle if its chunk is on screen
    fn refresh_tile(&mut self, pos: TilePos) -> Result<(), PoolError> {
        let (chunk, local) = pos.to_chunk_and_local(self.settings.chunk_size);
        let Some(handle) = self
            .shown
            .get(&chunk)
            .and_then(|batch| batch.get(local.index(self.settings.chunk_size)).copied())
        else {
            return Ok(());
        };
        let texture = self.texture_for(pos);
        self.pool.set_texture(handle, texture)
    }

    /* ---------- viewport reconciliation ---------- */

    /// call once per frame with the camera's world rectangle
    ///
    /// Batches of chunks leaving view are repainted for chunks entering view
    /// before anything new is acquired; whatever is left over goes back to
    /// the pool afterwards.
    pub fn on_viewport_changed(&mut self, rect: WorldRect) -> Result<(), PoolError> {
        let Some(delta) = self.tracker.update(rect, self.chunk_pixels()) else {
            return Ok(());
        };
        log::debug!(
            "viewport: {} chunks entering, {} leaving",
            delta.entering.len(),
            delta.leaving.len()
        );

        let mut spare: Vec<Vec<Handle>> = delta
            .leaving
            .iter()
            .rev()
            .filter_map(|pos| self.shown.remove(pos))
            .collect();

        let mut result = Ok(());
        for &pos in &delta.entering {
            self.store.ensure_generated(pos);
            let batch = match spare.pop() {
                Some(batch) => batch,
                None => match self.acquire_batch() {
                    Ok(batch) => batch,
                    Err(err) => {
                        result = Err(err);
                        break;
                    }
                },
            };
            if let Err(err) = self.paint_chunk(pos, &batch) {
                result = Err(err);
            }
            self.shown.insert(pos, batch);
            if result.is_err() {
                break;
            }
        }

        for batch in spare {
            self.release_batch(batch)?;
        }
        if result.is_err() {
            let shown = &self.shown;
            self.tracker.retain(|pos| shown.contains_key(&pos));
        }
        result
    }

    /// hide everything and hand all handles back
    pub fn clear_view(&mut self) -> Result<(), PoolError> {
        let batches: Vec<_> = self.shown.drain().map(|(_, batch)| batch).collect();
        for batch in batches {
            self.release_batch(batch)?;
        }
        self.tracker.clear();
        Ok(())
    }

    fn acquire_batch(&mut self) -> Result<Vec<Handle>, PoolError> {
        let per_chunk = self.settings.chunk_size as usize * self.settings.chunk_size as usize;
        if self.pool.available() < per_chunk {
            return Err(PoolError::Exhausted { capacity: self.pool.capacity() });
        }
        (0..per_chunk).map(|_| self.pool.acquire()).collect()
    }

    fn release_batch(&mut self, batch: Vec<Handle>) -> Result<(), PoolError> {
        for handle in batch {
            self.pool.release(handle)?;
        }
        Ok(())
    }

    fn paint_chunk(&mut self, chunk: ChunkPos, batch: &[Handle]) -> Result<(), PoolError> {
        let n = self.settings.chunk_size;
        let tp = self.settings.tile_pixels;
        for (idx, &handle) in batch.iter().enumerate() {
            let pos = chunk.tile(LocalPos::from_index(idx, n), n);
            let centre = Vec2::new((pos.x as f32 + 0.5) * tp, (pos.y as f32 + 0.5) * tp);
            let texture = self.texture_for(pos);
            self.pool.paint(handle, centre, texture)?;
        }
        Ok(())
    }

    /// render slots changed since the last call
    pub fn drain_dirty(&mut self) -> Vec<(usize, RenderSlot)> {
        self.pool.drain_dirty()
    }
}
