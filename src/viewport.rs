//! viewport rectangle → visible chunks, and the per‑frame diff

use std::collections::BTreeSet;

use bevy::math::Vec2;

use crate::coords::ChunkPos;

/// World‑space rectangle in pixel units (bottom‑left, top‑right).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldRect {
    pub min: Vec2,
    pub max: Vec2,
}

impl WorldRect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min: min.min(max), max: min.max(max) }
    }

    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size.abs() * 0.5;
        Self::new(center - half, center + half)
    }
}

/// Chunks entering and leaving view, each sorted by coordinate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChunkDiff {
    pub entering: Vec<ChunkPos>,
    pub leaving: Vec<ChunkPos>,
}

impl ChunkDiff {
    pub fn is_empty(&self) -> bool {
        self.entering.is_empty() && self.leaving.is_empty()
    }
}

#[inline]
fn chunk_index(v: f32, chunk_pixels: f32) -> i64 {
    (v / chunk_pixels).floor() as i64
}

/// every chunk whose square touches `rect`, sorted by `(x, y)`
pub fn visible_chunks(rect: WorldRect, chunk_pixels: f32) -> Vec<ChunkPos> {
    let (cl, cr) = (chunk_index(rect.min.x, chunk_pixels), chunk_index(rect.max.x, chunk_pixels));
    let (cb, ct) = (chunk_index(rect.min.y, chunk_pixels), chunk_index(rect.max.y, chunk_pixels));
    (cl..=cr)
        .flat_map(|x| (cb..=ct).map(move |y| ChunkPos::new(x, y)))
        .collect()
}

/// upper bound on chunks a span of `extent` pixels can touch along one axis
pub fn max_chunks_per_axis(extent: f32, chunk_pixels: f32) -> usize {
    (extent / chunk_pixels).floor().max(0.0) as usize + 2
}

/// set difference both ways; inputs are treated as unordered
pub fn diff(previous: &[ChunkPos], current: &[ChunkPos]) -> ChunkDiff {
    let prev: BTreeSet<ChunkPos> = previous.iter().copied().collect();
    let curr: BTreeSet<ChunkPos> = current.iter().copied().collect();
    ChunkDiff {
        entering: curr.difference(&prev).copied().collect(),
        leaving: prev.difference(&curr).copied().collect(),
    }
}

/// Remembers the last visible set so each frame only reports changes.
#[derive(Debug, Default)]
pub struct ViewportTracker {
    shown: Vec<ChunkPos>,
}

impl ViewportTracker {
    pub fn shown(&self) -> &[ChunkPos] {
        &self.shown
    }

    pub fn is_shown(&self, pos: ChunkPos) -> bool {
        self.shown.binary_search(&pos).is_ok()
    }

    pub fn clear(&mut self) {
        self.shown.clear();
    }

    /// forget chunks that never made it on screen so the next update retries them
    pub fn retain(&mut self, keep: impl Fn(ChunkPos) -> bool) {
        self.shown.retain(|&pos| keep(pos));
    }

    /// recompute the visible set; `None` when nothing changed
    pub fn update(&mut self, rect: WorldRect, chunk_pixels: f32) -> Option<ChunkDiff> {
        let current = visible_chunks(rect, chunk_pixels);
        if current == self.shown {
            return None;
        }
        let delta = diff(&self.shown, &current);
        self.shown = current;
        Some(delta)
    }
}
