//! fixed‑capacity pool of render slots
//!
//! Slots never move: `order` is a permutation of slot indices whose first
//! `used` entries are the live slots. Acquire takes `order[used]`, release
//! swaps the victim with the last live entry, both O(1). The renderer walks
//! the live prefix as one contiguous batch.

use std::sync::atomic::{AtomicU32, Ordering};

use bevy::math::Vec2;
use thiserror::Error;

use crate::texture::TileTexture;

static NEXT_POOL_ID: AtomicU32 = AtomicU32::new(0);

/// Reference to one slot of one pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Handle {
    pool: u32,
    slot: u32,
}

impl Handle {
    /// slot index inside the owning pool
    pub fn index(self) -> usize {
        self.slot as usize
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PoolError {
    #[error("handle pool exhausted (capacity {capacity})")]
    Exhausted { capacity: usize },
    #[error("handle {0:?} released twice")]
    DoubleRelease(Handle),
    #[error("handle {0:?} does not belong to this pool")]
    NotOwned(Handle),
    #[error("handle {0:?} is not acquired")]
    NotAcquired(Handle),
}

/// What the renderer needs to draw one tile.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RenderSlot {
    pub position: Vec2,
    pub texture: TileTexture,
    pub visible: bool,
}

#[derive(Debug)]
pub struct HandlePool {
    id: u32,
    slots: Vec<RenderSlot>,
    order: Vec<u32>,
    rank: Vec<u32>,
    used: usize,
    dirty: Vec<bool>,
    dirty_list: Vec<u32>,
}

impl HandlePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            id: NEXT_POOL_ID.fetch_add(1, Ordering::Relaxed),
            slots: vec![RenderSlot::default(); capacity],
            order: (0..capacity as u32).collect(),
            rank: (0..capacity as u32).collect(),
            used: 0,
            dirty: vec![false; capacity],
            dirty_list: Vec::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn used(&self) -> usize {
        self.used
    }

    pub fn available(&self) -> usize {
        self.capacity() - self.used
    }

    pub fn is_full(&self) -> bool {
        self.used == self.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    fn mark_dirty(&mut self, slot: u32) {
        let flag = &mut self.dirty[slot as usize];
        if !*flag {
            *flag = true;
            self.dirty_list.push(slot);
        }
    }

    /// rank of an owned handle inside the live prefix
    fn live_rank(&self, handle: Handle) -> Result<usize, PoolError> {
        if handle.pool != self.id || handle.index() >= self.capacity() {
            return Err(PoolError::NotOwned(handle));
        }
        let rank = self.rank[handle.index()] as usize;
        if rank >= self.used {
            return Err(PoolError::NotAcquired(handle));
        }
        Ok(rank)
    }

    /// take a free slot; it stays hidden until painted
    pub fn acquire(&mut self) -> Result<Handle, PoolError> {
        if self.is_full() {
            return Err(PoolError::Exhausted { capacity: self.capacity() });
        }
        let slot = self.order[self.used];
        self.used += 1;
        self.slots[slot as usize].visible = false;
        self.mark_dirty(slot);
        Ok(Handle { pool: self.id, slot })
    }

    /// return a slot; the live/free partition is untouched on error
    pub fn release(&mut self, handle: Handle) -> Result<(), PoolError> {
        let rank = self.live_rank(handle).map_err(|err| match err {
            PoolError::NotAcquired(h) => PoolError::DoubleRelease(h),
            other => other,
        })?;

        let last = self.used - 1;
        let moved = self.order[last];
        self.order.swap(rank, last);
        self.rank[moved as usize] = rank as u32;
        self.rank[handle.index()] = last as u32;
        self.used = last;

        self.slots[handle.index()].visible = false;
        self.mark_dirty(handle.slot);
        Ok(())
    }

    /// set position + texture of a live slot and make it visible
    pub fn paint(&mut self, handle: Handle, position: Vec2, texture: TileTexture) -> Result<(), PoolError> {
        self.live_rank(handle)?;
        let slot = &mut self.slots[handle.index()];
        let next = RenderSlot { position, texture, visible: true };
        if *slot != next {
            *slot = next;
            self.mark_dirty(handle.slot);
        }
        Ok(())
    }

    /// swap only the texture of a live slot
    pub fn set_texture(&mut self, handle: Handle, texture: TileTexture) -> Result<(), PoolError> {
        self.live_rank(handle)?;
        let slot = &mut self.slots[handle.index()];
        if slot.texture != texture {
            slot.texture = texture;
            self.mark_dirty(handle.slot);
        }
        Ok(())
    }

    pub fn get(&self, handle: Handle) -> Result<&RenderSlot, PoolError> {
        if handle.pool != self.id || handle.index() >= self.capacity() {
            return Err(PoolError::NotOwned(handle));
        }
        Ok(&self.slots[handle.index()])
    }

    /// live slot indices, contiguous
    pub fn used_slots(&self) -> &[u32] {
        &self.order[..self.used]
    }

    /// live handles with their render state, in batch order
    pub fn draw_batch(&self) -> impl Iterator<Item = (Handle, &RenderSlot)> + '_ {
        self.used_slots().iter().map(move |&slot| {
            (Handle { pool: self.id, slot }, &self.slots[slot as usize])
        })
    }

    /// slots changed since the last call, with their current state
    pub fn drain_dirty(&mut self) -> Vec<(usize, RenderSlot)> {
        let list = std::mem::take(&mut self.dirty_list);
        list.into_iter()
            .map(|slot| {
                self.dirty[slot as usize] = false;
                (slot as usize, self.slots[slot as usize])
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn assert_partition(pool: &HandlePool) {
        assert!(pool.used() <= pool.capacity());
        let mut seen = vec![false; pool.capacity()];
        for (rank, &slot) in pool.order.iter().enumerate() {
            assert!(!seen[slot as usize], "slot {slot} listed twice");
            seen[slot as usize] = true;
            assert_eq!(pool.rank[slot as usize] as usize, rank);
        }
    }

    #[test]
    fn nine_slot_scenario() {
        let mut pool = HandlePool::new(9);
        let handles: Vec<_> = (0..9).map(|_| pool.acquire()).collect::<Result<_, _>>().unwrap();
        assert_eq!(pool.acquire(), Err(PoolError::Exhausted { capacity: 9 }));

        pool.release(handles[4]).unwrap();
        assert!(pool.acquire().is_ok());
        assert_eq!(pool.acquire(), Err(PoolError::Exhausted { capacity: 9 }));
        assert_partition(&pool);
    }

    #[test]
    fn double_release_is_rejected_without_corruption() {
        let mut pool = HandlePool::new(3);
        let a = pool.acquire().unwrap();
        let b = pool.acquire().unwrap();
        pool.release(a).unwrap();

        assert_eq!(pool.release(a), Err(PoolError::DoubleRelease(a)));
        assert_eq!(pool.used(), 1);
        assert_eq!(pool.used_slots(), &[b.slot]);
        assert_partition(&pool);
    }

    #[test]
    fn foreign_handles_are_rejected() {
        let mut mine = HandlePool::new(2);
        let mut theirs = HandlePool::new(2);
        let foreign = theirs.acquire().unwrap();
        mine.acquire().unwrap();

        assert_eq!(mine.release(foreign), Err(PoolError::NotOwned(foreign)));
        assert_eq!(
            mine.paint(foreign, Vec2::ZERO, TileTexture::Bomb),
            Err(PoolError::NotOwned(foreign))
        );
        assert_eq!(mine.used(), 1);
        assert_eq!(theirs.used(), 1);
    }

    #[test]
    fn painting_requires_a_live_handle() {
        let mut pool = HandlePool::new(1);
        let h = pool.acquire().unwrap();
        assert!(!pool.get(h).unwrap().visible);

        pool.paint(h, Vec2::new(16.0, 48.0), TileTexture::Digit(2)).unwrap();
        let slot = *pool.get(h).unwrap();
        assert!(slot.visible);
        assert_eq!(slot.texture, TileTexture::Digit(2));

        pool.release(h).unwrap();
        assert!(!pool.get(h).unwrap().visible);
        assert_eq!(pool.set_texture(h, TileTexture::Flag), Err(PoolError::NotAcquired(h)));
    }

    #[test]
    fn random_interleavings_keep_invariants() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut pool = HandlePool::new(16);
        let mut live = Vec::new();

        for _ in 0..2_000 {
            if rng.gen_bool(0.55) {
                match pool.acquire() {
                    Ok(h) => live.push(h),
                    Err(err) => {
                        assert_eq!(err, PoolError::Exhausted { capacity: 16 });
                        assert_eq!(live.len(), 16);
                    }
                }
            } else if !live.is_empty() {
                let h = live.swap_remove(rng.gen_range(0..live.len()));
                pool.release(h).unwrap();
            }
            assert_eq!(pool.used(), live.len());
            assert_partition(&pool);
        }

        let batch: Vec<_> = pool.draw_batch().map(|(h, _)| h).collect();
        assert_eq!(batch.len(), live.len());
        assert!(live.iter().all(|h| batch.contains(h)));
    }

    #[test]
    fn dirty_slots_are_reported_once() {
        let mut pool = HandlePool::new(4);
        let h = pool.acquire().unwrap();
        pool.paint(h, Vec2::ONE, TileTexture::Grass).unwrap();
        let dirty = pool.drain_dirty();
        assert_eq!(dirty.len(), 1);
        assert_eq!(dirty[0].0, h.index());
        assert!(pool.drain_dirty().is_empty());

        // repainting with identical state is not a change
        pool.paint(h, Vec2::ONE, TileTexture::Grass).unwrap();
        assert!(pool.drain_dirty().is_empty());
    }
}
