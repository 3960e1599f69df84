//! deterministic per‑chunk mine layout
//!
//! Everything here is a pure function of `(seed, chunk, size, density)`;
//! a chunk regenerated in another session (or another thread) gets the same
//! bombs bit for bit.

use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;

use crate::coords::ChunkPos;
use crate::tile::Tile;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64  = 0x0000_0100_0000_01b3;

#[inline]
fn mix64(mut h: u64) -> u64 {
    h = h.wrapping_mul(0x517c_c1b7_2722_0a95);
    h ^= h >> 32;
    h = h.wrapping_mul(0x517c_c1b7_2722_0a95);
    h ^= h >> 32;
    h
}

/// stable 64‑bit seed for one chunk
///
/// FNV‑1a over the seed string followed by both coordinates, then a final
/// avalanche so neighbouring chunks do not get correlated streams.
pub fn chunk_seed(seed: &str, pos: ChunkPos) -> u64 {
    let mut h = FNV_OFFSET;
    let coords = pos.x.to_le_bytes().into_iter().chain(pos.y.to_le_bytes());
    for byte in seed.bytes().chain(coords) {
        h ^= byte as u64;
        h = h.wrapping_mul(FNV_PRIME);
    }
    mix64(h)
}

/// `⌊N²·density⌋`, saturating at both ends (NaN counts as zero)
pub fn bomb_count(chunk_size: u32, density: f32) -> usize {
    let cells = (chunk_size as usize) * (chunk_size as usize);
    if density.is_nan() || density <= 0.0 {
        return 0;
    }
    if density >= 1.0 {
        return cells;
    }
    ((cells as f64 * density as f64).floor() as usize).min(cells)
}

/// row‑major `N × N` grid with exactly [`bomb_count`] bombs
pub fn generate(seed: &str, pos: ChunkPos, chunk_size: u32, density: f32) -> Vec<Tile> {
    let cells = (chunk_size as usize) * (chunk_size as usize);
    let mut tiles = vec![Tile::empty(); cells];
    let bombs = bomb_count(chunk_size, density);
    if bombs == 0 {
        return tiles;
    }

    let mut rng = StdRng::seed_from_u64(chunk_seed(seed, pos));
    for idx in index::sample(&mut rng, cells, bombs) {
        tiles[idx] = Tile::bomb();
    }
    tiles
}
