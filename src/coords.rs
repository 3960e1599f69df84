//! tile / chunk / local coordinates
//!
//! The board is unbounded in every direction, so all global positions are
//! signed and the chunk split uses euclidean division (tile `-1` lives in
//! chunk `-1` at local offset `N - 1`).

/* ===========================================================
   global tile position
   =========================================================== */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TilePos {
    pub x: i64,
    pub y: i64,
}

impl TilePos {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// split into owning chunk and offset inside it
    #[inline]
    pub fn to_chunk_and_local(self, chunk_size: u32) -> (ChunkPos, LocalPos) {
        let n = chunk_size as i64;
        let chunk = ChunkPos::new(self.x.div_euclid(n), self.y.div_euclid(n));
        let local = LocalPos::new(self.x.rem_euclid(n) as u32, self.y.rem_euclid(n) as u32);
        (chunk, local)
    }

    /// the 8 surrounding positions (never `self`)
    pub fn neighbors(self) -> impl Iterator<Item = TilePos> {
        (-1..=1).flat_map(move |dy| {
            (-1..=1)
                .filter(move |&dx| dx != 0 || dy != 0)
                .map(move |dx| TilePos::new(self.x + dx, self.y + dy))
        })
    }
}

/* ===========================================================
   chunk grid position
   =========================================================== */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkPos {
    pub x: i64,
    pub y: i64,
}

impl ChunkPos {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// bottom‑left tile of the chunk
    #[inline]
    pub fn origin(self, chunk_size: u32) -> TilePos {
        let n = chunk_size as i64;
        TilePos::new(self.x * n, self.y * n)
    }

    #[inline]
    pub fn tile(self, local: LocalPos, chunk_size: u32) -> TilePos {
        let origin = self.origin(chunk_size);
        TilePos::new(origin.x + local.x as i64, origin.y + local.y as i64)
    }
}

/* ===========================================================
   offset inside a chunk (0 .. N)
   =========================================================== */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LocalPos {
    pub x: u32,
    pub y: u32,
}

impl LocalPos {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// row‑major index into a chunk grid / handle batch
    #[inline]
    pub fn index(self, chunk_size: u32) -> usize {
        self.y as usize * chunk_size as usize + self.x as usize
    }

    #[inline]
    pub fn from_index(idx: usize, chunk_size: u32) -> Self {
        let n = chunk_size as usize;
        Self::new((idx % n) as u32, (idx / n) as u32)
    }
}
