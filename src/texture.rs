//! tile → sprite sheet cell

use crate::tile::Tile;

/// Keys into the 12‑cell tile sheet (`e f b 0 1 2 … 8`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TileTexture {
    #[default]
    Grass,
    Flag,
    Bomb,
    Digit(u8),
}

impl TileTexture {
    /// flagged → flag, hidden → grass, revealed bomb → bomb, otherwise the
    /// neighbour count; `count` is only evaluated for revealed safe tiles
    pub fn for_tile(tile: Tile, count: impl FnOnce() -> u8) -> Self {
        if tile.is_flagged() {
            TileTexture::Flag
        } else if !tile.is_revealed() {
            TileTexture::Grass
        } else if tile.is_bomb() {
            TileTexture::Bomb
        } else {
            TileTexture::Digit(count())
        }
    }

    pub const fn atlas_index(self) -> usize {
        match self {
            TileTexture::Grass    => 0,
            TileTexture::Flag     => 1,
            TileTexture::Bomb     => 2,
            TileTexture::Digit(n) => 3 + if n > 8 { 8 } else { n as usize },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_follows_tile_state() {
        assert_eq!(TileTexture::for_tile(Tile::empty(), || unreachable!()), TileTexture::Grass);
        assert_eq!(TileTexture::for_tile(Tile::bomb(), || unreachable!()), TileTexture::Grass);
        assert_eq!(
            TileTexture::for_tile(Tile::bomb().with_flag_toggled(), || unreachable!()),
            TileTexture::Flag
        );
        assert_eq!(TileTexture::for_tile(Tile::bomb().revealed(), || unreachable!()), TileTexture::Bomb);
        assert_eq!(TileTexture::for_tile(Tile::empty().revealed(), || 3), TileTexture::Digit(3));
    }

    #[test]
    fn atlas_order_matches_sheet() {
        assert_eq!(TileTexture::Grass.atlas_index(), 0);
        assert_eq!(TileTexture::Flag.atlas_index(), 1);
        assert_eq!(TileTexture::Bomb.atlas_index(), 2);
        assert_eq!(TileTexture::Digit(0).atlas_index(), 3);
        assert_eq!(TileTexture::Digit(8).atlas_index(), 11);
    }
}
