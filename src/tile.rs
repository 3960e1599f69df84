//! per‑tile state: three independent bits

use bitflags::bitflags;

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    struct TileFlags: u8 {
        const BOMB     = 0b001;
        const REVEALED = 0b010;
        const FLAGGED  = 0b100;
    }
}

/// A single board cell.
///
/// `revealed` and `flagged` are mutually exclusive; the only way to change
/// them is through [`Tile::revealed`] and [`Tile::with_flag_toggled`], both of
/// which refuse to produce the invalid combination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Tile(TileFlags);

impl Tile {
    pub const EMPTY: Tile = Tile(TileFlags::empty());
    pub const BOMB: Tile = Tile(TileFlags::BOMB);

    pub const fn empty() -> Self {
        Self::EMPTY
    }

    pub const fn bomb() -> Self {
        Self::BOMB
    }

    #[inline]
    pub const fn is_bomb(self) -> bool {
        self.0.contains(TileFlags::BOMB)
    }

    #[inline]
    pub const fn is_revealed(self) -> bool {
        self.0.contains(TileFlags::REVEALED)
    }

    #[inline]
    pub const fn is_flagged(self) -> bool {
        self.0.contains(TileFlags::FLAGGED)
    }

    /// copy with the revealed bit set; flagged tiles are returned unchanged
    #[must_use]
    pub fn revealed(self) -> Self {
        if self.is_flagged() {
            return self;
        }
        Self(self.0 | TileFlags::REVEALED)
    }

    /// copy with the flag flipped; revealed tiles are returned unchanged
    #[must_use]
    pub fn with_flag_toggled(self) -> Self {
        if self.is_revealed() {
            return self;
        }
        Self(self.0 ^ TileFlags::FLAGGED)
    }

    /// raw bits, for debugging / hud
    pub const fn bits(self) -> u8 {
        self.0.bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_constructors_match_bits() {
        assert_eq!(Tile::empty().bits(), 0);
        assert_eq!(Tile::bomb().bits(), 0b001);
        assert_eq!(Tile::empty().revealed().bits(), 0b010);
        assert_eq!(Tile::bomb().with_flag_toggled().bits(), 0b101);
    }

    #[test]
    fn flag_toggle_is_an_involution() {
        for base in [Tile::empty(), Tile::bomb()] {
            let flagged = base.with_flag_toggled();
            assert!(flagged.is_flagged());
            assert_eq!(flagged.with_flag_toggled(), base);
        }
    }

    #[test]
    fn revealed_and_flagged_never_coexist() {
        let shown = Tile::empty().revealed();
        assert_eq!(shown.with_flag_toggled(), shown);

        let flagged = Tile::empty().with_flag_toggled();
        assert_eq!(flagged.revealed(), flagged);
    }
}
