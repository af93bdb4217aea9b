//! Cell coordinates and the two index domains of a region.
//!
//! Interior cells (all coordinates in `0..16`) are addressed by
//! [`InteriorIndex`]; halo cells (the one-cell shell in `-1..=16` around the
//! region) by [`HaloIndex`]. [`CellAddress::of`] is the only place a position
//! is translated into either domain.

use crate::constants::{
    INTERIOR_STATE_COUNT, PADDED_DIM, REGION_DIM, REGION_LAST, WORD_INDEX_MASK, WORD_INDEX_SHIFT,
};

/// Region-relative cell position. Interior cells lie in `0..16` on every axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CellPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl CellPos {
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    const fn axis_interior(v: i32) -> bool {
        v >= 0 && v < REGION_DIM
    }

    #[inline]
    const fn axis_padded(v: i32) -> bool {
        v >= -1 && v <= REGION_DIM
    }

    #[inline]
    pub const fn is_interior(self) -> bool {
        Self::axis_interior(self.x) && Self::axis_interior(self.y) && Self::axis_interior(self.z)
    }

    #[inline]
    pub const fn is_halo(self) -> bool {
        Self::axis_padded(self.x)
            && Self::axis_padded(self.y)
            && Self::axis_padded(self.z)
            && !self.is_interior()
    }

    /// Interior cell on the outer layer of the region.
    #[inline]
    pub const fn is_shell(self) -> bool {
        self.is_interior()
            && (self.x == 0
                || self.y == 0
                || self.z == 0
                || self.x == REGION_LAST
                || self.y == REGION_LAST
                || self.z == REGION_LAST)
    }
}

impl From<(i32, i32, i32)> for CellPos {
    fn from(value: (i32, i32, i32)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

/// Index of an interior cell: `x | y << 4 | z << 8`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InteriorIndex(u16);

impl InteriorIndex {
    /// Coordinates are truncated to four bits each; callers pass in-range values.
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self(((x & 0xF) | ((y & 0xF) << 4) | ((z & 0xF) << 8)) as u16)
    }

    #[inline]
    pub const fn from_raw(index: usize) -> Self {
        Self((index & (INTERIOR_STATE_COUNT - 1)) as u16)
    }

    #[inline]
    pub const fn get(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn x(self) -> i32 {
        (self.0 & 0xF) as i32
    }

    #[inline]
    pub const fn y(self) -> i32 {
        ((self.0 >> 4) & 0xF) as i32
    }

    #[inline]
    pub const fn z(self) -> i32 {
        ((self.0 >> 8) & 0xF) as i32
    }

    #[inline]
    pub const fn pos(self) -> CellPos {
        CellPos::new(self.x(), self.y(), self.z())
    }

    #[inline]
    pub(crate) const fn word(self) -> usize {
        self.get() >> WORD_INDEX_SHIFT
    }

    #[inline]
    pub(crate) const fn mask(self) -> u64 {
        1u64 << (self.get() & WORD_INDEX_MASK)
    }

    pub fn all() -> impl Iterator<Item = InteriorIndex> {
        (0..INTERIOR_STATE_COUNT).map(InteriorIndex::from_raw)
    }
}

/// Index of a halo cell in the padded 18³ space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HaloIndex(u16);

impl HaloIndex {
    #[inline]
    fn new(pos: CellPos) -> Self {
        debug_assert!(pos.is_halo(), "not a halo cell: {:?}", pos);
        let i = (pos.x + 1) + PADDED_DIM * ((pos.y + 1) + PADDED_DIM * (pos.z + 1));
        Self(i as u16)
    }

    #[inline]
    pub const fn get(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn pos(self) -> CellPos {
        let i = self.0 as i32;
        CellPos::new(
            i % PADDED_DIM - 1,
            (i / PADDED_DIM) % PADDED_DIM - 1,
            i / (PADDED_DIM * PADDED_DIM) - 1,
        )
    }

    #[inline]
    pub(crate) const fn word(self) -> usize {
        self.get() >> WORD_INDEX_SHIFT
    }

    #[inline]
    pub(crate) const fn mask(self) -> u64 {
        1u64 << (self.get() & WORD_INDEX_MASK)
    }
}

/// A cell position resolved into its index domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellAddress {
    Interior(InteriorIndex),
    Halo(HaloIndex),
}

impl CellAddress {
    /// Translates a position in `-1..=16` on every axis into its domain.
    #[inline]
    pub fn of(pos: CellPos) -> CellAddress {
        if pos.is_interior() {
            CellAddress::Interior(InteriorIndex::new(pos.x, pos.y, pos.z))
        } else {
            CellAddress::Halo(HaloIndex::new(pos))
        }
    }

    #[inline]
    pub fn pos(self) -> CellPos {
        match self {
            CellAddress::Interior(i) => i.pos(),
            CellAddress::Halo(h) => h.pos(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_index_layout() {
        let i = InteriorIndex::new(3, 5, 9);
        assert_eq!(i.get(), 3 | (5 << 4) | (9 << 8));
        assert_eq!(i.pos(), CellPos::new(3, 5, 9));
        assert_eq!(i.word(), i.get() >> 6);
    }

    #[test]
    fn interior_index_truncates() {
        assert_eq!(InteriorIndex::new(16, 0, 0), InteriorIndex::new(0, 0, 0));
        assert_eq!(InteriorIndex::from_raw(4096 + 7).get(), 7);
    }

    #[test]
    fn halo_positions_round_trip() {
        for z in -1..=16 {
            for y in -1..=16 {
                for x in -1..=16 {
                    let p = CellPos::new(x, y, z);
                    let addr = CellAddress::of(p);
                    assert_eq!(addr.pos(), p);
                    assert_eq!(matches!(addr, CellAddress::Halo(_)), p.is_halo());
                }
            }
        }
    }

    #[test]
    fn shell_membership() {
        assert!(CellPos::new(0, 7, 7).is_shell());
        assert!(CellPos::new(7, 15, 7).is_shell());
        assert!(!CellPos::new(1, 1, 14).is_shell());
        assert!(!CellPos::new(-1, 0, 0).is_shell());
    }
}
