//! Integer cell boxes and their packed 32-bit encoding.
#![forbid(unsafe_code)]

/// Cells per region axis.
pub const REGION_DIM: u8 = 16;

/// Coarse size class carried alongside a packed box.
///
/// Consumers use it to skip small boxes once a region is far from the camera.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum BoxRange {
    Near = 0,
    Mid = 1,
    Far = 2,
    Extreme = 3,
}

impl BoxRange {
    #[inline]
    pub const fn from_bits(bits: u32) -> BoxRange {
        match bits & 3 {
            0 => BoxRange::Near,
            1 => BoxRange::Mid,
            2 => BoxRange::Far,
            _ => BoxRange::Extreme,
        }
    }

    /// Size class for a box of `volume` cells.
    #[inline]
    pub const fn for_volume(volume: u32) -> BoxRange {
        if volume < 8 {
            BoxRange::Near
        } else if volume < 64 {
            BoxRange::Mid
        } else if volume < 512 {
            BoxRange::Far
        } else {
            BoxRange::Extreme
        }
    }
}

/// Axis-aligned box in region cell units. `max` is exclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CellBox {
    pub min: [u8; 3],
    pub max: [u8; 3],
}

impl CellBox {
    pub const FULL: CellBox = CellBox {
        min: [0, 0, 0],
        max: [REGION_DIM, REGION_DIM, REGION_DIM],
    };

    #[inline]
    pub const fn new(min: [u8; 3], max: [u8; 3]) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        (0..3).any(|a| self.max[a] <= self.min[a])
    }

    #[inline]
    pub fn volume(&self) -> u32 {
        if self.is_empty() {
            return 0;
        }
        (0..3)
            .map(|a| u32::from(self.max[a] - self.min[a]))
            .product()
    }

    #[inline]
    pub fn contains(&self, x: u8, y: u8, z: u8) -> bool {
        let p = [x, y, z];
        (0..3).all(|a| p[a] >= self.min[a] && p[a] < self.max[a])
    }

    #[inline]
    pub fn intersects(&self, other: &CellBox) -> bool {
        (0..3).all(|a| self.min[a] < other.max[a] && other.min[a] < self.max[a])
    }

    /// Iterates every cell inside the box, X fastest.
    pub fn cells(&self) -> impl Iterator<Item = (u8, u8, u8)> + '_ {
        let b = *self;
        (b.min[2]..b.max[2]).flat_map(move |z| {
            (b.min[1]..b.max[1]).flat_map(move |y| (b.min[0]..b.max[0]).map(move |x| (x, y, z)))
        })
    }
}

/// A [`CellBox`] plus [`BoxRange`] packed into one word.
///
/// Layout, low bits first: min x/y/z and max x/y/z at five bits each, then the
/// two range bits. Zero is reserved for [`PackedBox::EMPTY`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PackedBox(pub u32);

const FIELD_BITS: u32 = 5;
const FIELD_MASK: u32 = (1 << FIELD_BITS) - 1;
const RANGE_SHIFT: u32 = FIELD_BITS * 6;

impl PackedBox {
    pub const EMPTY: PackedBox = PackedBox(0);
    pub const FULL: PackedBox = PackedBox::pack(CellBox::FULL, BoxRange::Extreme);

    #[inline]
    pub const fn pack(b: CellBox, range: BoxRange) -> PackedBox {
        let v = (b.min[0] as u32)
            | ((b.min[1] as u32) << FIELD_BITS)
            | ((b.min[2] as u32) << (FIELD_BITS * 2))
            | ((b.max[0] as u32) << (FIELD_BITS * 3))
            | ((b.max[1] as u32) << (FIELD_BITS * 4))
            | ((b.max[2] as u32) << (FIELD_BITS * 5))
            | ((range as u32) << RANGE_SHIFT);
        PackedBox(v)
    }

    #[inline]
    pub fn unpack(self) -> (CellBox, BoxRange) {
        let v = self.0;
        let f = |i: u32| ((v >> (FIELD_BITS * i)) & FIELD_MASK) as u8;
        (
            CellBox {
                min: [f(0), f(1), f(2)],
                max: [f(3), f(4), f(5)],
            },
            BoxRange::from_bits(v >> RANGE_SHIFT),
        )
    }

    #[inline]
    pub fn cell_box(self) -> CellBox {
        self.unpack().0
    }

    #[inline]
    pub const fn range(self) -> BoxRange {
        BoxRange::from_bits(self.0 >> RANGE_SHIFT)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self == PackedBox::EMPTY
    }

    #[inline]
    pub fn is_full(self) -> bool {
        self == PackedBox::FULL
    }
}
