//! Greedy decomposition of a 4096-bit plane into disjoint boxes.

use std::cmp::Reverse;

use umbra_geom::{BoxRange, CellBox, PackedBox};

use crate::bits::InteriorPlane;
use crate::constants::{INTERIOR_WORDS, REGION_DIM, ROW_BITS, ROW_MASK, WORDS_PER_Z_SLAB};

const DIM: usize = REGION_DIM as usize;

/// Reusable box decomposer.
///
/// The result exactly covers the set bits of the input: every set cell lies in
/// one box and no box contains an unset cell. Boxes are ordered by descending
/// volume, ties kept in scan order, so equal inputs give equal outputs.
pub struct BoxFinder {
    work: InteriorPlane,
    boxes: Vec<PackedBox>,
}

impl Default for BoxFinder {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
const fn row_slot(y: usize, z: usize) -> (usize, usize) {
    (z * WORDS_PER_Z_SLAB + (y >> 2), (y & 3) * ROW_BITS)
}

impl BoxFinder {
    pub fn new() -> Self {
        Self {
            work: [0; INTERIOR_WORDS],
            boxes: Vec::new(),
        }
    }

    #[inline]
    fn row(&self, y: usize, z: usize) -> u32 {
        let (word, shift) = row_slot(y, z);
        ((self.work[word] >> shift) & ROW_MASK) as u32
    }

    #[inline]
    fn clear_row(&mut self, y: usize, z: usize, mask: u32) {
        let (word, shift) = row_slot(y, z);
        self.work[word] &= !(u64::from(mask) << shift);
    }

    /// Decomposes `plane` and returns the boxes, largest first.
    pub fn find_boxes(&mut self, plane: &InteriorPlane) -> &[PackedBox] {
        self.work = *plane;
        self.boxes.clear();

        for z in 0..DIM {
            for y in 0..DIM {
                loop {
                    let row = self.row(y, z);
                    if row == 0 {
                        break;
                    }
                    let x0 = row.trailing_zeros();
                    let len = (row >> x0).trailing_ones();
                    let mask = ((1u32 << len) - 1) << x0;

                    let mut y1 = y + 1;
                    while y1 < DIM && self.row(y1, z) & mask == mask {
                        y1 += 1;
                    }
                    let mut z1 = z + 1;
                    while z1 < DIM && (y..y1).all(|yy| self.row(yy, z1) & mask == mask) {
                        z1 += 1;
                    }
                    for zz in z..z1 {
                        for yy in y..y1 {
                            self.clear_row(yy, zz, mask);
                        }
                    }

                    let b = CellBox::new(
                        [x0 as u8, y as u8, z as u8],
                        [(x0 + len) as u8, y1 as u8, z1 as u8],
                    );
                    self.boxes.push(PackedBox::pack(b, BoxRange::for_volume(b.volume())));
                }
            }
        }
        debug_assert!(self.work.iter().all(|w| *w == 0));

        self.boxes.sort_by_key(|b| Reverse(b.cell_box().volume()));
        log::trace!(target: "occlusion", "box finder emitted {} box(es)", self.boxes.len());
        &self.boxes
    }

    pub fn boxes(&self) -> &[PackedBox] {
        &self.boxes
    }
}
