use umbra_geom::CellBox;

use crate::bits::InteriorPlane;
use crate::constants::{REGION_DIM, ROW_BITS, ROW_MASK, WORDS_PER_Z_SLAB};

/// Tight bounds of the set bits of an interior plane, or `None` when no bit is set.
///
/// Each z-slab is four words; word `k` of a slab holds rows `y = 4k..4k+3`, one
/// 16-bit row per y. Slabs are OR-reduced into four combined words, y presence
/// is read from the 16-bit row groups and x presence by folding the combined
/// words down to a single row.
pub(crate) fn plane_bounds(plane: &InteriorPlane) -> Option<CellBox> {
    let mut combined = [0u64; WORDS_PER_Z_SLAB];
    let mut min_z = None;
    let mut max_z = 0;

    for (z, slab) in plane.chunks_exact(WORDS_PER_Z_SLAB).enumerate() {
        let any = slab.iter().fold(0, |acc, w| acc | w);
        if any == 0 {
            continue;
        }
        for (c, w) in combined.iter_mut().zip(slab) {
            *c |= *w;
        }
        min_z.get_or_insert(z);
        max_z = z;
    }
    let min_z = min_z?;

    let mut y_bits: u32 = 0;
    for (k, word) in combined.iter().enumerate() {
        for row in 0..4 {
            if (word >> (row * ROW_BITS)) & ROW_MASK != 0 {
                y_bits |= 1 << (k * 4 + row);
            }
        }
    }

    let mut x_bits = combined.iter().fold(0, |acc, w| acc | w);
    x_bits |= x_bits >> 32;
    x_bits |= x_bits >> 16;
    let x_bits = (x_bits & ROW_MASK) as u32;

    debug_assert!(x_bits != 0 && y_bits != 0);
    let min = [x_bits.trailing_zeros(), y_bits.trailing_zeros(), min_z as u32];
    let max = [
        32 - x_bits.leading_zeros(),
        32 - y_bits.leading_zeros(),
        max_z as u32 + 1,
    ];
    debug_assert!(max.iter().all(|m| *m <= REGION_DIM as u32));
    Some(CellBox::new(
        [min[0] as u8, min[1] as u8, min[2] as u8],
        [max[0] as u8, max[1] as u8, max[2] as u8],
    ))
}
