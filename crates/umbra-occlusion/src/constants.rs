//! Shared constants for umbra-occlusion. Centralizes the region geometry numbers.

// Region geometry
pub(crate) const REGION_DIM: i32 = 16;
pub(crate) const REGION_LAST: i32 = REGION_DIM - 1;
pub const INTERIOR_STATE_COUNT: usize = 4096; // 16^3

// Halo geometry: padded 18^3 address space
pub(crate) const PADDED_DIM: i32 = REGION_DIM + 2;
pub(crate) const PADDED_STATE_COUNT: usize = 5832; // 18^3
pub const HALO_STATE_COUNT: usize = PADDED_STATE_COUNT - INTERIOR_STATE_COUNT;

// Bitset configuration (u64-based)
pub(crate) const BITS_PER_WORD: usize = 64;
pub(crate) const WORD_INDEX_SHIFT: usize = 6; // log2(64)
pub(crate) const WORD_INDEX_MASK: usize = 63; // (1<<6) - 1
pub(crate) const INTERIOR_WORDS: usize = INTERIOR_STATE_COUNT / BITS_PER_WORD;
pub(crate) const HALO_WORDS: usize = PADDED_STATE_COUNT.div_ceil(BITS_PER_WORD);

// Interior index layout: x in bits 0-3, y in 4-7, z in 8-11
pub(crate) const X_STEP: usize = 0x001;
pub(crate) const Y_STEP: usize = 0x010;
pub(crate) const Z_STEP: usize = 0x100;
pub(crate) const WORDS_PER_Z_SLAB: usize = 4;
pub(crate) const ROW_BITS: usize = 16;
pub(crate) const ROW_MASK: u64 = 0xFFFF;
