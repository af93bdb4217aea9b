use crate::address::{CellPos, HaloIndex, InteriorIndex};
use crate::constants::{HALO_WORDS, INTERIOR_STATE_COUNT, INTERIOR_WORDS, WORD_INDEX_MASK, WORD_INDEX_SHIFT};

pub(crate) type InteriorPlane = [u64; INTERIOR_WORDS];
pub(crate) type HaloPlane = [u64; HALO_WORDS];

/// Interior cells on the outer layer of the region.
pub(crate) static SHELL_MASK: InteriorPlane = shell_mask();

const fn shell_mask() -> InteriorPlane {
    let mut mask = [0u64; INTERIOR_WORDS];
    let mut i = 0;
    while i < INTERIOR_STATE_COUNT {
        let idx = InteriorIndex::from_raw(i);
        if CellPos::new(idx.x(), idx.y(), idx.z()).is_shell() {
            mask[i >> WORD_INDEX_SHIFT] |= 1u64 << (i & WORD_INDEX_MASK);
        }
        i += 1;
    }
    mask
}

/// Visibility bit planes for one region and its halo.
///
/// `renderable` and `exterior_visited` only exist for interior cells; the halo
/// only records closure.
#[derive(Clone)]
pub(crate) struct OcclusionBits {
    pub closed: InteriorPlane,
    pub renderable: InteriorPlane,
    pub exterior_visited: InteriorPlane,
    pub halo_closed: HaloPlane,
}

impl OcclusionBits {
    pub const fn new() -> Self {
        Self {
            closed: [0; INTERIOR_WORDS],
            renderable: [0; INTERIOR_WORDS],
            exterior_visited: [0; INTERIOR_WORDS],
            halo_closed: [0; HALO_WORDS],
        }
    }

    pub fn clear(&mut self) {
        self.closed.fill(0);
        self.renderable.fill(0);
        self.exterior_visited.fill(0);
        self.halo_closed.fill(0);
    }

    #[inline]
    pub fn is_closed(&self, i: InteriorIndex) -> bool {
        self.closed[i.word()] & i.mask() != 0
    }

    #[inline]
    pub fn is_renderable(&self, i: InteriorIndex) -> bool {
        self.renderable[i.word()] & i.mask() != 0
    }

    #[inline]
    pub fn is_visited(&self, i: InteriorIndex) -> bool {
        self.exterior_visited[i.word()] & i.mask() != 0
    }

    #[inline]
    pub fn is_halo_closed(&self, h: HaloIndex) -> bool {
        self.halo_closed[h.word()] & h.mask() != 0
    }

    #[inline]
    pub fn set_closed(&mut self, i: InteriorIndex) {
        self.closed[i.word()] |= i.mask();
    }

    #[inline]
    pub fn set_renderable(&mut self, i: InteriorIndex) {
        self.renderable[i.word()] |= i.mask();
    }

    #[inline]
    pub fn clear_renderable(&mut self, i: InteriorIndex) {
        self.renderable[i.word()] &= !i.mask();
    }

    #[inline]
    pub fn set_halo_closed(&mut self, h: HaloIndex) {
        self.halo_closed[h.word()] |= h.mask();
    }
}

#[inline]
pub(crate) fn count_ones(plane: &[u64]) -> usize {
    plane.iter().map(|w| w.count_ones() as usize).sum()
}
