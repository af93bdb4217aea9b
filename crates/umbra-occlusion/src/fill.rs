use std::collections::VecDeque;

use crate::address::{CellAddress, InteriorIndex};
use crate::bits::OcclusionBits;
use crate::boundary::{FACE_RULES, at};
use crate::constants::{REGION_DIM, X_STEP, Y_STEP, Z_STEP};

/// Exterior flood fill over the interior plane.
///
/// Every interior cell reachable from an open halo cell through open cells is
/// marked visited, and so is each closed cell bordering that reachable set.
pub(crate) struct ExteriorFill<'a> {
    bits: &'a mut OcclusionBits,
    queue: &'a mut VecDeque<InteriorIndex>,
}

impl<'a> ExteriorFill<'a> {
    pub fn new(bits: &'a mut OcclusionBits, queue: &'a mut VecDeque<InteriorIndex>) -> Self {
        queue.clear();
        Self { bits, queue }
    }

    /// Seeds from every open face-halo cell into the interior cell across the face.
    pub fn run(mut self) -> usize {
        let mut seeds = 0;
        for u in 0..REGION_DIM {
            for v in 0..REGION_DIM {
                for rule in FACE_RULES {
                    let open = match CellAddress::of(at(rule.neighbor, u, v)) {
                        CellAddress::Halo(h) => !self.bits.is_halo_closed(h),
                        CellAddress::Interior(_) => false,
                    };
                    if !open {
                        continue;
                    }
                    let cell = at(rule.cell, u, v);
                    let index = InteriorIndex::new(cell.x, cell.y, cell.z);
                    if self.set_visited(index) {
                        seeds += 1;
                        self.fill(index);
                    }
                }
            }
        }
        seeds
    }

    /// Marks `index` visited. Returns true only when it was unvisited and open.
    #[inline]
    fn set_visited(&mut self, index: InteriorIndex) -> bool {
        if self.bits.is_visited(index) {
            return false;
        }
        self.bits.exterior_visited[index.word()] |= index.mask();
        !self.bits.is_closed(index)
    }

    fn fill(&mut self, start: InteriorIndex) {
        self.visit(start);
        while let Some(next) = self.queue.pop_front() {
            self.visit(next);
        }
    }

    fn visit(&mut self, index: InteriorIndex) {
        let i = index.get();
        self.axis(i, index.x(), X_STEP);
        self.axis(i, index.y(), Y_STEP);
        self.axis(i, index.z(), Z_STEP);
    }

    // Neighbors along one axis, clamped at the region edge.
    #[inline]
    fn axis(&mut self, i: usize, coord: i32, step: usize) {
        if coord > 0 {
            self.enqueue_if_unvisited(i - step);
        }
        if coord < REGION_DIM - 1 {
            self.enqueue_if_unvisited(i + step);
        }
    }

    #[inline]
    fn enqueue_if_unvisited(&mut self, i: usize) {
        let index = InteriorIndex::from_raw(i);
        if self.set_visited(index) {
            self.queue.push_back(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::count_ones;

    #[test]
    fn open_region_is_fully_visited() {
        let mut bits = OcclusionBits::new();
        let mut queue = VecDeque::new();
        let seeds = ExteriorFill::new(&mut bits, &mut queue).run();
        // the first seed reaches everything
        assert_eq!(seeds, 1);
        assert_eq!(count_ones(&bits.exterior_visited), 4096);
        assert!(queue.is_empty());
    }

    #[test]
    fn closed_cells_are_visited_but_not_crossed() {
        let mut bits = OcclusionBits::new();
        // wall at x = 3 splits the region
        for z in 0..16 {
            for y in 0..16 {
                bits.set_closed(InteriorIndex::new(3, y, z));
            }
        }
        // seal every halo cell on the +x side and the +x part of the side faces
        for h in crate::boundary::halo_positions() {
            if h.x > 3 {
                if let CellAddress::Halo(h) = CellAddress::of(h) {
                    bits.set_halo_closed(h);
                }
            }
        }
        let mut queue = VecDeque::new();
        ExteriorFill::new(&mut bits, &mut queue).run();
        assert!(bits.is_visited(InteriorIndex::new(0, 8, 8)));
        assert!(bits.is_visited(InteriorIndex::new(3, 8, 8)));
        assert!(!bits.is_visited(InteriorIndex::new(4, 8, 8)));
        assert!(!bits.is_visited(InteriorIndex::new(15, 0, 0)));
        assert_eq!(count_ones(&bits.exterior_visited), 4 * 256);
    }
}
