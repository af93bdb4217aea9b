use std::collections::VecDeque;

use umbra_geom::{BoxRange, CellBox, PackedBox};

use crate::OcclusionSource;
use crate::address::{CellAddress, CellPos, InteriorIndex};
use crate::bits::{OcclusionBits, SHELL_MASK, count_ones};
use crate::boundary::{CORNER_RULES, EDGE_RULES, FACE_RULES, at, halo_positions};
use crate::bounds::plane_bounds;
use crate::box_finder::BoxFinder;
use crate::constants::{INTERIOR_STATE_COUNT, INTERIOR_WORDS, REGION_LAST};
use crate::fill::ExteriorFill;
use crate::render_list::RenderList;

#[inline]
fn interior(pos: CellPos) -> InteriorIndex {
    InteriorIndex::new(pos.x, pos.y, pos.z)
}

/// Visibility analyzer for one region slot.
///
/// Call [`prepare`](Self::prepare) with the current cell contents, then
/// [`build`](Self::build) once. The analyzer keeps its buffers between runs;
/// `prepare` resets every plane.
pub struct RegionOcclusion {
    bits: Box<OcclusionBits>,
    open_count: usize,
    queue: VecDeque<InteriorIndex>,
    box_finder: BoxFinder,
    bounds: Option<CellBox>,
    built: bool,
}

impl Default for RegionOcclusion {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionOcclusion {
    pub fn new() -> Self {
        Self {
            bits: Box::new(OcclusionBits::new()),
            open_count: INTERIOR_STATE_COUNT,
            queue: VecDeque::with_capacity(INTERIOR_STATE_COUNT),
            box_finder: BoxFinder::new(),
            bounds: None,
            built: false,
        }
    }

    /// Classifies the halo and then the interior from `source`.
    pub fn prepare<S: OcclusionSource + ?Sized>(&mut self, source: &S) {
        self.bits.clear();
        self.bounds = None;
        self.built = false;
        self.capture_exterior(source);
        self.open_count = INTERIOR_STATE_COUNT;
        self.capture_interior(source);
    }

    fn capture_exterior<S: OcclusionSource + ?Sized>(&mut self, source: &S) {
        for pos in halo_positions() {
            let state = source.state_at(pos);
            if !source.has_content(state) || !source.closed_at(state, pos) {
                continue;
            }
            if let CellAddress::Halo(h) = CellAddress::of(pos) {
                self.bits.set_halo_closed(h);
            }
        }
    }

    fn capture_interior<S: OcclusionSource + ?Sized>(&mut self, source: &S) {
        for index in InteriorIndex::all() {
            let pos = index.pos();
            let state = source.state_at(pos);
            if source.has_content(state) {
                self.set_visibility(index, true, source.closed_at(state, pos));
            }
        }
    }

    fn set_visibility(&mut self, index: InteriorIndex, renderable: bool, closed: bool) {
        if renderable {
            debug_assert!(!self.bits.is_renderable(index));
            self.bits.set_renderable(index);
        }
        if closed {
            debug_assert!(!self.bits.is_closed(index));
            debug_assert!(self.open_count > 0, "open cell count underflow");
            self.bits.set_closed(index);
            self.open_count -= 1;
        }
    }

    /// Runs the analysis and returns the render list.
    ///
    /// With `is_near` the camera may be inside the region, so sealed interior
    /// pockets stay renderable.
    pub fn build(&mut self, is_near: bool) -> RenderList {
        debug_assert!(!self.built, "build called twice without prepare");
        self.built = true;

        if self.open_count == 0 {
            // fully solid: only uncovered shell cells can show
            self.adjust_surface_visibility();
            self.bounds = Some(CellBox::FULL);
            log::trace!(target: "occlusion", "solid region, {} shell cell(s) renderable",
                count_ones(&self.bits.renderable));
            return RenderList::full();
        }
        self.compute_occlusion(is_near)
    }

    fn adjust_surface_visibility(&mut self) {
        for (r, shell) in self.bits.renderable.iter_mut().zip(SHELL_MASK.iter()) {
            *r &= *shell;
        }

        for u in 1..REGION_LAST {
            for v in 1..REGION_LAST {
                for rule in FACE_RULES {
                    if self.is_closed(at(rule.neighbor, u, v)) {
                        self.bits.clear_renderable(interior(at(rule.cell, u, v)));
                    }
                }
            }
        }

        for u in 1..REGION_LAST {
            for rule in EDGE_RULES {
                if rule.neighbors.iter().all(|n| self.is_closed(at(*n, u, 0))) {
                    self.bits.clear_renderable(interior(at(rule.cell, u, 0)));
                }
            }
        }

        for rule in CORNER_RULES {
            if rule.neighbors.iter().all(|n| self.is_closed(at(*n, 0, 0))) {
                self.bits.clear_renderable(interior(at(rule.cell, 0, 0)));
            }
        }
    }

    /// Unvisited cells off the shell cannot be seen from outside: seal them.
    fn hide_interior_closed_positions(&mut self) {
        let bits = &mut *self.bits;
        for w in 0..INTERIOR_WORDS {
            let hidden = !bits.exterior_visited[w] & !SHELL_MASK[w];
            bits.renderable[w] &= !hidden;
            bits.closed[w] |= hidden;
        }
    }

    fn compute_occlusion(&mut self, is_near: bool) -> RenderList {
        let seeds = ExteriorFill::new(&mut self.bits, &mut self.queue).run();

        if !is_near {
            self.hide_interior_closed_positions();
        }

        self.bounds = plane_bounds(&self.bits.renderable);
        let bounds = match self.bounds {
            None => PackedBox::EMPTY,
            Some(b) if b == CellBox::FULL => PackedBox::FULL,
            Some(b) => PackedBox::pack(b, BoxRange::Extreme),
        };

        let boxes = self.box_finder.find_boxes(&self.bits.renderable);
        log::trace!(target: "occlusion", "fill seeds={} visited={} boxes={} near={}",
            seeds, count_ones(&self.bits.exterior_visited), boxes.len(), is_near);
        RenderList::from_parts(bounds, boxes)
    }

    /// Closure of an interior or halo cell. Positions must lie in `-1..=16`.
    #[inline]
    pub fn is_closed(&self, pos: CellPos) -> bool {
        match CellAddress::of(pos) {
            CellAddress::Interior(i) => self.bits.is_closed(i),
            CellAddress::Halo(h) => self.bits.is_halo_closed(h),
        }
    }

    #[inline]
    pub fn should_render(&self, index: InteriorIndex) -> bool {
        self.bits.is_renderable(index)
    }

    /// Reached by the exterior fill during the last build.
    #[inline]
    pub fn is_exterior_visible(&self, index: InteriorIndex) -> bool {
        self.bits.is_visited(index)
    }

    /// Interior cells left open by the last `prepare`.
    #[inline]
    pub fn open_count(&self) -> usize {
        self.open_count
    }

    /// Bounds carried in slot 0 of the last render list. After the fast path
    /// (no open interior cell) this is the `FULL` sentinel whatever the
    /// renderable count, not the tight hull of the renderable cells.
    pub fn bounds(&self) -> Option<CellBox> {
        self.bounds
    }

    pub fn renderable_count(&self) -> usize {
        count_ones(&self.bits.renderable)
    }

    pub fn closed_count(&self) -> usize {
        count_ones(&self.bits.closed)
    }

    /// Boxes exactly covering the closed interior cells, pockets sealed by the
    /// last build included. Largest first.
    pub fn occluder_boxes(&mut self) -> Vec<PackedBox> {
        self.box_finder.find_boxes(&self.bits.closed).to_vec()
    }
}
