//! Per-region visibility analysis.
//!
//! A region is a 16×16×16 block of cells surrounded by a one-cell halo taken
//! from its neighbors. [`RegionOcclusion`] classifies every cell as open or
//! closed, flood fills from the open halo inward and reports which interior
//! cells can be seen from outside. The result is a [`RenderList`]: tight
//! renderable bounds followed by boxes exactly covering the renderable cells.
#![forbid(unsafe_code)]

mod address;
mod bits;
mod boundary;
mod bounds;
mod box_finder;
mod constants;
mod fill;
mod region;
mod render_list;


pub use address::{CellAddress, CellPos, HaloIndex, InteriorIndex};
pub use box_finder::BoxFinder;
pub use constants::{HALO_STATE_COUNT, INTERIOR_STATE_COUNT};
pub use region::RegionOcclusion;
pub use render_list::{FIRST_BOX, REGION_BOUNDS, RenderList};
pub use umbra_geom::{BoxRange, CellBox, PackedBox};

/// Cell contents seen by the analyzer.
///
/// Positions are region-relative and lie in `-1..=16` on every axis; anything
/// outside `0..16` on some axis is a halo cell owned by a neighbor region.
pub trait OcclusionSource {
    type State: Copy;

    fn state_at(&self, pos: CellPos) -> Self::State;

    /// True for a rendered model or a non-empty fluid. Cells without content
    /// are open and never renderable.
    fn has_content(&self, state: Self::State) -> bool;

    /// True when a cell with content blocks sight through it.
    fn closed_at(&self, state: Self::State, pos: CellPos) -> bool;
}

impl<T: OcclusionSource + ?Sized> OcclusionSource for &T {
    type State = T::State;

    #[inline]
    fn state_at(&self, pos: CellPos) -> Self::State {
        (**self).state_at(pos)
    }

    #[inline]
    fn has_content(&self, state: Self::State) -> bool {
        (**self).has_content(state)
    }

    #[inline]
    fn closed_at(&self, state: Self::State, pos: CellPos) -> bool {
        (**self).closed_at(state, pos)
    }
}
