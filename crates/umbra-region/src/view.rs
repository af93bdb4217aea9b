use umbra_blocks::{Block, BlockRegistry};
use umbra_occlusion::{CellPos, OcclusionSource, RegionOcclusion, RenderList};

use crate::buf::RegionBuf;

/// A region buffer read through a block registry.
#[derive(Clone, Copy)]
pub struct BlockView<'a> {
    pub buf: &'a RegionBuf,
    pub reg: &'a BlockRegistry,
}

impl<'a> BlockView<'a> {
    pub fn new(buf: &'a RegionBuf, reg: &'a BlockRegistry) -> Self {
        Self { buf, reg }
    }

    /// Prepares `occ` from this view and builds the render list.
    pub fn analyze(&self, occ: &mut RegionOcclusion, is_near: bool) -> RenderList {
        occ.prepare(self);
        occ.build(is_near)
    }
}

impl OcclusionSource for BlockView<'_> {
    type State = Block;

    #[inline]
    fn state_at(&self, pos: CellPos) -> Block {
        self.buf.get_local(pos.x, pos.y, pos.z)
    }

    #[inline]
    fn has_content(&self, state: Block) -> bool {
        self.reg.has_content(state)
    }

    #[inline]
    fn closed_at(&self, state: Block, _pos: CellPos) -> bool {
        self.reg.is_opaque(state)
    }
}
