//! Region coordinates, padded block buffers and the block-backed occlusion source.
#![forbid(unsafe_code)]

pub mod buf;
pub mod coord;
pub mod terrain;
pub mod view;

pub use buf::RegionBuf;
pub use coord::{REGION_SIZE, RegionCoord};
pub use terrain::{Terrain, TerrainConfig, TerrainCtx};
pub use view::BlockView;
