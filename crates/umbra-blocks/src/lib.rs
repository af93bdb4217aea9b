//! Block types and the registry that answers opacity questions about them.
#![forbid(unsafe_code)]

pub mod config;
pub mod registry;
pub mod types;

pub use registry::{BlockRegistry, BlockType};
pub use types::{Block, BlockId, BlockState, RenderKind};
