use serde::Deserialize;

use super::types::RenderKind;

// Top-level blocks config file
#[derive(Deserialize, Debug, Clone, Default)]
pub struct BlocksConfig {
    pub blocks: Vec<BlockDef>,
    // Optional name of the block returned for ids the registry does not know.
    // If absent or not found, lookups fall back to the first block (air).
    #[serde(default)]
    pub unknown_block: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct BlockDef {
    pub name: String,
    #[serde(default)]
    pub id: Option<u16>,
    #[serde(default)]
    pub render: Option<RenderKind>,
    // Carries a non-empty fluid; such blocks take part in occlusion even when
    // their model is invisible.
    #[serde(default)]
    pub fluid: Option<bool>,
    // Blocks sight through the whole cell. Defaults to true for model blocks
    // and false for invisible ones.
    #[serde(default)]
    pub opaque: Option<bool>,
    // Restricts opacity to these state values (e.g. only the double slab).
    #[serde(default)]
    pub opaque_states: Option<Vec<u16>>,
}
