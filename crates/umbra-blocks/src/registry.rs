use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use super::config::{BlockDef, BlocksConfig};
use super::types::{Block, BlockId, BlockState, RenderKind};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockType {
    pub id: BlockId,
    pub name: String,
    pub render: RenderKind,
    pub fluid: bool,
    pub opaque: bool,
    pub opaque_states: Option<Vec<BlockState>>,
}

impl BlockType {
    /// True when the cell has something to draw: a visible model or a fluid.
    #[inline]
    pub fn has_content(&self) -> bool {
        self.render != RenderKind::Invisible || self.fluid
    }

    /// True when this block in `state` blocks sight through its cell.
    #[inline]
    pub fn is_opaque(&self, state: BlockState) -> bool {
        if !self.opaque {
            return false;
        }
        match &self.opaque_states {
            Some(states) => states.contains(&state),
            None => true,
        }
    }

    fn from_def(id: BlockId, def: BlockDef) -> Self {
        let render = def.render.unwrap_or_default();
        let opaque = def.opaque.unwrap_or(render == RenderKind::Model);
        BlockType {
            id,
            name: def.name,
            render,
            fluid: def.fluid.unwrap_or(false),
            opaque,
            opaque_states: def.opaque_states,
        }
    }
}

#[derive(Default, Clone, Debug)]
pub struct BlockRegistry {
    pub blocks: Vec<Option<BlockType>>,
    pub by_name: HashMap<String, BlockId>,
    pub unknown_block_id: Option<BlockId>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self {
            blocks: Vec::new(),
            by_name: HashMap::new(),
            unknown_block_id: None,
        }
    }

    #[inline]
    pub fn get(&self, id: BlockId) -> Option<&BlockType> {
        self.blocks.get(id as usize).and_then(Option::as_ref)
    }

    /// Like [`get`](Self::get) but resolves unknown ids to the fallback block.
    #[inline]
    pub fn get_or_unknown(&self, id: BlockId) -> Option<&BlockType> {
        self.get(id)
            .or_else(|| self.unknown_block_id.and_then(|u| self.get(u)))
    }

    pub fn id_by_name(&self, name: &str) -> Option<BlockId> {
        self.by_name.get(name).copied()
    }

    pub fn block_by_name(&self, name: &str) -> Option<Block> {
        self.id_by_name(name).map(Block::new)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    pub fn load_from_path(blocks_path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let blocks_toml = fs::read_to_string(blocks_path)?;
        Self::from_toml_str(&blocks_toml)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: BlocksConfig = toml::from_str(toml_str)?;
        Self::from_configs(cfg)
    }

    pub fn from_configs(cfg: BlocksConfig) -> Result<Self, Box<dyn Error>> {
        let mut reg = BlockRegistry::new();
        for def in cfg.blocks.into_iter() {
            let id = def.id.unwrap_or(reg.blocks.len() as u16);
            if reg.by_name.contains_key(&def.name) {
                return Err(format!("duplicate block name '{}'", def.name).into());
            }
            let slot = id as usize;
            if reg.blocks.len() <= slot {
                reg.blocks.resize(slot + 1, None);
            }
            if let Some(existing) = &reg.blocks[slot] {
                return Err(format!(
                    "block '{}' reuses id {} already taken by '{}'",
                    def.name, id, existing.name
                )
                .into());
            }
            reg.by_name.insert(def.name.clone(), id);
            reg.blocks[slot] = Some(BlockType::from_def(id, def));
        }
        if let Some(name) = cfg.unknown_block.as_deref() {
            reg.unknown_block_id = reg.id_by_name(name);
            if reg.unknown_block_id.is_none() {
                log::warn!("unknown_block '{}' is not defined; falling back to id 0", name);
            }
        }
        if reg.unknown_block_id.is_none() && reg.get(0).is_some() {
            reg.unknown_block_id = Some(0);
        }
        log::debug!("block registry loaded: {} block type(s)", reg.len());
        Ok(reg)
    }

    /// Whether `b` contributes to occlusion at all (visible model or fluid).
    #[inline]
    pub fn has_content(&self, b: Block) -> bool {
        self.get_or_unknown(b.id)
            .map(BlockType::has_content)
            .unwrap_or(false)
    }

    /// Whether `b` blocks sight through its cell.
    #[inline]
    pub fn is_opaque(&self, b: Block) -> bool {
        self.get_or_unknown(b.id)
            .map(|ty| ty.is_opaque(b.state))
            .unwrap_or(false)
    }
}
