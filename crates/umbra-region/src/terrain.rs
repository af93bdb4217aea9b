use std::error::Error;
use std::fs;
use std::path::Path;

use fastnoise_lite::{FastNoiseLite, NoiseType};
use serde::Deserialize;
use umbra_blocks::{Block, BlockRegistry};

use crate::buf::RegionBuf;
use crate::coord::RegionCoord;

#[derive(Clone, Debug, Deserialize)]
pub struct TerrainConfig {
    #[serde(default = "default_seed")]
    pub seed: i32,
    #[serde(default = "default_height_frequency")]
    pub height_frequency: f32,
    #[serde(default = "default_min_height")]
    pub min_height: i32,
    #[serde(default = "default_max_height")]
    pub max_height: i32,
    #[serde(default = "default_water_level")]
    pub water_level: Option<i32>,
    #[serde(default = "default_cave_frequency")]
    pub cave_frequency: f32,
    /// Caves open where the 3D noise exceeds this; above 1.0 disables them.
    #[serde(default = "default_cave_threshold")]
    pub cave_threshold: f32,
    #[serde(default = "default_surface_block")]
    pub surface_block: String,
    #[serde(default = "default_stone_block")]
    pub stone_block: String,
    #[serde(default = "default_fluid_block")]
    pub fluid_block: String,
}

fn default_seed() -> i32 {
    1337
}
fn default_height_frequency() -> f32 {
    0.02
}
fn default_min_height() -> i32 {
    4
}
fn default_max_height() -> i32 {
    40
}
fn default_water_level() -> Option<i32> {
    Some(14)
}
fn default_cave_frequency() -> f32 {
    0.06
}
fn default_cave_threshold() -> f32 {
    0.55
}
fn default_surface_block() -> String {
    "grass".to_string()
}
fn default_stone_block() -> String {
    "stone".to_string()
}
fn default_fluid_block() -> String {
    "water".to_string()
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            height_frequency: default_height_frequency(),
            min_height: default_min_height(),
            max_height: default_max_height(),
            water_level: default_water_level(),
            cave_frequency: default_cave_frequency(),
            cave_threshold: default_cave_threshold(),
            surface_block: default_surface_block(),
            stone_block: default_stone_block(),
            fluid_block: default_fluid_block(),
        }
    }
}

impl TerrainConfig {
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: TerrainConfig = toml::from_str(s)?;
        if cfg.min_height > cfg.max_height {
            return Err(format!(
                "terrain min_height {} exceeds max_height {}",
                cfg.min_height, cfg.max_height
            )
            .into());
        }
        Ok(cfg)
    }
}

/// Per-thread noise samplers; not shared between workers.
pub struct TerrainCtx {
    pub height: FastNoiseLite,
    pub cave: FastNoiseLite,
}

/// Heightmap terrain with noise caves and a flat water table.
#[derive(Clone, Debug)]
pub struct Terrain {
    pub config: TerrainConfig,
    air: Block,
    surface: Block,
    stone: Block,
    fluid: Block,
}

impl Terrain {
    pub fn new(config: TerrainConfig, reg: &BlockRegistry) -> Self {
        let air = reg.block_by_name("air").unwrap_or(Block::AIR);
        let resolve = |name: &str| match reg.block_by_name(name) {
            Some(b) => b,
            None => {
                log::warn!("terrain block '{}' is not registered; using air", name);
                air
            }
        };
        Terrain {
            surface: resolve(&config.surface_block),
            stone: resolve(&config.stone_block),
            fluid: resolve(&config.fluid_block),
            air,
            config,
        }
    }

    pub fn make_ctx(&self) -> TerrainCtx {
        let mut height = FastNoiseLite::with_seed(self.config.seed);
        height.set_noise_type(Some(NoiseType::OpenSimplex2));
        height.set_frequency(Some(self.config.height_frequency));
        let mut cave = FastNoiseLite::with_seed(self.config.seed ^ 41_337);
        cave.set_noise_type(Some(NoiseType::OpenSimplex2));
        cave.set_frequency(Some(self.config.cave_frequency));
        TerrainCtx { height, cave }
    }

    pub fn height_at(&self, ctx: &TerrainCtx, wx: i32, wz: i32) -> i32 {
        let h = ctx.height.get_noise_2d(wx as f32, wz as f32);
        let (lo, hi) = (self.config.min_height, self.config.max_height);
        ((h + 1.0) * 0.5 * (hi - lo) as f32) as i32 + lo
    }

    pub fn block_at(&self, ctx: &TerrainCtx, wx: i32, wy: i32, wz: i32) -> Block {
        let height = self.height_at(ctx, wx, wz);
        if wy > height {
            return match self.config.water_level {
                Some(level) if wy <= level => self.fluid,
                _ => self.air,
            };
        }
        // keep a crust so caves stay mostly sealed
        if wy < height - 2 {
            let n = ctx.cave.get_noise_3d(wx as f32, wy as f32, wz as f32);
            if n > self.config.cave_threshold {
                return self.air;
            }
        }
        if wy == height { self.surface } else { self.stone }
    }

    pub fn region_buf(&self, ctx: &TerrainCtx, coord: RegionCoord) -> RegionBuf {
        RegionBuf::from_world_fn(coord, |x, y, z| self.block_at(ctx, x, y, z))
    }
}
