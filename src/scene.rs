//! Hand-authored single-region scenes for `umbra analyze`.

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use umbra_blocks::{Block, BlockRegistry};
use umbra_region::{RegionBuf, RegionCoord};

#[derive(Clone, Debug, Deserialize)]
pub struct Scene {
    /// Block registry, relative to the scene file.
    #[serde(default)]
    pub blocks: Option<PathBuf>,
    #[serde(default)]
    pub near: bool,
    #[serde(default)]
    pub coord: [i32; 3],
    /// Block filling the whole buffer, halo included, before any op runs.
    #[serde(default = "default_fill")]
    pub fill: String,
    #[serde(default)]
    pub ops: Vec<FillOp>,
}

fn default_fill() -> String {
    "air".to_string()
}

/// Fills an inclusive box of local coordinates; `-1` and `16` reach the halo.
#[derive(Clone, Debug, Deserialize)]
pub struct FillOp {
    pub block: String,
    pub min: [i32; 3],
    #[serde(default)]
    pub max: Option<[i32; 3]>,
    #[serde(default)]
    pub state: u16,
}

impl Scene {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let path = path.as_ref();
        let s = fs::read_to_string(path)?;
        let mut scene = Self::from_toml_str(&s)?;
        if let (Some(blocks), Some(dir)) = (scene.blocks.as_mut(), path.parent()) {
            if blocks.is_relative() {
                *blocks = dir.join(&*blocks);
            }
        }
        Ok(scene)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, Box<dyn Error>> {
        Ok(toml::from_str(s)?)
    }

    pub fn region_coord(&self) -> RegionCoord {
        let [x, y, z] = self.coord;
        RegionCoord::new(x, y, z)
    }

    fn lookup(reg: &BlockRegistry, name: &str) -> Result<Block, Box<dyn Error>> {
        reg.block_by_name(name)
            .ok_or_else(|| format!("unknown block '{}' in scene", name).into())
    }

    pub fn build_buf(&self, reg: &BlockRegistry) -> Result<RegionBuf, Box<dyn Error>> {
        let fill = Self::lookup(reg, &self.fill)?;
        let mut buf = RegionBuf::filled(self.region_coord(), fill);
        for (n, op) in self.ops.iter().enumerate() {
            let block = Block {
                state: op.state,
                ..Self::lookup(reg, &op.block)?
            };
            let max = op.max.unwrap_or(op.min);
            let written = buf.fill_box(op.min, max, block);
            if written == 0 {
                log::warn!("scene op #{} ({}) lies outside the region", n, op.block);
            }
        }
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOCKS: &str = r#"
        [[blocks]]
        name = "air"
        render = "invisible"
        [[blocks]]
        name = "stone"
    "#;

    #[test]
    fn ops_apply_in_order() {
        let reg = BlockRegistry::from_toml_str(BLOCKS).unwrap();
        let scene = Scene::from_toml_str(
            r#"
            near = true
            [[ops]]
            block = "stone"
            min = [0, 0, 0]
            max = [3, 3, 3]
            [[ops]]
            block = "air"
            min = [1, 1, 1]
            "#,
        )
        .unwrap();
        assert!(scene.near);
        let buf = scene.build_buf(&reg).unwrap();
        let stone = reg.block_by_name("stone").unwrap();
        assert_eq!(buf.get_local(0, 0, 0), stone);
        assert_eq!(buf.get_local(1, 1, 1), Block::AIR);
        assert_eq!(buf.get_local(4, 0, 0), Block::AIR);
    }

    fn asset(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/scenes").join(name)
    }

    fn analyze_asset(name: &str, is_near: bool) -> umbra_occlusion::RegionOcclusion {
        let scene = Scene::load(asset(name)).unwrap();
        let reg = BlockRegistry::load_from_path(scene.blocks.as_ref().unwrap()).unwrap();
        let buf = scene.build_buf(&reg).unwrap();
        let mut occ = umbra_occlusion::RegionOcclusion::new();
        let _ = umbra_region::BlockView::new(&buf, &reg).analyze(&mut occ, is_near);
        occ
    }

    #[test]
    fn bundled_sealed_room_hides_its_lantern_when_far() {
        let lantern = umbra_occlusion::InteriorIndex::new(7, 9, 7);
        assert!(!analyze_asset("sealed_room.toml", false).should_render(lantern));
        assert!(analyze_asset("sealed_room.toml", true).should_render(lantern));
    }

    #[test]
    fn bundled_buried_scene_shows_only_the_opening() {
        let occ = analyze_asset("buried.toml", false);
        assert_eq!(occ.open_count(), 0);
        assert_eq!(occ.renderable_count(), 4);
    }

    #[test]
    fn bundled_pond_renders_water() {
        let occ = analyze_asset("pond.toml", false);
        assert!(occ.should_render(umbra_occlusion::InteriorIndex::new(6, 6, 6)));
        assert!(!occ.should_render(umbra_occlusion::InteriorIndex::new(8, 2, 8)));
    }

    #[test]
    fn unknown_block_names_are_errors() {
        let reg = BlockRegistry::from_toml_str(BLOCKS).unwrap();
        let scene = Scene::from_toml_str("fill = \"bedrock\"").unwrap();
        assert!(scene.build_buf(&reg).is_err());
    }
}
