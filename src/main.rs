mod report;
mod scene;
mod survey;

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use umbra_blocks::BlockRegistry;
use umbra_occlusion::RegionOcclusion;
use umbra_region::{BlockView, RegionCoord, Terrain, TerrainConfig};

use crate::report::{Format, RegionReport};
use crate::scene::Scene;
use crate::survey::SurveyParams;

#[derive(Debug, Parser)]
#[command(name = "umbra", about = "Region visibility and occlusion analysis", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Analyze a single region described by a scene file
    Analyze {
        /// Scene TOML with fill operations
        #[arg(short, long, value_name = "PATH")]
        scene: PathBuf,
        /// Block registry; overrides the scene's own `blocks` entry
        #[arg(short, long, value_name = "PATH")]
        blocks: Option<PathBuf>,
        /// Treat the camera as possibly inside the region
        #[arg(long)]
        near: bool,
        /// Also print boxes covering the closed cells
        #[arg(long)]
        occluders: bool,
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Generate noise terrain over a grid of regions and analyze every region
    Survey {
        #[arg(short, long, value_name = "PATH", default_value = "assets/blocks.toml")]
        blocks: PathBuf,
        /// Terrain parameters TOML
        #[arg(short, long, value_name = "PATH")]
        terrain: Option<PathBuf>,
        #[arg(long)]
        seed: Option<i32>,
        /// Region radius along X and Z
        #[arg(short, long, default_value_t = 4)]
        extent: i32,
        #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
        min_ry: i32,
        #[arg(long, default_value_t = 3)]
        max_ry: i32,
        /// Camera region as `x,y,z`; regions next to it keep sealed pockets
        #[arg(long, value_parser = parse_region)]
        camera: Option<RegionCoord>,
        /// Cave noise threshold; higher means fewer caves
        #[arg(long)]
        threshold: Option<f32>,
        #[arg(long)]
        occluders: bool,
        /// Analysis threads, in batch and streaming mode alike
        #[arg(short, long)]
        workers: Option<usize>,
        /// Feed regions through the worker runtime instead of one rayon batch
        #[arg(long)]
        streaming: bool,
    },
}

fn parse_region(s: &str) -> Result<RegionCoord, String> {
    let parts: Vec<_> = s.split(',').map(str::trim).collect();
    let [x, y, z] = parts[..] else {
        return Err(format!("expected x,y,z but got '{s}'"));
    };
    let num = |v: &str| v.parse::<i32>().map_err(|e| format!("'{v}': {e}"));
    Ok(RegionCoord::new(num(x)?, num(y)?, num(z)?))
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Analyze {
            scene,
            blocks,
            near,
            occluders,
            format,
        } => {
            let scene = Scene::load(&scene)?;
            let blocks_path = blocks
                .or_else(|| scene.blocks.clone())
                .ok_or("no block registry: pass --blocks or set `blocks` in the scene")?;
            let reg = BlockRegistry::load_from_path(&blocks_path)?;
            let buf = scene.build_buf(&reg)?;
            let is_near = near || scene.near;

            let mut occ = RegionOcclusion::new();
            let list = BlockView::new(&buf, &reg).analyze(&mut occ, is_near);
            let occluder_boxes = occluders.then(|| occ.occluder_boxes());
            let report = RegionReport::new(
                buf.coord,
                is_near,
                &list,
                (occ.open_count(), occ.renderable_count(), occ.closed_count()),
                occluder_boxes,
            );
            print!("{}", report.render(format)?);
        }
        Command::Survey {
            blocks,
            terrain,
            seed,
            extent,
            min_ry,
            max_ry,
            camera,
            threshold,
            occluders,
            workers,
            streaming,
        } => {
            let reg = Arc::new(BlockRegistry::load_from_path(&blocks)?);
            let mut cfg = match terrain {
                Some(path) => TerrainConfig::load_from_path(path)?,
                None => TerrainConfig::default(),
            };
            if let Some(seed) = seed {
                cfg.seed = seed;
            }
            if let Some(t) = threshold {
                cfg.cave_threshold = t;
            }
            if min_ry > max_ry {
                return Err(format!("--min-ry {min_ry} exceeds --max-ry {max_ry}").into());
            }
            let terrain = Terrain::new(cfg, &reg);
            let params = SurveyParams {
                extent: extent.max(0),
                min_ry,
                max_ry,
                camera,
                occluders,
                workers,
                streaming,
            };
            let stats = survey::run(reg, &terrain, &params)?;
            println!("{}", stats.summary());
        }
    }

    Ok(())
}
