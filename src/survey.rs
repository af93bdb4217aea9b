//! Noise terrain survey: generate a grid of regions and analyze them all.

use std::error::Error;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use umbra_blocks::BlockRegistry;
use umbra_region::{RegionCoord, Terrain};
use umbra_runtime::{OcclusionJob, OcclusionOut, Runtime, analyze_all};

pub struct SurveyParams {
    pub extent: i32,
    pub min_ry: i32,
    pub max_ry: i32,
    pub camera: Option<RegionCoord>,
    pub occluders: bool,
    /// Analysis threads for both modes; `None` uses rayon's default.
    pub workers: Option<usize>,
    pub streaming: bool,
}

#[derive(Debug, Default)]
pub struct SurveyStats {
    pub regions: usize,
    pub near: usize,
    pub empty: usize,
    pub solid: usize,
    pub partial: usize,
    pub boxes: usize,
    pub occluder_boxes: usize,
    pub renderable: usize,
    pub analyze_us: u64,
}

impl SurveyStats {
    fn add(&mut self, out: &OcclusionOut, near: bool) {
        self.regions += 1;
        self.near += usize::from(near);
        if out.list.is_empty_region() {
            self.empty += 1;
        } else if out.open_count == 0 {
            self.solid += 1;
        } else {
            self.partial += 1;
        }
        self.boxes += out.list.box_count();
        self.occluder_boxes += out.occluders.as_ref().map_or(0, Vec::len);
        self.renderable += out.renderable;
        self.analyze_us += u64::from(out.t_us);
    }

    pub fn summary(&self) -> String {
        let avg = if self.regions == 0 {
            0.0
        } else {
            self.boxes as f64 / self.regions as f64
        };
        format!(
            "regions={} near={} empty={} solid={} partial={}\n\
             boxes={} (avg {:.2}/region) occluder_boxes={} renderable_cells={}\n\
             analyze_time={:.2}ms",
            self.regions,
            self.near,
            self.empty,
            self.solid,
            self.partial,
            self.boxes,
            avg,
            self.occluder_boxes,
            self.renderable,
            self.analyze_us as f64 / 1000.0,
        )
    }
}

fn coords(p: &SurveyParams) -> Vec<RegionCoord> {
    let mut out = Vec::new();
    for rz in -p.extent..=p.extent {
        for ry in p.min_ry..=p.max_ry {
            for rx in -p.extent..=p.extent {
                out.push(RegionCoord::new(rx, ry, rz));
            }
        }
    }
    out
}

pub fn run(
    reg: Arc<BlockRegistry>,
    terrain: &Terrain,
    params: &SurveyParams,
) -> Result<SurveyStats, Box<dyn Error>> {
    let coords = coords(params);
    let t0 = Instant::now();
    let jobs: Vec<OcclusionJob> = coords
        .par_iter()
        .map_init(
            || terrain.make_ctx(),
            |ctx, &coord| OcclusionJob {
                coord,
                rev: 0,
                job_id: 0,
                is_near: params.camera.is_some_and(|c| coord.is_near(c)),
                occluders: params.occluders,
                buf: Arc::new(terrain.region_buf(ctx, coord)),
                reg: reg.clone(),
            },
        )
        .collect();
    log::info!("generated {} region(s) in {:?}", jobs.len(), t0.elapsed());

    let t1 = Instant::now();
    let outs = if params.streaming {
        let mut rt = Runtime::new(params.workers)?;
        for (i, mut job) in jobs.iter().cloned().enumerate() {
            job.job_id = i as u64;
            rt.submit(job);
        }
        let mut outs = rt
            .wait_results(Duration::from_secs(600))
            .ok_or("timed out waiting for region analysis")?;
        outs.sort_by_key(|o| o.job_id);
        outs
    } else if let Some(n) = params.workers {
        let pool = ThreadPoolBuilder::new()
            .num_threads(n.max(1))
            .thread_name(|i| format!("umbra-survey-{i}"))
            .build()?;
        pool.install(|| analyze_all(&jobs))
    } else {
        analyze_all(&jobs)
    };
    log::info!("analyzed {} region(s) in {:?}", outs.len(), t1.elapsed());

    let mut stats = SurveyStats::default();
    for (job, out) in jobs.iter().zip(&outs) {
        debug_assert_eq!(job.coord, out.coord);
        stats.add(out, job.is_near);
    }
    Ok(stats)
}
