//! Worker runtime that analyzes regions off the caller's thread.
#![forbid(unsafe_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, unbounded};
use hashbrown::HashMap;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use umbra_blocks::BlockRegistry;
use umbra_occlusion::{PackedBox, RegionOcclusion, RenderList};
use umbra_region::{BlockView, RegionBuf, RegionCoord};

#[derive(Clone, Debug)]
pub struct OcclusionJob {
    pub coord: RegionCoord,
    pub rev: u64,
    pub job_id: u64,
    pub is_near: bool,
    /// Also decompose the closed cells into occluder boxes.
    pub occluders: bool,
    pub buf: Arc<RegionBuf>,
    pub reg: Arc<BlockRegistry>,
}

#[derive(Clone, Debug)]
pub struct OcclusionOut {
    pub coord: RegionCoord,
    pub rev: u64,
    pub job_id: u64,
    pub list: RenderList,
    pub occluders: Option<Vec<PackedBox>>,
    pub open_count: usize,
    pub renderable: usize,
    pub closed: usize,
    pub t_us: u32,
}

fn run_job(occ: &mut RegionOcclusion, job: &OcclusionJob) -> OcclusionOut {
    let t0 = Instant::now();
    let list = BlockView::new(&job.buf, &job.reg).analyze(occ, job.is_near);
    let occluders = job.occluders.then(|| occ.occluder_boxes());
    let t_us = t0.elapsed().as_micros().min(u128::from(u32::MAX)) as u32;
    log::trace!(target: "occlusion", "region {:?} rev {} analyzed in {}us ({} boxes)",
        job.coord, job.rev, t_us, list.box_count());
    OcclusionOut {
        coord: job.coord,
        rev: job.rev,
        job_id: job.job_id,
        open_count: occ.open_count(),
        renderable: occ.renderable_count(),
        closed: occ.closed_count(),
        list,
        occluders,
        t_us,
    }
}

/// Analyzes a batch in parallel on the global rayon pool, one analyzer per
/// worker. Output order matches input order.
pub fn analyze_all(jobs: &[OcclusionJob]) -> Vec<OcclusionOut> {
    jobs.par_iter()
        .map_init(RegionOcclusion::new, |occ, job| run_job(occ, job))
        .collect()
}

pub struct Runtime {
    job_tx: Sender<OcclusionJob>,
    res_rx: Receiver<OcclusionOut>,
    _pool: ThreadPool,
    q: Arc<AtomicUsize>,
    inflight: Arc<AtomicUsize>,
    /// Submitted jobs whose result has not been taken off `res_rx` yet.
    outstanding: usize,
    /// Received by a `wait_results` call that timed out.
    buffered: Vec<OcclusionOut>,
    workers: usize,
    latest_rev: HashMap<RegionCoord, u64>,
}

impl Runtime {
    /// Starts `workers` analysis threads; `None` uses the available parallelism.
    pub fn new(workers: Option<usize>) -> Result<Self, ThreadPoolBuildError> {
        let workers = workers
            .unwrap_or_else(|| thread::available_parallelism().map(|n| n.get()).unwrap_or(8))
            .max(1);
        let (job_tx, job_rx) = unbounded::<OcclusionJob>();
        let (res_tx, res_rx) = unbounded::<OcclusionOut>();
        let q = Arc::new(AtomicUsize::new(0));
        let inflight = Arc::new(AtomicUsize::new(0));

        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("umbra-occl-{i}"))
            .build()?;
        for _ in 0..workers {
            let rx = job_rx.clone();
            let tx = res_tx.clone();
            let q = q.clone();
            let inflight = inflight.clone();
            pool.spawn(move || {
                // One analyzer per worker loop, reused across jobs.
                let mut occ = RegionOcclusion::new();
                while let Ok(job) = rx.recv() {
                    q.fetch_sub(1, Ordering::Relaxed);
                    inflight.fetch_add(1, Ordering::Relaxed);
                    let out = run_job(&mut occ, &job);
                    inflight.fetch_sub(1, Ordering::Relaxed);
                    if tx.send(out).is_err() {
                        break;
                    }
                }
            });
        }
        log::debug!(target: "occlusion", "runtime started with {} worker(s)", workers);

        Ok(Self {
            job_tx,
            res_rx,
            _pool: pool,
            q,
            inflight,
            outstanding: 0,
            buffered: Vec::new(),
            workers,
            latest_rev: HashMap::new(),
        })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Queues a job. A later submission for the same region with a higher
    /// `rev` makes this job's result stale.
    pub fn submit(&mut self, job: OcclusionJob) {
        let rev = self.latest_rev.entry(job.coord).or_insert(job.rev);
        *rev = (*rev).max(job.rev);
        self.q.fetch_add(1, Ordering::Relaxed);
        if self.job_tx.send(job).is_err() {
            self.q.fetch_sub(1, Ordering::Relaxed);
            return;
        }
        self.outstanding += 1;
    }

    /// Jobs submitted whose results have not been returned yet, stale ones
    /// included.
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    fn keep_current(&self, results: Vec<OcclusionOut>) -> Vec<OcclusionOut> {
        let before = results.len();
        let out: Vec<_> = results.into_iter().filter(|r| self.is_current(r)).collect();
        let stale = before - out.len();
        if stale > 0 {
            log::debug!(target: "occlusion", "dropped {} stale result(s)", stale);
        }
        out
    }

    fn is_current(&self, out: &OcclusionOut) -> bool {
        self.latest_rev
            .get(&out.coord)
            .is_none_or(|latest| out.rev >= *latest)
    }

    /// Finished results, minus those superseded by a newer revision.
    pub fn drain_results(&mut self) -> Vec<OcclusionOut> {
        let mut results = std::mem::take(&mut self.buffered);
        results.extend(self.res_rx.try_iter());
        self.outstanding -= results.len();
        self.keep_current(results)
    }

    /// Blocks until a result has arrived for every outstanding job or
    /// `timeout` elapses. Returns `None` on timeout; results received so far
    /// stay buffered for the next call.
    pub fn wait_results(&mut self, timeout: Duration) -> Option<Vec<OcclusionOut>> {
        let deadline = Instant::now() + timeout;
        while self.buffered.len() < self.outstanding {
            let left = deadline.saturating_duration_since(Instant::now());
            match self.res_rx.recv_timeout(left) {
                Ok(r) => self.buffered.push(r),
                Err(RecvTimeoutError::Timeout) => {
                    log::warn!(target: "occlusion", "timed out waiting for {} job(s)",
                        self.outstanding - self.buffered.len());
                    return None;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        let results = std::mem::take(&mut self.buffered);
        self.outstanding -= results.len();
        Some(self.keep_current(results))
    }

    /// `(queued, in flight)`.
    pub fn queue_debug_counts(&self) -> (usize, usize) {
        (
            self.q.load(Ordering::Relaxed),
            self.inflight.load(Ordering::Relaxed),
        )
    }
}
