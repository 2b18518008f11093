mod config;
mod job;
mod worker;

pub use config::EngineConfig;
pub use job::ShiftResult;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use crossbeam_channel::Sender;
use tracing::{info, trace};

use crate::consts::{ENGINE_READY_POLL, ENGINE_READY_RETRIES, QUEUE_CAPACITY_PER_WORKER};
use crate::error::{CdaError, Result};
use crate::image::{check_shape, MaskVolume, Volume};
use crate::shifts::ShiftVector;

use job::Job;
use worker::{worker_loop, WorkerContext};

/// Everything the driver supplies for one engine run. All of it is read-only
/// for the duration of the run.
pub struct EngineInputs {
    pub channel1: Volume,
    pub channel2: Volume,
    pub roi1: MaskVolume,
    pub roi2: MaskVolume,
    /// Confinement mask, normally already intersected into the channel data
    /// and ROI masks by the driver. When present it is intersected into both
    /// ROI volumes again at construction, which is idempotent.
    pub confinement: Option<MaskVolume>,
    /// Total of channel 1 within its own ROI (see [`crate::stats::masked_total`]).
    pub denom1: f64,
    /// Total of channel 2 within its own ROI.
    pub denom2: f64,
}

impl EngineInputs {
    fn validate(&self) -> Result<()> {
        let shape = self.channel1.shape();
        check_shape("channel 2 volume", shape, self.channel2.shape())?;
        check_shape("channel 1 ROI masks", shape, self.roi1.shape())?;
        check_shape("channel 2 ROI masks", shape, self.roi2.shape())?;
        if let Some(confinement) = &self.confinement {
            check_shape("confinement masks", shape, confinement.shape())?;
        }
        Ok(())
    }
}

/// The Confined Displacement Algorithm engine: a bounded job queue feeding a
/// fixed pool of worker threads, each re-registering channel 1 by a candidate
/// displacement and recomputing colocalization statistics.
///
/// The driver calls [`submit`](Engine::submit) once per displacement and
/// [`end`](Engine::end) when done, then reads the result sink. Results arrive
/// in completion order; treat them as an unordered set keyed by shift vector.
pub struct Engine {
    ctx: Arc<WorkerContext>,
    jobs: Option<Sender<Job>>,
    workers: Vec<JoinHandle<()>>,
    worker_count: usize,
    expected_jobs: usize,
}

impl Engine {
    /// Validate dimensions, spawn the worker pool eagerly, and wait (bounded
    /// retry/sleep) for the workers to finish building their mask indices.
    ///
    /// If a worker is still indexing when the retries run out, the engine is
    /// returned anyway and [`is_ready`](Engine::is_ready) reports `false`
    /// until it catches up; submission is still safe, the queue buffers.
    pub fn new(inputs: EngineInputs, config: &EngineConfig) -> Result<Engine> {
        inputs.validate()?;

        let EngineInputs {
            channel1,
            channel2,
            roi1,
            roi2,
            confinement,
            denom1,
            denom2,
        } = inputs;

        let (roi1, roi2) = match &confinement {
            Some(confinement) => (roi1.intersect(confinement)?, roi2.intersect(confinement)?),
            None => (roi1, roi2),
        };

        let worker_count = config.threads.max(1);
        let capacity = QUEUE_CAPACITY_PER_WORKER * worker_count;
        let (tx, rx) = crossbeam_channel::bounded::<Job>(capacity);

        let ctx = Arc::new(WorkerContext {
            channel1,
            channel2,
            roi1,
            roi2,
            denom1,
            denom2,
            results: Mutex::new(Vec::new()),
            failed_jobs: AtomicUsize::new(0),
            ready_workers: AtomicUsize::new(0),
            stop: AtomicBool::new(false),
        });

        let mut workers = Vec::with_capacity(worker_count);
        for id in 0..worker_count {
            let ctx = Arc::clone(&ctx);
            let rx = rx.clone();
            let handle = thread::Builder::new()
                .name(format!("cda-worker-{id}"))
                .spawn(move || worker_loop(id, &ctx, &rx))
                .map_err(|err| CdaError::WorkerPool(format!("failed to spawn worker: {err}")))?;
            workers.push(handle);
        }

        let engine = Engine {
            ctx,
            jobs: Some(tx),
            workers,
            worker_count,
            expected_jobs: config.expected_jobs,
        };

        for _ in 0..ENGINE_READY_RETRIES {
            if engine.is_ready() {
                break;
            }
            thread::sleep(ENGINE_READY_POLL);
        }
        info!(
            workers = worker_count,
            queue_capacity = capacity,
            ready = engine.is_ready(),
            "engine started"
        );

        Ok(engine)
    }

    /// True once every worker has built its mask index and entered its loop.
    pub fn is_ready(&self) -> bool {
        self.ctx.ready_workers.load(Ordering::Acquire) == self.worker_count
    }

    /// Enqueue one displacement job.
    ///
    /// Blocks the caller while the queue is full (backpressure); a no-op
    /// after the pool has been torn down.
    pub fn submit(&self, sequence: u64, dx: i32, dy: i32) {
        if let Some(jobs) = &self.jobs {
            let _ = jobs.send(Job::Shift {
                sequence,
                shift: ShiftVector::new(dx, dy),
            });
        }
    }

    /// Shut the pool down and join every worker thread before returning.
    ///
    /// `now = true`: raise the stop flag and make one non-blocking sentinel
    /// attempt per worker, so workers blocked on an empty queue wake up;
    /// queued-but-untaken jobs are discarded without producing a result.
    ///
    /// `now = false`: blocking-enqueue one sentinel per worker, letting every
    /// previously queued job drain first.
    pub fn end(&mut self, now: bool) {
        let Some(jobs) = self.jobs.take() else {
            return;
        };

        if now {
            self.ctx.stop.store(true, Ordering::Release);
            for _ in 0..self.worker_count {
                let _ = jobs.try_send(Job::Stop);
            }
        } else {
            for _ in 0..self.worker_count {
                let _ = jobs.send(Job::Stop);
            }
        }
        // Dropping the sender disconnects the queue, so any worker that
        // missed its sentinel still exits on the next recv.
        drop(jobs);

        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                // Shutdown noise, not a run failure.
                trace!("worker panicked during shutdown");
            }
        }

        info!(
            results = self.completed(),
            failed = self.failed_jobs(),
            "engine stopped"
        );
    }

    /// Snapshot of the result sink, in completion order.
    pub fn results(&self) -> Vec<ShiftResult> {
        self.ctx
            .results
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Number of results recorded so far.
    pub fn completed(&self) -> usize {
        self.ctx
            .results
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    /// Jobs whose computation failed; their results were dropped.
    pub fn failed_jobs(&self) -> usize {
        self.ctx.failed_jobs.load(Ordering::Relaxed)
    }

    /// Expected total job count, as supplied by the driver for progress
    /// accounting.
    pub fn expected_jobs(&self) -> usize {
        self.expected_jobs
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.end(true);
    }
}
