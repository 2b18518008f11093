use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use crossbeam_channel::Receiver;
use tracing::{debug, error, trace};

use crate::error::Result;
use crate::image::{MaskVolume, Volume};
use crate::shifter::TwinStackShifter;
use crate::shifts::ShiftVector;
use crate::stats::{manders, ColocAccumulator};

use super::job::{Job, ShiftResult};

/// Read-only run inputs plus the shared sink and control flags, held in one
/// `Arc` by the engine and every worker.
pub(super) struct WorkerContext {
    /// Channel-1 data, shifted per job.
    pub channel1: Volume,
    /// Channel-2 data, never shifted.
    pub channel2: Volume,
    /// Channel-1 ROI masks, confinement already intersected in.
    pub roi1: MaskVolume,
    /// Channel-2 ROI masks, confinement already intersected in.
    pub roi2: MaskVolume,
    /// Total of channel 1 within its own ROI.
    pub denom1: f64,
    /// Total of channel 2 within its own ROI.
    pub denom2: f64,
    pub results: Mutex<Vec<ShiftResult>>,
    pub failed_jobs: AtomicUsize,
    pub ready_workers: AtomicUsize,
    /// Raised by `end(true)`: workers exit after their current job.
    pub stop: AtomicBool,
}

/// Body of one worker thread.
///
/// Builds this worker's own per-row/column mask index (the expensive part),
/// reports readiness, then loops on the job queue until a stop sentinel, the
/// stop flag, or queue disconnection.
pub(super) fn worker_loop(id: usize, ctx: &WorkerContext, jobs: &Receiver<Job>) {
    let shifter = TwinStackShifter::from_masks(&ctx.roi1);
    ctx.ready_workers.fetch_add(1, Ordering::Release);
    debug!(worker = id, "worker ready");

    loop {
        let job = match jobs.recv() {
            Ok(job) => job,
            // Queue dropped: engine shutdown.
            Err(_) => break,
        };
        if ctx.stop.load(Ordering::Acquire) {
            break;
        }
        let (sequence, shift) = match job {
            Job::Shift { sequence, shift } => (sequence, shift),
            Job::Stop => break,
        };
        match evaluate_shift(ctx, &shifter, sequence, shift) {
            Ok(result) => {
                trace!(worker = id, sequence, ?shift, r = result.r, "job done");
                ctx.results
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner())
                    .push(result);
            }
            Err(err) => {
                error!(worker = id, sequence, ?shift, %err, "job failed, result dropped");
                ctx.failed_jobs.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    debug!(worker = id, "worker finished");
}

/// Compute one job's statistics: twin-shift channel 1 with its ROI masks,
/// then accumulate over every pixel where the shifted ROI-1 mask and the
/// unshifted ROI-2 mask are both set.
pub(super) fn evaluate_shift(
    ctx: &WorkerContext,
    shifter: &TwinStackShifter,
    sequence: u64,
    shift: ShiftVector,
) -> Result<ShiftResult> {
    let (shifted1, shifted_roi1) =
        shifter.run(ctx.channel1.slices(), ctx.roi1.slices(), shift.dx, shift.dy)?;

    let mut acc = ColocAccumulator::new();
    for z in 0..ctx.channel1.depth() {
        let data1 = &shifted1[z];
        let mask1 = &shifted_roi1[z];
        let data2 = ctx.channel2.slice(z);
        let mask2 = ctx.roi2.slice(z);
        let (h, w) = data1.dim();
        for row in 0..h {
            for col in 0..w {
                if mask1[[row, col]] && mask2[[row, col]] {
                    acc.push(data1[[row, col]] as f64, data2[[row, col]] as f64);
                }
            }
        }
    }

    Ok(ShiftResult {
        sequence,
        shift,
        distance: shift.distance(),
        m1: manders(acc.sum_x(), ctx.denom1),
        m2: manders(acc.sum_y(), ctx.denom2),
        r: acc.pearson(),
    })
}
