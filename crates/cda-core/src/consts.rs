use std::time::Duration;

/// Largest shift radius the shift-set generator accepts. A design bound on
/// the displacement annulus, not an algorithmic limit of the shifter.
pub const MAX_SHIFT_RADIUS: u32 = 256;

/// Default seed for the shift-set subsample RNG. Fixed so that repeated runs
/// of the same configuration draw the same displacement vectors.
pub const DEFAULT_SHIFT_SEED: u64 = 0x5eed_cda0;

/// Job queue capacity as a multiple of the worker count.
pub const QUEUE_CAPACITY_PER_WORKER: usize = 2;

/// Sleep interval between readiness polls while the engine constructor waits
/// for workers to finish building their mask index lists.
pub const ENGINE_READY_POLL: Duration = Duration::from_millis(5);

/// Maximum number of readiness polls in the engine constructor. With
/// `ENGINE_READY_POLL` this bounds the wait to about one second; after that
/// the engine is returned with `is_ready() == false`.
pub const ENGINE_READY_RETRIES: usize = 200;

/// Minimum slice count to use slice-level Rayon parallelism when building
/// per-slice mask indices.
pub const PARALLEL_SLICE_THRESHOLD: usize = 4;
