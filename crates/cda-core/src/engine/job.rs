use crate::shifts::ShiftVector;

/// One message on the job queue.
#[derive(Clone, Copy, Debug)]
pub(super) enum Job {
    /// Evaluate colocalization statistics at this displacement.
    Shift { sequence: u64, shift: ShiftVector },
    /// Termination sentinel: carries no shift, tells one worker to exit.
    Stop,
}

/// Colocalization statistics for one processed displacement.
///
/// Results land in the shared sink in completion order, not submission
/// order; `sequence` and `shift` identify which job a record belongs to.
#[derive(Clone, Copy, Debug)]
pub struct ShiftResult {
    pub sequence: u64,
    pub shift: ShiftVector,
    /// Displacement magnitude `sqrt(dx² + dy²)`; independent of pixel data.
    pub distance: f64,
    /// Mander's M1: shifted channel-1 overlap intensity over its ROI total.
    pub m1: f64,
    /// Mander's M2: channel-2 overlap intensity over its ROI total.
    pub m2: f64,
    /// Pearson's correlation over the overlap region; NaN when undefined.
    pub r: f64,
}
