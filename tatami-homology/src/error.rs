use thiserror::Error;
use tatami_matrix::MatError;

/// Failures of a reduction run. All are fatal: the run is abandoned and
/// every matrix built so far is dropped with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReduceError {
    #[error(transparent)]
    Mat(#[from] MatError),

    #[error("complex is malformed: {ranks} group(s), {diffs} differential(s)")]
    BadShape { ranks: usize, diffs: usize },

    #[error("generator is not killed cleanly")]
    DirtyKill,

    #[error("matrix is corrupt")]
    CorruptMatrix,
}
