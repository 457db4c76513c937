use thiserror::Error;

/// Failures of the sparse-matrix engine.
///
/// `Mismatch` and `Corrupt` indicate a broken invariant inside the engine
/// itself. They are not recoverable: a matrix that produced one can no
/// longer be trusted and the whole computation must be abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MatError {
    #[error("row {0} is out of range (1..={1})")]
    BadRow(usize, usize),

    #[error("column {0} is out of range (1..={1})")]
    BadCol(usize, usize),

    #[error("vector is already deleted")]
    Deleted,

    #[error("row and column entries don't match")]
    Mismatch,

    #[error("entry's value is too big")]
    TooBig,

    #[error("corrupt data: {0}")]
    Corrupt(&'static str),
}
