use thiserror::Error;

/// Failures surfaced by the integration engine. No partial trajectory accompanies an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    #[error("Step count must be a positive integer, got {0}.")]
    InvalidStepCount(i64),

    #[error("Derivative dimension mismatch. Expected {expected}, got {found}.")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("Non-finite state produced at step {step} (t = {time}).")]
    NonFiniteResult { step: usize, time: f64 },

    #[error("Initial state must have positive dimension.")]
    EmptyState,

    #[error("Integration interval [{t0}, {tf}] yields a non-finite step size.")]
    NonFiniteInterval { t0: f64, tf: f64 },
}
