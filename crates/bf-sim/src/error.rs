//! Error types for simulation operations.

use thiserror::Error;

/// Errors raised before any year is simulated. Numeric conditions inside a
/// year (non-convergence, negative intermediates) are handled by clamping
/// and trial caps, not signalled.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid configuration: {what}")]
    Config { what: &'static str },

    #[error("Invalid flow trace: {what}")]
    Trace { what: String },
}

pub type SimResult<T> = Result<T, SimError>;
