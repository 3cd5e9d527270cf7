//! Error types for the stress engine.

use thiserror::Error;

/// Errors raised while building a stress workload.
#[derive(Error, Debug)]
pub enum StressError {
    /// The weighted statement set is unusable (empty, zero weight, blank text).
    #[error("invalid weighted statements: {0}")]
    InvalidInput(String),

    /// A line of the statement file does not match `statement;weight`.
    #[error("malformed statement on line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },
}
