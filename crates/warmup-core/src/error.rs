//! Error types for warmup planning.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WarmupError {
    /// `--skip` and `--only` are mutually exclusive table selections.
    #[error("skip and only table selections cannot be combined")]
    AmbiguousSelection,

    /// A table literal did not look like `schema.table`.
    #[error("invalid table reference {0:?}, expected schema.table")]
    InvalidTableRef(String),
}
