//! Core engine for MySQL stress testing.
//!
//! The pipeline is: a [`selector::WeightedChoice`] draws statements with
//! weight-proportional probability, a [`generator`] task keeps a bounded
//! queue primed, and a [`dispatcher::Dispatcher`] feeds a fixed set of
//! workers that execute statements through a [`QueryExecutor`] and record
//! outcomes into [`metrics::RunMetrics`].
//!
//! The actual database access lives behind the [`QueryExecutor`] trait so
//! the engine can be exercised against mocks.

use async_trait::async_trait;

pub mod dispatcher;
pub mod error;
pub mod generator;
pub mod metrics;
pub mod selector;

pub use dispatcher::{Dispatcher, DispatcherConfig, StatementSource};
pub use error::StressError;
pub use metrics::{RunMetrics, Summary};
pub use selector::WeightedChoice;

/// Executes a single SQL statement and reports its latency.
///
/// Implementations are expected to fetch and discard any result set; the
/// engine only cares about elapsed time and success.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Run `statement`, returning elapsed wall time in milliseconds.
    async fn execute(&self, statement: &str) -> anyhow::Result<u64>;
}
