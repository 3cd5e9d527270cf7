//! Batch-parallel warmup of MySQL tables.
//!
//! Tables are resolved from a selection policy ([`resolve`]), partitioned
//! into fixed-size batches, and warmed concurrently within each batch with a
//! barrier between batches ([`scheduler`]). Database access sits behind the
//! [`TableWarmer`] trait.

use async_trait::async_trait;

pub mod error;
pub mod resolve;
pub mod scheduler;
pub mod table;

pub use error::WarmupError;
pub use resolve::{resolve_tables, TableSelection};
pub use scheduler::{warm_all, SchedulerConfig, WarmupReport};
pub use table::TableRef;

/// Catalog discovery and the per-table warm operation.
#[async_trait]
pub trait TableWarmer: Send + Sync {
    /// List every user base table on the instance.
    async fn list_tables(&self) -> anyhow::Result<Vec<TableRef>>;

    /// Warm one table: full scan to pull its pages into the buffer pool,
    /// then refresh its statistics.
    async fn warm_table(&self, table: &TableRef) -> anyhow::Result<()>;
}
