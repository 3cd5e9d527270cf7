//! Batch-barrier warmup scheduling.

use crate::table::TableRef;
use crate::TableWarmer;
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy)]
pub struct SchedulerConfig {
    /// Maximum tables warmed in parallel (one batch).
    pub concurrency: usize,
}

/// Outcome of a warmup run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarmupReport {
    /// Tables handed to a worker (including failed ones).
    pub processed: usize,
    /// Size of the resolved worklist.
    pub total: usize,
    /// Tables whose warm operation returned an error.
    pub failed: usize,
}

/// Warm `tables` in sequential batches of at most `concurrency`.
///
/// Every worker of a batch must finish before the next batch starts, so peak
/// parallelism is exactly the batch size. A failed table is logged and
/// counted without disturbing its siblings or later batches. Cancellation is
/// observed between batches only; an in-flight batch always completes.
pub async fn warm_all(
    warmer: Arc<dyn TableWarmer>,
    tables: Vec<TableRef>,
    config: SchedulerConfig,
    token: CancellationToken,
) -> WarmupReport {
    let total = tables.len();
    if total == 0 {
        warn!("no tables to warm up, complete");
        return WarmupReport {
            processed: 0,
            total: 0,
            failed: 0,
        };
    }

    let concurrency = config.concurrency.max(1).min(total);
    if concurrency < config.concurrency {
        info!(
            concurrency,
            "reduced concurrency to the number of tables"
        );
    }

    let mut processed = 0;
    let mut failed = 0;
    for batch in tables.chunks(concurrency) {
        if token.is_cancelled() {
            info!("cancelled, stopping before the next batch");
            break;
        }

        let mut workers = JoinSet::new();
        for table in batch {
            let warmer = warmer.clone();
            let table = table.clone();
            debug!(schema = %table.schema, table = %table.table, "table assigned");
            workers.spawn(async move {
                let result = warmer.warm_table(&table).await;
                (table, result)
            });
        }

        // Barrier: the batch is done only when every worker is.
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok((table, Ok(()))) => {
                    info!(schema = %table.schema, table = %table.table, "done");
                }
                Ok((table, Err(e))) => {
                    warn!(schema = %table.schema, table = %table.table, error = %e, "warmup failed");
                    failed += 1;
                }
                Err(e) => {
                    warn!(error = %e, "warmup worker panicked");
                    failed += 1;
                }
            }
        }

        processed += batch.len();
        info!(progress = %format!("{processed}/{total}"), "batch complete");
    }

    WarmupReport {
        processed,
        total,
        failed,
    }
}
