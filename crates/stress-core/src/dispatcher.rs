//! Admission-controlled worker dispatch.

use crate::metrics::RunMetrics;
use crate::QueryExecutor;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Where the dispatcher gets its statements from.
pub enum StatementSource {
    /// Every dispatch cycle uses the same statement.
    Fixed(String),
    /// Each cycle consumes one statement from the generator queue.
    Queue(mpsc::Receiver<String>),
}

/// Dispatcher sizing.
#[derive(Debug, Clone, Copy)]
pub struct DispatcherConfig {
    /// Number of concurrent workers (database connections kept busy).
    pub concurrency: usize,
    /// Upper bound on dispatched-but-not-started statements. Admission
    /// pauses, rather than growing memory, when the backlog hits this.
    pub pending_watermark: usize,
}

/// Keeps a fixed set of workers busy executing statements.
///
/// Admission control is a bounded channel of capacity `pending_watermark`:
/// when the backlog is full, `send` parks the admission loop until a worker
/// frees a slot (the bounded-wait equivalent of re-checking a queue length).
/// On cancellation no new work is admitted, each worker finishes the
/// statement it is on, and the undispatched backlog is discarded.
pub struct Dispatcher {
    executor: Arc<dyn QueryExecutor>,
    config: DispatcherConfig,
    metrics: Arc<RunMetrics>,
}

impl Dispatcher {
    pub fn new(
        executor: Arc<dyn QueryExecutor>,
        config: DispatcherConfig,
        metrics: Arc<RunMetrics>,
    ) -> Self {
        Self {
            executor,
            config,
            metrics,
        }
    }

    /// Run until cancellation (or until a queue source is exhausted), then
    /// drain in-flight work and return.
    pub async fn run(&self, mut source: StatementSource, token: CancellationToken) {
        let (work_tx, work_rx) = mpsc::channel::<String>(self.config.pending_watermark.max(1));
        let workers = self.spawn_workers(work_rx, &token);

        loop {
            let statement = match &mut source {
                StatementSource::Fixed(statement) => {
                    if token.is_cancelled() {
                        break;
                    }
                    statement.clone()
                }
                StatementSource::Queue(rx) => {
                    tokio::select! {
                        _ = token.cancelled() => break,
                        next = rx.recv() => match next {
                            Some(statement) => statement,
                            None => break,
                        },
                    }
                }
            };

            tokio::select! {
                _ = token.cancelled() => break,
                sent = work_tx.send(statement) => {
                    if sent.is_err() {
                        break;
                    }
                }
            }
        }

        debug!("dispatch stopped, draining workers");
        drop(work_tx);
        for worker in workers {
            if let Err(e) = worker.await {
                debug!(error = %e, "worker task failed to join");
            }
        }
    }

    fn spawn_workers(
        &self,
        work_rx: mpsc::Receiver<String>,
        token: &CancellationToken,
    ) -> Vec<JoinHandle<()>> {
        let work_rx = Arc::new(Mutex::new(work_rx));
        (0..self.config.concurrency.max(1))
            .map(|worker_id| {
                let rx = work_rx.clone();
                let executor = self.executor.clone();
                let metrics = self.metrics.clone();
                let token = token.clone();
                tokio::spawn(async move {
                    loop {
                        // Cancellation is only observed between statements;
                        // an in-flight execution always completes.
                        let next = {
                            let mut rx = rx.lock().await;
                            tokio::select! {
                                _ = token.cancelled() => None,
                                statement = rx.recv() => statement,
                            }
                        };
                        let Some(statement) = next else { break };
                        match executor.execute(&statement).await {
                            Ok(latency_ms) => metrics.record_latency(latency_ms),
                            Err(e) => {
                                debug!(worker = worker_id, error = %e, "statement failed");
                                metrics.record_error();
                            }
                        }
                    }
                })
            })
            .collect()
    }
}
