//! Latency and error accumulation across workers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Shared run metrics, written concurrently by every worker.
///
/// Latencies go through a mutex, the error count through an atomic; lost
/// updates are not acceptable here since the final report is the whole point
/// of a run.
#[derive(Default)]
pub struct RunMetrics {
    errors: AtomicU64,
    latencies: Mutex<Vec<u64>>,
}

impl RunMetrics {
    /// Record one successful execution's latency in milliseconds.
    pub fn record_latency(&self, latency_ms: u64) {
        // A panicked worker must not take the final report down with it.
        self.latencies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(latency_ms);
    }

    /// Record one failed execution. Errors are counted, not aborted on.
    pub fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Compute the final summary. Call once, after the worker pool drained.
    pub fn summarize(&self, elapsed: Duration) -> Summary {
        let mut latencies = self
            .latencies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        latencies.sort_unstable();

        let total_queries = latencies.len() as u64;
        let total_time = elapsed.as_secs_f64();
        let qps = if total_time > 0.0 {
            total_queries as f64 / total_time
        } else {
            0.0
        };

        Summary {
            latency_min: latencies.first().copied().unwrap_or(0),
            latency_max: latencies.last().copied().unwrap_or(0),
            latency_avg: average(&latencies),
            latency_p95: percentile_95(&latencies),
            total_queries,
            total_errors: self.errors.load(Ordering::Relaxed),
            total_time,
            qps,
        }
    }
}

fn average(sorted: &[u64]) -> u64 {
    if sorted.is_empty() {
        return 0;
    }
    sorted.iter().sum::<u64>() / sorted.len() as u64
}

/// 95th percentile of an ascending-sorted slice: value at the 0-based index
/// `ceil(0.95 * count) - 1`, or 0 when empty.
fn percentile_95(sorted: &[u64]) -> u64 {
    if sorted.is_empty() {
        return 0;
    }
    let index = (0.95 * sorted.len() as f64).ceil() as usize - 1;
    sorted[index]
}

/// Final statistics for one stress run.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub latency_min: u64,
    pub latency_avg: u64,
    pub latency_max: u64,
    pub latency_p95: u64,
    pub total_queries: u64,
    pub total_errors: u64,
    pub total_time: f64,
    pub qps: f64,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\tLatency(ms):")?;
        writeln!(f, "\t\tmin:                {}", self.latency_min)?;
        writeln!(f, "\t\tavg:                {}", self.latency_avg)?;
        writeln!(f, "\t\tmax:                {}", self.latency_max)?;
        writeln!(f, "\t\t95th percentile:    {}", self.latency_p95)?;
        writeln!(f)?;
        writeln!(f, "\tGeneral statistics:")?;
        writeln!(f, "\t\ttotal time:         {:.6}s", self.total_time)?;
        writeln!(f, "\t\ttotal queries:      {}", self.total_queries)?;
        writeln!(f)?;
        writeln!(f, "\tSQL statistics:")?;
        writeln!(f, "\t\tqps:                {:.6}", self.qps)?;
        writeln!(f, "\t\tignored errors:     {}", self.total_errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn summarize_empty_run_is_all_zero() {
        let metrics = RunMetrics::default();
        let summary = metrics.summarize(Duration::from_secs(1));
        assert_eq!(summary.latency_min, 0);
        assert_eq!(summary.latency_max, 0);
        assert_eq!(summary.latency_avg, 0);
        assert_eq!(summary.latency_p95, 0);
        assert_eq!(summary.total_queries, 0);
        assert_eq!(summary.qps, 0.0);
    }

    #[test]
    fn summarize_one_through_ten() {
        let metrics = RunMetrics::default();
        for ms in 1..=10 {
            metrics.record_latency(ms);
        }
        let summary = metrics.summarize(Duration::from_secs(2));
        assert_eq!(summary.latency_min, 1);
        assert_eq!(summary.latency_max, 10);
        assert_eq!(summary.latency_avg, 5);
        // ceil(0.95 * 10) - 1 = 9 -> last element
        assert_eq!(summary.latency_p95, 10);
        assert_eq!(summary.total_queries, 10);
        assert_eq!(summary.qps, 5.0);
    }

    #[test]
    fn p95_of_single_sample_is_the_sample() {
        let metrics = RunMetrics::default();
        metrics.record_latency(42);
        assert_eq!(metrics.summarize(Duration::from_secs(1)).latency_p95, 42);
    }

    #[test]
    fn errors_do_not_enter_the_latency_set() {
        let metrics = RunMetrics::default();
        metrics.record_latency(7);
        metrics.record_error();
        metrics.record_error();
        let summary = metrics.summarize(Duration::from_secs(1));
        assert_eq!(summary.total_queries, 1);
        assert_eq!(summary.total_errors, 2);
        assert_eq!(summary.latency_max, 7);
    }

    #[test]
    fn a_poisoned_lock_does_not_abort_the_run() {
        let metrics = Arc::new(RunMetrics::default());
        metrics.record_latency(5);

        let poisoner = metrics.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.latencies.lock().unwrap();
            panic!("worker died holding the lock");
        })
        .join();

        metrics.record_latency(7);
        let summary = metrics.summarize(Duration::from_secs(1));
        assert_eq!(summary.total_queries, 2);
        assert_eq!(summary.latency_max, 7);
    }

    #[test]
    fn concurrent_records_are_not_lost() {
        let metrics = Arc::new(RunMetrics::default());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let m = metrics.clone();
            handles.push(std::thread::spawn(move || {
                for i in 0..1_000 {
                    m.record_latency(i);
                    m.record_error();
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }
        let summary = metrics.summarize(Duration::from_secs(1));
        assert_eq!(summary.total_queries, 8_000);
        assert_eq!(summary.total_errors, 8_000);
    }
}
