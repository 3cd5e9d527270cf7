//! The `stress` command: sustained statement load against one instance.

use crate::config::{parse_duration, ConnectionOpts};
use crate::mysql::Instance;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use stress_core::{
    generator::spawn_generator, Dispatcher, DispatcherConfig, RunMetrics, StatementSource,
    WeightedChoice,
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

#[derive(Args, Clone, Debug)]
#[command(group = clap::ArgGroup::new("workload").required(true).args(["query", "file"]))]
pub struct StressArgs {
    /// Number of threads (connections)
    #[arg(long, short = 't', default_value_t = 1)]
    pub thread: usize,

    /// Stress test time, supports duration suffixes [s|m|h]
    #[arg(long, short = 'T', default_value = "30s")]
    pub time: String,

    /// Single query used for the whole stress test
    #[arg(long, short = 'q')]
    pub query: Option<String>,

    /// File with one `statement;weight` per line for a weighted query mix
    #[arg(long, short = 'f')]
    pub file: Option<PathBuf>,

    /// Capacity of the generated-statement queue
    #[arg(long, default_value_t = 10_000)]
    pub queue_capacity: usize,

    /// Upper bound on dispatched-but-not-started statements
    #[arg(long, default_value_t = 2_048)]
    pub pending_watermark: usize,

    /// How long the generator primes the queue before dispatch starts
    /// (weighted-file mode only)
    #[arg(long, default_value = "30s")]
    pub prepare_time: String,

    #[command(flatten)]
    pub connection: ConnectionOpts,
}

pub async fn run_stress(args: StressArgs) -> Result<()> {
    let duration = parse_duration(&args.time).context("invalid --time")?;
    let prepare = parse_duration(&args.prepare_time).context("invalid --prepare-time")?;

    // More workers than pool slots would just queue on the pool; raise the cap.
    let mut conn_opts = args.connection.clone();
    if args.thread > conn_opts.max_connections {
        conn_opts.max_connections = args.thread;
    }

    debug!("stress test started");
    let instance = Arc::new(Instance::connect(&conn_opts).await?);
    debug!("initialised");

    let metrics = Arc::new(RunMetrics::default());
    let token = CancellationToken::new();
    let dispatcher = Dispatcher::new(
        instance.clone(),
        DispatcherConfig {
            concurrency: args.thread,
            pending_watermark: args.pending_watermark,
        },
        metrics.clone(),
    );

    let source = match (&args.query, &args.file) {
        (Some(query), None) => StatementSource::Fixed(query.clone()),
        (None, Some(path)) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read statement file {}", path.display()))?;
            let entries = WeightedChoice::parse_lines(contents.lines())?;
            let selector = WeightedChoice::load(entries)?;

            let (tx, rx) = mpsc::channel(args.queue_capacity.max(1));
            // Detached; it exits with the cancellation token or the receiver.
            let _ = spawn_generator(selector, tx, token.clone());

            info!("prepare");
            tokio::time::sleep(prepare).await;
            StatementSource::Queue(rx)
        }
        // clap's workload group guarantees exactly one of the two.
        _ => unreachable!("clap enforces query XOR file"),
    };

    info!("start");
    let start = Instant::now();
    let deadline = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(duration).await;
        deadline.cancel();
    });

    dispatcher.run(source, token.clone()).await;
    token.cancel();
    info!("end");

    let summary = metrics.summarize(start.elapsed());
    println!("\n{summary}");

    instance.disconnect().await?;
    Ok(())
}
