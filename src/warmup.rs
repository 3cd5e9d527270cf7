//! The `warmup` command: load table pages into the InnoDB buffer pool.

use crate::config::ConnectionOpts;
use crate::mysql::Instance;
use anyhow::Result;
use clap::Args;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use warmup_core::{
    resolve_tables, table::parse_table_list, warm_all, SchedulerConfig, TableSelection,
};

#[derive(Args, Clone, Debug)]
pub struct WarmupArgs {
    /// Number of tables warmed in parallel per batch
    #[arg(long, short = 't', default_value_t = 20)]
    pub thread: usize,

    /// Skip cold tables to let them stay on disk, comma separated
    /// schema_name.table_name list; whitespace around commas is allowed
    #[arg(long, short = 's', value_delimiter = ',', conflicts_with = "only")]
    pub skip: Vec<String>,

    /// Only load specific tables into memory, comma separated
    /// schema_name.table_name list; whitespace around commas is allowed
    #[arg(long, short = 'o', value_delimiter = ',')]
    pub only: Vec<String>,

    #[command(flatten)]
    pub connection: ConnectionOpts,
}

pub async fn run_warmup(args: WarmupArgs) -> Result<()> {
    info!("warmup started");

    // Selection ambiguity and malformed table literals are fatal before any
    // connection attempt.
    let only = parse_table_list(args.only.iter().map(String::as_str))?;
    let skip = parse_table_list(args.skip.iter().map(String::as_str))?;
    let skipped = skip.len();
    let selection = TableSelection::from_flags(only, skip)?;

    let instance = Arc::new(Instance::connect(&args.connection).await?);
    info!("instance initialised");

    let tables = resolve_tables(&selection, instance.as_ref()).await?;

    let token = CancellationToken::new();
    let interrupt = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("received interrupt, finishing the current batch");
            interrupt.cancel();
        }
    });

    let report = warm_all(
        instance.clone(),
        tables,
        SchedulerConfig {
            concurrency: args.thread,
        },
        token,
    )
    .await;

    info!(
        total_warmup_tables = report.total,
        failed_tables = report.failed,
        skipped_tables = skipped,
        "warmup completed"
    );

    instance.disconnect().await?;
    Ok(())
}
