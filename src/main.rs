//! Command-line interface for rdskit
//!
//! # Usage Examples
//!
//! ## Stress Testing
//! ```bash
//! # Hammer one statement on 8 connections for a minute
//! rdskit stress \
//!   --host db.internal --user root --password secret \
//!   --thread 8 --time 1m \
//!   --query "select id from shop.orders where id = 42"
//!
//! # Weighted statement mix: one `statement;weight` per line
//! rdskit stress \
//!   --thread 16 --time 10m \
//!   --file queries.txt
//! ```
//!
//! ## Buffer Pool Warmup
//! ```bash
//! # Warm every user table, 20 in parallel
//! rdskit warmup --host db.internal --user root --password secret
//!
//! # Warm everything except the archive schema's big tables
//! rdskit warmup --skip "archive.events_2023,archive.events_2024"
//!
//! # Warm only the hot tables
//! rdskit warmup --only "shop.orders,shop.customers" --thread 4
//! ```

use clap::{Parser, Subcommand};
use rdskit::{run_stress, run_warmup, StressArgs, WarmupArgs};

#[derive(Parser)]
#[command(name = "rdskit")]
#[command(version)]
#[command(about = "A toolkit for MySQL/RDS operations: stress testing and buffer pool warmup")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a stress test against a MySQL instance
    Stress(StressArgs),

    /// Warm up the InnoDB buffer pool by reading table data from disk
    Warmup(WarmupArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Stress(args) => {
            init_tracing(args.connection.debug);
            run_stress(args).await
        }
        Commands::Warmup(args) => {
            init_tracing(args.connection.debug);
            run_warmup(args).await
        }
    }
}

/// Initialize tracing. `RUST_LOG` wins when set; otherwise the `--debug`
/// flag picks between info and debug.
fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();
}
