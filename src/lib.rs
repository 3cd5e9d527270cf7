//! rdskit Library
//!
//! A toolkit for operating MySQL/RDS instances: sustained stress testing and
//! InnoDB buffer pool warmup.
//!
//! # Features
//!
//! - Stress testing: a fixed statement or a weighted mix, with latency and
//!   error-rate reporting
//! - Buffer pool warmup: batch-parallel full scans plus statistics refresh
//!   over the instance's base tables
//! - Bounded pipelines: the statement queue and the dispatch backlog are
//!   capped, so a saturated server never grows the client's memory
//!
//! # Crates
//!
//! The concurrency engines live in dedicated library crates so they can be
//! tested against mock executors:
//!
//! - `stress-core` - weighted selection, statement generation, dispatch,
//!   latency metrics
//! - `warmup-core` - table selection and batch-barrier scheduling
//!
//! # CLI Usage
//!
//! ```bash
//! # 30 seconds of a single statement on 8 connections
//! rdskit stress -t 8 -T 30s -q "select 1" -H db.internal -u root -p secret
//!
//! # Weighted statement mix from a file
//! rdskit stress -t 8 -T 5m -f queries.txt
//!
//! # Warm every user table, 20 at a time
//! rdskit warmup -H db.internal -u root -p secret
//!
//! # Warm everything except two archive tables
//! rdskit warmup -s "archive.events_2023, archive.events_2024"
//! ```

pub mod config;
pub mod mysql;
pub mod stress;
pub mod warmup;

pub use config::ConnectionOpts;
pub use stress::{run_stress, StressArgs};
pub use warmup::{run_warmup, WarmupArgs};
