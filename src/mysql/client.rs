//! MySQL client utilities
//!
//! This module provides the connection pool setup and the `Instance` handle
//! that the stress and warmup engines execute against.

use crate::config::{parse_conn_lifetime, ConnectionOpts};
use anyhow::{Context, Result};
use mysql_async::prelude::Queryable;
use mysql_async::{Opts, OptsBuilder, Pool, PoolConstraints, PoolOpts};
use std::time::Duration;

const PING_TIMEOUT: Duration = Duration::from_secs(5);
const CONN_TIMEOUT: Duration = Duration::from_secs(10);

/// A connected MySQL instance backed by a connection pool.
pub struct Instance {
    pool: Pool,
}

impl Instance {
    /// Build the pool from connection options and verify connectivity with a
    /// bounded ping. Unreachable servers fail here, before any workload runs.
    pub async fn connect(opts: &ConnectionOpts) -> Result<Self> {
        let pool = new_mysql_pool(opts)?;

        let mut conn = tokio::time::timeout(PING_TIMEOUT, pool.get_conn())
            .await
            .context("timed out connecting to MySQL")?
            .with_context(|| format!("failed to connect to {}:{}", opts.host, opts.port))?;
        conn.ping().await.context("MySQL ping failed")?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    /// Close all pooled connections. Call once, when the run is over.
    pub async fn disconnect(&self) -> Result<()> {
        self.pool.clone().disconnect().await?;
        Ok(())
    }
}

/// Create a new MySQL connection pool
pub fn new_mysql_pool(opts: &ConnectionOpts) -> Result<Pool> {
    let max = opts.max_connections.max(1);
    let idle = opts.max_idle_connections.min(max);
    let constraints = PoolConstraints::new(idle, max)
        .with_context(|| format!("invalid pool constraints: idle {idle} > max {max}"))?;

    let lifetime = parse_conn_lifetime(&opts.connection_max_lifetime)
        .context("invalid --connection-max-lifetime")?;

    let pool_opts = PoolOpts::default()
        .with_constraints(constraints)
        .with_abs_conn_ttl(lifetime);

    let builder = OptsBuilder::default()
        .ip_or_hostname(opts.host.clone())
        .tcp_port(opts.port)
        .user(Some(opts.user.clone()))
        .pass(Some(opts.password.clone()))
        .tcp_keepalive(Some(CONN_TIMEOUT.as_millis() as u32))
        .pool_opts(pool_opts);

    Ok(Pool::new(Opts::from(builder)))
}
