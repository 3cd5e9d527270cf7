//! Engine trait implementations for a live MySQL instance.

use super::Instance;
use async_trait::async_trait;
use mysql_async::prelude::Queryable;
use std::time::Instant;
use stress_core::QueryExecutor;
use warmup_core::{TableRef, TableWarmer};

/// Schemas excluded from catalog discovery; warming server internals is
/// never what the operator wants.
const SYSTEM_SCHEMAS: &str =
    "'information_schema', 'innodb', 'mysql', 'performance_schema', 'sys'";

#[async_trait]
impl QueryExecutor for Instance {
    async fn execute(&self, statement: &str) -> anyhow::Result<u64> {
        let start = Instant::now();
        let mut conn = self.pool().get_conn().await?;
        conn.query_drop(statement).await?;
        Ok(start.elapsed().as_millis() as u64)
    }
}

#[async_trait]
impl TableWarmer for Instance {
    async fn list_tables(&self) -> anyhow::Result<Vec<TableRef>> {
        let mut conn = self.pool().get_conn().await?;
        let query = format!(
            "SELECT table_schema, table_name FROM information_schema.tables \
             WHERE table_schema NOT IN ({SYSTEM_SCHEMAS}) AND table_type = 'BASE TABLE'"
        );
        let rows: Vec<(String, String)> = conn.query(query).await?;
        Ok(rows
            .into_iter()
            .map(|(schema, table)| TableRef::new(schema, table))
            .collect())
    }

    async fn warm_table(&self, table: &TableRef) -> anyhow::Result<()> {
        let mut conn = self.pool().get_conn().await?;
        // Phase 1: full scan forces the table's pages into the buffer pool.
        conn.query_drop(format!("SELECT COUNT(*) FROM {table}"))
            .await?;
        // Phase 2: refresh the optimizer statistics.
        conn.query_drop(format!("ANALYZE TABLE {table}")).await?;
        Ok(())
    }
}
