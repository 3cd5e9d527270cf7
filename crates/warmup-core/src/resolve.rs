//! Resolution of the table worklist from a selection policy.

use crate::error::WarmupError;
use crate::table::TableRef;
use crate::TableWarmer;
use std::collections::HashSet;

/// Which tables to warm. Exactly one policy applies per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSelection {
    /// Every user base table on the instance.
    All,
    /// Only the listed tables; no catalog lookup.
    Only(Vec<TableRef>),
    /// Every user base table except the listed ones.
    Skip(Vec<TableRef>),
}

impl TableSelection {
    /// Build a selection from the `--only`/`--skip` flag values.
    ///
    /// Supplying both is ambiguous and rejected before any connection is
    /// made; supplying neither selects the whole catalog.
    pub fn from_flags(
        only: Vec<TableRef>,
        skip: Vec<TableRef>,
    ) -> Result<Self, WarmupError> {
        match (only.is_empty(), skip.is_empty()) {
            (false, false) => Err(WarmupError::AmbiguousSelection),
            (false, true) => Ok(Self::Only(only)),
            (true, false) => Ok(Self::Skip(skip)),
            (true, true) => Ok(Self::All),
        }
    }
}

/// Resolve the selection into a concrete worklist, consulting the catalog
/// when needed.
pub async fn resolve_tables(
    selection: &TableSelection,
    warmer: &dyn TableWarmer,
) -> anyhow::Result<Vec<TableRef>> {
    match selection {
        TableSelection::Only(tables) => Ok(tables.clone()),
        TableSelection::Skip(skip) => Ok(difference(warmer.list_tables().await?, skip)),
        TableSelection::All => warmer.list_tables().await,
    }
}

/// Set difference by `(schema, table)` equality; input order is preserved
/// for the surviving tables.
fn difference(catalog: Vec<TableRef>, skip: &[TableRef]) -> Vec<TableRef> {
    let skip: HashSet<&TableRef> = skip.iter().collect();
    catalog
        .into_iter()
        .filter(|table| !skip.contains(table))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FixedCatalog(Vec<TableRef>);

    #[async_trait]
    impl TableWarmer for FixedCatalog {
        async fn list_tables(&self) -> anyhow::Result<Vec<TableRef>> {
            Ok(self.0.clone())
        }

        async fn warm_table(&self, _table: &TableRef) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn abc() -> Vec<TableRef> {
        vec![
            TableRef::new("db", "a"),
            TableRef::new("db", "b"),
            TableRef::new("db", "c"),
        ]
    }

    #[test]
    fn both_flags_is_ambiguous() {
        let res = TableSelection::from_flags(
            vec![TableRef::new("db", "a")],
            vec![TableRef::new("db", "b")],
        );
        assert!(matches!(res, Err(WarmupError::AmbiguousSelection)));
    }

    #[test]
    fn no_flags_selects_all() {
        assert_eq!(
            TableSelection::from_flags(vec![], vec![]).unwrap(),
            TableSelection::All
        );
    }

    #[tokio::test]
    async fn skip_removes_by_value_equality() {
        let selection =
            TableSelection::from_flags(vec![], vec![TableRef::new("db", "b")]).unwrap();
        let resolved = resolve_tables(&selection, &FixedCatalog(abc())).await.unwrap();
        let resolved: std::collections::HashSet<_> = resolved.into_iter().collect();
        let expected: std::collections::HashSet<_> =
            vec![TableRef::new("db", "a"), TableRef::new("db", "c")]
                .into_iter()
                .collect();
        assert_eq!(resolved, expected);
    }

    #[tokio::test]
    async fn only_bypasses_the_catalog() {
        let wanted = vec![TableRef::new("other", "t")];
        let selection = TableSelection::from_flags(wanted.clone(), vec![]).unwrap();
        // Catalog contents are irrelevant in Only mode.
        let resolved = resolve_tables(&selection, &FixedCatalog(abc())).await.unwrap();
        assert_eq!(resolved, wanted);
    }

    #[tokio::test]
    async fn skipping_everything_yields_empty_worklist() {
        let selection = TableSelection::from_flags(vec![], abc()).unwrap();
        let resolved = resolve_tables(&selection, &FixedCatalog(abc())).await.unwrap();
        assert!(resolved.is_empty());
    }
}
