//! Table references and `schema.table` literal parsing.

use crate::error::WarmupError;
use std::fmt;
use std::str::FromStr;

/// A fully qualified base table, equal by `(schema, table)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableRef {
    pub schema: String,
    pub table: String,
}

impl TableRef {
    pub fn new(schema: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            table: table.into(),
        }
    }
}

impl FromStr for TableRef {
    type Err = WarmupError;

    /// Parse a `schema.table` literal. Exactly one dot; whitespace around
    /// either part is tolerated.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() != 2 {
            return Err(WarmupError::InvalidTableRef(s.to_string()));
        }
        let schema = parts[0].trim();
        let table = parts[1].trim();
        if schema.is_empty() || table.is_empty() {
            return Err(WarmupError::InvalidTableRef(s.to_string()));
        }
        Ok(Self::new(schema, table))
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.table)
    }
}

/// Parse a list of `schema.table` tokens; any malformed token is fatal.
pub fn parse_table_list<'a, I>(tokens: I) -> Result<Vec<TableRef>, WarmupError>
where
    I: IntoIterator<Item = &'a str>,
{
    tokens.into_iter().map(TableRef::from_str).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn parses_and_trims() {
        let t: TableRef = " shop . orders ".parse().unwrap();
        assert_eq!(t, TableRef::new("shop", "orders"));
        assert_eq!(t.to_string(), "shop.orders");
    }

    #[test]
    fn rejects_missing_or_extra_dots() {
        assert!(matches!(
            "orders".parse::<TableRef>(),
            Err(WarmupError::InvalidTableRef(_))
        ));
        assert!(matches!(
            "a.b.c".parse::<TableRef>(),
            Err(WarmupError::InvalidTableRef(_))
        ));
        assert!(matches!(
            "shop.".parse::<TableRef>(),
            Err(WarmupError::InvalidTableRef(_))
        ));
    }

    #[test]
    fn parse_table_list_is_all_or_nothing() {
        assert_eq!(
            parse_table_list(["a.b", " c . d "]).unwrap(),
            vec![TableRef::new("a", "b"), TableRef::new("c", "d")]
        );
        assert!(parse_table_list(["a.b", "nodot"]).is_err());
    }

    #[test]
    fn equality_is_by_schema_and_table() {
        let mut set = HashSet::new();
        set.insert(TableRef::new("s", "t"));
        set.insert(TableRef::new("s", "t"));
        set.insert(TableRef::new("s", "u"));
        assert_eq!(set.len(), 2);
    }
}
