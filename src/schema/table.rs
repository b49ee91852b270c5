use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_SCHEMA: &str = "public";

/// Identifies a table within the connected database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRef {
    pub table: String,
    pub schema: String,
}

impl TableRef {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            schema: DEFAULT_SCHEMA.to_string(),
        }
    }

    pub fn with_schema(table: impl Into<String>, schema: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            schema: schema.into(),
        }
    }

    /// Parses user input of the form `table` or `schema.table`.
    pub fn parse(input: &str) -> Self {
        match input.trim().split_once('.') {
            Some((schema, table)) if !schema.is_empty() && !table.is_empty() => {
                Self::with_schema(table, schema)
            }
            _ => Self::new(input.trim()),
        }
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.table)
    }
}
