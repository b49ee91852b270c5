use crate::error::Result;
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct ColumnInfo {
    pub name: String,
    pub column_type: String,
}

#[derive(Debug, Clone, Default)]
pub struct QueryResult {
    pub columns: Vec<ColumnInfo>,
    pub rows: Vec<Vec<String>>,
}

/// Seam between the schema operations and the live database session.
///
/// Statements are issued one at a time in autocommit mode; implementations
/// must not overlap two statements on the same underlying connection.
#[async_trait]
pub trait SqlExecutor: Send + Sync {
    /// Run a statement that returns no rows, e.g. DDL.
    async fn execute(&self, sql: &str) -> Result<u64>;

    /// Run a query with positional text parameters (`$1`, `$2`, ...).
    async fn query(&self, sql: &str, params: &[&str]) -> Result<QueryResult>;
}
