use super::column_types::ColumnTypeSpec;
use super::ident::quote_ident;
use super::table::TableRef;
use crate::error::Result;
use crate::executor::SqlExecutor;
use std::sync::Arc;
use tracing::debug;

const LIST_TABLES_SQL: &str = "SELECT schemaname::text, tablename::text \
     FROM pg_catalog.pg_tables \
     WHERE schemaname != 'pg_catalog' \
     AND schemaname != 'information_schema'";

const LIST_COLUMNS_SQL: &str = "SELECT column_name::text \
     FROM information_schema.columns \
     WHERE table_schema = $1 \
     AND table_name = $2";

/// The fixed set of schema operations, each issued as a single autocommit
/// statement against the current session. Operations are independent and
/// never retried.
pub struct SchemaOps<E> {
    executor: Arc<E>,
}

impl<E: SqlExecutor> SchemaOps<E> {
    pub fn new(executor: Arc<E>) -> Self {
        Self { executor }
    }

    /// Creates the table with a generated `Id` identity key if it does not
    /// already exist. Creating the same table twice is a no-op.
    pub async fn create_table(&self, table: &TableRef) -> Result<String> {
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {}.{} (\"Id\" BIGINT PRIMARY KEY GENERATED ALWAYS AS IDENTITY)",
            quote_ident(&table.schema)?,
            quote_ident(&table.table)?,
        );
        debug!(table = %table, "creating table");
        self.executor.execute(&sql).await?;
        Ok(format!("Created table {}", table))
    }

    /// Drops the table unconditionally; dependents block the drop at the
    /// database and surface as a query error.
    pub async fn drop_table(&self, table: &TableRef) -> Result<String> {
        let sql = format!(
            "DROP TABLE {}.{}",
            quote_ident(&table.schema)?,
            quote_ident(&table.table)?,
        );
        debug!(table = %table, "dropping table");
        self.executor.execute(&sql).await?;
        Ok(format!("Dropped table {}", table))
    }

    pub async fn add_column(
        &self,
        table: &TableRef,
        column: &str,
        spec: &ColumnTypeSpec,
    ) -> Result<String> {
        let sql = format!(
            "ALTER TABLE {}.{} ADD COLUMN {} {}",
            quote_ident(&table.schema)?,
            quote_ident(&table.table)?,
            quote_ident(column)?,
            spec.query_name,
        );
        debug!(table = %table, column, column_type = spec.query_name, "adding column");
        self.executor.execute(&sql).await?;
        Ok(format!("Added {} to {}", column, table))
    }

    pub async fn drop_column(&self, table: &TableRef, column: &str) -> Result<String> {
        let sql = format!(
            "ALTER TABLE {}.{} DROP COLUMN {}",
            quote_ident(&table.schema)?,
            quote_ident(&table.table)?,
            quote_ident(column)?,
        );
        debug!(table = %table, column, "dropping column");
        self.executor.execute(&sql).await?;
        Ok(format!("Dropped {} of {}", column, table))
    }

    /// Lists user tables, excluding the built-in catalog schemas. Order is
    /// whatever the catalog returns.
    pub async fn list_tables(&self) -> Result<Vec<TableRef>> {
        let result = self.executor.query(LIST_TABLES_SQL, &[]).await?;
        Ok(result
            .rows
            .into_iter()
            .filter_map(|mut row| {
                if row.len() < 2 {
                    return None;
                }
                let table = row.remove(1);
                let schema = row.remove(0);
                Some(TableRef::with_schema(table, schema))
            })
            .collect())
    }

    /// Lists column names via the information schema. The table and schema
    /// names are bound parameters, never interpolated.
    pub async fn list_columns(&self, table: &TableRef) -> Result<Vec<String>> {
        let result = self
            .executor
            .query(LIST_COLUMNS_SQL, &[table.schema.as_str(), table.table.as_str()])
            .await?;
        Ok(result
            .rows
            .into_iter()
            .filter_map(|row| row.into_iter().next())
            .collect())
    }
}
