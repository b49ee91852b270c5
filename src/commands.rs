//! One handler per invocable command.
//!
//! Every handler is a short-circuiting pipeline: ask a step, abort the whole
//! command the moment the user cancels. `Ok(None)` means cancelled; no
//! statement was executed past the point of cancellation and nothing is
//! reported.

use crate::error::Result;
use crate::executor::SqlExecutor;
use crate::prompt::{Prompter, SelectItem};
use crate::schema::{SchemaOps, TableRef, COLUMN_TYPES};
use crate::session::{prompt_connection_info, SessionFactory, SessionManager};
use crate::settings::SettingsStore;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct TableListRow {
    #[tabled(rename = "schema")]
    schema: String,
    #[tabled(rename = "table")]
    table: String,
}

#[derive(Tabled)]
struct ColumnListRow {
    #[tabled(rename = "column")]
    column: String,
}

fn prompt_table(
    prompter: &mut dyn Prompter,
    last_table: &Option<TableRef>,
) -> Result<Option<TableRef>> {
    let default = last_table.as_ref().map(|t| t.to_string());
    let Some(name) = prompter.input("Table name", default.as_deref())? else {
        return Ok(None);
    };
    Ok(Some(TableRef::parse(&name)))
}

pub async fn create_table<F, S>(
    manager: &SessionManager<F, S>,
    prompter: &mut dyn Prompter,
    last_table: &mut Option<TableRef>,
) -> Result<Option<String>>
where
    F: SessionFactory,
    F::Session: SqlExecutor,
    S: SettingsStore,
{
    let Some(session) = manager.get_session(prompter).await? else {
        return Ok(None);
    };
    let Some(table) = prompt_table(prompter, last_table)? else {
        return Ok(None);
    };
    let message = SchemaOps::new(session).create_table(&table).await?;
    *last_table = Some(table);
    Ok(Some(message))
}

pub async fn drop_table<F, S>(
    manager: &SessionManager<F, S>,
    prompter: &mut dyn Prompter,
    last_table: &mut Option<TableRef>,
) -> Result<Option<String>>
where
    F: SessionFactory,
    F::Session: SqlExecutor,
    S: SettingsStore,
{
    let Some(session) = manager.get_session(prompter).await? else {
        return Ok(None);
    };
    let ops = SchemaOps::new(session);

    let tables = ops.list_tables().await?;
    let table = if tables.is_empty() {
        // Nothing to pick from; let the user name the table directly.
        match prompt_table(prompter, last_table)? {
            Some(table) => table,
            None => return Ok(None),
        }
    } else {
        let items: Vec<SelectItem> = tables
            .iter()
            .map(|t| SelectItem::new(t.to_string(), ""))
            .collect();
        let Some(choice) = prompter.select("Table to drop", &items)? else {
            return Ok(None);
        };
        tables[choice].clone()
    };

    let message = ops.drop_table(&table).await?;
    if last_table.as_ref() == Some(&table) {
        *last_table = None;
    }
    Ok(Some(message))
}

pub async fn add_column<F, S>(
    manager: &SessionManager<F, S>,
    prompter: &mut dyn Prompter,
    last_table: &mut Option<TableRef>,
) -> Result<Option<String>>
where
    F: SessionFactory,
    F::Session: SqlExecutor,
    S: SettingsStore,
{
    let Some(session) = manager.get_session(prompter).await? else {
        return Ok(None);
    };
    let Some(table) = prompt_table(prompter, last_table)? else {
        return Ok(None);
    };
    let Some(column) = prompter.input("Column name", None)? else {
        return Ok(None);
    };
    let items: Vec<SelectItem> = COLUMN_TYPES
        .iter()
        .map(|spec| SelectItem::new(spec.label, spec.query_name))
        .collect();
    let Some(choice) = prompter.select("Column type", &items)? else {
        return Ok(None);
    };

    let message = SchemaOps::new(session)
        .add_column(&table, &column, &COLUMN_TYPES[choice])
        .await?;
    *last_table = Some(table);
    Ok(Some(message))
}

pub async fn drop_column<F, S>(
    manager: &SessionManager<F, S>,
    prompter: &mut dyn Prompter,
    last_table: &mut Option<TableRef>,
) -> Result<Option<String>>
where
    F: SessionFactory,
    F::Session: SqlExecutor,
    S: SettingsStore,
{
    let Some(session) = manager.get_session(prompter).await? else {
        return Ok(None);
    };
    let Some(table) = prompt_table(prompter, last_table)? else {
        return Ok(None);
    };
    let ops = SchemaOps::new(session);

    let columns = ops.list_columns(&table).await?;
    let column = if columns.is_empty() {
        // Unknown table or empty catalog answer; fall back to free text and
        // let the database report the real problem.
        match prompter.input("Column name", None)? {
            Some(column) => column,
            None => return Ok(None),
        }
    } else {
        let items: Vec<SelectItem> = columns
            .iter()
            .map(|c| SelectItem::new(c.clone(), ""))
            .collect();
        let Some(choice) = prompter.select("Column to drop", &items)? else {
            return Ok(None);
        };
        columns[choice].clone()
    };

    let message = ops.drop_column(&table, &column).await?;
    *last_table = Some(table);
    Ok(Some(message))
}

pub async fn set_connection<F, S>(
    manager: &SessionManager<F, S>,
    prompter: &mut dyn Prompter,
) -> Result<Option<String>>
where
    F: SessionFactory,
    F::Session: SqlExecutor,
    S: SettingsStore,
{
    let Some(info) = prompt_connection_info(prompter)? else {
        return Ok(None);
    };
    let message = format!(
        "Connected to {} at {}:{}",
        info.database, info.host, info.port
    );
    manager.reconnect(info).await?;
    Ok(Some(message))
}

pub async fn list_tables<F, S>(
    manager: &SessionManager<F, S>,
    prompter: &mut dyn Prompter,
) -> Result<Option<String>>
where
    F: SessionFactory,
    F::Session: SqlExecutor,
    S: SettingsStore,
{
    let Some(session) = manager.get_session(prompter).await? else {
        return Ok(None);
    };
    let tables = SchemaOps::new(session).list_tables().await?;
    if tables.is_empty() {
        return Ok(Some("No user tables".to_string()));
    }
    let rows: Vec<TableListRow> = tables
        .into_iter()
        .map(|t| TableListRow {
            schema: t.schema,
            table: t.table,
        })
        .collect();
    Ok(Some(Table::new(rows).to_string()))
}

pub async fn list_columns<F, S>(
    manager: &SessionManager<F, S>,
    prompter: &mut dyn Prompter,
    last_table: &mut Option<TableRef>,
) -> Result<Option<String>>
where
    F: SessionFactory,
    F::Session: SqlExecutor,
    S: SettingsStore,
{
    let Some(session) = manager.get_session(prompter).await? else {
        return Ok(None);
    };
    let Some(table) = prompt_table(prompter, last_table)? else {
        return Ok(None);
    };
    let columns = SchemaOps::new(session).list_columns(&table).await?;
    *last_table = Some(table.clone());
    if columns.is_empty() {
        return Ok(Some(format!("No columns found for {}", table)));
    }
    let rows: Vec<ColumnListRow> = columns
        .into_iter()
        .map(|column| ColumnListRow { column })
        .collect();
    Ok(Some(Table::new(rows).to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PgChiselError;
    use crate::executor::mock::MockExecutor;
    use crate::executor::QueryResult;
    use crate::prompt::script::ScriptedPrompter;
    use crate::session::{ConnectionInfo, SessionHandle};
    use crate::settings::MemorySettingsStore;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct TestSession {
        info: ConnectionInfo,
        exec: MockExecutor,
    }

    #[async_trait]
    impl SessionHandle for TestSession {
        async fn close(&self) -> Result<()> {
            Ok(())
        }
    }

    #[async_trait]
    impl SqlExecutor for TestSession {
        async fn execute(&self, sql: &str) -> Result<u64> {
            self.exec.execute(sql).await
        }

        async fn query(&self, sql: &str, params: &[&str]) -> Result<QueryResult> {
            self.exec.query(sql, params).await
        }
    }

    struct TestFactory;

    #[async_trait]
    impl SessionFactory for TestFactory {
        type Session = TestSession;

        async fn open(&self, info: &ConnectionInfo) -> Result<TestSession> {
            Ok(TestSession {
                info: info.clone(),
                exec: MockExecutor::new(),
            })
        }
    }

    fn sample_info() -> ConnectionInfo {
        ConnectionInfo {
            host: "localhost".to_string(),
            port: 5432,
            database: "testdb".to_string(),
            user: "u".to_string(),
            password: "p".to_string(),
        }
    }

    fn connected_manager() -> SessionManager<TestFactory, Arc<MemorySettingsStore>> {
        let settings = Arc::new(MemorySettingsStore::new());
        settings.store(&sample_info()).unwrap();
        SessionManager::new(TestFactory, settings)
    }

    async fn session_of(
        manager: &SessionManager<TestFactory, Arc<MemorySettingsStore>>,
    ) -> Arc<TestSession> {
        let mut silent = ScriptedPrompter::new(vec![]);
        manager.get_session(&mut silent).await.unwrap().unwrap()
    }

    #[tokio::test]
    async fn test_create_table_pipeline_updates_memo() {
        let manager = connected_manager();
        let mut prompter = ScriptedPrompter::new(vec![Some("people".to_string())]);
        let mut memo = None;

        let message = create_table(&manager, &mut prompter, &mut memo)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(message, "Created table public.people");
        assert_eq!(memo, Some(TableRef::new("people")));
        let session = session_of(&manager).await;
        assert_eq!(session.exec.executed_sql().len(), 1);
    }

    #[tokio::test]
    async fn test_create_table_cancel_executes_nothing() {
        let manager = connected_manager();
        let mut prompter = ScriptedPrompter::new(vec![None]);
        let mut memo = None;

        let outcome = create_table(&manager, &mut prompter, &mut memo)
            .await
            .unwrap();

        assert!(outcome.is_none());
        assert!(memo.is_none());
        let session = session_of(&manager).await;
        assert!(session.exec.executed_sql().is_empty());
    }

    #[tokio::test]
    async fn test_add_column_full_pipeline() {
        let manager = connected_manager();
        let mut prompter = ScriptedPrompter::new(vec![
            Some("people".to_string()),
            Some("age".to_string()),
            Some("integer".to_string()),
        ]);
        let mut memo = None;

        let message = add_column(&manager, &mut prompter, &mut memo)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(message, "Added age to public.people");
        assert_eq!(
            prompter.asked(),
            vec!["Table name", "Column name", "Column type"]
        );
        let session = session_of(&manager).await;
        assert_eq!(
            session.exec.executed_sql(),
            vec!["ALTER TABLE \"public\".\"people\" ADD COLUMN \"age\" integer".to_string()]
        );
        assert_eq!(memo, Some(TableRef::new("people")));
    }

    #[tokio::test]
    async fn test_add_column_abandons_on_type_cancel() {
        let manager = connected_manager();
        let mut prompter = ScriptedPrompter::new(vec![
            Some("people".to_string()),
            Some("age".to_string()),
            None,
        ]);
        let mut memo = None;

        let outcome = add_column(&manager, &mut prompter, &mut memo).await.unwrap();

        assert!(outcome.is_none());
        assert!(memo.is_none());
        let session = session_of(&manager).await;
        assert!(session.exec.executed_sql().is_empty());
    }

    #[tokio::test]
    async fn test_drop_table_picks_from_catalog_and_clears_memo() {
        let manager = connected_manager();
        let session = session_of(&manager).await;
        session.exec.push_rows(vec![vec!["public", "people"]]);

        let mut prompter = ScriptedPrompter::new(vec![Some("public.people".to_string())]);
        let mut memo = Some(TableRef::new("people"));

        let message = drop_table(&manager, &mut prompter, &mut memo)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(message, "Dropped table public.people");
        assert!(memo.is_none());
        assert_eq!(
            session.exec.executed_sql(),
            vec!["DROP TABLE \"public\".\"people\"".to_string()]
        );
    }

    #[tokio::test]
    async fn test_drop_column_selects_existing_column() {
        let manager = connected_manager();
        let session = session_of(&manager).await;
        session.exec.push_rows(vec![vec!["Id"], vec!["age"]]);

        let mut prompter = ScriptedPrompter::new(vec![
            Some("people".to_string()),
            Some("age".to_string()),
        ]);
        let mut memo = None;

        let message = drop_column(&manager, &mut prompter, &mut memo)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(message, "Dropped age of public.people");
        assert_eq!(
            session.exec.executed_sql(),
            vec!["ALTER TABLE \"public\".\"people\" DROP COLUMN \"age\"".to_string()]
        );
    }

    #[tokio::test]
    async fn test_drop_column_missing_column_surfaces_query_error() {
        let manager = connected_manager();
        let session = session_of(&manager).await;
        // Catalog still lists the column; the drop races a concurrent change.
        session.exec.push_rows(vec![vec!["age"]]);
        session
            .exec
            .fail_next_execute("column \"age\" of relation \"people\" does not exist");

        let mut prompter = ScriptedPrompter::new(vec![
            Some("people".to_string()),
            Some("age".to_string()),
        ]);
        let mut memo = None;

        let err = drop_column(&manager, &mut prompter, &mut memo)
            .await
            .unwrap_err();
        assert!(matches!(err, PgChiselError::Query(_)));
    }

    #[tokio::test]
    async fn test_set_connection_reconnects_and_persists() {
        let settings = Arc::new(MemorySettingsStore::new());
        settings.store(&sample_info()).unwrap();
        let manager = SessionManager::new(TestFactory, Arc::clone(&settings));

        let mut prompter = ScriptedPrompter::new(vec![
            Some("db.internal".to_string()),
            Some("5433".to_string()),
            Some("otherdb".to_string()),
            Some("svc".to_string()),
            Some("secret".to_string()),
        ]);

        let message = set_connection(&manager, &mut prompter)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(message, "Connected to otherdb at db.internal:5433");
        assert_eq!(settings.load().unwrap().unwrap().database, "otherdb");
        let session = session_of(&manager).await;
        assert_eq!(session.info.database, "otherdb");
    }

    #[tokio::test]
    async fn test_list_tables_renders_catalog_rows() {
        let manager = connected_manager();
        let session = session_of(&manager).await;
        session.exec.push_rows(vec![
            vec!["public", "people"],
            vec!["audit", "events"],
        ]);

        let mut prompter = ScriptedPrompter::new(vec![]);
        let rendered = list_tables(&manager, &mut prompter)
            .await
            .unwrap()
            .unwrap();

        assert!(rendered.contains("people"));
        assert!(rendered.contains("audit"));
    }
}
