use super::info::ConnectionInfo;
use super::manager::{SessionFactory, SessionHandle};
use crate::error::{PgChiselError, Result};
use crate::executor::{ColumnInfo, QueryResult, SqlExecutor};
use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_postgres::types::ToSql;
use tokio_postgres::{Client, NoTls};
use tracing::{debug, error, info};

/// Formats a driver error, preferring the server's own message with its
/// detail and hint when the error came from the database.
fn format_pg_error(err: &tokio_postgres::Error) -> String {
    let Some(db_error) = err.as_db_error() else {
        return err.to_string();
    };
    let mut message = db_error.message().to_string();
    if let Some(detail) = db_error.detail() {
        if !detail.trim().is_empty() {
            message.push_str(&format!(" (detail: {})", detail));
        }
    }
    if let Some(hint) = db_error.hint() {
        if !hint.trim().is_empty() {
            message.push_str(&format!(" (hint: {})", hint));
        }
    }
    message
}

/// One open connection to one database.
///
/// The client sits behind a mutex: the wire protocol is not reentrant, so a
/// second statement must wait for the first to complete. `close` takes the
/// client out, which is why the slot is an `Option`.
pub struct PgSession {
    client: Mutex<Option<Client>>,
    driver: Mutex<Option<JoinHandle<()>>>,
}

impl PgSession {
    /// Opens a session and awaits the handshake, so unreachable hosts and
    /// bad credentials fail here rather than at the first statement.
    pub async fn connect(info: &ConnectionInfo) -> Result<Self> {
        info!(host = %info.host, port = info.port, database = %info.database, "connecting");

        let mut config = tokio_postgres::Config::new();
        config
            .host(&info.host)
            .port(info.port)
            .dbname(&info.database)
            .user(&info.user)
            .password(&info.password);

        let (client, connection) = config
            .connect(NoTls)
            .await
            .map_err(|e| PgChiselError::Connection(format_pg_error(&e)))?;

        let driver = tokio::spawn(async move {
            if let Err(e) = connection.await {
                error!(error = %e, "postgres connection error");
            }
        });

        Ok(Self {
            client: Mutex::new(Some(client)),
            driver: Mutex::new(Some(driver)),
        })
    }
}

#[async_trait]
impl SqlExecutor for PgSession {
    async fn execute(&self, sql: &str) -> Result<u64> {
        let guard = self.client.lock().await;
        let client = guard
            .as_ref()
            .ok_or_else(|| PgChiselError::Connection("session is closed".to_string()))?;
        client
            .execute(sql, &[])
            .await
            .map_err(|e| PgChiselError::Query(format_pg_error(&e)))
    }

    async fn query(&self, sql: &str, params: &[&str]) -> Result<QueryResult> {
        let guard = self.client.lock().await;
        let client = guard
            .as_ref()
            .ok_or_else(|| PgChiselError::Connection("session is closed".to_string()))?;

        let bound: Vec<&(dyn ToSql + Sync)> =
            params.iter().map(|p| p as &(dyn ToSql + Sync)).collect();
        let rows = client
            .query(sql, &bound)
            .await
            .map_err(|e| PgChiselError::Query(format_pg_error(&e)))?;

        let columns = rows
            .first()
            .map(|row| {
                row.columns()
                    .iter()
                    .map(|c| ColumnInfo {
                        name: c.name().to_string(),
                        column_type: c.type_().name().to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let data = rows
            .iter()
            .map(|row| {
                (0..row.len())
                    .map(|i| {
                        row.try_get::<_, Option<String>>(i)
                            .ok()
                            .flatten()
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect();

        Ok(QueryResult {
            columns,
            rows: data,
        })
    }
}

#[async_trait]
impl SessionHandle for PgSession {
    /// Drops the client and awaits the connection task, so driver resources
    /// are fully released before a successor session opens.
    async fn close(&self) -> Result<()> {
        debug!("closing session");
        let client = self.client.lock().await.take();
        drop(client);
        if let Some(driver) = self.driver.lock().await.take() {
            if let Err(e) = driver.await {
                tracing::warn!(error = %e, "connection task ended abnormally");
            }
        }
        Ok(())
    }
}

pub struct PgSessionFactory;

#[async_trait]
impl SessionFactory for PgSessionFactory {
    type Session = PgSession;

    async fn open(&self, info: &ConnectionInfo) -> Result<PgSession> {
        PgSession::connect(info).await
    }
}
