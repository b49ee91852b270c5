use super::info::ConnectionInfo;
use crate::error::{PgChiselError, Result};
use crate::prompt::Prompter;
use crate::settings::SettingsStore;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// A live session that can be torn down.
#[async_trait]
pub trait SessionHandle: Send + Sync {
    async fn close(&self) -> Result<()>;
}

/// Opens a session from connection parameters. The seam exists so tests can
/// substitute an in-memory session for the real driver.
#[async_trait]
pub trait SessionFactory: Send + Sync {
    type Session: SessionHandle;

    async fn open(&self, info: &ConnectionInfo) -> Result<Self::Session>;
}

/// Collects connection parameters field by field. Any cancelled or empty
/// field aborts the whole sequence; nothing is persisted in that case.
pub fn prompt_connection_info(prompter: &mut dyn Prompter) -> Result<Option<ConnectionInfo>> {
    let Some(host) = prompter.input("Host", Some("localhost"))? else {
        return Ok(None);
    };
    let Some(port_raw) = prompter.input("Port", Some("5432"))? else {
        return Ok(None);
    };
    let port: u16 = port_raw
        .trim()
        .parse()
        .map_err(|_| PgChiselError::Prompt(format!("invalid port number: {}", port_raw)))?;
    let Some(database) = prompter.input("Database", None)? else {
        return Ok(None);
    };
    let Some(user) = prompter.input("User", None)? else {
        return Ok(None);
    };
    let Some(password) = prompter.password("Password")? else {
        return Ok(None);
    };
    Ok(Some(ConnectionInfo {
        host,
        port,
        database,
        user,
        password,
    }))
}

/// Owns the single live session and is its sole mutator.
///
/// The mutex makes get-or-create and reconnect single-flight: a second
/// caller waits rather than racing a half-open session.
pub struct SessionManager<F: SessionFactory, S> {
    factory: F,
    settings: S,
    current: Mutex<Option<Arc<F::Session>>>,
}

impl<F, S> SessionManager<F, S>
where
    F: SessionFactory,
    S: SettingsStore,
{
    pub fn new(factory: F, settings: S) -> Self {
        Self {
            factory,
            settings,
            current: Mutex::new(None),
        }
    }

    /// Returns the live session, creating it lazily on first use.
    ///
    /// Connection parameters come from the settings store when present,
    /// otherwise from the prompt sequence; freshly collected parameters are
    /// persisted before the session opens. Returns `Ok(None)` without side
    /// effects if the user cancels.
    pub async fn get_session(
        &self,
        prompter: &mut dyn Prompter,
    ) -> Result<Option<Arc<F::Session>>> {
        let mut current = self.current.lock().await;
        if let Some(session) = current.as_ref() {
            debug!("reusing live session");
            return Ok(Some(Arc::clone(session)));
        }

        let stored = self.settings.load()?;
        let connection_info = match stored {
            Some(info) => info,
            None => {
                let Some(info) = prompt_connection_info(prompter)? else {
                    return Ok(None);
                };
                self.settings.store(&info)?;
                info
            }
        };

        let session = Arc::new(self.factory.open(&connection_info).await?);
        *current = Some(Arc::clone(&session));
        info!(database = %connection_info.database, "session opened");
        Ok(Some(session))
    }

    /// Replaces the current session unconditionally: the old one (if any) is
    /// closed to completion before the new parameters are persisted and a
    /// fresh session opens. The only teardown path while the process runs.
    pub async fn reconnect(&self, new_info: ConnectionInfo) -> Result<Arc<F::Session>> {
        let mut current = self.current.lock().await;
        if let Some(old) = current.take() {
            debug!("closing previous session");
            old.close().await?;
        }
        self.settings.store(&new_info)?;
        let session = Arc::new(self.factory.open(&new_info).await?);
        *current = Some(Arc::clone(&session));
        info!(database = %new_info.database, "session replaced");
        Ok(session)
    }
}
