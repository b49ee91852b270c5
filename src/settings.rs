use crate::error::{PgChiselError, Result};
use crate::session::ConnectionInfo;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::debug;

/// Persists the last-used connection parameters across runs. One logical
/// key. The password is stored in the clear.
pub trait SettingsStore: Send + Sync {
    fn load(&self) -> Result<Option<ConnectionInfo>>;
    fn store(&self, info: &ConnectionInfo) -> Result<()>;
}

#[derive(Serialize, Deserialize, Default)]
struct SettingsDoc {
    #[serde(rename = "connectionInfo", skip_serializing_if = "Option::is_none")]
    connection_info: Option<ConnectionInfo>,
}

/// JSON settings file under the platform config directory.
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn default_path() -> Result<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| PgChiselError::Settings("no config directory found".to_string()))?;
        Ok(base.join("pgchisel").join("settings.json"))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&self) -> Result<Option<ConnectionInfo>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)?;
        let doc: SettingsDoc = serde_json::from_str(&raw).map_err(|e| {
            PgChiselError::Settings(format!("malformed settings file {}: {}", self.path.display(), e))
        })?;
        Ok(doc.connection_info)
    }

    fn store(&self, info: &ConnectionInfo) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let doc = SettingsDoc {
            connection_info: Some(info.clone()),
        };
        let raw = serde_json::to_string_pretty(&doc)
            .map_err(|e| PgChiselError::Settings(e.to_string()))?;
        fs::write(&self.path, raw)?;
        debug!(path = %self.path.display(), "settings written");
        Ok(())
    }
}

impl<S: SettingsStore + ?Sized> SettingsStore for std::sync::Arc<S> {
    fn load(&self) -> Result<Option<ConnectionInfo>> {
        (**self).load()
    }

    fn store(&self, info: &ConnectionInfo) -> Result<()> {
        (**self).store(info)
    }
}

/// In-memory store for tests and ephemeral runs.
#[derive(Default)]
pub struct MemorySettingsStore {
    inner: Mutex<Option<ConnectionInfo>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> Result<Option<ConnectionInfo>> {
        Ok(self.inner.lock().unwrap().clone())
    }

    fn store(&self, info: &ConnectionInfo) -> Result<()> {
        *self.inner.lock().unwrap() = Some(info.clone());
        Ok(())
    }
}
