//! Session persistence between CLI runs

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::debug;

use crate::config::Config;
use crate::domain::auth::{Session, SessionStore};
use crate::error::{Error, Result};

/// File name of the stored session inside the config directory
pub const SESSION_FILE: &str = "session.json";

/// Session stored as JSON on disk
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store next to the config file
    pub fn in_config_dir() -> Result<Self> {
        let dir = Config::config_dir().map_err(|e| Error::ConfigError(e.to_string()))?;
        Ok(Self::new(dir.join(SESSION_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&self.path)?;
        match serde_json::from_str(&contents) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "Ignoring unreadable session file");
                Ok(None)
            }
        }
    }

    fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, contents)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))?;
        }
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Session kept for the life of the process
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: RwLock<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>> {
        self.session
            .read()
            .map(|guard| guard.clone())
            .map_err(|_| Error::Other("session lock poisoned".to_string()))
    }

    fn save(&self, session: &Session) -> Result<()> {
        let mut guard = self
            .session
            .write()
            .map_err(|_| Error::Other("session lock poisoned".to_string()))?;
        *guard = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut guard = self
            .session
            .write()
            .map_err(|_| Error::Other("session lock poisoned".to_string()))?;
        *guard = None;
        Ok(())
    }
}
