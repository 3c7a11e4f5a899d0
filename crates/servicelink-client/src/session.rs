//! Session persistence.
//!
//! The facade only reads the session. Login and logout flows write it
//! through the same store.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use servicelink_models::Session;
use thiserror::Error;
use tracing::debug;

pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session storage IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session storage is corrupt: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Session lock poisoned")]
    Poisoned,
}

/// Backing storage for the `{ token, userRole }` record.
pub trait SessionStore: Send + Sync + fmt::Debug {
    /// Current session; an empty session when nothing is stored.
    fn load(&self) -> SessionResult<Session>;

    fn save(&self, session: &Session) -> SessionResult<()>;

    fn clear(&self) -> SessionResult<()>;
}

/// In-process session storage.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: RwLock<Session>,
}

impl MemorySessionStore {
    pub fn new(session: Session) -> Self {
        Self {
            inner: RwLock::new(session),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> SessionResult<Session> {
        self.inner
            .read()
            .map(|s| s.clone())
            .map_err(|_| SessionError::Poisoned)
    }

    fn save(&self, session: &Session) -> SessionResult<()> {
        let mut guard = self.inner.write().map_err(|_| SessionError::Poisoned)?;
        *guard = session.clone();
        Ok(())
    }

    fn clear(&self) -> SessionResult<()> {
        self.save(&Session::default())
    }
}

/// Session stored as a small JSON object on disk.
///
/// The file holds the same `token` / `userRole` keys a browser keeps in
/// local storage. A missing file is an empty session.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> SessionResult<Session> {
        match std::fs::read(&self.path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Session::default()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Session::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, session: &Session) -> SessionResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_vec_pretty(session)?;
        std::fs::write(&self.path, body)?;
        debug!(path = %self.path.display(), "Saved session");
        Ok(())
    }

    fn clear(&self) -> SessionResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "Cleared session");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
