//! Storage cell for the backend bearer token.
//!
//! The token outlives a single process: [`FileTokenStore`] keeps it next to
//! the rest of the SDK cache so the next run reuses it until the backend
//! answers 401.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::warn;

use crate::config;
use crate::error::Result;

/// Get/set/clear access to the persisted auth token.
///
/// Callers must tolerate the token being absent or stale at any time.
pub trait TokenStore: Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, token: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

// ---------------------------------------------------------------------------
// FileTokenStore
// ---------------------------------------------------------------------------

/// Keeps the token in `<cache_dir>/api_token`.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Create a store inside `cache_dir`, creating the directory if needed.
    pub fn new<P: AsRef<Path>>(cache_dir: P) -> Result<Self> {
        let dir = cache_dir.as_ref();
        fs::create_dir_all(dir)?;
        Ok(Self {
            path: dir.join(config::TOKEN_FILE),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<String> {
        if !self.path.exists() {
            return None;
        }
        match fs::read_to_string(&self.path) {
            Ok(s) => Some(s.trim().to_string()).filter(|t| !t.is_empty()),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "unreadable token file");
                None
            }
        }
    }

    /// Writes to a temp file first and renames on success, so a crash never
    /// leaves a truncated token behind.
    fn set(&self, token: &str) -> Result<()> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(token.as_bytes())?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MemoryTokenStore
// ---------------------------------------------------------------------------

/// Process-local store, mostly useful for tests and short-lived tools.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token.lock().ok().and_then(|t| t.clone())
    }

    fn set(&self, token: &str) -> Result<()> {
        if let Ok(mut slot) = self.token.lock() {
            *slot = Some(token.to_string());
        }
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if let Ok(mut slot) = self.token.lock() {
            *slot = None;
        }
        Ok(())
    }
}
