//! # Session Storage
//!
//! Key/value backends the session is persisted in. The file backend keeps
//! the values in an INI section so they survive between CLI invocations.

use anyhow::Result;
use ini::Ini;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// INI section the file backend keeps its keys under
pub const SESSION_SECTION: &str = "session";

/// Trait for key/value session storage
///
/// Reads and writes are synchronous. Implementations are shared between
/// the API client and the views, so they must be usable through `&self`.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a single key
    fn remove(&self, key: &str) -> Result<()>;

    /// Remove every key
    fn clear(&self) -> Result<()>;
}

/// Memory-based storage, used by tests and one-shot sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.values
            .lock()
            .map_err(|_| anyhow::anyhow!("Session storage lock poisoned"))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.lock()?.clear();
        Ok(())
    }
}

/// File-backed storage in INI format
///
/// The file is read once on open and written through on every mutation.
/// Changes made by another process after open are not observed.
#[derive(Debug)]
pub struct IniFileStore {
    path: PathBuf,
    ini: Mutex<Ini>,
}

impl IniFileStore {
    /// Open the store at `path`. A missing file starts an empty session.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let ini = if path.exists() {
            tracing::debug!("Loading session from '{}'", path.display());
            Ini::load_from_file(&path).map_err(|e| {
                anyhow::anyhow!("Failed to read session file '{}': {e}", path.display())
            })?
        } else {
            tracing::debug!("No session file at '{}', starting empty", path.display());
            Ini::new()
        };

        Ok(Self {
            path,
            ini: Mutex::new(ini),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn update<F>(&self, change: F) -> Result<()>
    where
        F: FnOnce(&mut Ini),
    {
        let mut ini = self
            .ini
            .lock()
            .map_err(|_| anyhow::anyhow!("Session storage lock poisoned"))?;
        change(&mut *ini);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        ini.write_to_file(&self.path).map_err(|e| {
            anyhow::anyhow!("Failed to write session file '{}': {e}", self.path.display())
        })
    }
}

impl KeyValueStore for IniFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let ini = self
            .ini
            .lock()
            .map_err(|_| anyhow::anyhow!("Session storage lock poisoned"))?;
        Ok(ini
            .section(Some(SESSION_SECTION))
            .and_then(|section| section.get(key))
            .map(str::to_string))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.update(|ini| {
            ini.with_section(Some(SESSION_SECTION)).set(key, value);
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.update(|ini| {
            ini.delete_from(Some(SESSION_SECTION), key);
        })
    }

    fn clear(&self) -> Result<()> {
        self.update(|ini| {
            ini.delete(Some(SESSION_SECTION));
        })
    }
}
