//! Preference store adapter
//!
//! Named string preferences with graceful degradation: any backend failure is
//! logged and swallowed so callers keep operating on in-memory state for the
//! rest of the session.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use rustc_hash::FxHashMap;

use crate::error::{FolioError, Result};

/// Key of the persisted light/dark preference
pub const THEME_KEY: &str = "theme";

/// Key of the persisted accent palette preference
pub const ACCENT_KEY: &str = "colorTheme";

/// Raw key/value storage
pub trait PreferenceBackend: Send {
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn store(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Session-only storage
#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    values: FxHashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value, as if persisted by an earlier visit
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl PreferenceBackend for MemoryBackend {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn store(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage that refuses every access (disabled or denied by the host)
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledBackend;

impl PreferenceBackend for DisabledBackend {
    fn load(&self, _key: &str) -> Result<Option<String>> {
        Err(FolioError::StorageUnavailable("storage is disabled".into()))
    }

    fn store(&mut self, key: &str, _value: &str) -> Result<()> {
        Err(FolioError::StorageWrite {
            key: key.to_string(),
            reason: "storage is disabled".into(),
        })
    }
}

/// JSON object on disk, rewritten on every mutation
#[derive(Debug)]
pub struct JsonFileBackend {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileBackend {
    /// Open (or lazily create) a preference file.
    ///
    /// A missing file is an empty store; an unreadable or malformed one is
    /// reported as unavailable storage.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let values = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => serde_json::from_str(&text).map_err(|e| {
                FolioError::StorageUnavailable(format!("{}: {e}", path.display()))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(FolioError::StorageUnavailable(format!(
                    "{}: {e}",
                    path.display()
                )))
            }
        };
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> std::result::Result<(), String> {
        let text = serde_json::to_string_pretty(&self.values).map_err(|e| e.to_string())?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, text).map_err(|e| e.to_string())?;
        fs::rename(&tmp, &self.path).map_err(|e| e.to_string())
    }
}

impl PreferenceBackend for JsonFileBackend {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn store(&mut self, key: &str, value: &str) -> Result<()> {
        let previous = self.values.insert(key.to_string(), value.to_string());
        if let Err(reason) = self.flush() {
            // Keep memory and disk in agreement
            match previous {
                Some(old) => self.values.insert(key.to_string(), old),
                None => self.values.remove(key),
            };
            return Err(FolioError::StorageWrite {
                key: key.to_string(),
                reason,
            });
        }
        Ok(())
    }
}

/// Shared preference handle given to every controller that persists state
#[derive(Clone)]
pub struct Preferences {
    backend: Arc<Mutex<Box<dyn PreferenceBackend>>>,
}

impl Preferences {
    pub fn new(backend: impl PreferenceBackend + 'static) -> Self {
        Self {
            backend: Arc::new(Mutex::new(Box::new(backend))),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    pub fn disabled() -> Self {
        Self::new(DisabledBackend)
    }

    /// Read a preference; storage failures read as absent
    pub fn get(&self, key: &str) -> Option<String> {
        let Ok(backend) = self.backend.lock() else {
            tracing::warn!("preferences: store lock poisoned, reading `{key}` as absent");
            return None;
        };
        match backend.load(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("preferences: failed to load `{key}`: {e}");
                None
            }
        }
    }

    /// Persist a preference, returning whether it reached storage
    pub fn set(&self, key: &str, value: &str) -> bool {
        let Ok(mut backend) = self.backend.lock() else {
            tracing::warn!("preferences: store lock poisoned, `{key}` kept in memory only");
            return false;
        };
        match backend.store(key, value) {
            Ok(()) => {
                tracing::debug!("preferences: {key} = {value}");
                true
            }
            Err(e) => {
                tracing::warn!("preferences: {e}");
                false
            }
        }
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Self::in_memory()
    }
}
