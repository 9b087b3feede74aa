//! Client-side key/value storage holding the session credential.
//!
//! The identity resolver only ever reads from a store. Writing happens at
//! login time and removal at logout, both outside this crate; the in-memory
//! store exposes `insert` so tests and tools can seed it.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use thiserror::Error;

/// Read-only access to a string-keyed persistent store.
pub trait CredentialStore: Send + Sync {
    /// Value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;
}

#[derive(Debug, Error)]
pub enum CredentialStoreError {
    #[error("failed to read credential file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("credential file {path:?} is not a JSON object of strings: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no platform data directory available")]
    NoDataDir,
}

/// Process-local store (tests, tools).
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        store.insert(key, value);
        store
    }

    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        let mut map = self.entries.write().unwrap_or_else(|e| e.into_inner());
        map.insert(key.into(), value.into());
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn get(&self, key: &str) -> Option<String> {
        let map = self.entries.read().unwrap_or_else(|e| e.into_inner());
        map.get(key).cloned()
    }
}

/// JSON file of `{ "key": "value" }` pairs, the native counterpart of the
/// browser's local storage.
///
/// The file is read once when opened; a missing file is an empty store.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileCredentialStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CredentialStoreError> {
        let path = path.as_ref().to_path_buf();

        let entries = match std::fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => HashMap::new(),
            Ok(text) => serde_json::from_str(&text).map_err(|source| CredentialStoreError::Parse {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "credential file not found; treating as empty");
                HashMap::new()
            }
            Err(source) => return Err(CredentialStoreError::Io { path, source }),
        };

        Ok(Self { path, entries })
    }

    /// `<data dir>/vetforum/credentials.json`.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Result<PathBuf, CredentialStoreError> {
        let dir = dirs::data_dir().ok_or(CredentialStoreError::NoDataDir)?;
        Ok(dir.join("vetforum").join("credentials.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}

/// `window.localStorage`, looked up on every read.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserCredentialStore;

#[cfg(target_arch = "wasm32")]
impl CredentialStore for BrowserCredentialStore {
    fn get(&self, key: &str) -> Option<String> {
        let storage = match web_sys::window().map(|w| w.local_storage()) {
            Some(Ok(Some(storage))) => storage,
            _ => {
                tracing::warn!("local storage unavailable; treating session as absent");
                return None;
            }
        };
        storage.get_item(key).ok().flatten()
    }
}
