// Persistence adapter for the convenience caches (session, cart, booking selection, history)
// Nothing here is a durable record: unreadable entries load as defaults

use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

pub const RESERVATION_KEY: &str = "reservation-storage";
pub const CART_KEY: &str = "cart-storage";
pub const AUTH_KEY: &str = "auth-storage";
pub const RESERVATIONS_KEY: &str = "reservations-storage";

pub const STATE_VERSION: u32 = 0;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

// String key-value storage, the shape of a browser's local storage
pub trait StateStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per entry inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl StateStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)?) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::IoError(e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        // Write-then-rename so a crash never leaves a half-written entry
        let tmp_path = path.with_extension("json.tmp");
        let written = File::create(&tmp_path).and_then(|mut file| {
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
            fs::rename(&tmp_path, &path)
        });
        if let Err(e) = written {
            if let Err(cleanup) = fs::remove_file(&tmp_path) {
                if cleanup.kind() != ErrorKind::NotFound {
                    warn!(path = %tmp_path.display(), error = %cleanup, "could not remove temp file");
                }
            }
            return Err(StorageError::IoError(e));
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::IoError(e)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    state: T,
    #[serde(default)]
    version: u32,
}

pub fn save_state<S, T>(store: &S, key: &str, state: &T) -> Result<(), StorageError>
where
    S: StateStore + ?Sized,
    T: Serialize,
{
    let json = serde_json::to_string(&Envelope {
        state,
        version: STATE_VERSION,
    })?;
    store.set(key, &json)?;
    debug!(key, bytes = json.len(), "persisted state");
    Ok(())
}

/// Reads a persisted state, or `None` when the key has never been written.
pub fn read_state<S, T>(store: &S, key: &str) -> Result<Option<T>, StorageError>
where
    S: StateStore + ?Sized,
    T: DeserializeOwned,
{
    match store.get(key)? {
        Some(json) => {
            let envelope: Envelope<T> = serde_json::from_str(&json)?;
            Ok(Some(envelope.state))
        }
        None => Ok(None),
    }
}

// Missing and unreadable entries both fall back to the default state
pub fn load_state_or_default<S, T>(store: &S, key: &str) -> T
where
    S: StateStore + ?Sized,
    T: DeserializeOwned + Default,
{
    match read_state(store, key) {
        Ok(Some(state)) => state,
        Ok(None) => T::default(),
        Err(e) => {
            warn!(key, error = %e, "discarding unreadable persisted state");
            T::default()
        }
    }
}
