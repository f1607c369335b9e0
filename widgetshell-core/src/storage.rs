//! Persistent key-value storage for panel state.
//!
//! Records are opaque strings addressed by key. Each service owns the
//! encoding of its own record; storage only moves strings around.

use std::collections::HashMap;
use std::path::PathBuf;

use log::warn;

use crate::error::{ShellError, ShellResult};

/// Synchronous get/set string storage scoped to the device.
pub trait KeyValueStore {
    /// Returns the stored value, or `None` if the key was never written
    /// or cannot be read.
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> ShellResult<()>;
}

/// Stores each key as its own file under a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);

        if !path.exists() {
            return None;
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(e) => {
                warn!("could not read {}: {}", path.display(), e);
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> ShellResult<()> {
        let storage_err = |source| ShellError::Storage {
            key: key.to_string(),
            source,
        };

        std::fs::create_dir_all(&self.dir).map_err(storage_err)?;

        let path = self.path_for(key);
        let temp = self.dir.join(key.to_string() + ".tmp");

        std::fs::write(&temp, value).map_err(storage_err)?;
        std::fs::rename(&temp, &path).map_err(storage_err)?;
        Ok(())
    }
}

/// Keeps records in memory only. Used by tests and `--ephemeral` runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.records.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> ShellResult<()> {
        self.records.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> ShellResult<()> {
        (**self).set(key, value)
    }
}
