//! Key-value storage backends for the cache
//!
//! `Storage` is a string-to-string store in the spirit of the browser's
//! `localStorage`. The file backend keeps one JSON document per key.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Persistent string key-value store
pub trait Storage: Send + Sync {
    /// Returns the stored value, or `None` if the key is absent or unreadable
    fn get_item(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value in full
    fn set_item(&self, key: &str, value: &str) -> io::Result<()>;
}

/// Stores each key as `<dir>/<percent-encoded key>.json`
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory where files are stored
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the path to the file for the given key
    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", urlencoding::encode(key)))
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn set_item(&self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;

        // Write beside the target then rename, so readers never see half a record
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)
    }
}

/// In-process store, for tests and embedders without a filesystem
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.items.lock().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.lock().ok()?.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> io::Result<()> {
        let mut items = self
            .items
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "memory storage lock poisoned"))?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
