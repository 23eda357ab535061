//! Durable client-local key/value storage
//!
//! `FileClientStorage` keeps every key in one JSON object on disk and rewrites
//! the file on each change. `MemoryClientStorage` is the same thing without
//! the disk, for tests and ephemeral sessions.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::BaseClientStorage;

/// In-memory client storage
#[derive(Default)]
pub struct MemoryClientStorage {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryClientStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a key, mostly for tests
    pub fn with(self, key: &str, value: &str) -> Self {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
        self
    }
}

fn poisoned() -> anyhow::Error {
    anyhow::anyhow!("client storage lock poisoned")
}

impl BaseClientStorage for MemoryClientStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.lock().map_err(|_| poisoned())?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .lock()
            .map_err(|_| poisoned())?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.values.lock().map_err(|_| poisoned())?.remove(key);
        Ok(())
    }
}

/// JSON-file client storage
pub struct FileClientStorage {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl FileClientStorage {
    /// Open the storage file, starting empty when it does not exist yet
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let values = if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&raw)
                    .with_context(|| format!("Failed to parse {}", path.display()))?
            }
        } else {
            BTreeMap::new()
        };

        tracing::debug!(path = %path.display(), keys = values.len(), "Client storage opened");

        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    fn flush(&self, values: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }
        let json = serde_json::to_string_pretty(values)?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }
}

impl BaseClientStorage for FileClientStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.lock().map_err(|_| poisoned())?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.lock().map_err(|_| poisoned())?;
        values.insert(key.to_string(), value.to_string());
        self.flush(&values)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.values.lock().map_err(|_| poisoned())?;
        if values.remove(key).is_some() {
            self.flush(&values)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_storage_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("client.json");

        let storage = FileClientStorage::open(&path).unwrap();
        storage.set("nmd_theme", "light").unwrap();
        storage.set("nmd_clicks", "2").unwrap();
        storage.remove("nmd_clicks").unwrap();
        drop(storage);

        let reopened = FileClientStorage::open(&path).unwrap();
        assert_eq!(reopened.get("nmd_theme").unwrap().as_deref(), Some("light"));
        assert_eq!(reopened.get("nmd_clicks").unwrap(), None);
    }

    #[test]
    fn memory_storage_round_trips() {
        let storage = MemoryClientStorage::new().with("a", "1");
        assert_eq!(storage.get("a").unwrap().as_deref(), Some("1"));
        storage.remove("a").unwrap();
        assert_eq!(storage.get("a").unwrap(), None);
    }
}
