use crate::error::StorageError;
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: String) -> Result<(), StorageError>;
}

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join("storage.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Map<String, Value> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Map::new(),
            Err(err) => {
                warn!("failed to read {}: {err}", self.path.display());
                return Map::new();
            }
        };

        match serde_json::from_slice::<Value>(&data) {
            Ok(Value::Object(entries)) => entries,
            Ok(_) => {
                warn!("ignoring {}: top level is not an object", self.path.display());
                Map::new()
            }
            Err(err) => {
                warn!("ignoring corrupt {}: {err}", self.path.display());
                Map::new()
            }
        }
    }

    fn io_error(&self, source: io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.read_entries().remove(key)? {
            Value::String(value) => Some(value),
            other => Some(other.to_string()),
        }
    }

    fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        let mut entries = self.read_entries();
        entries.insert(key.to_string(), Value::String(value));

        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|err| self.io_error(err))?;
        }

        let bytes = serde_json::to_vec_pretty(&Value::Object(entries))?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, bytes).map_err(|err| self.io_error(err))?;
        match fs::rename(&tmp_path, &self.path) {
            Ok(()) => Ok(()),
            Err(rename_err) => {
                if self.path.exists() {
                    fs::remove_file(&self.path).map_err(|err| self.io_error(err))?;
                    fs::rename(&tmp_path, &self.path).map_err(|err| self.io_error(err))?;
                    Ok(())
                } else {
                    Err(self.io_error(rename_err))
                }
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.borrow_mut().insert(key.to_string(), value);
        Ok(())
    }
}
