// Durable key-value storage backing the stores.
// Values are JSON strings, one per key, mirroring a browser's local storage.

use crate::errors::AppError;
use crate::paths::storage_file_name;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// String key to string value store. Implementations must treat a missing
/// key as `Ok(None)`, never as an error.
pub trait KeyValueStore: Send + Sync {
  fn get(&self, key: &str) -> Result<Option<String>, AppError>;
  fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
  fn remove(&self, key: &str) -> Result<(), AppError>;
}

pub type SharedStorage = Arc<dyn KeyValueStore>;

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
  dir: PathBuf,
}

impl FileStore {
  pub fn new(dir: impl Into<PathBuf>) -> Result<Self, AppError> {
    let dir = dir.into();
    fs::create_dir_all(&dir)?;
    Ok(Self { dir })
  }

  pub fn dir(&self) -> &Path {
    &self.dir
  }

  fn path_for(&self, key: &str) -> PathBuf {
    self.dir.join(storage_file_name(key))
  }
}

impl KeyValueStore for FileStore {
  fn get(&self, key: &str) -> Result<Option<String>, AppError> {
    match fs::read_to_string(self.path_for(key)) {
      Ok(raw) => Ok(Some(raw)),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(e) => Err(AppError::Storage(format!("read {}: {}", key, e))),
    }
  }

  fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
    // Write-then-rename so a crash never leaves a half-written value.
    let path = self.path_for(key);
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, value).map_err(|e| AppError::Storage(format!("write {}: {}", key, e)))?;
    if let Err(e) = fs::rename(&tmp, &path) {
      let _ = fs::remove_file(&tmp);
      return Err(AppError::Storage(format!("rename {}: {}", key, e)));
    }
    Ok(())
  }

  fn remove(&self, key: &str) -> Result<(), AppError> {
    match fs::remove_file(self.path_for(key)) {
      Ok(()) => Ok(()),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
      Err(e) => Err(AppError::Storage(format!("remove {}: {}", key, e))),
    }
  }
}

/// Process-local store, used by tests and as a fallback when the data
/// directory cannot be created.
#[derive(Debug, Default)]
pub struct MemoryStore {
  entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn shared() -> Arc<Self> {
    Arc::new(Self::new())
  }

  fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, AppError> {
    self
      .entries
      .lock()
      .map_err(|_| AppError::Storage("memory store lock poisoned".to_string()))
  }
}

impl KeyValueStore for MemoryStore {
  fn get(&self, key: &str) -> Result<Option<String>, AppError> {
    Ok(self.lock()?.get(key).cloned())
  }

  fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
    self.lock()?.insert(key.to_string(), value.to_string());
    Ok(())
  }

  fn remove(&self, key: &str) -> Result<(), AppError> {
    self.lock()?.remove(key);
    Ok(())
  }
}
