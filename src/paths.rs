use std::fs;
use std::path::{Path, PathBuf};

pub(crate) const DATA_DIR_ENV: &str = "RIPPLE_DATA_DIR";

pub(crate) fn resolve_data_dir() -> PathBuf {
  if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
    let trimmed = dir.trim();
    if !trimmed.is_empty() {
      let path = PathBuf::from(trimmed);
      if fs::create_dir_all(&path).is_ok() {
        return path;
      }
    }
  }
  let base = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
  let dir = base.join(".ripple");
  let _ = fs::create_dir_all(&dir);
  dir
}

pub(crate) fn resolve_storage_dir(data_dir: &Path) -> PathBuf {
  let dir = data_dir.join("storage");
  let _ = fs::create_dir_all(&dir);
  dir
}

pub(crate) fn resolve_log_dir(data_dir: &Path) -> PathBuf {
  let dir = data_dir.join("logs");
  let _ = fs::create_dir_all(&dir);
  dir
}

/// Maps a storage key to its file name. Anything outside `[A-Za-z0-9_-]`
/// becomes `_` so keys can never escape the storage directory.
pub(crate) fn storage_file_name(key: &str) -> String {
  let safe: String = key
    .chars()
    .map(|c| {
      if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
        c
      } else {
        '_'
      }
    })
    .collect();
  format!("{}.json", safe)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn storage_file_name_keeps_plain_keys() {
    assert_eq!(storage_file_name("ripple-settings"), "ripple-settings.json");
    assert_eq!(storage_file_name("iframeVar"), "iframeVar.json");
  }

  #[test]
  fn storage_file_name_rejects_traversal() {
    assert_eq!(storage_file_name("../etc/passwd"), "___etc_passwd.json");
  }

  #[test]
  fn subdirectories_are_created() {
    let tmp = tempfile::tempdir().unwrap();
    let storage = resolve_storage_dir(tmp.path());
    let logs = resolve_log_dir(tmp.path());
    assert!(storage.is_dir());
    assert!(logs.is_dir());
  }
}
