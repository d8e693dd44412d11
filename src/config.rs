use crate::constants::{CATALOG_URL_DEFAULT, FETCH_TIMEOUT_MS_DEFAULT, TAGLINE_URL_DEFAULT};
use crate::paths::resolve_data_dir;
use std::fs;
use std::path::PathBuf;

/// Process-level configuration, read from `RIPPLE_*` environment variables.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
  pub data_dir: PathBuf,
  pub catalog_url: String,
  pub tagline_url: String,
  pub fetch_timeout_ms: u64,
  pub log_filter: String,
  pub log_to_file: bool,
  /// Environment values that were ignored. Logged once the subscriber is up.
  pub rejected: Vec<String>,
}

impl Default for RuntimeConfig {
  fn default() -> Self {
    Self {
      data_dir: PathBuf::from(".ripple"),
      catalog_url: CATALOG_URL_DEFAULT.to_string(),
      tagline_url: TAGLINE_URL_DEFAULT.to_string(),
      fetch_timeout_ms: FETCH_TIMEOUT_MS_DEFAULT,
      log_filter: "info".to_string(),
      log_to_file: false,
      rejected: Vec::new(),
    }
  }
}

impl RuntimeConfig {
  pub fn from_env() -> Self {
    let defaults = Self::default();
    let mut rejected = Vec::new();
    let fetch_timeout_ms = parse_timeout(
      env_value("RIPPLE_FETCH_TIMEOUT_MS"),
      defaults.fetch_timeout_ms,
      &mut rejected,
    );
    Self {
      data_dir: resolve_data_dir(),
      catalog_url: env_value("RIPPLE_CATALOG_URL").unwrap_or(defaults.catalog_url),
      tagline_url: env_value("RIPPLE_TAGLINE_URL").unwrap_or(defaults.tagline_url),
      fetch_timeout_ms,
      log_filter: env_value("RIPPLE_LOG").unwrap_or(defaults.log_filter),
      log_to_file: env_value("RIPPLE_LOG_FILE")
        .map(|raw| parse_switch(&raw))
        .unwrap_or(defaults.log_to_file),
      rejected,
    }
  }
}

fn parse_timeout(raw: Option<String>, default: u64, rejected: &mut Vec<String>) -> u64 {
  match raw {
    Some(raw) => raw.parse().unwrap_or_else(|_| {
      rejected.push(format!("RIPPLE_FETCH_TIMEOUT_MS='{}': not a number", raw));
      default
    }),
    None => default,
  }
}

fn env_value(key: &str) -> Option<String> {
  std::env::var(key)
    .ok()
    .map(|v| v.trim().to_string())
    .filter(|v| !v.is_empty())
}

fn parse_switch(raw: &str) -> bool {
  matches!(raw.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

/// Loads `.env.local` / `.env` from the working directory and its two
/// parents. Variables already set in the environment win.
pub fn load_local_env() {
  let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
  let parent = cwd.parent().map(|p| p.to_path_buf());
  let grandparent = parent
    .as_ref()
    .and_then(|p| p.parent().map(|gp| gp.to_path_buf()));
  let mut candidates = vec![cwd.join(".env.local"), cwd.join(".env")];
  if let Some(parent) = parent {
    candidates.push(parent.join(".env.local"));
    candidates.push(parent.join(".env"));
  }
  if let Some(grandparent) = grandparent {
    candidates.push(grandparent.join(".env.local"));
    candidates.push(grandparent.join(".env"));
  }

  for path in candidates {
    let Ok(raw) = fs::read_to_string(&path) else {
      continue;
    };
    for (key, value) in parse_env_lines(&raw) {
      if std::env::var(key).is_err() {
        std::env::set_var(key, value);
      }
    }
  }
}

fn parse_env_lines(raw: &str) -> Vec<(&str, &str)> {
  raw
    .lines()
    .map(str::trim)
    .filter(|line| !line.is_empty() && !line.starts_with('#'))
    .filter_map(|line| {
      let (key, value) = line.split_once('=')?;
      let (key, value) = (key.trim(), value.trim());
      if key.is_empty() || value.is_empty() {
        None
      } else {
        Some((key, value))
      }
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn env_lines_skip_comments_and_blanks() {
    let raw = "# comment\n\nRIPPLE_LOG = debug\nEMPTY=\n=nokey\nRIPPLE_LOG_FILE=1";
    assert_eq!(
      parse_env_lines(raw),
      vec![("RIPPLE_LOG", "debug"), ("RIPPLE_LOG_FILE", "1")]
    );
  }

  #[test]
  fn switch_values() {
    assert!(parse_switch("1"));
    assert!(parse_switch("TRUE"));
    assert!(!parse_switch("0"));
    assert!(!parse_switch("off"));
  }

  #[test]
  fn defaults_point_at_published_catalog() {
    let config = RuntimeConfig::default();
    assert!(config.catalog_url.ends_with("connect_file.txt"));
    assert!(config.tagline_url.ends_with("rand_text.txt"));
    assert_eq!(config.fetch_timeout_ms, 8_000);
    assert!(!config.log_to_file);
    assert!(config.rejected.is_empty());
  }

  #[test]
  fn bad_timeout_is_recorded_and_defaulted() {
    let mut rejected = Vec::new();
    assert_eq!(parse_timeout(Some("2500".to_string()), 8_000, &mut rejected), 2_500);
    assert_eq!(parse_timeout(None, 8_000, &mut rejected), 8_000);
    assert!(rejected.is_empty());

    assert_eq!(parse_timeout(Some("soon".to_string()), 8_000, &mut rejected), 8_000);
    assert_eq!(rejected, vec!["RIPPLE_FETCH_TIMEOUT_MS='soon': not a number".to_string()]);
  }
}
