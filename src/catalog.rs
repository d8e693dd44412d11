// App catalog: pipe-delimited remote listing, placeholder fallback,
// featured/recent lists and name search.

use crate::config::RuntimeConfig;
use crate::constants::{
  CATALOG_MIN_FIELDS, FEATURED_FETCHED, FEATURED_PLACEHOLDER, FLAG_ORIGINAL, FLAG_SRCDOC,
  PLACEHOLDER_IMAGE, RECENT_APPS_MAX, TAGLINE_FALLBACK,
};
use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info};

/// How the viewer embeds an app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RenderMode {
  /// iframe `src` points at the app URL
  #[default]
  Direct,
  /// app HTML is fetched and placed in `srcdoc`
  SrcDoc,
}

impl RenderMode {
  pub fn from_flag(flag: Option<i64>) -> Self {
    match flag {
      Some(FLAG_SRCDOC) => RenderMode::SrcDoc,
      _ => RenderMode::Direct,
    }
  }

  pub fn as_flag(self) -> u8 {
    match self {
      RenderMode::Direct => 1,
      RenderMode::SrcDoc => 2,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppEntry {
  pub name: String,
  pub url: String,
  pub image_url: String,
  pub is_original: bool,
  pub render_mode: RenderMode,
}

fn parse_flag(raw: &str) -> Option<i64> {
  raw.trim().parse().ok()
}

/// One entry per `name|url|imageUrl|originalFlag|iframeMode` line. Blank
/// lines and lines with fewer than five fields are skipped.
pub fn parse_catalog(text: &str) -> Vec<AppEntry> {
  text
    .lines()
    .filter(|line| !line.trim().is_empty())
    .filter_map(|line| {
      let parts: Vec<&str> = line.split('|').collect();
      if parts.len() < CATALOG_MIN_FIELDS {
        return None;
      }
      Some(AppEntry {
        name: parts[0].to_string(),
        url: parts[1].to_string(),
        image_url: parts[2].to_string(),
        is_original: parse_flag(parts[3]) == Some(FLAG_ORIGINAL),
        render_mode: RenderMode::from_flag(parse_flag(parts[4])),
      })
    })
    .collect()
}

pub fn placeholder_catalog() -> Vec<AppEntry> {
  [
    ("Interstellar", false),
    ("Eaglercraft", true),
    ("Verified Key", false),
    ("Keys", false),
    ("Ideas", true),
  ]
  .into_iter()
  .map(|(name, is_original)| AppEntry {
    name: name.to_string(),
    url: "#".to_string(),
    image_url: PLACEHOLDER_IMAGE.to_string(),
    is_original,
    render_mode: RenderMode::Direct,
  })
  .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CatalogSource {
  Remote,
  Placeholder,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
  pub source: CatalogSource,
  pub apps: Vec<AppEntry>,
  pub recent: Vec<AppEntry>,
  pub recommended: Vec<AppEntry>,
}

impl Catalog {
  pub fn from_remote(apps: Vec<AppEntry>) -> Self {
    Self::featured(CatalogSource::Remote, apps, FEATURED_FETCHED)
  }

  pub fn placeholder() -> Self {
    Self::featured(CatalogSource::Placeholder, placeholder_catalog(), FEATURED_PLACEHOLDER)
  }

  fn featured(source: CatalogSource, apps: Vec<AppEntry>, take: usize) -> Self {
    let recent = apps.iter().take(take).cloned().collect();
    let recommended = apps.iter().skip(take).take(take).cloned().collect();
    Self {
      source,
      apps,
      recent,
      recommended,
    }
  }

  /// Case-insensitive substring match on app names.
  pub fn search(&self, term: &str) -> Vec<&AppEntry> {
    if term.is_empty() {
      return Vec::new();
    }
    let needle = term.to_lowercase();
    self
      .apps
      .iter()
      .filter(|app| app.name.to_lowercase().contains(&needle))
      .collect()
  }

  pub fn find(&self, name: &str) -> Option<&AppEntry> {
    self.apps.iter().find(|app| app.name == name)
  }

  /// Moves `app` to the front of the recent list, one entry per name.
  pub fn record_launch(&mut self, app: &AppEntry) {
    self.recent.retain(|a| a.name != app.name);
    self.recent.insert(0, app.clone());
    self.recent.truncate(RECENT_APPS_MAX);
  }
}

/// Picks one non-blank line; `seed` selects which.
pub fn pick_line(text: &str, seed: u64) -> Option<String> {
  let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
  if lines.is_empty() {
    return None;
  }
  let index = (seed % lines.len() as u64) as usize;
  Some(lines[index].to_string())
}

/// Blocking HTTP client for the catalog, tagline and viewer content.
pub struct CatalogClient {
  agent: ureq::Agent,
  catalog_url: String,
  tagline_url: String,
}

impl CatalogClient {
  pub fn new(config: &RuntimeConfig) -> Self {
    let agent = ureq::builder()
      .timeout(Duration::from_millis(config.fetch_timeout_ms))
      .build();
    Self {
      agent,
      catalog_url: config.catalog_url.clone(),
      tagline_url: config.tagline_url.clone(),
    }
  }

  pub fn fetch_text(&self, url: &str) -> Result<String, AppError> {
    let response = self.agent.get(url).call().map_err(|e| match e {
      ureq::Error::Transport(t) => AppError::Network(t.to_string()),
      ureq::Error::Status(code, _) => AppError::Network(format!("HTTP {} from {}", code, url)),
    })?;
    response
      .into_string()
      .map_err(|e| AppError::Network(format!("reading body from {}: {}", url, e)))
  }

  /// Remote catalog, or the placeholder list on any fetch failure.
  pub fn load_catalog(&self) -> Catalog {
    match self.fetch_text(&self.catalog_url) {
      Ok(text) => {
        let apps = parse_catalog(&text);
        info!("Loaded {} apps from catalog", apps.len());
        Catalog::from_remote(apps)
      }
      Err(err) => {
        error!("Error fetching apps: {}", err);
        Catalog::placeholder()
      }
    }
  }

  pub fn load_tagline(&self, seed: u64) -> String {
    match self.fetch_text(&self.tagline_url) {
      Ok(text) => pick_line(&text, seed).unwrap_or_else(|| TAGLINE_FALLBACK.to_string()),
      Err(err) => {
        error!("Error fetching random text: {}", err);
        TAGLINE_FALLBACK.to_string()
      }
    }
  }
}
