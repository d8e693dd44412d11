// Hand-off from the app list to the viewer, viewer content resolution and
// the about:blank shield document.

use crate::catalog::{AppEntry, CatalogClient, RenderMode};
use crate::constants::{LAUNCH_MODE_KEY, LAUNCH_URL_KEY, RIPPLE_ICON_URL};
use crate::errors::AppError;
use crate::storage::KeyValueStore;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchTarget {
  pub url: String,
  pub render_mode: RenderMode,
}

pub fn stage_launch(storage: &dyn KeyValueStore, app: &AppEntry) -> Result<(), AppError> {
  storage.set(LAUNCH_URL_KEY, &app.url)?;
  storage.set(LAUNCH_MODE_KEY, &app.render_mode.as_flag().to_string())?;
  info!("Staged launch of {}", app.name);
  Ok(())
}

/// `None` means nothing was staged and the viewer should go back home.
pub fn resolve_launch(storage: &dyn KeyValueStore) -> Result<Option<LaunchTarget>, AppError> {
  let Some(url) = storage.get(LAUNCH_URL_KEY)? else {
    return Ok(None);
  };
  let flag = storage
    .get(LAUNCH_MODE_KEY)?
    .and_then(|raw| raw.trim().parse::<i64>().ok());
  Ok(Some(LaunchTarget {
    url,
    render_mode: RenderMode::from_flag(flag),
  }))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ViewerContent {
  Src { url: String },
  SrcDoc { html: String },
}

/// SrcDoc targets are fetched up front; an empty or failed fetch falls
/// back to pointing the frame at the URL.
pub fn load_viewer_content(client: &CatalogClient, target: &LaunchTarget) -> ViewerContent {
  if target.render_mode == RenderMode::SrcDoc {
    match client.fetch_text(&target.url) {
      Ok(html) if !html.is_empty() => return ViewerContent::SrcDoc { html },
      Ok(_) => error!("Empty app content from {}", target.url),
      Err(err) => error!("Error fetching app content: {}", err),
    }
  }
  ViewerContent::Src {
    url: target.url.clone(),
  }
}

fn escape_attr(raw: &str) -> String {
  let mut out = String::with_capacity(raw.len());
  for c in raw.chars() {
    match c {
      '&' => out.push_str("&amp;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      _ => out.push(c),
    }
  }
  out
}

/// Page written into a fresh about:blank window: one borderless frame
/// covering the viewport.
pub fn shield_document(url: &str) -> String {
  format!(
    concat!(
      "<!DOCTYPE html>\n",
      "<html>\n",
      "  <head>\n",
      "    <title>Ripple</title>\n",
      "    <link rel=\"icon\" href=\"{icon}\">\n",
      "  </head>\n",
      "  <body style=\"margin:0;padding:0;height:100vh;overflow:hidden;\">\n",
      "    <iframe src=\"{src}\" style=\"border:none;width:100%;height:100vh;\"></iframe>\n",
      "  </body>\n",
      "</html>\n"
    ),
    icon = RIPPLE_ICON_URL,
    src = escape_attr(url),
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::RuntimeConfig;
  use crate::storage::MemoryStore;

  fn app(url: &str, render_mode: RenderMode) -> AppEntry {
    AppEntry {
      name: "Alpha".to_string(),
      url: url.to_string(),
      image_url: String::new(),
      is_original: false,
      render_mode,
    }
  }

  #[test]
  fn nothing_staged_resolves_to_none() {
    let storage = MemoryStore::new();
    assert_eq!(resolve_launch(&storage).unwrap(), None);
  }

  #[test]
  fn staged_launch_round_trips() {
    let storage = MemoryStore::new();
    stage_launch(&storage, &app("https://a.example", RenderMode::SrcDoc)).unwrap();
    assert_eq!(storage.get(LAUNCH_MODE_KEY).unwrap().as_deref(), Some("2"));
    let target = resolve_launch(&storage).unwrap().unwrap();
    assert_eq!(target.url, "https://a.example");
    assert_eq!(target.render_mode, RenderMode::SrcDoc);
  }

  #[test]
  fn missing_mode_defaults_to_direct() {
    let storage = MemoryStore::new();
    storage.set(LAUNCH_URL_KEY, "https://a.example").unwrap();
    let target = resolve_launch(&storage).unwrap().unwrap();
    assert_eq!(target.render_mode, RenderMode::Direct);
    storage.set(LAUNCH_MODE_KEY, "garbage").unwrap();
    let target = resolve_launch(&storage).unwrap().unwrap();
    assert_eq!(target.render_mode, RenderMode::Direct);
  }

  #[test]
  fn direct_target_never_fetches() {
    let client = CatalogClient::new(&RuntimeConfig::default());
    let target = LaunchTarget {
      url: "https://a.example".to_string(),
      render_mode: RenderMode::Direct,
    };
    assert_eq!(
      load_viewer_content(&client, &target),
      ViewerContent::Src {
        url: "https://a.example".to_string()
      }
    );
  }

  #[test]
  fn failed_srcdoc_fetch_falls_back_to_src() {
    let config = RuntimeConfig {
      fetch_timeout_ms: 500,
      ..RuntimeConfig::default()
    };
    let client = CatalogClient::new(&config);
    let target = LaunchTarget {
      url: "http://127.0.0.1:9/game.html".to_string(),
      render_mode: RenderMode::SrcDoc,
    };
    assert!(matches!(
      load_viewer_content(&client, &target),
      ViewerContent::Src { .. }
    ));
  }

  #[test]
  fn shield_document_wraps_url() {
    let doc = shield_document("https://a.example/?x=1&y=\"2\"");
    assert!(doc.contains("<title>Ripple</title>"));
    assert!(doc.contains(RIPPLE_ICON_URL));
    assert!(doc.contains("src=\"https://a.example/?x=1&amp;y=&quot;2&quot;\""));
  }
}
