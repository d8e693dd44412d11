use crate::catalog::{AppEntry, Catalog, CatalogClient};
use crate::config::RuntimeConfig;
use crate::console::{Console, ConsoleEffect};
use crate::errors::AppError;
use crate::launch::{load_viewer_content, resolve_launch, stage_launch, ViewerContent};
use crate::paths::resolve_storage_dir;
use crate::session::SessionStore;
use crate::settings::SettingsStore;
use crate::storage::{FileStore, MemoryStore, SharedStorage};
use std::sync::Arc;
use tracing::{error, info};

/// Everything one page session owns. Built once, passed by reference.
pub struct RippleApp {
  storage: SharedStorage,
  pub settings: SettingsStore,
  pub session: SessionStore,
  pub console: Console,
  pub catalog: Catalog,
}

impl RippleApp {
  /// File-backed storage under the configured data directory. Falls back to
  /// an in-memory store when the directory is unusable.
  pub fn open(config: &RuntimeConfig) -> Self {
    let dir = resolve_storage_dir(&config.data_dir);
    let storage: SharedStorage = match FileStore::new(&dir) {
      Ok(store) => {
        info!("Using storage at {}", dir.display());
        Arc::new(store)
      }
      Err(err) => {
        error!("{}: {} (settings will not persist)", err.title(), err.message());
        Arc::new(MemoryStore::new())
      }
    };
    Self::with_storage(storage)
  }

  pub fn with_storage(storage: SharedStorage) -> Self {
    Self {
      settings: SettingsStore::load(storage.clone()),
      session: SessionStore::load(storage.clone()),
      console: Console::new(),
      catalog: Catalog::placeholder(),
      storage,
    }
  }

  pub fn storage(&self) -> &SharedStorage {
    &self.storage
  }

  /// Hands `app` to the viewer and bumps it in the recent list.
  pub fn launch(&mut self, app: &AppEntry) -> Result<(), AppError> {
    stage_launch(self.storage.as_ref(), app)?;
    self.catalog.record_launch(app);
    Ok(())
  }

  /// Viewer-side resolution of the staged launch. `None` sends the viewer
  /// back home.
  pub fn viewer_content(&self, client: &CatalogClient) -> Result<Option<ViewerContent>, AppError> {
    let target = resolve_launch(self.storage.as_ref())?;
    Ok(target.map(|target| load_viewer_content(client, &target)))
  }

  pub fn run_console_command(&mut self, input: &str) -> ConsoleEffect {
    self.console.execute(input, &mut self.settings)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::catalog::RenderMode;

  #[test]
  fn open_uses_data_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let config = RuntimeConfig {
      data_dir: tmp.path().to_path_buf(),
      ..RuntimeConfig::default()
    };
    let mut app = RippleApp::open(&config);
    app.session.login("admin1", "1234");
    assert!(tmp.path().join("storage").join("ripple-user.json").exists());
  }

  #[test]
  fn launch_stages_and_records_recent() {
    let mut app = RippleApp::with_storage(Arc::new(MemoryStore::new()));
    let ideas = app.catalog.find("Ideas").unwrap().clone();
    app.launch(&ideas).unwrap();
    assert_eq!(app.catalog.recent[0].name, "Ideas");

    let client = CatalogClient::new(&RuntimeConfig::default());
    let content = app.viewer_content(&client).unwrap().unwrap();
    assert_eq!(content, ViewerContent::Src { url: "#".to_string() });
    assert_eq!(ideas.render_mode, RenderMode::Direct);
  }

  #[test]
  fn viewer_without_launch_goes_home() {
    let app = RippleApp::with_storage(Arc::new(MemoryStore::new()));
    let client = CatalogClient::new(&RuntimeConfig::default());
    assert_eq!(app.viewer_content(&client).unwrap(), None);
  }

  #[test]
  fn console_commands_reach_settings() {
    let mut app = RippleApp::with_storage(Arc::new(MemoryStore::new()));
    app.run_console_command("tgl --devfunc");
    assert!(app.settings.show_dev_func());
  }
}
