// Ripple - app hub core runtime

pub mod app;
pub mod catalog;
pub mod config;
pub mod console;
mod constants;
pub mod errors;
pub mod forms;
pub mod launch;
mod paths;
pub mod session;
pub mod settings;
pub mod storage;

use std::io::{self, BufRead};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;

pub use app::RippleApp;
pub use catalog::{AppEntry, Catalog, CatalogClient, RenderMode};
pub use config::RuntimeConfig;
pub use console::{Console, ConsoleEffect};
pub use errors::AppError;
pub use session::{SessionState, SessionStore, UserRecord};
pub use settings::{
  AccentColor, Cloak, PendingSettings, SettingsField, SettingsGroup, SettingsRecord, SettingsStore,
  Theme,
};
pub use storage::{FileStore, KeyValueStore, MemoryStore, SharedStorage};

use crate::paths::resolve_log_dir;

/// Installs the global subscriber. Keep the returned guard alive for as
/// long as file logging should flush.
pub fn init_logging(config: &RuntimeConfig) -> Option<WorkerGuard> {
  use tracing_subscriber::{fmt, prelude::*, EnvFilter};

  let filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

  let stderr_layer = fmt::layer()
    .with_target(false)
    .with_thread_ids(false)
    .with_file(true)
    .with_line_number(true)
    .with_writer(io::stderr);

  let (file_layer, guard) = if config.log_to_file {
    let appender = tracing_appender::rolling::daily(resolve_log_dir(&config.data_dir), "ripple.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let layer = fmt::layer().with_ansi(false).with_writer(writer);
    (Some(layer), Some(guard))
  } else {
    (None, None)
  };

  let _ = tracing_subscriber::registry()
    .with(filter)
    .with(stderr_layer)
    .with(file_layer)
    .try_init();

  info!("Ripple starting up");
  guard
}

fn tagline_seed() -> u64 {
  SystemTime::now()
    .duration_since(UNIX_EPOCH)
    .map(|d| d.as_nanos() as u64)
    .unwrap_or(0)
}

/// Prints console lines added since the last call. `printed` resets when
/// the console was cleared.
fn flush_console(console: &Console, printed: &mut usize) {
  let output = console.output();
  if output.len() < *printed {
    *printed = 0;
  }
  for line in &output[*printed..] {
    println!("{}", line);
  }
  *printed = output.len();
}

/// Headless host: loads config and stores, fetches the catalog, then feeds
/// stdin lines to the developer console until `exit` or end of input.
pub fn run() -> Result<(), AppError> {
  config::load_local_env();
  let config = RuntimeConfig::from_env();
  let _guard = init_logging(&config);
  for rejected in &config.rejected {
    warn!("Ignoring {}", rejected);
  }

  let client = CatalogClient::new(&config);
  let mut app = RippleApp::open(&config);
  app.catalog = client.load_catalog();
  println!("{}", client.load_tagline(tagline_seed()));
  info!(
    "{} apps available, session {:?}",
    app.catalog.apps.len(),
    app.session.state()
  );

  app.console.open();
  let mut printed = 0;
  flush_console(&app.console, &mut printed);

  for line in io::stdin().lock().lines() {
    let line = line.map_err(|e| AppError::Other(format!("reading stdin: {}", e)))?;
    let effect = app.run_console_command(&line);
    match effect {
      ConsoleEffect::None => {}
      ConsoleEffect::Close => {
        flush_console(&app.console, &mut printed);
        break;
      }
      ConsoleEffect::OpenUrl(url) => info!("Open {}", url),
      // No file picker without a window.
      ConsoleEffect::PickScript => app.console.script_selected(None),
    }
    flush_console(&app.console, &mut printed);
  }
  Ok(())
}
