// Developer console: a closed vocabulary of string commands.

use crate::constants::{ADMIN_KEY, FORK_URL};
use crate::settings::SettingsStore;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

const WELCOME: &str = "Welcome to Developer Console. Type 'help' for available commands.";

const HELP_LINES: &[&str] = &[
  "Available commands:",
  "- clear: Clear the console",
  "- help: Show available commands",
  "- exit: Close the console",
  "- fork: Open GitHub repository",
  "- run: Run a .yue file",
  "- tgl --inspect: Toggle inspector",
  "- tgl --devfunc: Toggle developer function button",
  "- echo [message]: Display a message",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
  Clear,
  Help,
  Exit,
  Fork,
  Run,
  ToggleInspect,
  ToggleDevFunc,
  Echo(String),
  Unknown(String),
}

impl ConsoleCommand {
  /// Commands match case-insensitively; `echo` keeps the original casing
  /// of its message.
  pub fn parse(input: &str) -> Self {
    let command = input.to_lowercase();
    match command.as_str() {
      "clear" => ConsoleCommand::Clear,
      "help" => ConsoleCommand::Help,
      "exit" => ConsoleCommand::Exit,
      "fork" => ConsoleCommand::Fork,
      "run" => ConsoleCommand::Run,
      "tgl --inspect" => ConsoleCommand::ToggleInspect,
      "tgl --devfunc" => ConsoleCommand::ToggleDevFunc,
      _ => match input.get(..5) {
        Some(prefix) if prefix.eq_ignore_ascii_case("echo ") => {
          ConsoleCommand::Echo(input[5..].to_string())
        }
        _ => ConsoleCommand::Unknown(input.to_string()),
      },
    }
  }
}

/// What the host has to do after a command ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum ConsoleEffect {
  None,
  Close,
  OpenUrl(String),
  PickScript,
}

#[derive(Debug, Clone)]
pub struct Console {
  output: Vec<String>,
  visible: bool,
  inspect_enabled: bool,
  admin_mode: bool,
  admin_preview: Option<String>,
}

impl Default for Console {
  fn default() -> Self {
    Self::new()
  }
}

impl Console {
  pub fn new() -> Self {
    Self {
      output: vec![WELCOME.to_string()],
      visible: false,
      inspect_enabled: false,
      admin_mode: false,
      admin_preview: None,
    }
  }

  pub fn output(&self) -> &[String] {
    &self.output
  }

  pub fn is_visible(&self) -> bool {
    self.visible
  }

  pub fn open(&mut self) {
    self.visible = true;
  }

  pub fn inspect_enabled(&self) -> bool {
    self.inspect_enabled
  }

  pub fn admin_mode(&self) -> bool {
    self.admin_mode
  }

  pub fn admin_preview(&self) -> Option<&str> {
    self.admin_preview.as_deref()
  }

  pub fn execute(&mut self, input: &str, settings: &mut SettingsStore) -> ConsoleEffect {
    let input = input.trim();
    if input.is_empty() {
      return ConsoleEffect::None;
    }
    let command = ConsoleCommand::parse(input);
    debug!("console command: {:?}", command);

    if command == ConsoleCommand::Clear {
      self.output.clear();
      return ConsoleEffect::None;
    }

    self.output.push(format!("> {}", input));
    match command {
      ConsoleCommand::Clear => ConsoleEffect::None,
      ConsoleCommand::Help => {
        self.output.extend(HELP_LINES.iter().map(|l| l.to_string()));
        ConsoleEffect::None
      }
      ConsoleCommand::Exit => {
        self.output.push("Closing console...".to_string());
        self.visible = false;
        ConsoleEffect::Close
      }
      ConsoleCommand::Fork => {
        self.output.push("Opening GitHub repository...".to_string());
        ConsoleEffect::OpenUrl(FORK_URL.to_string())
      }
      ConsoleCommand::Run => {
        self.output.push("Please select a .yue file to run...".to_string());
        ConsoleEffect::PickScript
      }
      ConsoleCommand::ToggleInspect => {
        self.inspect_enabled = !self.inspect_enabled;
        let line = if self.inspect_enabled {
          "Inspector enabled. Right-click will now work normally."
        } else {
          "Inspector disabled. Right-click will now show custom menu."
        };
        self.output.push(line.to_string());
        ConsoleEffect::None
      }
      ConsoleCommand::ToggleDevFunc => {
        let show = !settings.show_dev_func();
        settings.set_show_dev_func(show);
        let state = if show { "enabled" } else { "disabled" };
        self.output.push(format!("Developer Function button {}.", state));
        ConsoleEffect::None
      }
      ConsoleCommand::Echo(message) => {
        self.output.push(message);
        ConsoleEffect::None
      }
      ConsoleCommand::Unknown(raw) => {
        self.output.push(format!(
          "Unknown command: {}. Type 'help' for available commands.",
          raw
        ));
        ConsoleEffect::None
      }
    }
  }

  /// Outcome of the file pick started by `run`.
  pub fn script_selected(&mut self, file_name: Option<&str>) {
    match file_name {
      Some(name) => self.output.push(format!("Running {}...", name)),
      None => self.output.push("No file selected.".to_string()),
    }
  }

  /// Unlocks admin mode and opens the console with `target` as the preview.
  pub fn submit_admin_key(&mut self, key: &str, target: Option<&str>) -> bool {
    if key != ADMIN_KEY {
      warn!("Rejected admin key");
      self.output.push("Invalid admin key.".to_string());
      return false;
    }
    info!("Admin mode unlocked");
    self.admin_mode = true;
    self.visible = true;
    if let Some(target) = target {
      self.admin_preview = Some(target.to_string());
    }
    true
  }
}
