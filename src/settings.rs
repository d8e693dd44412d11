use crate::constants::{DEFAULT_ESCAPE_KEY, DEFAULT_ESCAPE_URL, SETTINGS_KEY};
use crate::errors::AppError;
use crate::storage::SharedStorage;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, error, warn};
use url::Url;

macro_rules! settings_enum {
  ($name:ident, $label:tt, { $($variant:ident => $wire:tt),+ $(,)? }) => {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum $name {
      $(#[serde(rename = $wire)] $variant,)+
    }

    impl $name {
      pub const ALL: &'static [$name] = &[$($name::$variant),+];

      pub fn as_str(self) -> &'static str {
        match self {
          $($name::$variant => $wire,)+
        }
      }
    }

    impl FromStr for $name {
      type Err = AppError;

      fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
          $($wire => Ok($name::$variant),)+
          other => Err(AppError::Settings(format!("unknown {}: '{}'", $label, other))),
        }
      }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
      }
    }
  };
}

settings_enum!(Theme, "theme", {
  Ripple => "Ripple",
  RippleMatte => "Ripple Matte",
  White => "White",
  LowProfile => "Low Profile",
});

settings_enum!(Cloak, "cloak", {
  Ripple => "Ripple",
  Google => "Google",
  Teams => "Teams",
  Ghost => "Ghost",
});

settings_enum!(AccentColor, "accent color", {
  Blue => "blue",
  Purple => "purple",
  Green => "green",
  Red => "red",
  Orange => "orange",
  Pink => "pink",
});

impl Default for Theme {
  fn default() -> Self {
    Theme::Ripple
  }
}

impl Default for Cloak {
  fn default() -> Self {
    Cloak::Ripple
  }
}

impl Default for AccentColor {
  fn default() -> Self {
    AccentColor::Blue
  }
}

/// The applied configuration, as persisted under `ripple-settings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsRecord {
  pub theme: Theme,
  pub cloak: Cloak,
  pub accent_color: AccentColor,
  pub escape_key_enabled: bool,
  pub escape_key: String,
  pub escape_url: String,
  pub display_snipe_shield: bool,
  pub show_dev_func: bool,
}

impl Default for SettingsRecord {
  fn default() -> Self {
    Self {
      theme: Theme::default(),
      cloak: Cloak::default(),
      accent_color: AccentColor::default(),
      escape_key_enabled: false,
      escape_key: DEFAULT_ESCAPE_KEY.to_string(),
      escape_url: DEFAULT_ESCAPE_URL.to_string(),
      display_snipe_shield: true,
      show_dev_func: false,
    }
  }
}

/// Edited-but-uncommitted settings. `show_dev_func` has no pending copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingSettings {
  pub theme: Theme,
  pub cloak: Cloak,
  pub accent_color: AccentColor,
  pub escape_key_enabled: bool,
  pub escape_key: String,
  pub escape_url: String,
  pub display_snipe_shield: bool,
}

impl Default for PendingSettings {
  fn default() -> Self {
    PendingSettings::from(&SettingsRecord::default())
  }
}

impl From<&SettingsRecord> for PendingSettings {
  fn from(applied: &SettingsRecord) -> Self {
    Self {
      theme: applied.theme,
      cloak: applied.cloak,
      accent_color: applied.accent_color,
      escape_key_enabled: applied.escape_key_enabled,
      escape_key: applied.escape_key.clone(),
      escape_url: applied.escape_url.clone(),
      display_snipe_shield: applied.display_snipe_shield,
    }
  }
}

impl SettingsRecord {
  fn take_pending(&mut self, pending: &PendingSettings) {
    self.theme = pending.theme;
    self.cloak = pending.cloak;
    self.accent_color = pending.accent_color;
    self.escape_key_enabled = pending.escape_key_enabled;
    self.escape_key = pending.escape_key.clone();
    self.escape_url = pending.escape_url.clone();
    self.display_snipe_shield = pending.display_snipe_shield;
  }

  fn matches_pending(&self, pending: &PendingSettings) -> bool {
    PendingSettings::from(self) == *pending
  }
}

/// A single typed write into the pending copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsField {
  Theme(Theme),
  Cloak(Cloak),
  AccentColor(AccentColor),
  EscapeKeyEnabled(bool),
  EscapeKey(String),
  EscapeUrl(String),
  DisplaySnipeShield(bool),
}

impl SettingsField {
  /// Converts a raw control value into a typed field. Enum fields reject
  /// unknown spellings; key and URL strings pass through untouched.
  pub fn parse(name: &str, value: &str) -> Result<Self, AppError> {
    match name {
      "theme" => Ok(SettingsField::Theme(value.parse()?)),
      "cloak" => Ok(SettingsField::Cloak(value.parse()?)),
      "accentColor" => Ok(SettingsField::AccentColor(value.parse()?)),
      "escapeKeyEnabled" => Ok(SettingsField::EscapeKeyEnabled(parse_flag(name, value)?)),
      "escapeKey" => Ok(SettingsField::EscapeKey(value.to_string())),
      "escapeUrl" => Ok(SettingsField::EscapeUrl(value.to_string())),
      "displaySnipeShield" => Ok(SettingsField::DisplaySnipeShield(parse_flag(name, value)?)),
      "showDevFunc" => Err(AppError::Settings(
        "showDevFunc is applied directly and has no pending value".to_string(),
      )),
      other => Err(AppError::Settings(format!("unknown settings field: '{}'", other))),
    }
  }

  pub fn name(&self) -> &'static str {
    match self {
      SettingsField::Theme(_) => "theme",
      SettingsField::Cloak(_) => "cloak",
      SettingsField::AccentColor(_) => "accentColor",
      SettingsField::EscapeKeyEnabled(_) => "escapeKeyEnabled",
      SettingsField::EscapeKey(_) => "escapeKey",
      SettingsField::EscapeUrl(_) => "escapeUrl",
      SettingsField::DisplaySnipeShield(_) => "displaySnipeShield",
    }
  }
}

fn parse_flag(name: &str, value: &str) -> Result<bool, AppError> {
  match value.trim() {
    "true" => Ok(true),
    "false" => Ok(false),
    other => Err(AppError::Settings(format!(
      "{} expects true or false, got '{}'",
      name, other
    ))),
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsGroup {
  Appearance,
  Cloaking,
  Security,
}

impl FromStr for SettingsGroup {
  type Err = AppError;

  fn from_str(raw: &str) -> Result<Self, Self::Err> {
    match raw {
      "appearance" => Ok(SettingsGroup::Appearance),
      "cloaking" => Ok(SettingsGroup::Cloaking),
      "security" => Ok(SettingsGroup::Security),
      other => Err(AppError::Settings(format!("unknown settings group: '{}'", other))),
    }
  }
}

/// Applied and pending settings, with the applied copy mirrored to storage.
pub struct SettingsStore {
  storage: SharedStorage,
  applied: SettingsRecord,
  pending: PendingSettings,
}

impl SettingsStore {
  /// Seeds from `ripple-settings` if present, else defaults. Pending starts
  /// as a copy of applied.
  pub fn load(storage: SharedStorage) -> Self {
    let applied = match storage.get(SETTINGS_KEY) {
      Ok(Some(raw)) => decode_settings(&raw),
      Ok(None) => SettingsRecord::default(),
      Err(err) => {
        error!("{}: {}", err.title(), err.message());
        SettingsRecord::default()
      }
    };
    let pending = PendingSettings::from(&applied);
    Self {
      storage,
      applied,
      pending,
    }
  }

  pub fn applied(&self) -> &SettingsRecord {
    &self.applied
  }

  pub fn pending(&self) -> &PendingSettings {
    &self.pending
  }

  pub fn show_dev_func(&self) -> bool {
    self.applied.show_dev_func
  }

  pub fn has_pending_changes(&self) -> bool {
    !self.applied.matches_pending(&self.pending)
  }

  pub fn set_pending_field(&mut self, field: SettingsField) {
    debug!("pending {} updated", field.name());
    match field {
      SettingsField::Theme(theme) => self.pending.theme = theme,
      SettingsField::Cloak(cloak) => self.pending.cloak = cloak,
      SettingsField::AccentColor(color) => self.pending.accent_color = color,
      SettingsField::EscapeKeyEnabled(enabled) => self.pending.escape_key_enabled = enabled,
      SettingsField::EscapeKey(key) => self.pending.escape_key = key,
      SettingsField::EscapeUrl(url) => {
        if Url::parse(&url).is_err() {
          warn!("Accepting escape URL that does not parse: {}", url);
        }
        self.pending.escape_url = url;
      }
      SettingsField::DisplaySnipeShield(show) => self.pending.display_snipe_shield = show,
    }
  }

  pub fn apply(&mut self) {
    self.applied.take_pending(&self.pending);
    self.persist();
  }

  pub fn reset_group(&mut self, group: SettingsGroup) {
    let defaults = PendingSettings::default();
    match group {
      SettingsGroup::Appearance => {
        self.pending.theme = defaults.theme;
        self.pending.accent_color = defaults.accent_color;
      }
      SettingsGroup::Cloaking => {
        self.pending.cloak = defaults.cloak;
      }
      SettingsGroup::Security => {
        self.pending.escape_key_enabled = defaults.escape_key_enabled;
        self.pending.escape_key = defaults.escape_key;
        self.pending.escape_url = defaults.escape_url;
        self.pending.display_snipe_shield = defaults.display_snipe_shield;
      }
    }
  }

  pub fn reset_all(&mut self) {
    self.applied = SettingsRecord::default();
    self.pending = PendingSettings::default();
    self.persist();
  }

  /// Applied immediately; never goes through the pending copy.
  pub fn set_show_dev_func(&mut self, show: bool) {
    self.applied.show_dev_func = show;
    self.persist();
  }

  /// URL to redirect to when `key` is the enabled panic key.
  pub fn panic_redirect(&self, key: &str) -> Option<&str> {
    if self.applied.escape_key_enabled && key == self.applied.escape_key {
      Some(self.applied.escape_url.as_str())
    } else {
      None
    }
  }

  pub fn shield_visible(&self) -> bool {
    self.applied.display_snipe_shield
  }

  fn persist(&self) {
    let result = serde_json::to_string(&self.applied)
      .map_err(AppError::from)
      .and_then(|raw| self.storage.set(SETTINGS_KEY, &raw));
    if let Err(err) = result {
      error!("{}: {}", err.title(), err.message());
    }
  }
}

/// Field-by-field decode: every missing, mistyped or unknown value falls back
/// to its own default. Saved strings are kept as-is, empty included.
fn decode_settings(raw: &str) -> SettingsRecord {
  let value: Value = match serde_json::from_str(raw) {
    Ok(value) => value,
    Err(e) => {
      warn!("Ignoring unreadable {}: {}", SETTINGS_KEY, e);
      return SettingsRecord::default();
    }
  };
  let Some(obj) = value.as_object() else {
    warn!("Ignoring {}: not a JSON object", SETTINGS_KEY);
    return SettingsRecord::default();
  };
  let defaults = SettingsRecord::default();
  SettingsRecord {
    theme: enum_field(obj, "theme").unwrap_or(defaults.theme),
    cloak: enum_field(obj, "cloak").unwrap_or(defaults.cloak),
    accent_color: enum_field(obj, "accentColor").unwrap_or(defaults.accent_color),
    escape_key_enabled: bool_field(obj, "escapeKeyEnabled").unwrap_or(defaults.escape_key_enabled),
    escape_key: string_field(obj, "escapeKey").unwrap_or(defaults.escape_key),
    escape_url: string_field(obj, "escapeUrl").unwrap_or(defaults.escape_url),
    display_snipe_shield: bool_field(obj, "displaySnipeShield")
      .unwrap_or(defaults.display_snipe_shield),
    show_dev_func: bool_field(obj, "showDevFunc").unwrap_or(defaults.show_dev_func),
  }
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
  obj
    .get(key)?
    .as_str()
    .map(str::to_string)
}

fn bool_field(obj: &Map<String, Value>, key: &str) -> Option<bool> {
  obj.get(key)?.as_bool()
}

fn enum_field<T: FromStr<Err = AppError>>(obj: &Map<String, Value>, key: &str) -> Option<T> {
  let raw = string_field(obj, key).filter(|s| !s.is_empty())?;
  match raw.parse() {
    Ok(value) => Some(value),
    Err(err) => {
      warn!("Falling back to default {}: {}", key, err.message());
      None
    }
  }
}
