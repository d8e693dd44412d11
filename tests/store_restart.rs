use ripple_lib::{
  AccentColor, FileStore, KeyValueStore, RippleApp, SessionState, SettingsField, SettingsRecord,
  SharedStorage, Theme,
};
use std::path::Path;
use std::sync::Arc;

fn open(dir: &Path) -> RippleApp {
  let storage: SharedStorage = Arc::new(FileStore::new(dir).unwrap());
  RippleApp::with_storage(storage)
}

#[test]
fn applied_settings_and_session_survive_restart() {
  let tmp = tempfile::tempdir().unwrap();

  let mut first = open(tmp.path());
  first
    .settings
    .set_pending_field(SettingsField::Theme(Theme::RippleMatte));
  first
    .settings
    .set_pending_field(SettingsField::AccentColor(AccentColor::Green));
  first.settings.apply();
  first.settings.set_show_dev_func(true);
  first.session.login("admin1", "1234");
  let applied = first.settings.applied().clone();
  drop(first);

  let second = open(tmp.path());
  assert_eq!(*second.settings.applied(), applied);
  assert_eq!(second.session.state(), SessionState::Authenticated);
  assert_eq!(second.session.user().unwrap().name, "Admin User");
}

#[test]
fn unapplied_edits_are_lost_on_restart() {
  let tmp = tempfile::tempdir().unwrap();

  let mut first = open(tmp.path());
  first
    .settings
    .set_pending_field(SettingsField::Theme(Theme::White));
  drop(first);

  let second = open(tmp.path());
  assert_eq!(second.settings.applied().theme, Theme::Ripple);
  assert_eq!(second.settings.pending().theme, Theme::Ripple);
}

#[test]
fn logout_then_restart_is_unauthenticated() {
  let tmp = tempfile::tempdir().unwrap();

  let mut first = open(tmp.path());
  first.session.login("zzzzzz", "9999");
  first.session.logout();
  drop(first);

  let second = open(tmp.path());
  assert_eq!(second.session.state(), SessionState::Unauthenticated);
}

#[test]
fn legacy_settings_document_fills_missing_fields() {
  let tmp = tempfile::tempdir().unwrap();
  let store = FileStore::new(tmp.path()).unwrap();
  store
    .set(
      "ripple-settings",
      r#"{"theme":"Low Profile","cloak":"Ghost","escapeKeyEnabled":true}"#,
    )
    .unwrap();

  let app = open(tmp.path());
  let expected = SettingsRecord {
    theme: Theme::LowProfile,
    cloak: ripple_lib::Cloak::Ghost,
    escape_key_enabled: true,
    ..SettingsRecord::default()
  };
  assert_eq!(*app.settings.applied(), expected);
}

#[test]
fn reset_all_is_persisted() {
  let tmp = tempfile::tempdir().unwrap();

  let mut first = open(tmp.path());
  first
    .settings
    .set_pending_field(SettingsField::Theme(Theme::White));
  first.settings.apply();
  first.settings.set_show_dev_func(true);
  first.settings.reset_all();
  drop(first);

  let second = open(tmp.path());
  assert_eq!(*second.settings.applied(), SettingsRecord::default());
}
