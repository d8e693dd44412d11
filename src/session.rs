use crate::constants::USER_KEY;
use crate::errors::AppError;
use crate::storage::SharedStorage;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
  pub name: String,
  pub email: String,
  pub snipe_id: String,
  pub is_snipe_plus: bool,
}

struct Credential {
  snipe_id: &'static str,
  pin: &'static str,
  name: &'static str,
  email: &'static str,
  is_snipe_plus: bool,
}

impl Credential {
  fn to_user(&self) -> UserRecord {
    UserRecord {
      name: self.name.to_string(),
      email: self.email.to_string(),
      snipe_id: self.snipe_id.to_string(),
      is_snipe_plus: self.is_snipe_plus,
    }
  }
}

// Demo identities only; there is no credential service behind this table.
const CREDENTIALS: &[Credential] = &[
  Credential {
    snipe_id: "admin1",
    pin: "1234",
    name: "Admin User",
    email: "admin@ripple.com",
    is_snipe_plus: true,
  },
  Credential {
    snipe_id: "test01",
    pin: "0000",
    name: "Test User",
    email: "test@example.com",
    is_snipe_plus: false,
  },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
  Unauthenticated,
  Authenticated,
}

/// At most one signed-in identity, mirrored to `ripple-user`.
pub struct SessionStore {
  storage: SharedStorage,
  user: Option<UserRecord>,
}

impl SessionStore {
  pub fn load(storage: SharedStorage) -> Self {
    let user = match storage.get(USER_KEY) {
      Ok(Some(raw)) => match serde_json::from_str::<UserRecord>(&raw) {
        Ok(user) => Some(user),
        Err(e) => {
          warn!("Ignoring unreadable {}: {}", USER_KEY, e);
          None
        }
      },
      Ok(None) => None,
      Err(err) => {
        error!("{}: {}", err.title(), err.message());
        None
      }
    };
    Self { storage, user }
  }

  pub fn user(&self) -> Option<&UserRecord> {
    self.user.as_ref()
  }

  pub fn state(&self) -> SessionState {
    if self.user.is_some() {
      SessionState::Authenticated
    } else {
      SessionState::Unauthenticated
    }
  }

  /// Never fails: a pair missing from the table signs in a synthesized
  /// identity built from `snipe_id` alone.
  pub fn login(&mut self, snipe_id: &str, pin: &str) -> UserRecord {
    let user = match CREDENTIALS
      .iter()
      .find(|c| c.snipe_id == snipe_id && c.pin == pin)
    {
      Some(credential) => {
        debug!("login matched credential table for {}", snipe_id);
        credential.to_user()
      }
      None => {
        debug!("login synthesized identity for {}", snipe_id);
        UserRecord {
          name: format!("User {}", snipe_id),
          email: format!("{}@example.com", snipe_id),
          snipe_id: snipe_id.to_string(),
          is_snipe_plus: false,
        }
      }
    };
    info!("Signed in as {}", user.snipe_id);
    self.set_user(Some(user.clone()));
    user
  }

  /// The new identity is not added to the credential table.
  pub fn signup(&mut self, name: &str, email: &str, snipe_id: &str, _pin: &str) -> UserRecord {
    let user = UserRecord {
      name: name.to_string(),
      email: email.to_string(),
      snipe_id: snipe_id.to_string(),
      is_snipe_plus: false,
    };
    info!("Signed up as {}", user.snipe_id);
    self.set_user(Some(user.clone()));
    user
  }

  pub fn logout(&mut self) {
    if let Some(user) = &self.user {
      info!("Signed out {}", user.snipe_id);
    }
    self.set_user(None);
  }

  pub fn upgrade_to_snipe_plus(&mut self) {
    let Some(current) = &self.user else {
      return;
    };
    let upgraded = UserRecord {
      is_snipe_plus: true,
      ..current.clone()
    };
    self.set_user(Some(upgraded));
  }

  fn set_user(&mut self, user: Option<UserRecord>) {
    self.user = user;
    if let Err(err) = self.persist() {
      error!("{}: {}", err.title(), err.message());
    }
  }

  fn persist(&self) -> Result<(), AppError> {
    match &self.user {
      Some(user) => {
        let raw = serde_json::to_string(user)?;
        self.storage.set(USER_KEY, &raw)
      }
      None => self.storage.remove(USER_KEY),
    }
  }
}
