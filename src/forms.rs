use crate::constants::{PIN_LENGTH, SNIPE_ID_LENGTH};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub error: Option<String>,
}

impl ValidationResult {
    fn ok() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    fn fail(message: &str) -> Self {
        Self {
            valid: false,
            error: Some(message.to_string()),
        }
    }
}

fn is_valid_pin(pin: &str) -> bool {
    pin.len() == PIN_LENGTH && pin.chars().all(|c| c.is_ascii_digit())
}

/// Validates the sign-in form before it reaches the session store
pub fn validate_login_form(snipe_id: &str, pin: &str) -> ValidationResult {
    if snipe_id.is_empty() || pin.is_empty() {
        return ValidationResult::fail("Please fill in all fields");
    }

    if !is_valid_pin(pin) {
        return ValidationResult::fail("PIN must be 4 digits");
    }

    ValidationResult::ok()
}

/// Validates the sign-up form before it reaches the session store
pub fn validate_signup_form(
    name: &str,
    email: &str,
    snipe_id: &str,
    pin: &str,
    confirm_pin: &str,
) -> ValidationResult {
    if [name, email, snipe_id, pin, confirm_pin]
        .iter()
        .any(|field| field.is_empty())
    {
        return ValidationResult::fail("Please fill in all fields");
    }

    if snipe_id.chars().count() != SNIPE_ID_LENGTH {
        return ValidationResult::fail("Snipe ID must be 6 characters");
    }

    if !is_valid_pin(pin) {
        return ValidationResult::fail("PIN must be 4 digits");
    }

    if pin != confirm_pin {
        return ValidationResult::fail("PINs do not match");
    }

    ValidationResult::ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_requires_fields() {
        let result = validate_login_form("", "1234");
        assert!(!result.valid);
        assert_eq!(result.error.as_deref(), Some("Please fill in all fields"));
    }

    #[test]
    fn test_login_pin_must_be_digits() {
        assert!(!validate_login_form("admin1", "12a4").valid);
        assert!(!validate_login_form("admin1", "123").valid);
        assert!(!validate_login_form("admin1", "12345").valid);
    }

    #[test]
    fn test_login_valid() {
        let result = validate_login_form("admin1", "1234");
        assert!(result.valid);
        assert!(result.error.is_none());
    }

    #[test]
    fn test_signup_snipe_id_length() {
        let result = validate_signup_form("Ada", "ada@example.com", "ada", "1234", "1234");
        assert_eq!(result.error.as_deref(), Some("Snipe ID must be 6 characters"));
    }

    #[test]
    fn test_signup_pin_mismatch() {
        let result = validate_signup_form("Ada", "ada@example.com", "ada001", "1234", "4321");
        assert_eq!(result.error.as_deref(), Some("PINs do not match"));
    }

    #[test]
    fn test_signup_valid() {
        assert!(validate_signup_form("Ada", "ada@example.com", "ada001", "1234", "1234").valid);
    }
}
