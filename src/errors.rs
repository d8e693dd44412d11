use serde::{Deserialize, Serialize};
use std::fmt;

/// Application-wide error types with categories for better error handling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    /// Durable key-value storage errors (read/write/remove failed)
    Storage(String),

    /// Network errors (catalog fetch, viewer content fetch)
    Network(String),

    /// Rejected settings input (unknown field, unknown enum value)
    Settings(String),

    /// Persisted or fetched payload could not be decoded
    Decode(String),

    /// Generic errors that don't fit other categories
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Storage(msg) => write!(f, "Storage Error: {}", msg),
            AppError::Network(msg) => write!(f, "Network Error: {}", msg),
            AppError::Settings(msg) => write!(f, "Settings Error: {}", msg),
            AppError::Decode(msg) => write!(f, "Decode Error: {}", msg),
            AppError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// Returns a user-friendly title for the error
    pub fn title(&self) -> &str {
        match self {
            AppError::Storage(_) => "Storage Error",
            AppError::Network(_) => "Network Problem",
            AppError::Settings(_) => "Invalid Setting",
            AppError::Decode(_) => "Unreadable Data",
            AppError::Other(_) => "Error",
        }
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        match self {
            AppError::Storage(msg)
            | AppError::Network(msg)
            | AppError::Settings(msg)
            | AppError::Decode(msg)
            | AppError::Other(msg) => msg,
        }
    }

    /// Returns whether this error is recoverable (can be retried)
    pub fn is_recoverable(&self) -> bool {
        match self {
            AppError::Storage(_) => true,   // Might be transient disk issue
            AppError::Network(_) => true,   // Network might recover
            AppError::Settings(_) => false, // Input has to change
            AppError::Decode(_) => false,
            AppError::Other(_) => false,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        AppError::Storage(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        AppError::Decode(error.to_string())
    }
}

/// Convert from String to AppError::Other
impl From<String> for AppError {
    fn from(error: String) -> Self {
        AppError::Other(error)
    }
}

/// Convert from &str to AppError::Other
impl From<&str> for AppError {
    fn from(error: &str) -> Self {
        AppError::Other(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::Storage("disk full".to_string());
        assert_eq!(err.to_string(), "Storage Error: disk full");
    }

    #[test]
    fn test_error_title() {
        let err = AppError::Settings("unknown theme".to_string());
        assert_eq!(err.title(), "Invalid Setting");
        assert_eq!(err.message(), "unknown theme");
    }

    #[test]
    fn test_recoverable() {
        assert!(AppError::Network("timeout".to_string()).is_recoverable());
        assert!(!AppError::Settings("bad".to_string()).is_recoverable());
    }

    #[test]
    fn test_from_string() {
        let err: AppError = "test error".into();
        assert!(matches!(err, AppError::Other(_)));
    }

    #[test]
    fn test_from_json_error() {
        let err: AppError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, AppError::Decode(_)));
    }

    #[test]
    fn test_serialized_shape() {
        let raw = serde_json::to_string(&AppError::Network("offline".to_string())).unwrap();
        assert_eq!(raw, r#"{"type":"Network","message":"offline"}"#);
    }
}
