//! Error types for the Gosta client.

use thiserror::Error;

/// A shared error type for the entire Gosta client.
///
/// Variants follow the failure taxonomy of the client: `Validation` is a
/// local refusal that never reaches the backend, `Request` is any failed
/// backend call, and the rest cover local storage and configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GostaError {
    /// Input rejected locally before any backend call.
    #[error("{0}")]
    Validation(String),

    /// A backend call failed (transport error or non-success status).
    #[error("Request failed{}: {message}", .status.map(|s| format!(" ({s})")).unwrap_or_default())]
    Request {
        status: Option<u16>,
        message: String,
    },

    /// The backend has no such entity for this device.
    #[error("{entity_type} '{id}' not found")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Local storage could not be read or written.
    #[error("Storage I/O failed: {message}")]
    Io { message: String },

    /// A payload or stored file could not be encoded or decoded.
    #[error("Invalid {format} data: {message}")]
    Serialization { format: String, message: String },

    /// Invalid or unreadable client configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Unexpected failure inside the client itself.
    #[error("Unexpected error: {0}")]
    Internal(String),
}

impl GostaError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// `status` is `None` when no HTTP response was received.
    pub fn request(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Request {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_request(&self) -> bool {
        matches!(self, Self::Request { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Message suitable for showing inline next to the action that failed.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Request { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for GostaError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for GostaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for GostaError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for GostaError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for GostaError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, GostaError>`.
pub type Result<T> = std::result::Result<T, GostaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_display_with_status() {
        let err = GostaError::request(Some(502), "Bad gateway");
        assert_eq!(err.to_string(), "Request failed (502): Bad gateway");
        assert!(err.is_request());
    }

    #[test]
    fn test_request_display_without_status() {
        let err = GostaError::request(None, "connection refused");
        assert_eq!(err.to_string(), "Request failed: connection refused");
    }

    #[test]
    fn test_user_message_strips_prefix() {
        let err = GostaError::validation("Please enter some text to summarize.");
        assert_eq!(err.user_message(), "Please enter some text to summarize.");

        let err = GostaError::request(Some(500), "Summarization failed");
        assert_eq!(err.user_message(), "Summarization failed");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: GostaError = io.into();
        assert!(matches!(err, GostaError::Io { .. }));
    }
}
