//! Error types shared across layers.

use thiserror::Error;

/// Failure talking to the remote data platform.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {message}")]
    Connection { message: String },

    #[error("request failed: {message}")]
    Request { message: String },

    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },

    #[error("unexpected response: {message}")]
    Decode { message: String },

    #[error("session is not initialized")]
    SessionNotReady,

    #[error("gateway task failed")]
    TaskFailed,
}

impl GatewayError {
    /// Creates an API error from a status code and message.
    #[must_use]
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_connect() {
            Self::Connection {
                message: e.to_string(),
            }
        } else if e.is_decode() {
            Self::Decode {
                message: e.to_string(),
            }
        } else {
            Self::Request {
                message: e.to_string(),
            }
        }
    }
}

/// Local input validation failure. Never reaches the network.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Account name is required")]
    MissingName,
}

/// Failure reading or writing persisted settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings format error: {0}")]
    Format(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_includes_status() {
        let err = GatewayError::api(403, "Principal user is missing privileges");
        assert_eq!(err.to_string(), "Principal user is missing privileges (HTTP 403)");
    }

    #[test]
    fn test_validation_message() {
        assert_eq!(ValidationError::MissingName.to_string(), "Account name is required");
    }
}
