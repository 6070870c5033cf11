//! # Relay Error Types
//!
//! Typed error handling for both relay endpoints.
//! Every failure is caught at the handler boundary and turned into an HTTP
//! response, so the `Display` form of each variant is exactly the message
//! a caller sees in the `{"error": ...}` body.

use thiserror::Error;

/// Core error type for all relay operations
#[derive(Debug, Error)]
pub enum RelayError {
    /// Request used a verb other than POST (or OPTIONS for preflight)
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Server-held credential is missing
    #[error("{0}")]
    MisconfiguredCredential(String),

    /// Inbound payload failed validation
    #[error("{0}")]
    InvalidInput(String),

    /// Upstream answered with a non-success status
    #[error("{message}")]
    UpstreamFailure {
        provider: String,
        status: u16,
        message: String,
    },

    /// Network/HTTP error communicating with the upstream
    #[error("{0}")]
    Transport(String),

    /// Malformed JSON at either boundary, or an unexpected upstream shape
    #[error("{0}")]
    Parse(String),

    /// Upstream did not answer within the configured timeout
    #[error("{provider} did not respond within {timeout_secs}s")]
    Timeout { provider: String, timeout_secs: u64 },
}

impl RelayError {
    /// Map a transport-level failure, keeping timeouts distinct
    pub fn transport(
        provider: &str,
        timeout_secs: u64,
        is_timeout: bool,
        message: impl Into<String>,
    ) -> Self {
        if is_timeout {
            RelayError::Timeout {
                provider: provider.to_string(),
                timeout_secs,
            }
        } else {
            RelayError::Transport(message.into())
        }
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            RelayError::MethodNotAllowed => 405,
            RelayError::MisconfiguredCredential(_) => 500,
            RelayError::InvalidInput(_) => 400,
            RelayError::UpstreamFailure { .. } => 500,
            RelayError::Transport(_) => 500,
            RelayError::Parse(_) => 500,
            RelayError::Timeout { .. } => 504,
        }
    }

    /// Returns true if the caller sent something we refuse to relay
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(err: serde_json::Error) -> Self {
        RelayError::Parse(err.to_string())
    }
}

/// Result type alias for relay operations
pub type RelayResult<T> = Result<T, RelayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(RelayError::MethodNotAllowed.status_code(), 405);
        assert_eq!(
            RelayError::InvalidInput("Invalid cart data".into()).status_code(),
            400
        );
        assert_eq!(
            RelayError::MisconfiguredCredential("API key not configured".into()).status_code(),
            500
        );
        assert_eq!(
            RelayError::UpstreamFailure {
                provider: "stripe".into(),
                status: 402,
                message: "card_declined".into()
            }
            .status_code(),
            500
        );
        assert_eq!(
            RelayError::Timeout {
                provider: "anthropic".into(),
                timeout_secs: 30
            }
            .status_code(),
            504
        );
    }

    #[test]
    fn test_display_is_bare_message() {
        let err = RelayError::UpstreamFailure {
            provider: "stripe".into(),
            status: 402,
            message: "card_declined".into(),
        };
        assert_eq!(err.to_string(), "card_declined");
        assert_eq!(
            RelayError::MisconfiguredCredential("API key not configured".into()).to_string(),
            "API key not configured"
        );
    }

    #[test]
    fn test_transport_keeps_timeouts_distinct() {
        let err = RelayError::transport("stripe", 30, true, "operation timed out");
        assert!(matches!(err, RelayError::Timeout { timeout_secs: 30, .. }));
        assert_eq!(err.to_string(), "stripe did not respond within 30s");

        let err = RelayError::transport("stripe", 30, false, "connection refused");
        assert!(matches!(err, RelayError::Transport(_)));
        assert_eq!(err.to_string(), "connection refused");
    }

    #[test]
    fn test_json_errors_become_parse_errors() {
        let err: RelayError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, RelayError::Parse(_)));
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_client_errors() {
        assert!(RelayError::InvalidInput("x".into()).is_client_error());
        assert!(RelayError::MethodNotAllowed.is_client_error());
        assert!(!RelayError::Transport("x".into()).is_client_error());
    }
}
