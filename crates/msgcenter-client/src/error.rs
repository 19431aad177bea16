//! Client error types.

use thiserror::Error;

/// Errors surfaced by the API client and store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The server answered with an error status.
    #[error("HTTP {status}: {error}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// The `error` field of the response body.
        error: String,
        /// Itemized validation failures, empty when absent.
        details: Vec<String>,
    },

    /// The request did not complete within the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// The server could not be reached.
    #[error("Network error: {0}")]
    Network(String),

    /// The response body could not be decoded.
    #[error("Invalid response: {0}")]
    Decode(String),

    /// The configured base URL cannot be used.
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    /// The request was dropped by the fetch cooldown.
    #[error("Request throttled")]
    Throttled,
}

/// Result alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

impl ClientError {
    /// Single-line message suitable for an error banner.
    ///
    /// Validation details are joined with `", "` when the server sent any.
    #[must_use]
    pub fn display_message(&self) -> String {
        match self {
            Self::Api { error, details, .. } => {
                if details.is_empty() {
                    error.clone()
                } else {
                    details.join(", ")
                }
            }
            Self::Timeout => "Request timed out".to_string(),
            Self::Network(_) => "Unable to reach the server".to_string(),
            Self::Decode(_) => "Unexpected response from the server".to_string(),
            Self::InvalidUrl(_) => "Invalid server address".to_string(),
            Self::Throttled => "Please wait before retrying".to_string(),
        }
    }

    /// HTTP status for server errors.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for a 404 from the server.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_message_prefers_details() {
        let err = ClientError::Api {
            status: 400,
            error: "Validation failed".to_string(),
            details: vec![
                "Subject is required".to_string(),
                "Message content is required".to_string(),
            ],
        };
        assert_eq!(
            err.display_message(),
            "Subject is required, Message content is required"
        );
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_display_message_without_details() {
        let err = ClientError::Api {
            status: 404,
            error: "Message not found".to_string(),
            details: Vec::new(),
        };
        assert_eq!(err.display_message(), "Message not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_transport_errors_have_no_status() {
        assert_eq!(ClientError::Timeout.status(), None);
        assert!(!ClientError::Network("refused".to_string()).is_not_found());
        assert_eq!(ClientError::Timeout.display_message(), "Request timed out");
    }
}
