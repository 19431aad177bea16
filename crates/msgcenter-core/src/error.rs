//! Error types for the core library.

use thiserror::Error;

use crate::message::{MessageId, ValidationError};

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// No message with the given identifier exists.
    #[error("Message not found: {0}")]
    NotFound(MessageId),

    /// A new message failed validation; every failure is listed.
    #[error("Validation failed: {}", join_messages(.0))]
    Validation(Vec<ValidationError>),

    /// The operation is not allowed for this message.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Database operation failed.
    #[cfg(feature = "sqlite")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Stored data could not be decoded.
    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

impl Error {
    /// Returns true if this error was caused by the caller rather than the backend.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_) | Self::Validation(_) | Self::InvalidOperation(_)
        )
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ValidationError::message)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
