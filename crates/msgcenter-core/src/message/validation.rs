//! Compose validation.

use chrono::{DateTime, Utc};

use super::model::{Message, MessageId, MessageType, NewMessage, Priority, make_preview};
use crate::directory::Directory;

/// Sender name used for every message composed locally.
pub const OWN_SENDER: &str = "You";

/// Validation error for a new message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Neither a vendor nor a recipient was given.
    MissingRecipient,
    /// The free-text recipient is not an email address.
    InvalidEmail,
    /// The vendor reference does not exist.
    UnknownVendor,
    /// Subject is empty.
    EmptySubject,
    /// Content is empty.
    EmptyContent,
    /// Priority is not one of high, medium, low.
    InvalidPriority,
}

impl ValidationError {
    /// Get human-readable error message.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::MissingRecipient => "Recipient is required",
            Self::InvalidEmail => "Please enter a valid email address",
            Self::UnknownVendor => "Selected vendor was not found",
            Self::EmptySubject => "Subject is required",
            Self::EmptyContent => "Message content is required",
            Self::InvalidPriority => "Invalid priority level",
        }
    }

    /// Get the form field this error relates to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::MissingRecipient | Self::InvalidEmail | Self::UnknownVendor => "recipient",
            Self::EmptySubject => "subject",
            Self::EmptyContent => "content",
            Self::InvalidPriority => "priority",
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ValidationError {}

/// A new message that passed validation, with the recipient resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedMessage {
    /// Recipient display name (vendor name or the email itself).
    pub recipient: String,
    /// Recipient email address.
    pub recipient_email: String,
    /// Trimmed subject.
    pub subject: String,
    /// Trimmed content.
    pub content: String,
    /// Priority.
    pub priority: Priority,
}

impl ValidatedMessage {
    /// Turn the validated input into a sent message.
    ///
    /// Sent messages start read and unacknowledged, without attachments.
    #[must_use]
    pub fn into_message(self, id: MessageId, timestamp: DateTime<Utc>) -> Message {
        Message {
            id,
            sender: OWN_SENDER.to_string(),
            preview: make_preview(&self.content),
            recipient: Some(self.recipient),
            recipient_email: Some(self.recipient_email),
            subject: self.subject,
            content: self.content,
            priority: self.priority,
            timestamp,
            is_read: true,
            has_attachment: false,
            is_acknowledged: Some(false),
            kind: MessageType::Sent,
        }
    }
}

/// Validate a new message against the vendor directory.
///
/// Returns the resolved message, or every validation failure in field order.
///
/// # Errors
///
/// Returns `Err(Vec<ValidationError>)` listing all failures when the input is invalid.
pub fn validate_new_message(
    input: &NewMessage,
    directory: &Directory,
) -> Result<ValidatedMessage, Vec<ValidationError>> {
    let mut errors = Vec::new();

    let vendor_id = input
        .vendor_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty());
    let recipient = match vendor_id {
        Some(id) => match directory.vendor(id) {
            Some(vendor) => Some((vendor.name.clone(), vendor.email.clone())),
            None => {
                errors.push(ValidationError::UnknownVendor);
                None
            }
        },
        None => {
            let email = input.recipient.as_deref().unwrap_or_default().trim();
            if email.is_empty() {
                errors.push(ValidationError::MissingRecipient);
                None
            } else if !is_valid_email(email) {
                errors.push(ValidationError::InvalidEmail);
                None
            } else {
                Some((email.to_string(), email.to_string()))
            }
        }
    };

    let subject = input.subject.trim();
    if subject.is_empty() {
        errors.push(ValidationError::EmptySubject);
    }

    let content = input.content.trim();
    if content.is_empty() {
        errors.push(ValidationError::EmptyContent);
    }

    let priority = match input.priority.as_deref() {
        None => Some(Priority::default()),
        Some(raw) => Priority::parse(raw),
    };
    if priority.is_none() {
        errors.push(ValidationError::InvalidPriority);
    }

    match (recipient, priority) {
        (Some((recipient, recipient_email)), Some(priority)) if errors.is_empty() => {
            Ok(ValidatedMessage {
                recipient,
                recipient_email,
                subject: subject.to_string(),
                content: content.to_string(),
                priority,
            })
        }
        _ => Err(errors),
    }
}

/// Basic email shape check: something, `@`, something, `.`, something.
///
/// Whitespace breaks a run, but the shape may appear anywhere in the input.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    email.split_whitespace().any(|run| {
        // The earliest `@` leaves the longest domain to search.
        let Some((at, _)) = run.char_indices().skip(1).find(|&(_, c)| c == '@') else {
            return false;
        };
        let domain = &run[at + 1..];
        // Needs at least one character on each side of some dot.
        domain
            .char_indices()
            .skip(1)
            .any(|(i, c)| c == '.' && i + 1 < domain.len())
    })
}
