//! Compose form model.
//!
//! Holds the fields of the new-message dialog, validates them per field
//! before anything is sent, and maps a rejected send back onto the form.

use msgcenter_core::{Message, MessageTemplate, NewMessage, Priority, Vendor, is_valid_email};

use crate::error::ClientError;
use crate::store::Store;

/// How the recipient is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecipientType {
    /// Pick a vendor from the directory.
    #[default]
    Vendor,
    /// Type an email address.
    Custom,
}

/// Text fields of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeField {
    /// Selected vendor id.
    VendorId,
    /// Free-text recipient address.
    CustomRecipient,
    /// Subject line.
    Subject,
    /// Message body.
    Content,
}

/// Per-field validation messages plus a general banner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    /// Recipient problem.
    pub recipient: Option<String>,
    /// Subject problem.
    pub subject: Option<String>,
    /// Content problem.
    pub content: Option<String>,
    /// Error not tied to a field, such as a rejected send.
    pub general: Option<String>,
}

impl FormErrors {
    /// True when no error is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.recipient.is_none()
            && self.subject.is_none()
            && self.content.is_none()
            && self.general.is_none()
    }
}

/// State of the compose dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposeForm {
    /// Vendor or free-text recipient.
    pub recipient_type: RecipientType,
    /// Selected vendor id.
    pub vendor_id: String,
    /// Free-text recipient address.
    pub custom_recipient: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub content: String,
    /// Priority.
    pub priority: Priority,
    /// Validation and send errors.
    pub errors: FormErrors,
    /// A send is in flight.
    pub submitting: bool,
}

impl ComposeForm {
    /// A fresh form with the first vendor preselected.
    #[must_use]
    pub fn new(vendors: &[Vendor]) -> Self {
        let mut form = Self::default();
        form.reset(vendors);
        form
    }

    /// Clear every field and error; preselect the first vendor.
    pub fn reset(&mut self, vendors: &[Vendor]) {
        *self = Self {
            vendor_id: vendors.first().map(|v| v.id.clone()).unwrap_or_default(),
            ..Self::default()
        };
    }

    /// Switch between vendor and free-text recipient.
    pub const fn set_recipient_type(&mut self, recipient_type: RecipientType) {
        self.recipient_type = recipient_type;
    }

    /// Set the priority.
    pub const fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    /// Update a text field and clear its error.
    pub fn set_field(&mut self, field: ComposeField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ComposeField::VendorId => {
                self.vendor_id = value;
                self.errors.recipient = None;
            }
            ComposeField::CustomRecipient => {
                self.custom_recipient = value;
                self.errors.recipient = None;
            }
            ComposeField::Subject => {
                self.subject = value;
                self.errors.subject = None;
            }
            ComposeField::Content => {
                self.content = value;
                self.errors.content = None;
            }
        }
    }

    /// Fill subject and content from a template.
    pub fn apply_template(&mut self, template: &MessageTemplate) {
        self.subject.clone_from(&template.subject);
        self.content.clone_from(&template.content);
    }

    /// Check every field, replacing the current errors. Returns true if
    /// the form can be sent.
    pub fn validate(&mut self) -> bool {
        let mut errors = FormErrors::default();

        match self.recipient_type {
            RecipientType::Vendor => {
                if self.vendor_id.is_empty() {
                    errors.recipient = Some("Please select a vendor".to_string());
                }
            }
            RecipientType::Custom => {
                let recipient = self.custom_recipient.trim();
                if recipient.is_empty() {
                    errors.recipient = Some("Recipient is required".to_string());
                } else if !is_valid_email(recipient) {
                    errors.recipient = Some("Please enter a valid email address".to_string());
                }
            }
        }
        if self.subject.trim().is_empty() {
            errors.subject = Some("Subject is required".to_string());
        }
        if self.content.trim().is_empty() {
            errors.content = Some("Message content is required".to_string());
        }

        self.errors = errors;
        self.errors.is_empty()
    }

    /// Request body for the current fields, trimmed.
    #[must_use]
    pub fn to_new_message(&self) -> NewMessage {
        let message = NewMessage::new(self.subject.trim(), self.content.trim())
            .with_priority(self.priority);
        match self.recipient_type {
            RecipientType::Vendor => message.to_vendor(self.vendor_id.clone()),
            RecipientType::Custom => message.to_recipient(self.custom_recipient.trim()),
        }
    }

    /// Show a rejected send as the general banner.
    pub fn apply_send_error(&mut self, error: &ClientError) {
        self.errors = FormErrors {
            general: Some(error.display_message()),
            ..FormErrors::default()
        };
    }

    /// Validate and send through the store.
    ///
    /// Returns the sent message, or `None` when validation or the send
    /// failed; the reason is left in `errors`.
    pub async fn submit(&mut self, store: &Store) -> Option<Message> {
        if !self.validate() {
            return None;
        }
        self.submitting = true;
        let result = store.send(&self.to_new_message()).await;
        self.submitting = false;
        match result {
            Ok(message) => Some(message),
            Err(error) => {
                self.apply_send_error(&error);
                None
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use msgcenter_core::fixtures;

    fn vendors() -> Vec<Vendor> {
        fixtures::directory().vendors().to_vec()
    }

    #[test]
    fn test_reset_preselects_first_vendor() {
        let mut form = ComposeForm::new(&vendors());
        assert_eq!(form.vendor_id, "vendor1");
        assert_eq!(form.priority, Priority::Medium);

        form.subject = "draft".to_string();
        form.errors.general = Some("x".to_string());
        form.reset(&[]);
        assert_eq!(form, ComposeForm::default());
    }

    #[test]
    fn test_validate_empty_vendor_form() {
        let mut form = ComposeForm::new(&[]);
        assert!(!form.validate());
        assert_eq!(form.errors.recipient.as_deref(), Some("Please select a vendor"));
        assert_eq!(form.errors.subject.as_deref(), Some("Subject is required"));
        assert_eq!(form.errors.content.as_deref(), Some("Message content is required"));
        assert!(form.errors.general.is_none());
    }

    #[test]
    fn test_validate_custom_recipient() {
        let mut form = ComposeForm::new(&vendors());
        form.set_recipient_type(RecipientType::Custom);
        form.set_field(ComposeField::Subject, "Hi");
        form.set_field(ComposeField::Content, "Body");

        assert!(!form.validate());
        assert_eq!(form.errors.recipient.as_deref(), Some("Recipient is required"));

        form.set_field(ComposeField::CustomRecipient, "nope");
        assert!(form.errors.recipient.is_none());
        assert!(!form.validate());
        assert_eq!(
            form.errors.recipient.as_deref(),
            Some("Please enter a valid email address")
        );

        form.set_field(ComposeField::CustomRecipient, " buyer@store.example ");
        assert!(form.validate());
        assert!(form.errors.is_empty());
    }

    #[test]
    fn test_set_field_clears_only_its_error() {
        let mut form = ComposeForm::new(&[]);
        form.validate();
        form.set_field(ComposeField::Subject, "Now set");
        assert!(form.errors.subject.is_none());
        assert!(form.errors.content.is_some());
        assert!(form.errors.recipient.is_some());
    }

    #[test]
    fn test_apply_template() {
        let directory = fixtures::directory();
        let template = directory.template("template2").unwrap();
        let mut form = ComposeForm::new(&vendors());
        form.apply_template(template);
        assert_eq!(form.subject, template.subject);
        assert_eq!(form.content, template.content);
        assert_eq!(form.vendor_id, "vendor1");
    }

    #[test]
    fn test_to_new_message() {
        let mut form = ComposeForm::new(&vendors());
        form.set_field(ComposeField::Subject, "  Order  ");
        form.set_field(ComposeField::Content, " Items ");
        form.set_priority(Priority::High);

        let message = form.to_new_message();
        assert_eq!(message.vendor_id.as_deref(), Some("vendor1"));
        assert!(message.recipient.is_none());
        assert_eq!(message.subject, "Order");
        assert_eq!(message.content, "Items");
        assert_eq!(message.priority.as_deref(), Some("high"));

        form.set_recipient_type(RecipientType::Custom);
        form.set_field(ComposeField::CustomRecipient, " a@b.co ");
        let message = form.to_new_message();
        assert!(message.vendor_id.is_none());
        assert_eq!(message.recipient.as_deref(), Some("a@b.co"));
    }

    #[test]
    fn test_send_error_becomes_general_banner() {
        let mut form = ComposeForm::new(&vendors());
        form.errors.subject = Some("stale".to_string());
        form.apply_send_error(&ClientError::Api {
            status: 400,
            error: "Validation failed".to_string(),
            details: vec![
                "Selected vendor was not found".to_string(),
                "Invalid priority level".to_string(),
            ],
        });
        assert_eq!(
            form.errors.general.as_deref(),
            Some("Selected vendor was not found, Invalid priority level")
        );
        assert!(form.errors.subject.is_none());
    }
}
