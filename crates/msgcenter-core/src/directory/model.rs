//! Vendor and template reference data.

use serde::{Deserialize, Serialize};

/// A vendor the user can message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vendor {
    /// Unique identifier.
    pub id: String,
    /// Display name, used as the recipient of composed messages.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Vendor category (e.g. "Supplies").
    pub category: String,
}

impl Vendor {
    /// Creates a new vendor.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            category: category.into(),
        }
    }

    /// Returns "Name <email>".
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }

    /// Checks if the vendor matches a search query (case-insensitive).
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let query_lower = query.to_lowercase();
        self.name.to_lowercase().contains(&query_lower)
            || self.email.to_lowercase().contains(&query_lower)
            || self.category.to_lowercase().contains(&query_lower)
    }
}

/// A canned subject and body used to prefill the compose form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageTemplate {
    /// Unique identifier.
    pub id: String,
    /// Short name shown on the template button.
    pub name: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub content: String,
}
