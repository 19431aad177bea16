//! Message model types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Number of characters of content kept in a preview.
pub const PREVIEW_LENGTH: usize = 100;

/// Unique identifier for a message.
///
/// Opaque to clients; newly created messages get a random UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MessageId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for MessageId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Needs immediate attention.
    High,
    /// Normal priority.
    #[default]
    Medium,
    /// Can wait.
    Low,
}

impl Priority {
    /// Parse the wire representation. Returns `None` for unknown values.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }

    /// Wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Human-readable display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// Which mailbox a message belongs to. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    /// Received message.
    #[default]
    Inbox,
    /// Message sent by the user.
    Sent,
}

impl MessageType {
    /// Parse the wire representation. Returns `None` for unknown values.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "inbox" => Some(Self::Inbox),
            "sent" => Some(Self::Sent),
            _ => None,
        }
    }

    /// Wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inbox => "inbox",
            Self::Sent => "sent",
        }
    }
}

/// Status filter for the message list.
///
/// Which values are meaningful depends on the view: inbox understands
/// `unread`/`read`, sent understands `read`/`acknowledged`. Anything else
/// behaves as `all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageFilter {
    /// No restriction.
    #[default]
    All,
    /// Only unread messages.
    Unread,
    /// Only read messages.
    Read,
    /// Only acknowledged messages.
    Acknowledged,
}

impl MessageFilter {
    const INBOX_OPTIONS: [Self; 3] = [Self::All, Self::Unread, Self::Read];
    const SENT_OPTIONS: [Self; 3] = [Self::All, Self::Read, Self::Acknowledged];

    /// Parse the wire representation. Unknown values fall back to `All`.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "unread" => Self::Unread,
            "read" => Self::Read,
            "acknowledged" => Self::Acknowledged,
            _ => Self::All,
        }
    }

    /// Wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Unread => "unread",
            Self::Read => "read",
            Self::Acknowledged => "acknowledged",
        }
    }

    /// Label shown in the filter dropdown.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Unread => "Unread",
            Self::Read => "Read",
            Self::Acknowledged => "Acknowledged",
        }
    }

    /// Filters offered for a view, in display order.
    #[must_use]
    pub const fn options_for(kind: MessageType) -> &'static [Self] {
        match kind {
            MessageType::Inbox => &Self::INBOX_OPTIONS,
            MessageType::Sent => &Self::SENT_OPTIONS,
        }
    }

    /// Whether this filter restricts anything in the given view.
    #[must_use]
    pub fn is_legal_for(self, kind: MessageType) -> bool {
        Self::options_for(kind).contains(&self)
    }
}

impl std::str::FromStr for MessageFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// A message in the inbox or the sent folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique identifier. Never changes.
    pub id: MessageId,
    /// Display name of the sender ("You" for sent messages).
    pub sender: String,
    /// Recipient display name, for sent messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    /// Recipient email address, for sent messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_email: Option<String>,
    /// Subject line.
    pub subject: String,
    /// Truncated content shown in the list.
    pub preview: String,
    /// Full message body.
    pub content: String,
    /// Priority.
    pub priority: Priority,
    /// When the message was received or sent.
    pub timestamp: DateTime<Utc>,
    /// Whether the message has been read.
    pub is_read: bool,
    /// Whether the message carries attachments.
    pub has_attachment: bool,
    /// Whether the recipient acknowledged the message. Only set on sent messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_acknowledged: Option<bool>,
    /// Inbox or sent. Never changes after creation.
    #[serde(rename = "type")]
    pub kind: MessageType,
}

impl Message {
    /// Check if this is an inbox message that has not been read.
    #[must_use]
    pub fn is_unread_inbox(&self) -> bool {
        self.kind == MessageType::Inbox && !self.is_read
    }

    /// Check if the recipient acknowledged this message.
    #[must_use]
    pub fn is_acknowledged(&self) -> bool {
        self.is_acknowledged == Some(true)
    }

    /// Case-insensitive substring match against subject, sender, preview
    /// and recipient. An empty term matches everything.
    #[must_use]
    pub fn matches_search(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        let needle = term.to_lowercase();
        self.subject.to_lowercase().contains(&needle)
            || self.sender.to_lowercase().contains(&needle)
            || self.preview.to_lowercase().contains(&needle)
            || self
                .recipient
                .as_ref()
                .is_some_and(|r| r.to_lowercase().contains(&needle))
    }
}

/// Build the list preview for a message body.
///
/// Keeps the first [`PREVIEW_LENGTH`] characters of the trimmed content and
/// appends `...` when anything was cut.
#[must_use]
pub fn make_preview(content: &str) -> String {
    let content = content.trim();
    match content.char_indices().nth(PREVIEW_LENGTH) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_string(),
    }
}

/// Input for composing a new message.
///
/// Fields arrive unvalidated; `priority` stays raw text so an unknown value
/// is reported as a validation failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    /// Free-text recipient email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    /// Vendor reference; takes precedence over `recipient`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,
    /// Subject line.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub subject: String,
    /// Message body.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
    /// Priority name; defaults to medium.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

impl NewMessage {
    /// Create a message with subject and content and no recipient yet.
    #[must_use]
    pub fn new(subject: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    /// Address the message to a vendor from the directory.
    #[must_use]
    pub fn to_vendor(mut self, vendor_id: impl Into<String>) -> Self {
        self.vendor_id = Some(vendor_id.into());
        self
    }

    /// Address the message to a free-text email address.
    #[must_use]
    pub fn to_recipient(mut self, recipient: impl Into<String>) -> Self {
        self.recipient = Some(recipient.into());
        self
    }

    /// Set the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority.as_str().to_string());
        self
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> Message {
        Message {
            id: MessageId::from("m1"),
            sender: "Impact Team".into(),
            recipient: None,
            recipient_email: None,
            subject: "Weekly Sales Report".into(),
            preview: "Please submit your report".into(),
            content: "Please submit your report by Friday.".into(),
            priority: Priority::High,
            timestamp: "2025-01-22T10:30:00Z".parse().unwrap(),
            is_read: false,
            has_attachment: false,
            is_acknowledged: None,
            kind: MessageType::Inbox,
        }
    }

    mod preview_tests {
        use super::*;

        #[test]
        fn short_content_is_kept() {
            assert_eq!(make_preview("  hello  "), "hello");
        }

        #[test]
        fn exactly_limit_is_not_truncated() {
            let content = "a".repeat(PREVIEW_LENGTH);
            assert_eq!(make_preview(&content), content);
        }

        #[test]
        fn long_content_is_truncated_with_ellipsis() {
            let content = "x".repeat(150);
            let preview = make_preview(&content);
            assert_eq!(preview, format!("{}...", "x".repeat(100)));
        }

        #[test]
        fn truncation_counts_characters_not_bytes() {
            let content = "é".repeat(120);
            let preview = make_preview(&content);
            assert_eq!(preview.chars().count(), PREVIEW_LENGTH + 3);
            assert!(preview.starts_with(&"é".repeat(100)));
        }
    }

    mod filter_tests {
        use super::*;

        #[test]
        fn parse_is_permissive() {
            assert_eq!(MessageFilter::parse("unread"), MessageFilter::Unread);
            assert_eq!(MessageFilter::parse("READ"), MessageFilter::Read);
            assert_eq!(MessageFilter::parse("bogus"), MessageFilter::All);
            assert_eq!(MessageFilter::parse(""), MessageFilter::All);
        }

        #[test]
        fn options_depend_on_view() {
            assert!(MessageFilter::Unread.is_legal_for(MessageType::Inbox));
            assert!(!MessageFilter::Unread.is_legal_for(MessageType::Sent));
            assert!(MessageFilter::Acknowledged.is_legal_for(MessageType::Sent));
            assert!(!MessageFilter::Acknowledged.is_legal_for(MessageType::Inbox));
            assert!(MessageFilter::All.is_legal_for(MessageType::Sent));
        }

        #[test]
        fn dropdown_labels_follow_view() {
            let labels = |kind| {
                MessageFilter::options_for(kind)
                    .iter()
                    .map(MessageFilter::label)
                    .collect::<Vec<_>>()
            };
            assert_eq!(labels(MessageType::Inbox), ["All", "Unread", "Read"]);
            assert_eq!(labels(MessageType::Sent), ["All", "Read", "Acknowledged"]);
            assert_eq!(Priority::Low.display_name(), "Low");
        }
    }

    mod message_tests {
        use super::*;

        #[test]
        fn wire_format_uses_camel_case() {
            let json = serde_json::to_value(sample()).unwrap();
            assert_eq!(json["isRead"], false);
            assert_eq!(json["hasAttachment"], false);
            assert_eq!(json["type"], "inbox");
            assert_eq!(json["priority"], "high");
            assert_eq!(json["timestamp"], "2025-01-22T10:30:00Z");
            assert!(json.get("recipient").is_none());
            assert!(json.get("isAcknowledged").is_none());
        }

        #[test]
        fn search_matches_any_field_case_insensitively() {
            let mut msg = sample();
            assert!(msg.matches_search("weekly"));
            assert!(msg.matches_search("IMPACT"));
            assert!(msg.matches_search("submit"));
            assert!(!msg.matches_search("finance"));

            msg.recipient = Some("Finance Department".into());
            assert!(msg.matches_search("finance"));
        }

        #[test]
        fn search_does_not_look_at_full_content() {
            assert!(!sample().matches_search("friday"));
        }

        #[test]
        fn empty_search_matches() {
            assert!(sample().matches_search(""));
        }
    }

    mod new_message_tests {
        use super::*;

        #[test]
        fn null_subject_decodes_as_empty() {
            let input: NewMessage =
                serde_json::from_str(r#"{"subject":null,"content":"hi"}"#).unwrap();
            assert!(input.subject.is_empty());
            assert_eq!(input.content, "hi");
        }

        #[test]
        fn builder_sets_fields() {
            let input = NewMessage::new("Order", "Body")
                .to_vendor("vendor1")
                .with_priority(Priority::High);
            assert_eq!(input.vendor_id.as_deref(), Some("vendor1"));
            assert_eq!(input.priority.as_deref(), Some("high"));
            let json = serde_json::to_value(&input).unwrap();
            assert_eq!(json["vendorId"], "vendor1");
            assert!(json.get("recipient").is_none());
        }
    }
}
