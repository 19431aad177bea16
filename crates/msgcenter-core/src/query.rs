//! Query engine for the message list.
//!
//! Restricts the collection to one mailbox, applies the status filter and
//! free-text search, and sorts newest first. Counts are reported alongside:
//! `total_count` covers every message of the requested type regardless of
//! filter or search, `unread_count` covers unread inbox messages regardless
//! of the requested type, and `matched_count` is the size of the result.

use serde::{Deserialize, Serialize};

use crate::message::{Message, MessageFilter, MessageType};

/// Parameters for listing messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageQuery {
    /// Mailbox to list.
    pub kind: MessageType,
    /// Status filter; values not meaningful for `kind` are ignored.
    pub filter: MessageFilter,
    /// Free-text search term; empty means no search.
    pub search: String,
}

impl MessageQuery {
    /// Query listing every message of a type.
    #[must_use]
    pub fn new(kind: MessageType) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    /// Set the status filter.
    #[must_use]
    pub const fn with_filter(mut self, filter: MessageFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Set the search term.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }
}

/// Result of a list query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    /// Matching messages, newest first.
    pub messages: Vec<Message>,
    /// All messages of the requested type, ignoring filter and search.
    pub total_count: usize,
    /// Unread inbox messages across the whole collection.
    pub unread_count: usize,
    /// Number of messages in `messages`.
    #[serde(default)]
    pub matched_count: usize,
}

impl QueryResult {
    /// A result with no messages, still reporting the global unread count.
    #[must_use]
    pub fn empty(unread_count: usize) -> Self {
        Self {
            unread_count,
            ..Default::default()
        }
    }
}

/// Run a query over a collection given in insertion order.
///
/// The sort is stable, so messages with equal timestamps keep their
/// collection order.
#[must_use]
pub fn run_query(messages: &[Message], query: &MessageQuery) -> QueryResult {
    let mut matched: Vec<Message> = messages
        .iter()
        .filter(|m| m.kind == query.kind)
        .filter(|m| passes_filter(m, query.filter))
        .filter(|m| m.matches_search(&query.search))
        .cloned()
        .collect();
    matched.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    QueryResult {
        total_count: messages.iter().filter(|m| m.kind == query.kind).count(),
        unread_count: unread_count(messages),
        matched_count: matched.len(),
        messages: matched,
    }
}

/// Number of unread inbox messages.
#[must_use]
pub fn unread_count(messages: &[Message]) -> usize {
    messages.iter().filter(|m| m.is_unread_inbox()).count()
}

fn passes_filter(message: &Message, filter: MessageFilter) -> bool {
    match (message.kind, filter) {
        (MessageType::Inbox, MessageFilter::Unread) => !message.is_read,
        (_, MessageFilter::Read) => message.is_read,
        (MessageType::Sent, MessageFilter::Acknowledged) => message.is_acknowledged(),
        _ => true,
    }
}
