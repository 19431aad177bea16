//! # msgcenter-core
//!
//! Core business logic for the message center.
//!
//! This crate provides:
//! - Domain models (messages, vendors, templates)
//! - Compose validation with itemized errors
//! - The query engine behind the message list (filter, search, sort)
//! - A repository abstraction with in-memory and `SQLite` backends
//! - Fixture data seeded on boot
//! - `MessageService`, the message store operations used by the HTTP API

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod directory;
mod error;
pub mod fixtures;
pub mod message;
pub mod query;
pub mod service;

pub use directory::{Directory, MessageTemplate, Vendor};
pub use error::{Error, Result};
pub use message::{
    InMemoryMessageRepository, Message, MessageFilter, MessageId, MessageRepository, MessageType,
    NewMessage, Priority, ValidatedMessage, ValidationError, is_valid_email, make_preview,
    validate_new_message,
};
#[cfg(feature = "sqlite")]
pub use message::SqliteMessageRepository;
pub use query::{MessageQuery, QueryResult, run_query, unread_count};
pub use service::MessageService;
