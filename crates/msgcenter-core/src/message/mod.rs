//! Message module.
//!
//! Provides the message model, compose validation, and the storage
//! abstraction the message store runs on.

mod model;
mod repository;
#[cfg(feature = "sqlite")]
mod sqlite;
mod validation;

pub use model::{
    Message, MessageFilter, MessageId, MessageType, NewMessage, PREVIEW_LENGTH, Priority,
    make_preview,
};
pub use repository::{InMemoryMessageRepository, MessageRepository};
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteMessageRepository;
pub use validation::{
    OWN_SENDER, ValidatedMessage, ValidationError, is_valid_email, validate_new_message,
};
