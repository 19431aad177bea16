//! Service layer over the message repository.
//!
//! This module provides the message store operations used by the HTTP API.

mod messages;

pub use messages::MessageService;
