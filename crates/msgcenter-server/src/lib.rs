//! # msgcenter-server
//!
//! HTTP JSON API for the message center.
//!
//! Exposes the message store from `msgcenter-core` over axum: listing with
//! filter, search and type; single-message lookups; read and acknowledgement
//! changes; compose; delete; and the vendor and template directory.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod api;
pub mod config;

pub use api::{ApiError, AppState, router};
pub use config::{ConfigError, ServerConfig, StorageConfig};
