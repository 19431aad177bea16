//! # msgcenter-client
//!
//! Client side of the message center.
//!
//! This crate provides:
//! - `ApiClient`, a typed wrapper over the HTTP JSON API
//! - `MessagesState` and its reducer, the single source of truth for views
//! - `Store`, which orchestrates requests and applies their results
//! - Debounced search and scroll-triggered pagination controllers
//! - `ComposeForm`, the compose dialog model with client-side validation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod api;
pub mod compose;
pub mod config;
mod error;
pub mod pagination;
pub mod schedule;
pub mod search;
pub mod state;
pub mod store;

pub use api::ApiClient;
pub use compose::{ComposeField, ComposeForm, FormErrors, RecipientType};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{ClientError, Result};
pub use pagination::{ScrollMetrics, ScrollPagination};
pub use schedule::{Debouncer, Throttle};
pub use search::SearchController;
pub use state::{Action, ListStatus, MessagesState};
pub use store::{FetchOutcome, Store};
