//! HTTP routes and error mapping.

mod directory;
mod messages;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use tracing::{debug, error};

use msgcenter_core::{Error, MessageRepository, MessageService};

/// Shared application state.
pub type AppState<R> = Arc<MessageService<R>>;

/// Build the API router.
///
/// Message and directory routes are mounted under `prefix`; an empty prefix
/// or `/` mounts them at the root. `GET /health` always sits at the root.
pub fn router<R: MessageRepository>(state: AppState<R>, prefix: &str) -> Router {
    let prefix = prefix.trim_end_matches('/');
    let routes = api_routes::<R>();
    let app = if prefix.is_empty() {
        Router::new().merge(routes)
    } else {
        Router::new().nest(prefix, routes)
    };
    app.route("/health", get(health)).with_state(state)
}

fn api_routes<R: MessageRepository>() -> Router<AppState<R>> {
    Router::new()
        .merge(messages::routes::<R>())
        .merge(directory::routes::<R>())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// An error rendered as a JSON response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                error: error.into(),
                details: None,
                message: None,
            },
        }
    }

    /// 400 with a single error string.
    #[must_use]
    pub fn bad_request(error: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error)
    }

    /// 404 for an unknown message.
    #[must_use]
    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Message not found")
    }

    /// 500 with a generic message.
    #[must_use]
    pub fn internal() -> Self {
        let mut err = Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
        err.body.message = Some("An unexpected error occurred".to_string());
        err
    }

    /// HTTP status of the response.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// The `error` field of the response body.
    #[must_use]
    pub fn error(&self) -> &str {
        &self.body.error
    }

    /// Itemized failures, present for validation errors.
    #[must_use]
    pub fn details(&self) -> Option<&[String]> {
        self.body.details.as_deref()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::NotFound(_) => Self::not_found(),
            Error::Validation(errors) => {
                let mut api = Self::bad_request("Validation failed");
                api.body.details = Some(errors.iter().map(|e| e.message().to_string()).collect());
                api
            }
            Error::InvalidOperation(message) => Self::bad_request(message),
            other => {
                error!(error = %other, "Request failed");
                Self::internal()
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!(%rejection, "Rejected request body");
        Self::bad_request("Invalid request body")
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        debug!(%rejection, "Rejected query string");
        Self::bad_request("Invalid query parameters")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use msgcenter_core::{MessageId, ValidationError};

    #[test]
    fn test_not_found_mapping() {
        let err = ApiError::from(Error::NotFound(MessageId::from("x")));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.error(), "Message not found");
        assert!(err.details().is_none());
    }

    #[test]
    fn test_validation_mapping_keeps_every_detail() {
        let err = ApiError::from(Error::Validation(vec![
            ValidationError::MissingRecipient,
            ValidationError::EmptySubject,
        ]));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error(), "Validation failed");
        assert_eq!(
            err.details().unwrap(),
            ["Recipient is required", "Subject is required"]
        );
    }

    #[test]
    fn test_internal_errors_hide_the_cause() {
        let err = ApiError::from(Error::Corrupt("bad priority 'urgent'".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = serde_json::to_value(&err.body).unwrap();
        assert_eq!(body["error"], "Internal server error");
        assert!(!body.to_string().contains("urgent"));
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let body = serde_json::to_value(&ApiError::not_found().body).unwrap();
        assert_eq!(body, serde_json::json!({ "error": "Message not found" }));
    }
}
