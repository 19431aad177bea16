//! Vendor and template routes.

use axum::{Json, Router, extract::State, routing::get};

use msgcenter_core::{MessageRepository, MessageTemplate, Vendor};

use super::AppState;

pub(super) fn routes<R: MessageRepository>() -> Router<AppState<R>> {
    Router::new()
        .route("/vendors", get(list_vendors::<R>))
        .route("/templates", get(list_templates::<R>))
}

async fn list_vendors<R: MessageRepository>(State(svc): State<AppState<R>>) -> Json<Vec<Vendor>> {
    Json(svc.vendors().to_vec())
}

async fn list_templates<R: MessageRepository>(
    State(svc): State<AppState<R>>,
) -> Json<Vec<MessageTemplate>> {
    Json(svc.templates().to_vec())
}
