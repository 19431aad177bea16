//! Message routes.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    routing::{get, patch},
};
use serde::Deserialize;
use tracing::debug;

use msgcenter_core::{
    Message, MessageFilter, MessageId, MessageQuery, MessageRepository, MessageType, NewMessage,
    QueryResult,
};

use super::{ApiError, AppState};

pub(super) fn routes<R: MessageRepository>() -> Router<AppState<R>> {
    Router::new()
        .route(
            "/messages",
            get(list_messages::<R>).post(create_message::<R>),
        )
        .route(
            "/messages/{id}",
            get(get_message::<R>).delete(delete_message::<R>),
        )
        .route("/messages/{id}/read", patch(mark_read::<R>))
        .route("/messages/{id}/unread", patch(mark_unread::<R>))
        .route("/messages/{id}/acknowledged", patch(mark_acknowledged::<R>))
        .route(
            "/messages/{id}/unacknowledged",
            patch(mark_unacknowledged::<R>),
        )
}

#[derive(Debug, Default, Deserialize)]
struct ListParams {
    filter: Option<String>,
    search: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

async fn list_messages<R: MessageRepository>(
    State(svc): State<AppState<R>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<QueryResult>, ApiError> {
    let Query(params) = params?;
    let kind = match params.kind.as_deref() {
        None => MessageType::Inbox,
        Some(raw) => match MessageType::parse(raw) {
            Some(kind) => kind,
            None => {
                debug!(kind = raw, "Unknown message type, returning empty listing");
                return Ok(Json(QueryResult::empty(svc.unread_count().await?)));
            }
        },
    };

    let query = MessageQuery {
        kind,
        filter: params
            .filter
            .as_deref()
            .map(MessageFilter::parse)
            .unwrap_or_default(),
        search: params.search.unwrap_or_default(),
    };
    Ok(Json(svc.query(&query).await?))
}

async fn get_message<R: MessageRepository>(
    State(svc): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Json<Message>, ApiError> {
    Ok(Json(svc.get(&MessageId::from(id)).await?))
}

async fn mark_read<R: MessageRepository>(
    State(svc): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Json<Message>, ApiError> {
    Ok(Json(svc.set_read(&MessageId::from(id), true).await?))
}

async fn mark_unread<R: MessageRepository>(
    State(svc): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Json<Message>, ApiError> {
    Ok(Json(svc.set_read(&MessageId::from(id), false).await?))
}

async fn mark_acknowledged<R: MessageRepository>(
    State(svc): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Json<Message>, ApiError> {
    Ok(Json(svc.set_acknowledged(&MessageId::from(id), true).await?))
}

async fn mark_unacknowledged<R: MessageRepository>(
    State(svc): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Json<Message>, ApiError> {
    Ok(Json(
        svc.set_acknowledged(&MessageId::from(id), false).await?,
    ))
}

async fn create_message<R: MessageRepository>(
    State(svc): State<AppState<R>>,
    payload: Result<Json<NewMessage>, JsonRejection>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    let Json(input) = payload?;
    let message = svc.create(&input).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

async fn delete_message<R: MessageRepository>(
    State(svc): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    svc.delete(&MessageId::from(id)).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
