use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use super::parse_id;
use crate::{
    error::ApiError,
    extractors::{ValidJson, ValidQuery},
    replay::{self, ReplayError},
    state::AppState,
    store,
    types::{
        ListMessagesResponse, ListReplayAttemptsResponse, Message, ReplayRequest, ReplaySummary,
    },
};

#[derive(Debug, Deserialize)]
pub struct ListMessagesQuery {
    #[serde(alias = "endpointId")]
    endpoint_id: Option<i64>,
    limit: Option<i64>,
}

pub async fn list_messages_handler(
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<ListMessagesQuery>,
) -> Result<Json<ListMessagesResponse>, ApiError> {
    let limit = parse_limit(query.limit)?;
    let messages = store::list_messages(&state.pool, query.endpoint_id, limit).await?;
    Ok(Json(ListMessagesResponse { messages }))
}

pub async fn get_message_handler(
    State(state): State<AppState>,
    Path(message_id): Path<String>,
) -> Result<Json<Message>, ApiError> {
    let message_id = parse_id("message_id", &message_id)?;
    let message = store::get_message(&state.pool, message_id).await?;
    Ok(Json(message))
}

pub async fn list_replays_handler(
    State(state): State<AppState>,
    Path(message_id): Path<String>,
) -> Result<Json<ListReplayAttemptsResponse>, ApiError> {
    let message_id = parse_id("message_id", &message_id)?;
    let attempts = store::list_replay_attempts(&state.pool, message_id).await?;
    Ok(Json(ListReplayAttemptsResponse { attempts }))
}

pub async fn replay_message_handler(
    State(state): State<AppState>,
    Path(message_id): Path<String>,
    ValidJson(req): ValidJson<ReplayRequest>,
) -> Result<Json<ReplaySummary>, ApiError> {
    let message_id = parse_id("message_id", &message_id)?;
    let summary = replay::replay(
        &state.pool,
        &state.http,
        &state.replay_settings(),
        message_id,
        &req.target_url,
    )
    .await
    .map_err(map_replay_error)?;
    Ok(Json(summary))
}

fn parse_limit(limit: Option<i64>) -> Result<i64, ApiError> {
    let limit = limit.unwrap_or(50);
    if !(1..=200).contains(&limit) {
        return Err(ApiError::validation("limit must be between 1 and 200"));
    }
    Ok(limit)
}

fn map_replay_error(err: ReplayError) -> ApiError {
    match err {
        ReplayError::MissingTarget | ReplayError::InvalidTarget(_) => {
            ApiError::validation(err.to_string())
        }
        ReplayError::MessageNotFound => ApiError::not_found("message not found"),
        ReplayError::Transport { .. } => ApiError::bad_gateway(err.to_string()),
        ReplayError::Store(err) => {
            tracing::error!(error = %err, "failed to record replay");
            ApiError::from(err)
        }
    }
}
