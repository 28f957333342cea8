use axum::{
    body::Bytes,
    extract::{Path, State},
    http::HeaderMap,
};

use crate::{
    error::ApiError,
    ingest::{self, IngestError},
    state::AppState,
};

pub async fn receive_hook_handler(
    State(state): State<AppState>,
    Path(token): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<&'static str, ApiError> {
    ingest::receive(
        &state.pool,
        &state.ingest_settings(),
        &token,
        &headers,
        &body,
    )
    .await
    .map_err(map_ingest_error)?;

    Ok("received")
}

fn map_ingest_error(err: IngestError) -> ApiError {
    match err {
        IngestError::EndpointNotFound => ApiError::not_found("endpoint not found"),
        IngestError::Rejected(_) => ApiError::unauthorized("invalid signature"),
        IngestError::InvalidPayload => ApiError::validation("payload must be UTF-8 text"),
        IngestError::Misconfigured(reason) => {
            tracing::error!(reason = %reason, "endpoint cannot be verified");
            ApiError::internal(format!("endpoint misconfigured: {reason}"))
        }
        IngestError::Store(err) => {
            tracing::error!(error = %err, "failed to store verified webhook");
            ApiError::from(err)
        }
    }
}
