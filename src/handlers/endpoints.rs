use axum::{Json, extract::State, http::StatusCode};

use crate::{
    error::ApiError,
    extractors::ValidJson,
    state::AppState,
    store,
    types::{CreateEndpointRequest, CreateEndpointResponse, ProviderKind},
};

pub async fn create_endpoint_handler(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<CreateEndpointRequest>,
) -> Result<(StatusCode, Json<CreateEndpointResponse>), ApiError> {
    let provider = req
        .provider
        .trim()
        .to_ascii_lowercase()
        .parse::<ProviderKind>()
        .map_err(|err| ApiError::validation(err.to_string()))?;
    if req.secret.trim().is_empty() {
        return Err(ApiError::validation("secret is required"));
    }

    let endpoint = store::create_endpoint(&state.pool, provider, &req.secret).await?;
    tracing::info!(endpoint_id = endpoint.id, provider = %provider, "endpoint provisioned");

    Ok((
        StatusCode::CREATED,
        Json(CreateEndpointResponse {
            id: endpoint.id,
            token: endpoint.token,
            url: state.config.receiving_url(&endpoint.token),
        }),
    ))
}
