use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use subtle::ConstantTimeEq;

use crate::{error::ApiError, state::AppState};

/// Guards the management API when `INBOX_API_TOKEN` is set. Webhook
/// deliveries authenticate by signature and never pass through here.
pub async fn api_auth(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(expected) = state.config.api_token.as_deref() else {
        return Ok(next.run(req).await);
    };

    let Some(provided) = bearer_token(req.headers()) else {
        return Err(ApiError::unauthorized(
            "missing or invalid Authorization header",
        ));
    };

    if !bool::from(expected.as_bytes().ct_eq(provided.as_bytes())) {
        tracing::warn!(path = %req.uri().path(), "management API token rejected");
        return Err(ApiError::unauthorized("invalid token"));
    }

    Ok(next.run(req).await)
}

/// `Authorization: Bearer <token>`, scheme matched case-insensitively.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?.trim_start();
    let (scheme, token) = value.split_at_checked(7)?;
    scheme
        .eq_ignore_ascii_case("bearer ")
        .then(|| token.trim())
        .filter(|token| !token.is_empty())
}
