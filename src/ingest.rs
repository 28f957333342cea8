use std::time::Duration;

use axum::http::HeaderMap;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{
    config::InboxConfig,
    store::{self, StoreError},
    types::{HeaderValues, Message, ProviderKind},
    verify::{self, Freshness, Rejection},
};

/// Stored in place of a header value that repeats the endpoint secret.
pub const REDACTED: &str = "<redacted>";

#[derive(Debug, Clone, Copy, Default)]
pub struct IngestSettings {
    pub stripe_tolerance: Option<Duration>,
}

impl From<&InboxConfig> for IngestSettings {
    fn from(config: &InboxConfig) -> Self {
        Self {
            stripe_tolerance: config.stripe_tolerance(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// Unknown and malformed tokens are deliberately indistinguishable.
    #[error("endpoint not found")]
    EndpointNotFound,
    #[error("signature rejected: {0}")]
    Rejected(Rejection),
    #[error("payload must be UTF-8 text")]
    InvalidPayload,
    /// The stored endpoint row cannot be dispatched, e.g. an unknown provider kind.
    #[error("endpoint misconfigured: {0}")]
    Misconfigured(String),
    #[error(transparent)]
    Store(StoreError),
}

/// Authenticates one inbound delivery and, if it verifies, stores it.
pub async fn receive(
    pool: &SqlitePool,
    settings: &IngestSettings,
    token: &str,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<Message, IngestError> {
    let token = Uuid::parse_str(token).map_err(|_| IngestError::EndpointNotFound)?;
    let endpoint = match store::get_endpoint_by_token(pool, token).await {
        Ok(endpoint) => endpoint,
        Err(StoreError::NotFound(_)) => return Err(IngestError::EndpointNotFound),
        Err(StoreError::Parse(reason)) => return Err(IngestError::Misconfigured(reason)),
        Err(err) => return Err(IngestError::Store(err)),
    };

    let freshness = Freshness::at(Utc::now().timestamp(), settings.stripe_tolerance);
    if let Err(rejection) = verify::verify(
        endpoint.provider,
        &endpoint.secret,
        headers,
        body,
        &freshness,
    ) {
        tracing::warn!(
            endpoint_id = endpoint.id,
            provider = %endpoint.provider,
            reason = %rejection,
            "webhook signature rejected"
        );
        return Err(IngestError::Rejected(rejection));
    }

    let body = std::str::from_utf8(body).map_err(|_| IngestError::InvalidPayload)?;
    let mut captured = capture_headers(headers);
    redact_secret(&mut captured, endpoint.provider, &endpoint.secret);
    let message = store::insert_message(pool, endpoint.id, &captured, body)
        .await
        .map_err(IngestError::Store)?;

    tracing::info!(
        endpoint_id = endpoint.id,
        message_id = message.id,
        provider = %endpoint.provider,
        bytes = body.len(),
        "webhook stored"
    );

    Ok(message)
}

/// Lowercase header name to every value, in arrival order.
pub fn capture_headers(headers: &HeaderMap) -> HeaderValues {
    let mut captured = HeaderValues::new();
    for (name, value) in headers {
        captured
            .entry(name.as_str().to_string())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    captured
}

/// Flutterwave's `verif-hash` is the secret itself, so it must not reach storage.
fn redact_secret(headers: &mut HeaderValues, kind: ProviderKind, secret: &str) {
    let Some(values) = headers.get_mut(kind.signature_header()) else {
        return;
    };
    for value in values.iter_mut() {
        if verify::constant_time_eq(value.trim().as_bytes(), secret.as_bytes()) {
            *value = REDACTED.to_string();
        }
    }
}
