use std::{error::Error as _, time::Duration};

use axum::http::header::CONTENT_TYPE;
use sqlx::SqlitePool;

use crate::{
    config::InboxConfig,
    store::{self, NewReplayAttempt, StoreError},
    types::{Message, ReplayErrorKind, ReplaySummary},
};

pub const REPLAY_MARKER_HEADER: &str = "x-replayed-from";
pub const REPLAY_MARKER_VALUE: &str = "webhook-inbox";
const DEFAULT_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone, Copy)]
pub struct ReplaySettings {
    pub timeout: Duration,
    pub max_response_bytes: usize,
}

impl From<&InboxConfig> for ReplaySettings {
    fn from(config: &InboxConfig) -> Self {
        Self {
            timeout: config.replay_timeout(),
            max_response_bytes: config.replay_max_response_bytes,
        }
    }
}

impl Default for ReplaySettings {
    fn default() -> Self {
        Self::from(&InboxConfig::default())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("target_url is required")]
    MissingTarget,
    #[error("target_url is not a usable URL: {0}")]
    InvalidTarget(String),
    #[error("message not found")]
    MessageNotFound,
    /// No response was received. The attempt is still on the audit trail.
    #[error("replay failed: {message}")]
    Transport {
        kind: ReplayErrorKind,
        message: String,
    },
    #[error(transparent)]
    Store(StoreError),
}

/// Re-sends a stored message body to `target_url` and records the attempt.
///
/// Any HTTP response, including 4xx/5xx, is a completed replay. Only failures
/// before a response (DNS, refused connection, timeout) surface as
/// [`ReplayError::Transport`].
pub async fn replay(
    pool: &SqlitePool,
    client: &reqwest::Client,
    settings: &ReplaySettings,
    message_id: i64,
    target_url: &str,
) -> Result<ReplaySummary, ReplayError> {
    let target_url = target_url.trim();
    if target_url.is_empty() {
        return Err(ReplayError::MissingTarget);
    }

    let message = match store::get_message(pool, message_id).await {
        Ok(message) => message,
        Err(StoreError::NotFound(_)) => return Err(ReplayError::MessageNotFound),
        Err(err) => return Err(ReplayError::Store(err)),
    };

    let request = client
        .post(target_url)
        .header(CONTENT_TYPE, forwarded_content_type(&message))
        .header(REPLAY_MARKER_HEADER, REPLAY_MARKER_VALUE)
        .body(message.body.clone())
        .timeout(settings.timeout);

    let response = match request.send().await {
        Ok(response) => response,
        Err(err) if err.is_builder() => {
            return Err(ReplayError::InvalidTarget(error_chain(&err)));
        }
        Err(err) => {
            let kind = if err.is_timeout() {
                ReplayErrorKind::Timeout
            } else {
                ReplayErrorKind::Network
            };
            let detail = error_chain(&err);
            tracing::warn!(
                message_id,
                target_url,
                error_kind = kind.as_str(),
                error = %detail,
                "replay send failed"
            );
            let attempt = NewReplayAttempt {
                message_id,
                target_url,
                status: None,
                response_body: None,
                error_kind: Some(kind),
                error_message: Some(&detail),
            };
            if let Err(store_err) = store::insert_replay_attempt(pool, &attempt).await {
                tracing::error!(
                    message_id,
                    error = %store_err,
                    "failed to record failed replay attempt"
                );
            }
            return Err(ReplayError::Transport {
                kind,
                message: detail,
            });
        }
    };

    let status = i64::from(response.status().as_u16());
    let (body, read_error) = read_bounded(response, settings.max_response_bytes).await;
    if let Some(detail) = &read_error {
        tracing::warn!(message_id, target_url, status, error = %detail, "replay response body truncated");
    }

    let attempt = NewReplayAttempt {
        message_id,
        target_url,
        status: Some(status),
        response_body: Some(&body),
        error_kind: read_error.as_ref().map(|_| ReplayErrorKind::InvalidResponse),
        error_message: read_error.as_deref(),
    };
    let recorded = store::insert_replay_attempt(pool, &attempt)
        .await
        .map_err(ReplayError::Store)?;

    tracing::info!(
        message_id,
        attempt_id = recorded.id,
        target_url,
        status,
        "message replayed"
    );

    Ok(ReplaySummary {
        message_id,
        target_url: target_url.to_string(),
        status: Some(status),
        response: Some(body),
    })
}

fn forwarded_content_type(message: &Message) -> &str {
    message
        .headers
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(CONTENT_TYPE.as_str()))
        .and_then(|(_, values)| values.first())
        .map_or(DEFAULT_CONTENT_TYPE, String::as_str)
}

/// Reads at most `limit` bytes of the body. A failure mid-body keeps what was read.
async fn read_bounded(mut response: reqwest::Response, limit: usize) -> (String, Option<String>) {
    let mut buf = Vec::new();
    let mut error = None;
    loop {
        match response.chunk().await {
            Ok(Some(chunk)) => {
                let remaining = limit.saturating_sub(buf.len());
                if chunk.len() >= remaining {
                    buf.extend_from_slice(&chunk[..remaining]);
                    break;
                }
                buf.extend_from_slice(&chunk);
            }
            Ok(None) => break,
            Err(err) => {
                error = Some(error_chain(&err));
                break;
            }
        }
    }
    (String::from_utf8_lossy(&buf).into_owned(), error)
}

fn error_chain(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn message_with(headers: &[(&str, &str)]) -> Message {
        let mut map = BTreeMap::new();
        for (name, value) in headers {
            map.entry((*name).to_string())
                .or_insert_with(Vec::new)
                .push((*value).to_string());
        }
        Message {
            id: 1,
            endpoint_id: 1,
            headers: map,
            body: "{}".to_string(),
            received_at: "2024-01-01T00:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn forwards_stored_content_type() {
        let message = message_with(&[("content-type", "application/x-www-form-urlencoded")]);
        assert_eq!(
            forwarded_content_type(&message),
            "application/x-www-form-urlencoded"
        );
    }

    #[test]
    fn content_type_lookup_ignores_case() {
        let message = message_with(&[("Content-Type", "text/plain")]);
        assert_eq!(forwarded_content_type(&message), "text/plain");
    }

    #[test]
    fn defaults_to_json() {
        let message = message_with(&[("x-hub-signature-256", "sha256=00")]);
        assert_eq!(forwarded_content_type(&message), DEFAULT_CONTENT_TYPE);
    }
}
