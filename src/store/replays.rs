use chrono::Utc;
use sqlx::SqlitePool;

use super::{StoreError, format_utc};
use crate::types::{ReplayAttempt, ReplayErrorKind};

/// Outcome of one replay send, as it is written to the audit trail.
#[derive(Debug, Clone)]
pub struct NewReplayAttempt<'a> {
    pub message_id: i64,
    pub target_url: &'a str,
    pub status: Option<i64>,
    pub response_body: Option<&'a str>,
    pub error_kind: Option<ReplayErrorKind>,
    pub error_message: Option<&'a str>,
}

#[derive(sqlx::FromRow)]
struct ReplayAttemptRow {
    id: i64,
    message_id: i64,
    target_url: String,
    status: Option<i64>,
    response_body: Option<String>,
    error_kind: Option<String>,
    error_message: Option<String>,
    created_at: String,
}

pub async fn insert_replay_attempt(
    pool: &SqlitePool,
    attempt: &NewReplayAttempt<'_>,
) -> Result<ReplayAttempt, StoreError> {
    let row = sqlx::query_as::<_, ReplayAttemptRow>(
        r"
        INSERT INTO replay_attempts (
            message_id,
            target_url,
            status,
            response_body,
            error_kind,
            error_message,
            created_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING id, message_id, target_url, status, response_body, error_kind, error_message, created_at
        ",
    )
    .bind(attempt.message_id)
    .bind(attempt.target_url)
    .bind(attempt.status)
    .bind(attempt.response_body)
    .bind(attempt.error_kind.map(ReplayErrorKind::as_str))
    .bind(attempt.error_message)
    .bind(format_utc(Utc::now()))
    .fetch_one(pool)
    .await?;

    attempt_from_row(row)
}

/// Oldest first. Unknown message ids are `NotFound`, not an empty list.
pub async fn list_replay_attempts(
    pool: &SqlitePool,
    message_id: i64,
) -> Result<Vec<ReplayAttempt>, StoreError> {
    let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM messages WHERE id = ?")
        .bind(message_id)
        .fetch_optional(pool)
        .await?;
    if exists.is_none() {
        return Err(StoreError::NotFound("message not found".to_string()));
    }

    let rows = sqlx::query_as::<_, ReplayAttemptRow>(
        r"
        SELECT id, message_id, target_url, status, response_body, error_kind, error_message, created_at
        FROM replay_attempts
        WHERE message_id = ?
        ORDER BY id ASC
        ",
    )
    .bind(message_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(attempt_from_row).collect()
}

fn attempt_from_row(row: ReplayAttemptRow) -> Result<ReplayAttempt, StoreError> {
    let error_kind = match row.error_kind.as_deref() {
        Some(kind) => Some(parse_error_kind(kind)?),
        None => None,
    };

    Ok(ReplayAttempt {
        id: row.id,
        message_id: row.message_id,
        target_url: row.target_url,
        status: row.status,
        response_body: row.response_body,
        error_kind,
        error_message: row.error_message,
        created_at: row.created_at,
    })
}

fn parse_error_kind(kind: &str) -> Result<ReplayErrorKind, StoreError> {
    match kind {
        "timeout" => Ok(ReplayErrorKind::Timeout),
        "network" => Ok(ReplayErrorKind::Network),
        "invalid_response" => Ok(ReplayErrorKind::InvalidResponse),
        other => Err(StoreError::Parse(format!("unknown error kind: {other}"))),
    }
}
