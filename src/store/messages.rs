use chrono::Utc;
use sqlx::{QueryBuilder, SqlitePool};

use super::{StoreError, format_utc};
use crate::types::{HeaderValues, Message};

#[derive(sqlx::FromRow)]
struct MessageRow {
    id: i64,
    endpoint_id: i64,
    headers: String,
    body: String,
    received_at: String,
}

pub async fn insert_message(
    pool: &SqlitePool,
    endpoint_id: i64,
    headers: &HeaderValues,
    body: &str,
) -> Result<Message, StoreError> {
    let headers = serde_json::to_string(headers)
        .map_err(|err| StoreError::Parse(format!("failed to encode headers: {err}")))?;

    let row = sqlx::query_as::<_, MessageRow>(
        r"
        INSERT INTO messages (endpoint_id, headers, body, received_at)
        VALUES (?, ?, ?, ?)
        RETURNING id, endpoint_id, headers, body, received_at
        ",
    )
    .bind(endpoint_id)
    .bind(headers)
    .bind(body)
    .bind(format_utc(Utc::now()))
    .fetch_one(pool)
    .await?;

    message_from_row(row)
}

pub async fn get_message(pool: &SqlitePool, id: i64) -> Result<Message, StoreError> {
    let row = sqlx::query_as::<_, MessageRow>(
        r"
        SELECT id, endpoint_id, headers, body, received_at
        FROM messages
        WHERE id = ?
        ",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| StoreError::NotFound("message not found".to_string()))?;

    message_from_row(row)
}

/// Most recent first.
pub async fn list_messages(
    pool: &SqlitePool,
    endpoint_id: Option<i64>,
    limit: i64,
) -> Result<Vec<Message>, StoreError> {
    let mut query = QueryBuilder::new(
        "SELECT id, endpoint_id, headers, body, received_at FROM messages WHERE 1 = 1",
    );

    if let Some(endpoint_id) = endpoint_id {
        query.push(" AND endpoint_id = ");
        query.push_bind(endpoint_id);
    }

    query.push(" ORDER BY id DESC LIMIT ");
    query.push_bind(limit);

    let rows: Vec<MessageRow> = query.build_query_as().fetch_all(pool).await?;
    rows.into_iter().map(message_from_row).collect()
}

fn message_from_row(row: MessageRow) -> Result<Message, StoreError> {
    let headers: HeaderValues = serde_json::from_str(&row.headers)
        .map_err(|err| StoreError::Parse(format!("invalid headers JSON: {err}")))?;

    Ok(Message {
        id: row.id,
        endpoint_id: row.endpoint_id,
        headers,
        body: row.body,
        received_at: row.received_at,
    })
}
