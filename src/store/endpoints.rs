use std::fmt;

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::{StoreError, format_utc};
use crate::types::ProviderKind;

/// A provisioned receiving identity. Immutable once created.
#[derive(Clone)]
pub struct Endpoint {
    pub id: i64,
    pub token: Uuid,
    pub provider: ProviderKind,
    pub secret: String,
    pub created_at: String,
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("id", &self.id)
            .field("token", &self.token)
            .field("provider", &self.provider)
            .field("secret", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}

#[derive(sqlx::FromRow)]
struct EndpointRow {
    id: i64,
    token: String,
    provider: String,
    secret: String,
    created_at: String,
}

pub async fn create_endpoint(
    pool: &SqlitePool,
    provider: ProviderKind,
    secret: &str,
) -> Result<Endpoint, StoreError> {
    let token = Uuid::new_v4();
    let row = sqlx::query_as::<_, EndpointRow>(
        r"
        INSERT INTO endpoints (token, provider, secret, created_at)
        VALUES (?, ?, ?, ?)
        RETURNING id, token, provider, secret, created_at
        ",
    )
    .bind(token.to_string())
    .bind(provider.as_str())
    .bind(secret)
    .bind(format_utc(Utc::now()))
    .fetch_one(pool)
    .await?;

    endpoint_from_row(row)
}

pub async fn get_endpoint_by_token(pool: &SqlitePool, token: Uuid) -> Result<Endpoint, StoreError> {
    let row = sqlx::query_as::<_, EndpointRow>(
        r"
        SELECT id, token, provider, secret, created_at
        FROM endpoints
        WHERE token = ?
        ",
    )
    .bind(token.to_string())
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| StoreError::NotFound("endpoint not found".to_string()))?;

    endpoint_from_row(row)
}

fn endpoint_from_row(row: EndpointRow) -> Result<Endpoint, StoreError> {
    let token = Uuid::parse_str(&row.token)
        .map_err(|err| StoreError::Parse(format!("invalid endpoint token: {err}")))?;
    let provider = row
        .provider
        .parse::<ProviderKind>()
        .map_err(|err| StoreError::Parse(format!("endpoint {}: {err}", row.id)))?;

    Ok(Endpoint {
        id: row.id,
        token,
        provider,
        secret: row.secret,
        created_at: row.created_at,
    })
}
