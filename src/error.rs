use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    store::StoreError,
    types::{ApiErrorCode, ApiErrorResponse},
};

#[derive(Debug)]
pub enum ApiError {
    Validation(String),
    Unauthorized(String),
    NotFound(String),
    BadGateway(String),
    Db(sqlx::Error),
    Internal(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::BadGateway(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        Self::Db(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Db(db) => ApiError::Db(db),
            StoreError::NotFound(message) => ApiError::NotFound(message),
            StoreError::Parse(message) => ApiError::Internal(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::Validation(message) => {
                (StatusCode::BAD_REQUEST, ApiErrorCode::Validation, message)
            }
            ApiError::Unauthorized(message) => {
                (StatusCode::UNAUTHORIZED, ApiErrorCode::Unauthorized, message)
            }
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, ApiErrorCode::NotFound, message),
            ApiError::BadGateway(message) => {
                (StatusCode::BAD_GATEWAY, ApiErrorCode::BadGateway, message)
            }
            ApiError::Db(err) => {
                tracing::error!(error = %err, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorCode::Database,
                    "database error".to_string(),
                )
            }
            ApiError::Internal(message) => {
                tracing::error!(error = %message, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorCode::Internal,
                    "internal error".to_string(),
                )
            }
        };

        (status, Json(ApiErrorResponse { code, message })).into_response()
    }
}
