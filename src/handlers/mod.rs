pub mod endpoints;
pub mod hooks;
pub mod messages;

use crate::error::ApiError;

pub async fn health_handler() -> &'static str {
    "ok"
}

fn parse_id(field: &str, value: &str) -> Result<i64, ApiError> {
    value
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ApiError::validation(format!("{field} must be a positive integer")))
}
