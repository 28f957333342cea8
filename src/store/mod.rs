mod endpoints;
mod messages;
mod replays;

use chrono::{DateTime, SecondsFormat, Utc};

pub use endpoints::{Endpoint, create_endpoint, get_endpoint_by_token};
pub use messages::{get_message, insert_message, list_messages};
pub use replays::{NewReplayAttempt, insert_replay_attempt, list_replay_attempts};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
    #[error("{0}")]
    NotFound(String),
    #[error("corrupt row: {0}")]
    Parse(String),
}

fn format_utc(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}
