use serde::{Deserialize, Serialize};
use specta::Type;

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct ReplayRequest {
    pub target_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct ReplaySummary {
    pub message_id: i64,
    pub target_url: String,
    pub status: Option<i64>,
    pub response: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct ReplayAttempt {
    pub id: i64,
    pub message_id: i64,
    pub target_url: String,

    /// Absent when the send failed before any response arrived.
    pub status: Option<i64>,
    pub response_body: Option<String>,

    pub error_kind: Option<ReplayErrorKind>,
    pub error_message: Option<String>,

    pub created_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "snake_case")]
pub enum ReplayErrorKind {
    Timeout,
    Network,
    InvalidResponse,
}

impl ReplayErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ReplayErrorKind::Timeout => "timeout",
            ReplayErrorKind::Network => "network",
            ReplayErrorKind::InvalidResponse => "invalid_response",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct ListReplayAttemptsResponse {
    pub attempts: Vec<ReplayAttempt>,
}
