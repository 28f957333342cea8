use serde::{Deserialize, Serialize};
use specta::Type;
use std::collections::BTreeMap;

/// Captured request headers: lowercase name to every value received, in order.
pub type HeaderValues = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct Message {
    pub id: i64,
    pub endpoint_id: i64,
    pub headers: HeaderValues,
    pub body: String,
    pub received_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct ListMessagesResponse {
    pub messages: Vec<Message>,
}
