use serde::{Deserialize, Serialize};
use specta::Type;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct CreateEndpointRequest {
    /// One of `stripe`, `flutterwave`, `paystack`, `github`.
    pub provider: String,
    pub secret: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct CreateEndpointResponse {
    pub id: i64,
    pub token: Uuid,
    /// Fully-qualified receiving URL, `<public base>/hooks/<token>`.
    pub url: String,
}
