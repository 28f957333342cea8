pub mod api_error;
pub mod endpoint;
pub mod message;
pub mod provider;
pub mod replay;

#[allow(unused_imports)]
pub use api_error::{ApiErrorCode, ApiErrorResponse};
#[allow(unused_imports)]
pub use endpoint::{CreateEndpointRequest, CreateEndpointResponse};
#[allow(unused_imports)]
pub use message::{HeaderValues, ListMessagesResponse, Message};
#[allow(unused_imports)]
pub use provider::{ProviderKind, UnknownProvider};
#[allow(unused_imports)]
pub use replay::{
    ListReplayAttemptsResponse, ReplayAttempt, ReplayErrorKind, ReplayRequest, ReplaySummary,
};
