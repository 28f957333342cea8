use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::{
    auth::api_auth,
    handlers::{
        endpoints::create_endpoint_handler,
        health_handler,
        hooks::receive_hook_handler,
        messages::{
            get_message_handler, list_messages_handler, list_replays_handler,
            replay_message_handler,
        },
    },
    state::AppState,
};

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/endpoints", post(create_endpoint_handler))
        .route("/messages", get(list_messages_handler))
        .route("/messages/:id", get(get_message_handler))
        .route("/messages/:id/replay", post(replay_message_handler))
        .route("/messages/:id/replays", get(list_replays_handler))
        .layer(middleware::from_fn_with_state(state.clone(), api_auth));

    Router::new()
        .route("/health", get(health_handler))
        .route("/hooks/:token", post(receive_hook_handler))
        .nest("/api", api)
        .with_state(state)
}
