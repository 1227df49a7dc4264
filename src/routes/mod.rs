// src/routes/mod.rs
pub mod chat;

use crate::state::SharedState;
use axum::{
    Router,
    routing::{get, post},
};
use chat::chat_handler;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_router() -> Router<SharedState> {
    Router::new()
        .route("/chat", post(chat_handler))
        .route("/health", get(|| async { "OK" }))
        .layer(TraceLayer::new_for_http())
}

/// The full application: routes, state and a permissive CORS layer so a
/// browser client on another origin can call `/chat`.
pub fn app(state: SharedState) -> Router {
    create_router()
        .with_state(state)
        .layer(CorsLayer::very_permissive())
}
