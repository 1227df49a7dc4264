// src/state.rs
use std::sync::Arc;

use crate::services::provider::ReplyProvider;

pub type SharedState = Arc<AppState>;

/// Everything a request handler needs. Built once at startup; never mutated.
pub struct AppState {
    pub provider: Arc<dyn ReplyProvider>,
}

impl AppState {
    pub fn new(provider: Arc<dyn ReplyProvider>) -> Self {
        Self { provider }
    }

    pub fn shared(provider: Arc<dyn ReplyProvider>) -> SharedState {
        Arc::new(Self::new(provider))
    }
}
