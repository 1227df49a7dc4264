// src/services/provider.rs
use async_trait::async_trait;

use crate::error::ProviderError;

/// A single-turn text generator.
///
/// Implementations receive the user's text verbatim and no conversation
/// history. An `Ok` with empty text means the provider answered but produced
/// nothing usable; callers decide how to present that.
#[async_trait]
pub trait ReplyProvider: Send + Sync {
    async fn generate_reply(&self, prompt: &str) -> Result<String, ProviderError>;
}
