// src/services/relay.rs
use crate::{error::AppError, message::ChatResponse, services::provider::ReplyProvider};

/// Forward one user message to the provider and map the outcome.
///
/// * text → `ChatResponse` with that text
/// * empty text → the canned empty-completion reply (still a success)
/// * provider error → [`AppError::ProviderFailure`], detail logged here only
pub async fn relay_message(
    provider: &dyn ReplyProvider,
    message: &str,
) -> Result<ChatResponse, AppError> {
    tracing::info!(%message, "Received message");

    match provider.generate_reply(message).await {
        Ok(text) if !text.is_empty() => {
            tracing::info!(response = %text, "Sending response");
            Ok(ChatResponse::new(text))
        }
        Ok(_) => {
            tracing::warn!("Provider returned no text, sending fallback reply");
            Ok(ChatResponse::empty_completion())
        }
        Err(err) => {
            tracing::error!(error = %err, "An error occurred while generating a reply");
            Err(AppError::ProviderFailure(err))
        }
    }
}
