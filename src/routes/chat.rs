use axum::{Json, body::Bytes, extract::State};

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse},
    services::relay::relay_message,
    state::SharedState,
};

// The body is taken raw so every malformed shape maps to the same 400
// instead of axum's extractor rejections.
pub async fn chat_handler(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<ChatResponse>, AppError> {
    let request = ChatRequest::from_body(&body).inspect_err(|_| {
        tracing::warn!(bytes = body.len(), "Rejected chat request without a string message");
    })?;

    let reply = relay_message(state.provider.as_ref(), &request.message).await?;
    Ok(Json(reply))
}
