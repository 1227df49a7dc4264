// src/message.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;

/// Canned reply used when the provider succeeds without producing any text.
pub const EMPTY_COMPLETION_REPLY: &str = "Sorry, I could not generate a response.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Parse a raw `/chat` body.
    ///
    /// The body must be a JSON object carrying a string `message`. Anything
    /// else (empty body, bad JSON, arrays, a non-string `message`) is an
    /// [`AppError::InvalidRequest`]. Extra fields are ignored.
    pub fn from_body(body: &[u8]) -> Result<Self, AppError> {
        let value: Value = serde_json::from_slice(body).map_err(|_| AppError::InvalidRequest)?;

        match value.get("message") {
            Some(Value::String(message)) => Ok(Self::new(message.as_str())),
            _ => Err(AppError::InvalidRequest),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

impl ChatResponse {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }

    pub fn empty_completion() -> Self {
        Self::new(EMPTY_COMPLETION_REPLY)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
