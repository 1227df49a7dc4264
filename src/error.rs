// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::message::ErrorResponse;

/// Errors surfaced by the `/chat` route.
///
/// The `Display` text of each variant is exactly what the client sees; any
/// underlying detail stays in the source chain and only reaches the logs.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid request, \"message\" field is required.")]
    InvalidRequest,

    #[error("An error occurred while processing the request.")]
    ProviderFailure(#[source] ProviderError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest => StatusCode::BAD_REQUEST,
            AppError::ProviderFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Anything that went wrong while obtaining a completion.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider request timed out")]
    Timeout,

    #[error("provider rejected the credentials (HTTP {0})")]
    Credentials(u16),

    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("network error talking to provider: {0}")]
    Network(String),

    #[error("could not decode provider response: {0}")]
    Malformed(String),

    #[error("provider returned no candidates{}", block_reason_suffix(.0))]
    NoCandidates(Option<String>),

    #[error("invalid provider configuration: {0}")]
    Config(String),
}

fn block_reason_suffix(reason: &Option<String>) -> String {
    match reason {
        Some(reason) => format!(" (block reason: {reason})"),
        None => String::new(),
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            return ProviderError::Timeout;
        }
        if let Some(status) = error.status() {
            let code = status.as_u16();
            if code == 401 || code == 403 {
                return ProviderError::Credentials(code);
            }
            return ProviderError::Status {
                status: code,
                body: String::new(),
            };
        }
        if error.is_decode() {
            return ProviderError::Malformed(error.to_string());
        }
        ProviderError::Network(error.to_string())
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(error: serde_json::Error) -> Self {
        ProviderError::Malformed(error.to_string())
    }
}
