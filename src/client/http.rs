use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::message::{ChatRequest, ChatResponse};

/// Why a turn could not be completed. Every variant is treated the same way
/// by the session; the distinction only matters for logs.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("server answered with HTTP {0}")]
    Status(u16),
}

/// Sends one user message and yields the bot's reply text.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, message: &str) -> Result<String, ClientError>;
}

#[derive(Debug, Clone)]
pub struct ChatClient {
    client: reqwest::Client,
    base_url: String,
}

impl ChatClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ChatTransport for ChatClient {
    async fn send(&self, message: &str) -> Result<String, ClientError> {
        let res = self
            .client
            .post(format!("{}/chat", self.base_url))
            .json(&ChatRequest::new(message))
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(ClientError::Status(res.status().as_u16()));
        }

        let reply: ChatResponse = res.json().await?;
        Ok(reply.response)
    }
}
