use std::sync::Arc;

use anyhow::Context;
use chat_relay::{config::Config, routes, services::gemini::GeminiProvider, state::AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chat_relay=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("loading configuration")?;
    tracing::debug!(?config, "Configuration loaded");

    let provider = GeminiProvider::new(config.gemini.clone()).context("building Gemini client")?;
    let state = AppState::shared(Arc::new(provider));

    let app = routes::app(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;

    tracing::info!("🚀 Chat relay running at http://{}", config.bind_addr);
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
