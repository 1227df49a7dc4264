use std::time::Duration;

use anyhow::Context;
use chat_relay::client::{ChatClient, ChatSession};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Terminal chat client for the relay server.
#[derive(Parser, Debug)]
#[command(name = "chat", version, about)]
struct Args {
    /// Base URL of the relay server
    #[arg(long, env = "CHAT_SERVER_URL", default_value = "http://localhost:5001")]
    server: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so they don't mix with the transcript.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chat_relay=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let client = ChatClient::new(&args.server, Duration::from_secs(args.timeout_secs))
        .context("building HTTP client")?;
    let mut session = ChatSession::new();

    println!("Connected to {} (Ctrl-D to quit)", client.base_url());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        session.set_input(line);
        if !session.submit(&client).await {
            continue;
        }
        if let Some(reply) = session.messages().last() {
            println!("bot: {}", reply.text);
        }
    }

    Ok(())
}
