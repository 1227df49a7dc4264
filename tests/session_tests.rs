use chat_relay::client::{
    ChatClient, ChatSession, ChatTransport, ClientError, FALLBACK_REPLY, Message,
};
use chat_relay::error::ProviderError;
use chat_relay::routes::app;
use chat_relay::services::provider::ReplyProvider;
use chat_relay::state::AppState;

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Counts calls and answers with a fixed outcome.
struct CountingTransport {
    reply: Option<&'static str>,
    calls: AtomicUsize,
}

impl CountingTransport {
    fn ok(reply: &'static str) -> Self {
        Self {
            reply: Some(reply),
            calls: AtomicUsize::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            reply: None,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatTransport for CountingTransport {
    async fn send(&self, _message: &str) -> Result<String, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.map(str::to_string).ok_or(ClientError::Status(503))
    }
}

#[tokio::test]
async fn each_turn_adds_user_then_bot_entry() {
    let ok = CountingTransport::ok("pong");
    let failing = CountingTransport::failing();
    let mut session = ChatSession::new();

    for (i, input) in ["ping", "  again ", "third"].into_iter().enumerate() {
        let before = session.messages().len();
        session.set_input(input);
        let transport: &dyn ChatTransport = if i % 2 == 0 { &ok } else { &failing };
        assert!(session.submit(transport).await);

        let messages = session.messages();
        assert_eq!(messages.len(), before + 2);
        assert_eq!(messages[before], Message::user(input.trim()));
        assert!(!session.is_busy());
    }

    assert_eq!(session.messages()[1], Message::bot("pong"));
    assert_eq!(session.messages()[3], Message::bot(FALLBACK_REPLY));
}

#[tokio::test]
async fn blank_input_sends_nothing() {
    let transport = CountingTransport::ok("pong");
    let mut session = ChatSession::new();

    for input in ["", " ", "\t\n"] {
        session.set_input(input);
        assert!(!session.submit(&transport).await);
    }
    assert_eq!(transport.calls(), 0);
    assert!(session.messages().is_empty());
}

#[tokio::test]
async fn submission_while_busy_sends_nothing() {
    let transport = CountingTransport::ok("pong");
    let mut session = ChatSession::new();

    session.set_input("first");
    let text = session.begin_turn().unwrap();

    session.set_input("second");
    assert!(!session.submit(&transport).await);
    assert_eq!(transport.calls(), 0);
    assert_eq!(session.messages().len(), 1);

    session.complete(transport.send(&text).await);
    assert_eq!(session.messages().len(), 2);
    assert!(!session.is_busy());
}

/// Never answers within any reasonable test deadline.
struct StalledTransport;

#[async_trait]
impl ChatTransport for StalledTransport {
    async fn send(&self, _message: &str) -> Result<String, ClientError> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok("too late".to_string())
    }
}

#[tokio::test]
async fn cancelled_turn_still_completes() {
    let mut session = ChatSession::new();
    session.set_input("hello");

    let result = tokio::time::timeout(
        Duration::from_millis(50),
        session.submit(&StalledTransport),
    )
    .await;
    assert!(result.is_err());

    assert!(!session.is_busy());
    assert_eq!(
        session.messages(),
        &[Message::user("hello"), Message::bot(FALLBACK_REPLY)]
    );

    // The input affordance is usable again.
    session.set_input("again");
    assert_eq!(session.begin_turn().as_deref(), Some("again"));
}

#[tokio::test]
async fn client_timeout_yields_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"response": "too late"}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = ChatClient::new(server.uri(), Duration::from_millis(100)).unwrap();
    assert!(matches!(
        client.send("hello").await,
        Err(ClientError::Request(ref e)) if e.is_timeout()
    ));

    let mut session = ChatSession::new();
    session.set_input("hello");
    assert!(session.submit(&client).await);

    assert_eq!(
        session.messages(),
        &[Message::user("hello"), Message::bot(FALLBACK_REPLY)]
    );
    assert!(!session.is_busy());
}

#[tokio::test]
async fn unreachable_server_yields_fallback() {
    // Bind then drop a listener so the port is closed.
    let addr = {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let client = ChatClient::new(format!("http://{addr}"), Duration::from_secs(2)).unwrap();
    let mut session = ChatSession::new();

    session.set_input("hello");
    assert!(session.submit(&client).await);

    assert_eq!(
        session.messages(),
        &[Message::user("hello"), Message::bot(FALLBACK_REPLY)]
    );
    assert!(!session.is_busy());
}

#[tokio::test]
async fn client_posts_chat_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_json(json!({"message": "hello"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "Hi there!"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = ChatClient::new(format!("{}/", server.uri()), Duration::from_secs(2)).unwrap();
    assert_eq!(client.send("hello").await.unwrap(), "Hi there!");
}

#[tokio::test]
async fn error_status_and_bad_body_are_failures() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_json(json!({"message": "boom"})))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({"error": "An error occurred while processing the request."})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_json(json!({"message": "weird"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
        .mount(&server)
        .await;

    let client = ChatClient::new(server.uri(), Duration::from_secs(2)).unwrap();
    assert!(matches!(client.send("boom").await, Err(ClientError::Status(500))));
    assert!(matches!(client.send("weird").await, Err(ClientError::Request(_))));

    let mut session = ChatSession::new();
    session.set_input("boom");
    session.submit(&client).await;
    assert_eq!(session.messages()[1], Message::bot(FALLBACK_REPLY));
}

struct EchoProvider;

#[async_trait]
impl ReplyProvider for EchoProvider {
    async fn generate_reply(&self, prompt: &str) -> Result<String, ProviderError> {
        Ok(format!("echo: {prompt}"))
    }
}

#[tokio::test]
async fn end_to_end_against_relay() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = app(AppState::shared(Arc::new(EchoProvider)));
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let client = ChatClient::new(format!("http://{addr}"), Duration::from_secs(5)).unwrap();
    let mut session = ChatSession::new();
    session.set_input(" hi ");
    assert!(session.submit(&client).await);

    assert_eq!(
        session.messages(),
        &[Message::user("hi"), Message::bot("echo: hi")]
    );
}
