use serde::{Deserialize, Serialize};

use super::http::{ChatTransport, ClientError};

/// Transcript entry shown when a turn fails for any reason.
pub const FALLBACK_REPLY: &str = "Sorry, something went wrong. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub sender: Sender,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
        }
    }
}

/// One user's conversation as seen by the client.
///
/// The transcript is append-only. A turn always appends the user entry first
/// and exactly one bot entry when it completes, so entries never interleave
/// out of order.
#[derive(Debug, Default)]
pub struct ChatSession {
    messages: Vec<Message>,
    input: String,
    busy: bool,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Start a turn from the pending input.
    ///
    /// Returns the text to send, or `None` when the input is blank or a turn
    /// is already in flight (in which case nothing changes). On success the
    /// user entry is already in the transcript, the input is cleared and the
    /// session is busy.
    pub fn begin_turn(&mut self) -> Option<String> {
        if self.busy {
            return None;
        }
        let text = self.input.trim();
        if text.is_empty() {
            return None;
        }

        let text = text.to_string();
        self.messages.push(Message::user(text.clone()));
        self.input.clear();
        self.busy = true;
        Some(text)
    }

    /// Append the bot's reply. Does not clear `busy`; see [`Self::complete`].
    pub fn on_success(&mut self, reply: impl Into<String>) {
        self.messages.push(Message::bot(reply));
    }

    /// Append the fixed fallback entry. The error itself is only logged.
    pub fn on_failure(&mut self, error: &ClientError) {
        tracing::error!(%error, "Chat request failed");
        self.messages.push(Message::bot(FALLBACK_REPLY));
    }

    /// Finish the in-flight turn with its outcome and clear `busy`.
    ///
    /// Ignored when no turn is in flight.
    pub fn complete(&mut self, outcome: Result<String, ClientError>) {
        if !self.busy {
            tracing::warn!("Ignoring completion with no turn in flight");
            return;
        }
        match outcome {
            Ok(reply) => self.on_success(reply),
            Err(error) => self.on_failure(&error),
        }
        self.busy = false;
    }

    /// Run a whole turn against `transport`. Returns `false` if the submission
    /// was a no-op.
    ///
    /// If the returned future is dropped mid-flight the turn still ends: the
    /// fallback entry is appended and `busy` is cleared.
    pub async fn submit<T>(&mut self, transport: &T) -> bool
    where
        T: ChatTransport + ?Sized,
    {
        let Some(text) = self.begin_turn() else {
            return false;
        };
        let turn = PendingTurn { session: self };
        let outcome = transport.send(&text).await;
        turn.session.complete(outcome);
        true
    }
}

/// Held across the network await in [`ChatSession::submit`].
struct PendingTurn<'a> {
    session: &'a mut ChatSession,
}

impl Drop for PendingTurn<'_> {
    fn drop(&mut self) {
        if self.session.busy {
            tracing::warn!("Chat turn cancelled before completing");
            self.session.messages.push(Message::bot(FALLBACK_REPLY));
            self.session.busy = false;
        }
    }
}
