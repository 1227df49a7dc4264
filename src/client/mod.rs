//! Client side of the exchange: a transport that talks to `/chat` and the
//! session that owns the transcript.

pub mod http;
pub mod session;

pub use http::{ChatClient, ChatTransport, ClientError};
pub use session::{ChatSession, FALLBACK_REPLY, Message, Sender};
