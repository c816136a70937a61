//! Client-side conversation pipeline: the ordered turn log and the
//! submit/reply loop that drives the relay endpoint, independent of any UI.

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::warn;

use crate::message::{ChatRequest, ChatResponse, Turn};

/// Greeting the transcript is seeded with.
pub const WELCOME_MESSAGE: &str =
    "Hello! I'm your AI assistant. How can I help you today?";

/// What the user sees when a request fails. Deliberately also appended to the
/// history as a model turn, so later requests carry the failure context.
pub const ERROR_MESSAGE: &str = "Sorry, something went wrong. Please try again.";

/// Ordered sequence of turns for one session, oldest first.
/// Append-only between `clear` calls; held only in memory.
#[derive(Clone, Debug, Default)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("relay returned {status}: {message}")]
    Status { status: u16, message: String },
}

/// How a session reaches the relay endpoint. Tests stub this.
#[async_trait]
pub trait RelayTransport: Send + Sync {
    async fn send(&self, conversation: &Conversation) -> Result<String, TransportError>;
}

/// Talks to `POST /chat` over HTTP.
pub struct HttpRelay {
    http: Client,
    endpoint: String,
}

impl HttpRelay {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { http: Client::new(), endpoint: endpoint.into() }
    }
}

#[async_trait]
impl RelayTransport for HttpRelay {
    async fn send(&self, conversation: &Conversation) -> Result<String, TransportError> {
        let request = ChatRequest { messages: conversation.turns().to_vec() };

        let response = self.http.post(&self.endpoint).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TransportError::Status { status: status.as_u16(), message });
        }

        let body: ChatResponse = response.json().await?;
        Ok(body.response)
    }
}

/// Outcome of one `submit` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input, or a request was already in flight. Nothing happened.
    Ignored,
    Replied(String),
    Failed(String),
}

/// One user session: owns the conversation and drives the relay.
/// At most one request in flight at a time, enforced by a boolean guard.
pub struct ChatSession<T: RelayTransport> {
    conversation: Conversation,
    relay: T,
    in_flight: bool,
}

impl<T: RelayTransport> ChatSession<T> {
    pub fn new(relay: T) -> Self {
        let mut conversation = Conversation::new();
        conversation.push(Turn::model(WELCOME_MESSAGE));
        Self { conversation, relay, in_flight: false }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    pub fn relay(&self) -> &T {
        &self.relay
    }

    /// Append the input as a user turn, send the whole history to the relay,
    /// and append the reply (or the fixed error string) as a model turn.
    pub async fn submit(&mut self, input: &str) -> SubmitOutcome {
        let trimmed = input.trim();
        if trimmed.is_empty() || self.in_flight {
            return SubmitOutcome::Ignored;
        }

        self.conversation.push(Turn::user(trimmed));

        self.in_flight = true;
        let result = self.relay.send(&self.conversation).await;
        self.in_flight = false;

        match result {
            Ok(reply) => {
                self.conversation.push(Turn::model(reply.clone()));
                SubmitOutcome::Replied(reply)
            }
            Err(err) => {
                warn!(error = %err, "relay request failed");
                self.conversation.push(Turn::model(ERROR_MESSAGE));
                SubmitOutcome::Failed(err.to_string())
            }
        }
    }

    /// Drop the history and reseed the welcome turn.
    pub fn clear(&mut self) {
        self.conversation.clear();
        self.conversation.push(Turn::model(WELCOME_MESSAGE));
    }
}
