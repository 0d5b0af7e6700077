//! Transport-neutral event types and the `Channel` trait.

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;
use serde::{Deserialize, Serialize};

use crate::dialog::event::Outgoing;
use crate::error::ChannelError;

/// What the user did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventPayload {
    /// Free text, including reply-keyboard button presses.
    Text(String),
    /// An inline-menu selection, carrying its callback token.
    Choice(String),
}

/// An incoming conversation event, normalized across transports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingEvent {
    /// Opaque stable user identity.
    pub user_id: String,
    pub payload: EventPayload,
    /// Transport-specific routing data (e.g. chat id, source message id).
    /// The dialog core never reads this.
    pub metadata: serde_json::Value,
}

impl IncomingEvent {
    pub fn text(user_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            payload: EventPayload::Text(text.into()),
            metadata: serde_json::json!({}),
        }
    }

    pub fn choice(user_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            payload: EventPayload::Choice(token.into()),
            metadata: serde_json::json!({}),
        }
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Stream of incoming events produced by a running channel.
pub type EventStream = Pin<Box<dyn Stream<Item = IncomingEvent> + Send>>;

/// A bidirectional transport binding.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Channel identifier for logs.
    fn name(&self) -> &str;

    /// Start listening and return the stream of incoming events.
    async fn start(&self) -> Result<EventStream, ChannelError>;

    /// Deliver one dialog output in the context of the event it answers.
    async fn respond(&self, event: &IncomingEvent, out: Outgoing) -> Result<(), ChannelError>;

    /// Verify connectivity/credentials.
    async fn health_check(&self) -> Result<(), ChannelError>;

    /// Graceful shutdown.
    async fn shutdown(&self) -> Result<(), ChannelError>;
}
