//! Core types: user, chat, canonical message, handler response, and the Handler trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User identity (id, username, display name). Supplied by the transport, immutable per update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub display_name: Option<String>,
}

/// Chat identity; identifies a forward's origin channel when applicable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub title: Option<String>,
    pub username: Option<String>,
}

/// Where a forwarded message came from. Exactly one variant applies per message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ForwardOrigin {
    /// Forwarded channel post: origin chat plus the message id inside that channel.
    Channel { chat: Chat, message_id: i32 },
    /// Forwarded from a named user account.
    User {
        display_name: String,
        username: Option<String>,
    },
    /// Forwarded from a user who hides their account; only a free-form name is known.
    HiddenUser { name: String },
}

/// Canonical message, built once per raw update and immutable afterwards.
///
/// `text` is always populated (caption text for media messages); `url` is non-empty
/// only when the message is a forwarded channel post, synthesized as a t.me deep link.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Message {
    pub id: i32,
    pub from: User,
    pub chat_id: i64,
    pub sent: DateTime<Utc>,
    pub html: String,
    pub text: String,
    pub url: String,
}

/// Emoji reaction targeted at a specific message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub message_id: i32,
    pub emoji: String,
}

/// What a handler wants delivered back to the chat: a reaction, a text message,
/// both, or neither. The default value is the empty response (no observable effect).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    pub chat_id: i64,
    pub text: String,
    pub reaction: Option<Reaction>,
}

impl Response {
    /// True when the response carries neither a reaction nor text.
    pub fn is_empty(&self) -> bool {
        self.reaction.is_none() && self.text.is_empty()
    }
}

/// A content handler: opts in via `should_handle`, then produces one [`Response`].
/// Handlers convert their own failures into user-facing text responses; an `Err`
/// here means something genuinely unexpected.
#[async_trait]
pub trait Handler: Send + Sync {
    fn should_handle(&self, message: &Message) -> bool;
    async fn on_message(&self, message: &Message) -> crate::error::Result<Response>;
}
