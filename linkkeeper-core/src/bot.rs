//! Outbound transport abstraction for sending feedback back to a chat.
//!
//! [`Bot`] is transport-agnostic; linkkeeper-telegram implements it via teloxide,
//! tests substitute a recording implementation.

use crate::error::Result;
use async_trait::async_trait;

/// Sends feedback to a chat: a plain text message or an emoji reaction on an
/// existing message. Implementations map to a concrete transport.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()>;

    /// Sets a single emoji reaction on the given message (never "big").
    async fn set_reaction(&self, chat_id: i64, message_id: i32, emoji: &str) -> Result<()>;
}
