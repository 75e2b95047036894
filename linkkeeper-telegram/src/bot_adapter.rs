//! Wraps teloxide::Bot and implements [`linkkeeper_core::Bot`]. Production code
//! sends feedback via Telegram; tests substitute a recording Bot impl.

use async_trait::async_trait;
use linkkeeper_core::{Bot as CoreBot, LinkKeeperError, Result};
use teloxide::prelude::*;
use teloxide::types::{ChatId, MessageId, ReactionType};

/// Thin wrapper around teloxide::Bot implementing the core Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat_id), text.to_string())
            .await
            .map_err(|e| LinkKeeperError::Transport(e.to_string()))?;
        Ok(())
    }

    async fn set_reaction(&self, chat_id: i64, message_id: i32, emoji: &str) -> Result<()> {
        self.bot
            .set_message_reaction(ChatId(chat_id), MessageId(message_id))
            .reaction(vec![ReactionType::Emoji {
                emoji: emoji.to_string(),
            }])
            .is_big(false)
            .await
            .map_err(|e| LinkKeeperError::Transport(e.to_string()))?;
        Ok(())
    }
}
