//! # linkkeeper-telegram
//!
//! Telegram-facing layer: the event dispatcher (update stream, access gate, command
//! interception, batching with a debounce tick, media-group merge), canonicalization
//! from teloxide messages, and the [`linkkeeper_core::Bot`] implementation over
//! teloxide. Handles only Telegram connectivity and dispatch; content logic lives
//! behind the handler registry.

mod bot_adapter;
mod listener;
mod transform;

pub use bot_adapter::TelegramBotAdapter;
pub use listener::{update_channel, TelegramListener};
pub use transform::{canonicalize_batch, transform};
