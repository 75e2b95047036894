//! The event dispatcher: a single select loop multiplexing the inbound update
//! channel with a periodic debounce tick. Per update it runs the access gate and
//! command interception, then accumulates the message into a per-sender batch;
//! each tick drains the batches onto independent tasks.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use handler_registry::HandlerRegistry;
use linkkeeper_core::{Bot, LinkKeeperError, Response, Result};
use teloxide::types::{Message as TgMessage, Update, UpdateKind};
use teloxide::update_listeners::{polling_default, AsUpdateStream};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::transform::canonicalize_batch;

const UNKNOWN_USER_REPLY: &str = "I don't know you 🤷‍";
const PING_COMMAND: &str = "/ping";
const PONG_REPLY: &str = "🏓 Pong!";

/// Spawns a long-poll forwarder task and returns the raw update channel. The
/// channel closing (the poller is gone) is the dispatcher's fatal stream-closed
/// signal.
pub fn update_channel(bot: teloxide::Bot) -> mpsc::Receiver<Update> {
    let (tx, rx) = mpsc::channel(100);

    tokio::spawn(async move {
        let mut listener = polling_default(bot).await;
        let stream = listener.as_stream();
        tokio::pin!(stream);

        while let Some(next) = stream.next().await {
            match next {
                Ok(update) => {
                    if tx.send(update).await.is_err() {
                        break;
                    }
                }
                Err(err) => warn!(error = %err, "update polling error"),
            }
        }
    });

    rx
}

/// Owns the dispatch loop. The per-sender accumulation map lives on the loop's
/// stack and is mutated nowhere else; flushed batches run on their own tasks so
/// the loop keeps receiving while they process.
///
/// The flush interval is a fixed debounce with no per-sender cap: a sustained
/// burst makes one flush process an arbitrarily large batch on its task. Known
/// capacity boundary.
pub struct TelegramListener {
    super_users: Vec<i64>,
    flush_interval: Duration,
    bot: Arc<dyn Bot>,
    registry: Arc<HandlerRegistry>,
}

impl TelegramListener {
    pub fn new(
        super_users: Vec<i64>,
        flush_interval: Duration,
        bot: Arc<dyn Bot>,
        registry: Arc<HandlerRegistry>,
    ) -> Self {
        Self {
            super_users,
            flush_interval,
            bot,
            registry,
        }
    }

    /// Blocks indefinitely, consuming the update channel and the debounce tick.
    /// Returns only when the channel closes ([`LinkKeeperError::StreamClosed`]).
    pub async fn run(&self, mut updates: mpsc::Receiver<Update>) -> Result<()> {
        info!(
            super_users = self.super_users.len(),
            flush_interval_ms = self.flush_interval.as_millis() as u64,
            "dispatcher started"
        );

        let mut ticker = tokio::time::interval(self.flush_interval);
        let mut pending: HashMap<i64, Vec<TgMessage>> = HashMap::new();

        loop {
            tokio::select! {
                maybe_update = updates.recv() => {
                    let update = maybe_update.ok_or(LinkKeeperError::StreamClosed)?;
                    let message = match update.kind {
                        UpdateKind::Message(message) => message,
                        _ => continue,
                    };
                    if let Err(err) = self.accept(message, &mut pending).await {
                        error!(error = %err, "failed to process update");
                    }
                }
                _ = ticker.tick() => {
                    for (user_id, batch) in pending.drain() {
                        let worker = BatchWorker {
                            bot: self.bot.clone(),
                            registry: self.registry.clone(),
                        };
                        tokio::spawn(async move {
                            debug!(user_id, batch_len = batch.len(), "processing batch");
                            if let Err(err) = worker.process(batch).await {
                                error!(user_id, error = %err, "batch processing failed");
                            }
                        });
                    }
                }
            }
        }
    }

    /// Access gate, command interception, and batching for one raw message.
    /// Public so tests can drive the dispatcher without a live update stream.
    pub async fn accept(
        &self,
        message: TgMessage,
        pending: &mut HashMap<i64, Vec<TgMessage>>,
    ) -> Result<()> {
        let Some(user) = message.from.as_ref() else {
            debug!(chat_id = message.chat.id.0, "message without sender, skipping");
            return Ok(());
        };
        let user_id = user.id.0 as i64;

        if !self.is_super_user(user_id) {
            debug!(user_id, "user is not a super user");
            self.bot
                .send_message(message.chat.id.0, UNKNOWN_USER_REPLY)
                .await?;
            return Ok(());
        }

        if is_ping(message.text()) {
            self.bot.send_message(message.chat.id.0, PONG_REPLY).await?;
            return Ok(());
        }

        pending.entry(user_id).or_default().push(message);
        Ok(())
    }

    /// Canonicalizes one flushed batch and delivers every handler response.
    /// Public so tests can exercise merging and delivery directly.
    pub async fn process_batch(&self, batch: Vec<TgMessage>) -> Result<()> {
        BatchWorker {
            bot: self.bot.clone(),
            registry: self.registry.clone(),
        }
        .process(batch)
        .await
    }

    fn is_super_user(&self, user_id: i64) -> bool {
        self.super_users.contains(&user_id)
    }
}

fn is_ping(text: Option<&str>) -> bool {
    let Some(first) = text.and_then(|t| t.split_whitespace().next()) else {
        return false;
    };
    first == PING_COMMAND
        || first
            .strip_prefix(PING_COMMAND)
            .is_some_and(|rest| rest.starts_with('@'))
}

/// Everything a spawned batch task needs; holds no dispatcher state.
struct BatchWorker {
    bot: Arc<dyn Bot>,
    registry: Arc<HandlerRegistry>,
}

impl BatchWorker {
    async fn process(&self, batch: Vec<TgMessage>) -> Result<()> {
        for message in canonicalize_batch(&batch) {
            let responses = self.registry.on_message(&message).await?;
            for response in responses {
                // First delivery failure aborts the rest of this batch.
                self.deliver(&response).await?;
            }
        }
        Ok(())
    }

    async fn deliver(&self, response: &Response) -> Result<()> {
        if let Some(reaction) = &response.reaction {
            self.bot
                .set_reaction(response.chat_id, reaction.message_id, &reaction.emoji)
                .await?;
        }
        if !response.text.is_empty() {
            self.bot.send_message(response.chat_id, &response.text).await?;
        }
        Ok(())
    }
}
