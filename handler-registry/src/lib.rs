//! # Handler registry
//!
//! Ordered fan-out over content handlers. For each registered handler, in registration
//! order: skip it when `should_handle` is false, otherwise invoke `on_message` and
//! collect its response. The sequence is finite (bounded by handler count) and each
//! call is independent; the consumer decides how far to deliver the collected
//! responses (the dispatcher stops on the first delivery failure).

use linkkeeper_core::{Handler, Message, Response, Result};
use std::sync::Arc;
use tracing::{debug, info};

/// Ordered collection of [`Handler`]s. Supports zero or more handlers.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Appends a handler; handlers run in registration order.
    pub fn register(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Runs the message through every opted-in handler and collects their responses
    /// in registration order. Handler errors propagate and end the fan-out.
    pub async fn on_message(&self, message: &Message) -> Result<Vec<Response>> {
        let mut responses = Vec::new();

        for handler in &self.handlers {
            let handler_name = std::any::type_name_of_val(handler.as_ref());

            if !handler.should_handle(message) {
                debug!(
                    user_id = message.from.id,
                    handler = %handler_name,
                    "handler opted out"
                );
                continue;
            }

            let response = handler.on_message(message).await?;
            info!(
                user_id = message.from.id,
                chat_id = message.chat_id,
                handler = %handler_name,
                empty = response.is_empty(),
                has_reaction = response.reaction.is_some(),
                "handler produced response"
            );
            responses.push(response);
        }

        Ok(responses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use linkkeeper_core::Reaction;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn test_message(text: &str) -> Message {
        Message {
            id: 1,
            chat_id: 456,
            text: text.to_string(),
            ..Message::default()
        }
    }

    /// Counts invocations; opts in or out based on `wants`.
    struct CountingHandler {
        wants: bool,
        calls: Arc<AtomicUsize>,
        emoji: &'static str,
    }

    #[async_trait]
    impl Handler for CountingHandler {
        fn should_handle(&self, _message: &Message) -> bool {
            self.wants
        }

        async fn on_message(&self, message: &Message) -> Result<Response> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Response {
                chat_id: message.chat_id,
                text: String::new(),
                reaction: Some(Reaction {
                    message_id: message.id,
                    emoji: self.emoji.to_string(),
                }),
            })
        }
    }

    #[tokio::test]
    async fn test_empty_registry_yields_no_responses() {
        let registry = HandlerRegistry::new();
        let responses = registry.on_message(&test_message("hi")).await.unwrap();
        assert!(responses.is_empty());
    }

    #[tokio::test]
    async fn test_opted_out_handler_is_skipped() {
        let calls = Arc::new(AtomicUsize::new(0));
        let registry = HandlerRegistry::new().register(Arc::new(CountingHandler {
            wants: false,
            calls: calls.clone(),
            emoji: "👍",
        }));

        let responses = registry.on_message(&test_message("hi")).await.unwrap();

        assert!(responses.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_handlers_run_in_registration_order() {
        let first_calls = Arc::new(AtomicUsize::new(0));
        let second_calls = Arc::new(AtomicUsize::new(0));

        let registry = HandlerRegistry::new()
            .register(Arc::new(CountingHandler {
                wants: true,
                calls: first_calls.clone(),
                emoji: "👍",
            }))
            .register(Arc::new(CountingHandler {
                wants: true,
                calls: second_calls.clone(),
                emoji: "👀",
            }));

        let responses = registry.on_message(&test_message("hi")).await.unwrap();

        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0].reaction.as_ref().unwrap().emoji, "👍");
        assert_eq!(responses[1].reaction.as_ref().unwrap().emoji, "👀");
        assert_eq!(first_calls.load(Ordering::SeqCst), 1);
        assert_eq!(second_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_repeated_calls_are_independent() {
        let calls = Arc::new(AtomicUsize::new(0));
        let registry = HandlerRegistry::new().register(Arc::new(CountingHandler {
            wants: true,
            calls: calls.clone(),
            emoji: "👍",
        }));

        let msg = test_message("hi");
        let first = registry.on_message(&msg).await.unwrap();
        let second = registry.on_message(&msg).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
