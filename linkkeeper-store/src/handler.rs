//! The link-saving handler: classifies a message, resolves metadata for
//! URL-shaped content, consults the duplicate guard, saves, and turns the outcome
//! into user feedback (reaction or failure text).

use async_trait::async_trait;
use linkkeeper_core::{Handler, Message, Reaction, Response, Result};
use tracing::debug;

use crate::client::{LinkStoreClient, SavePayload};
use crate::content::{classify, Content, ContentKind};
use crate::metadata::MetadataResolver;
use crate::search::SearchClient;

const SAVED_EMOJI: &str = "👍";
const DUPLICATE_EMOJI: &str = "👀";

enum SaveOutcome {
    Saved,
    Duplicate,
}

/// Unconditional content handler that forwards classified content to the link
/// store. Failures become text responses, never process errors.
pub struct LinkStoreHandler {
    client: LinkStoreClient,
    resolver: MetadataResolver,
    search: Option<SearchClient>,
}

impl LinkStoreHandler {
    /// `search` is optional: without credentials the duplicate guard is disabled
    /// and everything counts as new.
    pub fn new(
        client: LinkStoreClient,
        resolver: MetadataResolver,
        search: Option<SearchClient>,
    ) -> Self {
        Self {
            client,
            resolver,
            search,
        }
    }

    async fn save_content(&self, content: &Content) -> Result<SaveOutcome> {
        match content.kind {
            ContentKind::Text => {
                self.client
                    .save(&SavePayload {
                        content: content.value.clone(),
                        kind: "memo".to_string(),
                        description: None,
                        title: None,
                    })
                    .await?;
                Ok(SaveOutcome::Saved)
            }
            ContentKind::Url | ContentKind::Forward => {
                let metadata = self.resolver.resolve(&content.value).await?;
                debug!(title = %metadata.title, url = %metadata.url, "resolved link metadata");

                if let Some(search) = &self.search {
                    if search.is_duplicate(&metadata.title).await {
                        return Ok(SaveOutcome::Duplicate);
                    }
                }

                self.client
                    .save(&SavePayload {
                        content: metadata.url,
                        kind: "url".to_string(),
                        description: Some(metadata.description),
                        title: Some(metadata.title),
                    })
                    .await?;
                Ok(SaveOutcome::Saved)
            }
        }
    }
}

#[async_trait]
impl Handler for LinkStoreHandler {
    fn should_handle(&self, _message: &Message) -> bool {
        true
    }

    async fn on_message(&self, message: &Message) -> Result<Response> {
        let Some(content) = classify(message) else {
            debug!(user_id = message.from.id, "empty content");
            return Ok(Response::default());
        };

        match self.save_content(&content).await {
            Ok(SaveOutcome::Saved) => Ok(Response {
                chat_id: message.chat_id,
                text: String::new(),
                reaction: Some(Reaction {
                    message_id: message.id,
                    emoji: SAVED_EMOJI.to_string(),
                }),
            }),
            Ok(SaveOutcome::Duplicate) => Ok(Response {
                chat_id: message.chat_id,
                text: String::new(),
                reaction: Some(Reaction {
                    message_id: message.id,
                    emoji: DUPLICATE_EMOJI.to_string(),
                }),
            }),
            Err(err) => Ok(Response {
                chat_id: message.chat_id,
                text: format!("failed to save link: {err}"),
                reaction: None,
            }),
        }
    }
}
