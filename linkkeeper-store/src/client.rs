//! Link-saving client: POSTs the prepared payload to the backend and maps its
//! `{code, message}` envelope onto success or a named failure.

use linkkeeper_core::{LinkKeeperError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Payload for the backend: raw content plus its type, with metadata fields for
/// URL-shaped items.
#[derive(Debug, Clone, Serialize)]
pub struct SavePayload {
    pub content: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SaveReply {
    code: i32,
    #[serde(default)]
    message: String,
}

/// Client for the link-saving backend. In dry-run mode no network call is made;
/// the save is logged and reported as success.
pub struct LinkStoreClient {
    url: String,
    dry_mode: bool,
    client: reqwest::Client,
}

impl LinkStoreClient {
    pub fn new(url: String, dry_mode: bool) -> Self {
        Self {
            url,
            dry_mode,
            client: reqwest::Client::new(),
        }
    }

    /// Saves one payload. `code < 0` in the reply envelope becomes
    /// [`LinkKeeperError::StoreRejected`] carrying the backend message; network
    /// and decode failures are distinct [`LinkKeeperError::Store`] causes.
    pub async fn save(&self, payload: &SavePayload) -> Result<()> {
        if self.dry_mode {
            info!(content = %payload.content, kind = %payload.kind, "dry mode enabled, skipping link save");
            return Ok(());
        }

        let response = self
            .client
            .post(&self.url)
            .json(payload)
            .send()
            .await
            .map_err(|e| LinkKeeperError::Store(format!("failed to send request: {e}")))?;

        let body = response
            .text()
            .await
            .map_err(|e| LinkKeeperError::Store(format!("failed to read response body: {e}")))?;
        debug!(body = %body, "save link response");

        let reply: SaveReply = serde_json::from_str(&body)
            .map_err(|e| LinkKeeperError::Store(format!("failed to decode response: {e}")))?;

        if reply.code < 0 {
            return Err(LinkKeeperError::StoreRejected(reply.message));
        }

        Ok(())
    }
}
