//! Duplicate guard: asks the backend's search endpoint whether a title was
//! already saved. Strictly best-effort; infrastructure failures never block a save.

use linkkeeper_core::{LinkKeeperError, Result};
use serde::Deserialize;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct SearchReply {
    #[serde(default)]
    data: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(rename = "userSearchEngineID", default)]
    user_search_engine_id: Option<serde_json::Value>,
    #[serde(rename = "targetURL", default)]
    target_url: Option<String>,
}

/// Authenticated client for the backend's search endpoint.
pub struct SearchClient {
    url: String,
    token: String,
    client: reqwest::Client,
}

impl SearchClient {
    pub fn new(url: String, token: String) -> Self {
        Self {
            url,
            token,
            client: reqwest::Client::new(),
        }
    }

    /// True when the backend already holds an entry matching the keyword.
    /// Fail-open: transport and decode errors are logged and count as
    /// "not a duplicate". Empty keywords skip the query entirely.
    pub async fn is_duplicate(&self, keyword: &str) -> bool {
        if keyword.is_empty() {
            return false;
        }

        match self.search(keyword).await {
            Ok(found) => found,
            Err(err) => {
                warn!(error = %err, keyword, "duplicate search failed, assuming not a duplicate");
                false
            }
        }
    }

    async fn search(&self, keyword: &str) -> Result<bool> {
        let url = format!(
            "{}?page=1&pageSize=50&keyword={}&filters=&archiving=false",
            self.url,
            urlencoding::encode(keyword)
        );

        let reply: SearchReply = self
            .client
            .get(&url)
            .header("Authorization", &self.token)
            .send()
            .await
            .map_err(|e| LinkKeeperError::Store(format!("failed to send search request: {e}")))?
            .error_for_status()
            .map_err(|e| LinkKeeperError::Store(format!("search returned error status: {e}")))?
            .json()
            .await
            .map_err(|e| LinkKeeperError::Store(format!("failed to decode search response: {e}")))?;

        if let Some(hit) = reply.data.first() {
            debug!(
                target_url = hit.target_url.as_deref().unwrap_or(""),
                engine_id = ?hit.user_search_engine_id,
                "existing entry found"
            );
        }

        Ok(!reply.data.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[tokio::test]
    async fn test_non_empty_result_set_is_a_duplicate() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_query(Matcher::UrlEncoded("keyword".into(), "My Title".into()))
            .match_header("Authorization", "secret")
            .with_status(200)
            .with_body(r#"{"data":[{"userSearchEngineID":"abc","targetURL":"https://example.com"}]}"#)
            .create_async()
            .await;

        let client = SearchClient::new(server.url(), "secret".to_string());
        assert!(client.is_duplicate("My Title").await);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_empty_result_set_is_not_a_duplicate() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"data":[]}"#)
            .create_async()
            .await;

        let client = SearchClient::new(server.url(), "secret".to_string());
        assert!(!client.is_duplicate("My Title").await);
    }

    #[tokio::test]
    async fn test_server_error_fails_open() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let client = SearchClient::new(server.url(), "secret".to_string());
        assert!(!client.is_duplicate("My Title").await);
    }

    #[tokio::test]
    async fn test_decode_error_fails_open() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let client = SearchClient::new(server.url(), "secret".to_string());
        assert!(!client.is_duplicate("My Title").await);
    }

    #[tokio::test]
    async fn test_empty_keyword_skips_the_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let client = SearchClient::new(server.url(), "secret".to_string());
        assert!(!client.is_duplicate("").await);
        mock.assert_async().await;
    }
}
