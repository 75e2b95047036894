//! Page metadata resolution: fetches a URL (after domain rewriting) and extracts
//! title, description, and canonical URL from the HTML head.

use linkkeeper_core::{LinkKeeperError, Result};
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

/// Title/description/canonical triple for a saved link. Fetched on demand,
/// never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkMetadata {
    pub title: String,
    pub description: String,
    pub url: String,
}

/// Hosts that block scraping get swapped for embed-friendly mirrors before the
/// fetch. The saved canonical URL still prefers whatever the page itself claims.
const DOMAIN_REWRITES: &[(&str, &str)] = &[
    ("twitter.com", "fxtwitter.com"),
    ("www.twitter.com", "fxtwitter.com"),
    ("x.com", "fixupx.com"),
    ("www.x.com", "fixupx.com"),
];

/// Fetches and parses page metadata over HTTP.
pub struct MetadataResolver {
    client: reqwest::Client,
}

impl Default for MetadataResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataResolver {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Applies the domain-rewrite table to the URL's host. Unparseable URLs and
    /// unlisted hosts pass through unchanged.
    pub fn rewrite_url(url: &str) -> String {
        if let Ok(mut parsed) = Url::parse(url) {
            if let Some(host) = parsed.host_str() {
                let replacement = DOMAIN_REWRITES
                    .iter()
                    .find(|(from, _)| *from == host)
                    .map(|(_, to)| *to);
                if let Some(to) = replacement {
                    if parsed.set_host(Some(to)).is_ok() {
                        return parsed.to_string();
                    }
                }
            }
        }
        url.to_string()
    }

    /// Fetches the (possibly rewritten) URL and extracts metadata. Any retrieval
    /// failure is a [`LinkKeeperError::Metadata`] and aborts the save.
    pub async fn resolve(&self, url: &str) -> Result<LinkMetadata> {
        let fetch_url = Self::rewrite_url(url);
        debug!(url, fetch_url = %fetch_url, "fetching link metadata");

        let response = self
            .client
            .get(&fetch_url)
            .send()
            .await
            .map_err(|e| LinkKeeperError::Metadata(format!("failed to fetch page: {e}")))?
            .error_for_status()
            .map_err(|e| LinkKeeperError::Metadata(format!("page returned error status: {e}")))?;

        let html = response
            .text()
            .await
            .map_err(|e| LinkKeeperError::Metadata(format!("failed to read page body: {e}")))?;

        Ok(parse_metadata(&html, url))
    }
}

/// Pulls title/description/canonical out of an HTML document, falling back to
/// `fallback_url` when the page declares no canonical location.
fn parse_metadata(html: &str, fallback_url: &str) -> LinkMetadata {
    let document = Html::parse_document(html);

    let title = select_attr(&document, r#"meta[property="og:title"]"#, "content")
        .or_else(|| select_text(&document, "title"))
        .unwrap_or_default();

    let description = select_attr(&document, r#"meta[name="description"]"#, "content")
        .or_else(|| select_attr(&document, r#"meta[property="og:description"]"#, "content"))
        .unwrap_or_default();

    let url = select_attr(&document, r#"link[rel="canonical"]"#, "href")
        .or_else(|| select_attr(&document, r#"meta[property="og:url"]"#, "content"))
        .unwrap_or_else(|| fallback_url.to_string());

    LinkMetadata {
        title,
        description,
        url,
    }
}

fn select_attr(document: &Html, selector: &str, attr: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    let element = document.select(&selector).next()?;
    element
        .value()
        .attr(attr)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn select_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    let element = document.select(&selector).next()?;
    let text: String = element.text().collect();
    let text = text.trim().to_string();
    (!text.is_empty()).then_some(text)
}
