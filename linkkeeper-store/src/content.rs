//! Content classification: decides whether a canonical message carries a plain URL,
//! a forwarded channel post, or free text.

use linkkeeper_core::Message;
use url::Url;

/// What kind of payload a message carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Url,
    Text,
    Forward,
}

/// Classified payload: the kind tag plus the value to save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    pub kind: ContentKind,
    pub value: String,
}

/// Classifies a canonical message. Order matters: URL-shaped text wins, then a
/// synthesized forward link, then free text. Empty text yields no content at all
/// (a no-op outcome, not an error). Pure and idempotent.
pub fn classify(message: &Message) -> Option<Content> {
    if message.text.is_empty() {
        return None;
    }

    if is_absolute_url(&message.text) {
        return Some(Content {
            kind: ContentKind::Url,
            value: message.text.clone(),
        });
    }

    if !message.url.is_empty() {
        return Some(Content {
            kind: ContentKind::Forward,
            value: message.url.clone(),
        });
    }

    Some(Content {
        kind: ContentKind::Text,
        value: message.text.clone(),
    })
}

/// True when the whole text is a syntactically valid absolute URL. The url crate
/// happily percent-encodes embedded whitespace, so reject that up front.
fn is_absolute_url(text: &str) -> bool {
    !text.contains(char::is_whitespace) && Url::parse(text).is_ok()
}
