//! Integration tests for [`linkkeeper_store::LinkStoreHandler`].
//!
//! Covers: empty content as a no-op, memo save success (👍), backend rejection as a
//! failure text, duplicate detection (👀, no save call), dry-run skipping the
//! network, and the full URL path through metadata resolution.

use linkkeeper_core::{Handler, Message};
use linkkeeper_store::{LinkStoreClient, LinkStoreHandler, MetadataResolver, SearchClient};
use mockito::Matcher;

fn text_message(text: &str) -> Message {
    Message {
        id: 10,
        chat_id: 42,
        text: text.to_string(),
        ..Message::default()
    }
}

fn handler_without_search(store_url: String, dry_mode: bool) -> LinkStoreHandler {
    LinkStoreHandler::new(
        LinkStoreClient::new(store_url, dry_mode),
        MetadataResolver::new(),
        None,
    )
}

#[tokio::test]
async fn test_empty_message_is_a_no_op() {
    let mut server = mockito::Server::new_async().await;
    let save = server.mock("POST", "/").expect(0).create_async().await;

    let handler = handler_without_search(server.url(), false);
    let response = handler.on_message(&text_message("")).await.unwrap();

    assert!(response.is_empty());
    save.assert_async().await;
}

#[tokio::test]
async fn test_memo_save_success_reacts_with_thumbs_up() {
    let mut server = mockito::Server::new_async().await;
    let save = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "content": "remember this",
            "type": "memo",
        })))
        .with_status(200)
        .with_body(r#"{"code":0,"message":"ok"}"#)
        .create_async()
        .await;

    let handler = handler_without_search(server.url(), false);
    let response = handler
        .on_message(&text_message("remember this"))
        .await
        .unwrap();

    save.assert_async().await;
    assert!(response.text.is_empty());
    let reaction = response.reaction.unwrap();
    assert_eq!(reaction.emoji, "👍");
    assert_eq!(reaction.message_id, 10);
    assert_eq!(response.chat_id, 42);
}

#[tokio::test]
async fn test_backend_rejection_becomes_failure_text() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/")
        .with_status(200)
        .with_body(r#"{"code":-1,"message":"boom"}"#)
        .create_async()
        .await;

    let handler = handler_without_search(server.url(), false);
    let response = handler
        .on_message(&text_message("remember this"))
        .await
        .unwrap();

    assert!(response.reaction.is_none());
    assert_eq!(response.text, "failed to save link: boom");
    assert_eq!(response.chat_id, 42);
}

#[tokio::test]
async fn test_dry_mode_behaves_as_success_without_network() {
    let mut server = mockito::Server::new_async().await;
    let save = server.mock("POST", "/").expect(0).create_async().await;

    let handler = handler_without_search(server.url(), true);
    let response = handler
        .on_message(&text_message("remember this"))
        .await
        .unwrap();

    save.assert_async().await;
    assert_eq!(response.reaction.unwrap().emoji, "👍");
}

#[tokio::test]
async fn test_url_message_saves_resolved_metadata() {
    let mut pages = mockito::Server::new_async().await;
    pages
        .mock("GET", "/article")
        .with_status(200)
        .with_body(
            r#"<html><head>
                <title>Great article</title>
                <meta name="description" content="Worth reading">
                <link rel="canonical" href="https://example.com/article">
            </head></html>"#,
        )
        .create_async()
        .await;

    let mut store = mockito::Server::new_async().await;
    let save = store
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "content": "https://example.com/article",
            "type": "url",
            "title": "Great article",
            "description": "Worth reading",
        })))
        .with_status(200)
        .with_body(r#"{"code":0,"message":"ok"}"#)
        .create_async()
        .await;

    let handler = handler_without_search(store.url(), false);
    let response = handler
        .on_message(&text_message(&format!("{}/article", pages.url())))
        .await
        .unwrap();

    save.assert_async().await;
    assert_eq!(response.reaction.unwrap().emoji, "👍");
}

#[tokio::test]
async fn test_duplicate_reacts_with_eyes_and_skips_save() {
    let mut pages = mockito::Server::new_async().await;
    pages
        .mock("GET", "/article")
        .with_status(200)
        .with_body("<html><head><title>Seen before</title></head></html>")
        .create_async()
        .await;

    let mut search = mockito::Server::new_async().await;
    search
        .mock("GET", "/")
        .match_query(Matcher::UrlEncoded("keyword".into(), "Seen before".into()))
        .with_status(200)
        .with_body(r#"{"data":[{"userSearchEngineID":"1","targetURL":"https://example.com"}]}"#)
        .create_async()
        .await;

    let mut store = mockito::Server::new_async().await;
    let save = store.mock("POST", "/").expect(0).create_async().await;

    let handler = LinkStoreHandler::new(
        LinkStoreClient::new(store.url(), false),
        MetadataResolver::new(),
        Some(SearchClient::new(search.url(), "token".to_string())),
    );
    let response = handler
        .on_message(&text_message(&format!("{}/article", pages.url())))
        .await
        .unwrap();

    save.assert_async().await;
    assert!(response.text.is_empty());
    assert_eq!(response.reaction.unwrap().emoji, "👀");
}

#[tokio::test]
async fn test_metadata_failure_becomes_failure_text() {
    let mut pages = mockito::Server::new_async().await;
    pages
        .mock("GET", "/article")
        .with_status(500)
        .create_async()
        .await;

    let mut store = mockito::Server::new_async().await;
    let save = store.mock("POST", "/").expect(0).create_async().await;

    let handler = handler_without_search(store.url(), false);
    let response = handler
        .on_message(&text_message(&format!("{}/article", pages.url())))
        .await
        .unwrap();

    save.assert_async().await;
    assert!(response.reaction.is_none());
    assert!(response.text.starts_with("failed to save link: "));
}
