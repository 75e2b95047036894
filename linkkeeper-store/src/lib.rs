//! # linkkeeper-store
//!
//! Everything between a canonical message and the link-saving backend: the content
//! classifier, the page-metadata resolver, the duplicate-search guard, the store
//! client, and the [`LinkStoreHandler`] that ties them together behind the core
//! `Handler` trait.

pub mod client;
pub mod content;
pub mod handler;
pub mod metadata;
pub mod search;

pub use client::{LinkStoreClient, SavePayload};
pub use content::{classify, Content, ContentKind};
pub use handler::LinkStoreHandler;
pub use metadata::{LinkMetadata, MetadataResolver};
pub use search::SearchClient;
