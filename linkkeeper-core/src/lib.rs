//! # linkkeeper-core
//!
//! Core types and traits for the link-keeper bot: canonical [`Message`], the [`Handler`]
//! fan-out contract, the outbound [`Bot`] transport trait, the error taxonomy, and
//! tracing initialization. Transport-agnostic; used by linkkeeper-telegram,
//! handler-registry, and linkkeeper-store.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::Bot;
pub use error::{LinkKeeperError, Result};
pub use logger::init_tracing;
pub use types::{Chat, ForwardOrigin, Handler, Message, Reaction, Response, User};
