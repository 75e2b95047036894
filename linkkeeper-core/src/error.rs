use thiserror::Error;

#[derive(Error, Debug)]
pub enum LinkKeeperError {
    /// The inbound update stream closed; terminal for the dispatcher loop.
    #[error("update stream closed")]
    StreamClosed,

    /// Outbound delivery (send message / set reaction) failed.
    #[error("transport error: {0}")]
    Transport(String),

    /// Page metadata could not be fetched or parsed.
    #[error("metadata fetch error: {0}")]
    Metadata(String),

    /// Network-level failure while talking to the link-saving backend
    /// (connect, timeout, body read, decode).
    #[error("link store error: {0}")]
    Store(String),

    /// The backend's `{code, message}` envelope reported `code < 0`; carries the
    /// backend message verbatim.
    #[error("{0}")]
    StoreRejected(String),
}

pub type Result<T> = std::result::Result<T, LinkKeeperError>;
