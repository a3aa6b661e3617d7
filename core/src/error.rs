//! Error types for the books API client.
//!
//! # Design
//! `ApiError` covers everything the core can observe about a response.
//! `TransportError` is what a host reports when no response arrived at all.
//! Neither reaches the user directly: the session folds both into the
//! operation-scoped `ErrorKind` held by the store.

/// Errors returned by `BookClient` build and parse methods.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// No response was received.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// The host could not complete the HTTP round-trip (connect, timeout, read).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("transport failed: {0}")]
pub struct TransportError(pub String);

impl TransportError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}
