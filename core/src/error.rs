//! Error types for the resource client.
//!
//! # Design
//! Every failed call collapses into one `Failure` carrying its cause. `NotFound`
//! gets a dedicated variant because callers distinguish "the entity is gone"
//! from "the server rejected the call"; every other non-2xx response lands in
//! `Server` with the raw status and body.

use thiserror::Error;

/// Boxed cause of a transport-level failure.
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by `ResourceClient` parse methods and `ResourceApi` calls.
#[derive(Debug, Error)]
pub enum Failure {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(#[source] TransportError),

    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Server { status: u16, body: String },

    /// The response body could not be decoded into the expected shape.
    #[error("decoding response failed: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request payload could not be encoded as JSON.
    #[error("encoding request failed: {0}")]
    Encode(#[source] serde_json::Error),
}

impl Failure {
    pub fn network(cause: impl Into<TransportError>) -> Self {
        Failure::Network(cause.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Failure::NotFound)
    }
}

/// Errors raised while resolving a `ClientConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid port {value:?} in {var}")]
    InvalidPort {
        var: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("host must not be empty")]
    EmptyHost,
}
