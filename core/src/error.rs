//! Error types for the pet client.
//!
//! # Design
//! `TransportError` covers every way a call can fail before a status code is
//! known. `RepositoryError` is what the repository hands upward: a status it
//! did not like, or the transport fault it caught. A fault's message is kept
//! verbatim so the UI shows what the transport actually said.

use std::time::Duration;

use thiserror::Error;

/// A call that never produced a usable response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Connection refused, DNS failure, reset, and similar I/O faults.
    #[error("{0}")]
    Network(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// A 2xx response whose body is not the expected JSON.
    #[error("malformed response body: {0}")]
    Decode(String),

    /// The request payload could not be serialized to JSON.
    #[error("could not encode request body: {0}")]
    Encode(String),
}

/// Failures surfaced by `PetRepository` operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// The server answered with a non-2xx status.
    #[error("Error: {code}")]
    Status { code: u16 },

    /// A lookup by id answered with a non-2xx status.
    #[error("Error: {code} - pet {id} not found")]
    PetNotFound { id: i64, code: u16 },

    /// The server answered 2xx without the record the call requires.
    #[error("server returned an empty body")]
    EmptyBody,

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Invalid client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("base url must start with http:// or https://, got {0:?}")]
    InvalidBaseUrl(String),

    #[error("timeout must be a positive number of seconds, got {0:?}")]
    InvalidTimeout(String),
}
