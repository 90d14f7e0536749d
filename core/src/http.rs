//! HTTP transport types for the pet API.
//!
//! # Design
//! Requests and responses are plain owned data. `PetClient` builds
//! `HttpRequest` values and parses `HttpResponse` values without touching the
//! network; an `HttpExecutor` performs the round-trip in between. Keeping the
//! two halves apart lets the parsing rules be tested without sockets.

use crate::error::TransportError;

/// HTTP method for a request. The pet API only reads and creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// An HTTP request described as plain data.
///
/// `path` is the absolute URL, base included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Outcome of a single call against the pet API.
///
/// A transport call either reached the server and got a 2xx (`Success`, with
/// the body absent when the server sent none), reached it and got anything
/// else (`Status`), or never produced a usable response (`Fault`).
#[derive(Debug)]
pub enum HttpOutcome<T> {
    Success(Option<T>),
    Status { code: u16, body: String },
    Fault(TransportError),
}

impl<T> HttpOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, HttpOutcome::Success(_))
    }
}
