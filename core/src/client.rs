//! Stateless HTTP request builder and response parser for the pet API.
//!
//! # Design
//! `PetClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method that
//! turns an `HttpResponse` into an `HttpOutcome`. Status interpretation stops
//! at "2xx or not"; deciding what a non-2xx means is the repository's job.

use serde::de::DeserializeOwned;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpOutcome, HttpRequest, HttpResponse};
use crate::types::{PetCreateRequest, PetRecord};

/// Synchronous, stateless client for the pet API.
#[derive(Debug, Clone)]
pub struct PetClient {
    base_url: String,
}

impl PetClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list_pets(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/pets", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_pet(&self, id: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/pets/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_pet(&self, input: &PetCreateRequest) -> Result<HttpRequest, TransportError> {
        let body = serde_json::to_string(input).map_err(|e| TransportError::Encode(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/pets", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn parse_list_pets(&self, response: HttpResponse) -> HttpOutcome<Vec<PetRecord>> {
        parse_outcome(response)
    }

    pub fn parse_get_pet(&self, response: HttpResponse) -> HttpOutcome<PetRecord> {
        parse_outcome(response)
    }

    pub fn parse_create_pet(&self, response: HttpResponse) -> HttpOutcome<PetRecord> {
        parse_outcome(response)
    }
}

/// Decode a 2xx body, or hand back the status for anything else.
fn parse_outcome<T: DeserializeOwned>(response: HttpResponse) -> HttpOutcome<T> {
    if !response.is_success() {
        return HttpOutcome::Status {
            code: response.status,
            body: response.body,
        };
    }
    if response.body.trim().is_empty() {
        return HttpOutcome::Success(None);
    }
    // A JSON `null` body counts as absent.
    match serde_json::from_str::<Option<T>>(&response.body) {
        Ok(value) => HttpOutcome::Success(value),
        Err(e) => HttpOutcome::Fault(TransportError::Decode(e.to_string())),
    }
}
