//! Wire records for the pet API.
//!
//! # Design
//! These mirror the JSON the server speaks and nothing more. The domain
//! `Pet` lives in `model` so the UI-facing type is not tied to field names on
//! the wire. The JSON field `type` is a Rust keyword and maps to `kind`.

use serde::{Deserialize, Serialize};

/// A pet as returned by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PetRecord {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub age: u32,
}

/// Request payload for creating a pet. The server assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PetCreateRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub age: u32,
}

impl PetCreateRequest {
    pub fn new(name: impl Into<String>, kind: impl Into<String>, age: u32) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            age,
        }
    }
}
