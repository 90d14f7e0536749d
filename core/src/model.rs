//! Domain model.

use crate::types::{PetCreateRequest, PetRecord};

/// A pet tracked by the app. Compared by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pet {
    pub id: i64,
    pub name: String,
    pub kind: String,
    pub age: u32,
}

impl Pet {
    pub fn new(id: i64, name: impl Into<String>, kind: impl Into<String>, age: u32) -> Self {
        Self {
            id,
            name: name.into(),
            kind: kind.into(),
            age,
        }
    }

    /// Request that would recreate this pet on the server under a new id.
    pub fn to_create_request(&self) -> PetCreateRequest {
        PetCreateRequest::new(self.name.clone(), self.kind.clone(), self.age)
    }
}

impl From<PetRecord> for Pet {
    fn from(record: PetRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            kind: record.kind,
            age: record.age,
        }
    }
}
