//! View-state controller for the pet screens.
//!
//! # Design
//! The controller owns four observables and is the only writer. Each
//! operation brackets its repository call with `is_loading = true` before
//! and `is_loading = false` after, and converts failures into
//! `error_message`; nothing is returned to the caller.
//!
//! Operations take `&self` and hold no lock across the network call. Two
//! overlapping operations both run to completion and the last write to a
//! field wins. Likewise `clear_selected_pet` does not cancel an in-flight
//! `get_pet_by_id`, which may repopulate the selection once it resolves.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::RepositoryError;
use crate::model::Pet;
use crate::observable::Observable;
use crate::repository::PetRepository;
use crate::types::PetCreateRequest;

/// Point-in-time copy of everything the UI renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PetState {
    pub pets: Vec<Pet>,
    pub selected_pet: Option<Pet>,
    pub is_loading: bool,
    pub error_message: Option<String>,
}

pub struct PetController<R> {
    repository: Arc<R>,
    pets: Observable<Vec<Pet>>,
    selected_pet: Observable<Option<Pet>>,
    is_loading: Observable<bool>,
    error_message: Observable<Option<String>>,
}

impl<R: PetRepository> PetController<R> {
    /// Build a controller in its initial state. No network call is made
    /// until `initialize` or another operation runs.
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            pets: Observable::new(Vec::new()),
            selected_pet: Observable::new(None),
            is_loading: Observable::new(false),
            error_message: Observable::new(None),
        }
    }

    pub fn pets(&self) -> &Observable<Vec<Pet>> {
        &self.pets
    }

    pub fn selected_pet(&self) -> &Observable<Option<Pet>> {
        &self.selected_pet
    }

    pub fn is_loading(&self) -> &Observable<bool> {
        &self.is_loading
    }

    pub fn error_message(&self) -> &Observable<Option<String>> {
        &self.error_message
    }

    pub fn state(&self) -> PetState {
        PetState {
            pets: self.pets.get(),
            selected_pet: self.selected_pet.get(),
            is_loading: self.is_loading.get(),
            error_message: self.error_message.get(),
        }
    }

    /// First load for a freshly created screen. Call once.
    pub async fn initialize(&self) {
        self.load_pets().await;
    }

    /// Replace `pets` with the server's list. On failure the list is kept.
    pub async fn load_pets(&self) {
        self.begin("load_pets");
        match self.repository.get_pets().await {
            Ok(records) => {
                let pets: Vec<Pet> = records.into_iter().map(Pet::from).collect();
                debug!(count = pets.len(), "pets loaded");
                self.pets.set(pets);
            }
            Err(err) => self.fail("load_pets", &err),
        }
        self.is_loading.set(false);
    }

    /// Fetch one pet into `selected_pet`. On failure the selection is kept.
    pub async fn get_pet_by_id(&self, id: i64) {
        self.begin("get_pet_by_id");
        match self.repository.get_pet_by_id(id).await {
            Ok(record) => self.selected_pet.set(Some(Pet::from(record))),
            Err(err) => self.fail("get_pet_by_id", &err),
        }
        self.is_loading.set(false);
    }

    /// Create a pet, then reload the whole list from the server.
    ///
    /// On success the reload closes the loading bracket, so subscribers see
    /// `true, true, false`.
    ///
    /// Inputs are not validated here: callers must not pass an empty name
    /// or type.
    pub async fn add_pet(&self, name: impl Into<String>, kind: impl Into<String>, age: u32) {
        self.begin("add_pet");
        let request = PetCreateRequest::new(name, kind, age);
        match self.repository.create_pet(request).await {
            Ok(created) => {
                debug!(id = created.id, "pet created, reloading list");
                self.load_pets().await;
            }
            Err(err) => {
                self.fail("add_pet", &err);
                self.is_loading.set(false);
            }
        }
    }

    pub fn clear_error(&self) {
        self.error_message.set(None);
    }

    pub fn clear_selected_pet(&self) {
        self.selected_pet.set(None);
    }

    fn begin(&self, operation: &'static str) {
        debug!(operation, "begin");
        self.is_loading.set(true);
        self.error_message.set(None);
    }

    fn fail(&self, operation: &'static str, err: &RepositoryError) {
        warn!(operation, error = %err, "operation failed");
        self.error_message.set(Some(err.to_string()));
    }
}
