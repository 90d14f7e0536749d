//! Client-side data layer for the pet book app.
//!
//! # Overview
//! UI intents call into `PetController`, which asks a `PetRepository` for
//! data and publishes the outcome through observable state. The remote
//! repository sits on a `PetApi`, which pairs the stateless `PetClient`
//! (request building and response parsing) with an `HttpExecutor`.
//!
//! # Design
//! - `PetClient` does no I/O, so wire handling is testable without sockets.
//! - Every failure is a value: `HttpOutcome` below the repository,
//!   `RepositoryError` above it, and `error_message` in the controller.
//! - Wire records (`PetRecord`) and the domain `Pet` are separate types.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod http;
pub mod model;
pub mod observable;
pub mod repository;
pub mod transport;
pub mod types;

pub use client::PetClient;
pub use config::ClientConfig;
pub use controller::{PetController, PetState};
pub use error::{ConfigError, RepositoryError, TransportError};
pub use http::{HttpMethod, HttpOutcome, HttpRequest, HttpResponse};
pub use model::Pet;
pub use observable::Observable;
pub use repository::{PetRepository, RemotePetRepository};
pub use transport::{HttpExecutor, HttpPetApi, PetApi, UreqExecutor};
pub use types::{PetCreateRequest, PetRecord};

use std::sync::Arc;

/// Controller talking to a real server over HTTP.
pub type RemotePetController = PetController<RemotePetRepository<HttpPetApi<UreqExecutor>>>;

/// Wire a controller to the server described by `config`.
pub fn remote_controller(config: &ClientConfig) -> RemotePetController {
    let api = HttpPetApi::new(
        PetClient::new(&config.base_url),
        UreqExecutor::new(config.timeout),
    );
    PetController::new(Arc::new(RemotePetRepository::new(api)))
}
