//! Repository over the pet API.
//!
//! Turns every `HttpOutcome` into a plain `Result`. Nothing escapes as a
//! panic or an unconverted fault; the repository holds no state of its own.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::RepositoryError;
use crate::http::HttpOutcome;
use crate::transport::PetApi;
use crate::types::{PetCreateRequest, PetRecord};

/// Data source consumed by the controller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PetRepository: Send + Sync {
    /// All pets in server order. A 2xx with no body is an empty list.
    async fn get_pets(&self) -> Result<Vec<PetRecord>, RepositoryError>;

    async fn get_pet_by_id(&self, id: i64) -> Result<PetRecord, RepositoryError>;

    async fn create_pet(&self, request: PetCreateRequest) -> Result<PetRecord, RepositoryError>;
}

/// `PetRepository` backed by a remote `PetApi`.
#[derive(Debug, Clone)]
pub struct RemotePetRepository<A> {
    api: A,
}

impl<A: PetApi> RemotePetRepository<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }
}

#[async_trait]
impl<A: PetApi> PetRepository for RemotePetRepository<A> {
    async fn get_pets(&self) -> Result<Vec<PetRecord>, RepositoryError> {
        match self.api.list_pets().await {
            HttpOutcome::Success(body) => {
                let pets = body.unwrap_or_default();
                debug!(count = pets.len(), "listed pets");
                Ok(pets)
            }
            HttpOutcome::Status { code, .. } => {
                warn!(code, "list pets rejected");
                Err(RepositoryError::Status { code })
            }
            HttpOutcome::Fault(fault) => {
                warn!(error = %fault, "list pets failed");
                Err(fault.into())
            }
        }
    }

    async fn get_pet_by_id(&self, id: i64) -> Result<PetRecord, RepositoryError> {
        match self.api.get_pet(id).await {
            HttpOutcome::Success(Some(pet)) => Ok(pet),
            HttpOutcome::Success(None) => Err(RepositoryError::EmptyBody),
            HttpOutcome::Status { code, .. } => {
                warn!(id, code, "get pet rejected");
                Err(RepositoryError::PetNotFound { id, code })
            }
            HttpOutcome::Fault(fault) => {
                warn!(id, error = %fault, "get pet failed");
                Err(fault.into())
            }
        }
    }

    async fn create_pet(&self, request: PetCreateRequest) -> Result<PetRecord, RepositoryError> {
        match self.api.create_pet(request).await {
            HttpOutcome::Success(Some(pet)) => {
                debug!(id = pet.id, "created pet");
                Ok(pet)
            }
            HttpOutcome::Success(None) => Err(RepositoryError::EmptyBody),
            HttpOutcome::Status { code, .. } => {
                warn!(code, "create pet rejected");
                Err(RepositoryError::Status { code })
            }
            HttpOutcome::Fault(fault) => {
                warn!(error = %fault, "create pet failed");
                Err(fault.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use rstest::rstest;

    use super::*;
    use crate::error::TransportError;
    use crate::transport::MockPetApi;

    fn record(id: i64, name: &str, kind: &str, age: u32) -> PetRecord {
        PetRecord {
            id,
            name: name.to_string(),
            kind: kind.to_string(),
            age,
        }
    }

    fn sample() -> Vec<PetRecord> {
        vec![
            record(1, "Iron", "Perro", 14),
            record(2, "Michi", "Gato", 2),
            record(3, "Onix", "Perro", 3),
        ]
    }

    #[tokio::test]
    async fn get_pets_returns_body_on_success() {
        let mut api = MockPetApi::new();
        api.expect_list_pets()
            .times(1)
            .returning(|| HttpOutcome::Success(Some(sample())));

        let pets = RemotePetRepository::new(api).get_pets().await.unwrap();
        assert_eq!(pets, sample());
    }

    #[tokio::test]
    async fn get_pets_treats_missing_body_as_empty() {
        let mut api = MockPetApi::new();
        api.expect_list_pets().returning(|| HttpOutcome::Success(None));

        let pets = RemotePetRepository::new(api).get_pets().await.unwrap();
        assert!(pets.is_empty());
    }

    #[rstest]
    #[case(400)]
    #[case(500)]
    #[case(503)]
    #[tokio::test]
    async fn get_pets_status_failure_mentions_code(#[case] code: u16) {
        let mut api = MockPetApi::new();
        api.expect_list_pets().returning(move || HttpOutcome::Status {
            code,
            body: "Error".to_string(),
        });

        let err = RemotePetRepository::new(api).get_pets().await.unwrap_err();
        assert_eq!(err, RepositoryError::Status { code });
        assert!(err.to_string().contains(&code.to_string()));
    }

    #[tokio::test]
    async fn get_pets_fault_keeps_message() {
        let mut api = MockPetApi::new();
        api.expect_list_pets()
            .returning(|| HttpOutcome::Fault(TransportError::Network("Network error".to_string())));

        let err = RemotePetRepository::new(api).get_pets().await.unwrap_err();
        assert_eq!(err.to_string(), "Network error");
    }

    #[tokio::test]
    async fn get_pet_by_id_returns_record() {
        let mut api = MockPetApi::new();
        api.expect_get_pet()
            .with(eq(1))
            .times(1)
            .returning(|_| HttpOutcome::Success(Some(record(1, "Iron", "Perro", 14))));

        let pet = RemotePetRepository::new(api).get_pet_by_id(1).await.unwrap();
        assert_eq!(pet, record(1, "Iron", "Perro", 14));
    }

    #[tokio::test]
    async fn get_pet_by_id_not_found() {
        let mut api = MockPetApi::new();
        api.expect_get_pet().with(eq(1)).returning(|_| HttpOutcome::Status {
            code: 404,
            body: "Not found".to_string(),
        });

        let err = RemotePetRepository::new(api).get_pet_by_id(1).await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("404"), "{msg}");
        assert!(msg.contains("not found"), "{msg}");
    }

    #[tokio::test]
    async fn get_pet_by_id_empty_body_is_failure() {
        let mut api = MockPetApi::new();
        api.expect_get_pet().returning(|_| HttpOutcome::Success(None));

        let err = RemotePetRepository::new(api).get_pet_by_id(1).await.unwrap_err();
        assert_eq!(err, RepositoryError::EmptyBody);
    }

    #[tokio::test]
    async fn create_pet_forwards_request_and_returns_record() {
        let request = PetCreateRequest::new("Nueva Mascota", "Perro", 2);
        let mut api = MockPetApi::new();
        api.expect_create_pet()
            .with(eq(request.clone()))
            .times(1)
            .returning(|_| HttpOutcome::Success(Some(record(4, "Nueva Mascota", "Perro", 2))));

        let pet = RemotePetRepository::new(api).create_pet(request).await.unwrap();
        assert_eq!(pet.id, 4);
    }

    #[tokio::test]
    async fn create_pet_status_failure_mentions_code() {
        let mut api = MockPetApi::new();
        api.expect_create_pet().returning(|_| HttpOutcome::Status {
            code: 400,
            body: "Bad request".to_string(),
        });

        let err = RemotePetRepository::new(api)
            .create_pet(PetCreateRequest::new("Nueva Mascota", "Perro", 2))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("400"));
    }

    #[tokio::test]
    async fn create_pet_timeout_is_failure() {
        let mut api = MockPetApi::new();
        api.expect_create_pet().returning(|_| {
            HttpOutcome::Fault(TransportError::Timeout(std::time::Duration::from_secs(10)))
        });

        let err = RemotePetRepository::new(api)
            .create_pet(PetCreateRequest::new("Nueva Mascota", "Perro", 2))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Transport(TransportError::Timeout(_))));
    }
}
