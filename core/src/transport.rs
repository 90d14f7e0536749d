//! Network side of the pet client.
//!
//! `HttpExecutor` performs one HTTP round-trip for a plain-data request.
//! `PetApi` is the three-call contract the repository consumes, and
//! `HttpPetApi` implements it by pairing `PetClient` with an executor.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::client::PetClient;
use crate::error::TransportError;
use crate::http::{HttpMethod, HttpOutcome, HttpRequest, HttpResponse};
use crate::types::{PetCreateRequest, PetRecord};

/// Executes a single HTTP request. No retries.
///
/// Non-2xx responses are data, not errors: only failures to obtain a
/// response at all come back as `Err`.
#[async_trait]
pub trait HttpExecutor: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// The pet API as seen by the repository.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PetApi: Send + Sync {
    async fn list_pets(&self) -> HttpOutcome<Vec<PetRecord>>;

    async fn get_pet(&self, id: i64) -> HttpOutcome<PetRecord>;

    async fn create_pet(&self, request: PetCreateRequest) -> HttpOutcome<PetRecord>;
}

/// `HttpExecutor` backed by a blocking `ureq` agent.
///
/// Each call runs on the tokio blocking pool so the awaiting task only
/// suspends.
#[derive(Debug, Clone)]
pub struct UreqExecutor {
    agent: ureq::Agent,
    timeout: Duration,
}

impl UreqExecutor {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent, timeout }
    }
}

#[async_trait]
impl HttpExecutor for UreqExecutor {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let agent = self.agent.clone();
        let timeout = self.timeout;
        tokio::task::spawn_blocking(move || execute_blocking(&agent, timeout, request))
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?
    }
}

fn execute_blocking(
    agent: &ureq::Agent,
    timeout: Duration,
    request: HttpRequest,
) -> Result<HttpResponse, TransportError> {
    let result = match (request.method, request.body) {
        (HttpMethod::Get, _) => {
            let mut builder = agent.get(&request.path);
            for (key, value) in &request.headers {
                builder = builder.header(key.as_str(), value.as_str());
            }
            builder.call()
        }
        (HttpMethod::Post, body) => {
            let mut builder = agent.post(&request.path);
            for (key, value) in &request.headers {
                builder = builder.header(key.as_str(), value.as_str());
            }
            match body {
                Some(body) => builder.send(body.as_bytes()),
                None => builder.send_empty(),
            }
        }
    };

    let mut response = result.map_err(|e| map_ureq_error(e, timeout))?;
    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| map_ureq_error(e, timeout))?;

    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}

fn map_ureq_error(err: ureq::Error, timeout: Duration) -> TransportError {
    match err {
        ureq::Error::Timeout(_) => TransportError::Timeout(timeout),
        other => TransportError::Network(other.to_string()),
    }
}

/// `PetApi` over HTTP: build, execute, parse.
#[derive(Debug, Clone)]
pub struct HttpPetApi<E> {
    client: PetClient,
    executor: E,
}

impl<E: HttpExecutor> HttpPetApi<E> {
    pub fn new(client: PetClient, executor: E) -> Self {
        Self { client, executor }
    }
}

#[async_trait]
impl<E: HttpExecutor> PetApi for HttpPetApi<E> {
    async fn list_pets(&self) -> HttpOutcome<Vec<PetRecord>> {
        let request = self.client.build_list_pets();
        debug!(path = %request.path, "GET pets");
        match self.executor.execute(request).await {
            Ok(response) => self.client.parse_list_pets(response),
            Err(fault) => HttpOutcome::Fault(fault),
        }
    }

    async fn get_pet(&self, id: i64) -> HttpOutcome<PetRecord> {
        let request = self.client.build_get_pet(id);
        debug!(path = %request.path, "GET pet");
        match self.executor.execute(request).await {
            Ok(response) => self.client.parse_get_pet(response),
            Err(fault) => HttpOutcome::Fault(fault),
        }
    }

    async fn create_pet(&self, request: PetCreateRequest) -> HttpOutcome<PetRecord> {
        let request = match self.client.build_create_pet(&request) {
            Ok(request) => request,
            Err(fault) => return HttpOutcome::Fault(fault),
        };
        debug!(path = %request.path, "POST pet");
        match self.executor.execute(request).await {
            Ok(response) => self.client.parse_create_pet(response),
            Err(fault) => HttpOutcome::Fault(fault),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Replies with canned responses and records what it was asked to send.
    struct CannedExecutor {
        reply: Result<HttpResponse, TransportError>,
        sent: Mutex<Vec<HttpRequest>>,
    }

    impl CannedExecutor {
        fn new(reply: Result<HttpResponse, TransportError>) -> Self {
            Self {
                reply,
                sent: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl HttpExecutor for CannedExecutor {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.sent.lock().unwrap().push(request);
            self.reply.clone()
        }
    }

    fn ok(status: u16, body: &str) -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        })
    }

    fn api(reply: Result<HttpResponse, TransportError>) -> HttpPetApi<CannedExecutor> {
        HttpPetApi::new(PetClient::new("http://pets.test"), CannedExecutor::new(reply))
    }

    #[tokio::test]
    async fn list_pets_sends_get_and_decodes() {
        let api = api(ok(200, r#"[{"id":1,"name":"Iron","type":"Perro","age":14}]"#));
        let outcome = api.list_pets().await;
        assert!(matches!(outcome, HttpOutcome::Success(Some(ref pets)) if pets.len() == 1));

        let sent = api.executor.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, HttpMethod::Get);
        assert_eq!(sent[0].path, "http://pets.test/pets");
    }

    #[tokio::test]
    async fn get_pet_passes_status_through() {
        let api = api(ok(404, ""));
        let outcome = api.get_pet(9).await;
        assert!(matches!(outcome, HttpOutcome::Status { code: 404, .. }));
        assert_eq!(api.executor.sent.lock().unwrap()[0].path, "http://pets.test/pets/9");
    }

    #[tokio::test]
    async fn create_pet_posts_json_body() {
        let api = api(ok(201, r#"{"id":4,"name":"Nueva","type":"Perro","age":1}"#));
        let outcome = api.create_pet(PetCreateRequest::new("Nueva", "Perro", 1)).await;
        assert!(outcome.is_success());

        let sent = api.executor.sent.lock().unwrap();
        assert_eq!(sent[0].method, HttpMethod::Post);
        let body: serde_json::Value = serde_json::from_str(sent[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"name": "Nueva", "type": "Perro", "age": 1}));
    }

    #[tokio::test]
    async fn executor_fault_becomes_fault_outcome() {
        let api = api(Err(TransportError::Network("connection refused".to_string())));
        let outcome = api.list_pets().await;
        assert!(matches!(
            outcome,
            HttpOutcome::Fault(TransportError::Network(ref msg)) if msg == "connection refused"
        ));
    }

    #[tokio::test]
    async fn ureq_executor_reports_unreachable_host() {
        let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = std_listener.local_addr().unwrap();
        drop(std_listener);

        let executor = UreqExecutor::new(Duration::from_secs(2));
        let result = executor
            .execute(PetClient::new(&format!("http://{addr}")).build_list_pets())
            .await;
        assert!(result.is_err());
    }
}
