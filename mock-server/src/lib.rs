use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub age: u32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CreatePet {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub age: u32,
}

impl CreatePet {
    pub fn new(name: &str, kind: &str, age: u32) -> Self {
        Self {
            name: name.to_string(),
            kind: kind.to_string(),
            age,
        }
    }
}

/// In-memory pets keyed by id; ids are handed out in increasing order.
#[derive(Debug, Default)]
pub struct PetStore {
    next_id: i64,
    pets: BTreeMap<i64, Pet>,
}

impl PetStore {
    pub fn insert(&mut self, input: CreatePet) -> Pet {
        self.next_id += 1;
        let pet = Pet {
            id: self.next_id,
            name: input.name,
            kind: input.kind,
            age: input.age,
        };
        self.pets.insert(pet.id, pet.clone());
        pet
    }
}

pub type Db = Arc<RwLock<PetStore>>;

/// The pets the app ships with in development.
pub fn sample_pets() -> Vec<CreatePet> {
    vec![
        CreatePet::new("Iron", "Perro", 14),
        CreatePet::new("Michi", "Gato", 2),
        CreatePet::new("Onix", "Perro", 3),
    ]
}

pub fn app() -> Router {
    app_with(Vec::new())
}

/// Router pre-loaded with `pets`, assigned ids 1.. in the given order.
pub fn app_with(pets: Vec<CreatePet>) -> Router {
    let mut store = PetStore::default();
    for pet in pets {
        store.insert(pet);
    }
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/pets", get(list_pets).post(create_pet))
        .route("/pets/{id}", get(get_pet))
        .with_state(db)
}

pub async fn run_with(listener: TcpListener, pets: Vec<CreatePet>) -> Result<(), std::io::Error> {
    serve(listener, app_with(pets)).await
}

pub async fn serve(listener: TcpListener, app: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, app).await
}

async fn list_pets(State(db): State<Db>) -> Json<Vec<Pet>> {
    let store = db.read().await;
    debug!(count = store.pets.len(), "list pets");
    Json(store.pets.values().cloned().collect())
}

async fn create_pet(
    State(db): State<Db>,
    Json(input): Json<CreatePet>,
) -> (StatusCode, Json<Pet>) {
    let pet = db.write().await.insert(input);
    debug!(id = pet.id, "created pet");
    (StatusCode::CREATED, Json(pet))
}

async fn get_pet(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Pet>, StatusCode> {
    let store = db.read().await;
    store.pets.get(&id).cloned().map(Json).ok_or_else(|| {
        debug!(id, "pet not found");
        StatusCode::NOT_FOUND
    })
}
