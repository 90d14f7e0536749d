//! End-to-end runs of the controller against the live mock server.
//!
//! # Design
//! Each test binds the mock server to a random port, then drives a
//! `remote_controller` over real HTTP through the ureq executor. This checks
//! that the wire format, repository mapping and controller state agree with
//! an actual server.

use std::time::Duration;

use mock_server::{sample_pets, CreatePet};
use petbook_core::{remote_controller, ClientConfig, Pet, PetState};

/// Start the mock server on a random port and return its base URL.
async fn start_server(pets: Vec<CreatePet>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run_with(listener, pets));
    format!("http://{addr}")
}

fn config(base_url: &str) -> ClientConfig {
    ClientConfig::new(base_url, Duration::from_secs(5)).unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn full_session() {
    let base_url = start_server(sample_pets()).await;
    let controller = remote_controller(&config(&base_url));

    // Step 1: nothing happens until initialize.
    assert_eq!(controller.state(), PetState::default());

    // Step 2: initialize loads the seeded pets in server order.
    controller.initialize().await;
    assert_eq!(
        controller.pets().get(),
        vec![
            Pet::new(1, "Iron", "Perro", 14),
            Pet::new(2, "Michi", "Gato", 2),
            Pet::new(3, "Onix", "Perro", 3),
        ]
    );
    assert!(!controller.is_loading().get());
    assert!(controller.error_message().get().is_none());

    // Step 3: select one pet.
    controller.get_pet_by_id(2).await;
    assert_eq!(controller.selected_pet().get(), Some(Pet::new(2, "Michi", "Gato", 2)));

    // Step 4: add a pet; the list is re-fetched with the server-assigned id.
    controller.add_pet("Luna", "Gato", 5).await;
    let pets = controller.pets().get();
    assert_eq!(pets.len(), 4);
    assert_eq!(pets[3], Pet::new(4, "Luna", "Gato", 5));

    // Step 5: an unknown id fails without touching the selection.
    controller.get_pet_by_id(99).await;
    assert_eq!(controller.selected_pet().get().map(|p| p.id), Some(2));
    let msg = controller.error_message().get().expect("error message");
    assert!(msg.contains("404"), "{msg}");
    assert!(msg.contains("not found"), "{msg}");

    // Step 6: the UI dismisses the error and leaves the detail screen.
    controller.clear_error();
    controller.clear_selected_pet();
    let state = controller.state();
    assert!(state.error_message.is_none());
    assert!(state.selected_pet.is_none());
    assert_eq!(state.pets.len(), 4);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn get_pet_by_id_404_leaves_selection_absent() {
    let base_url = start_server(Vec::new()).await;
    let controller = remote_controller(&config(&base_url));

    controller.get_pet_by_id(1).await;

    assert!(controller.selected_pet().get().is_none());
    let msg = controller.error_message().get().expect("error message");
    assert!(msg.contains("404"), "{msg}");
    assert!(msg.contains("not found"), "{msg}");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unreachable_server_sets_error_and_keeps_list() {
    // Bind then drop to get a port nobody listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let controller = remote_controller(&config(&format!("http://{addr}")));

    controller.initialize().await;

    let state = controller.state();
    assert!(state.pets.is_empty());
    assert!(!state.is_loading);
    assert!(state.error_message.is_some());
}
