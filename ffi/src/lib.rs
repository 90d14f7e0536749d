//! C-ABI wrapper around the `petbook-core` controller.
//!
//! # Overview
//! Lets a native UI (Kotlin, Swift, ...) drive the pet screens through plain
//! `extern "C"` calls: create a store, run operations, and read state
//! snapshots to render.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - The store owns a tokio runtime. Operations block the calling thread
//!   until the network call finishes, so hosts call them off the UI thread.
//!   Several threads may call into one store at once; the last write to a
//!   state field wins.
//! - State is read through `petbook_store_snapshot`, an owned copy the
//!   caller releases with `petbook_free_state`.

pub mod types;

use std::ffi::CStr;
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Duration;

use petbook_core::{remote_controller, ClientConfig};
use tracing_subscriber::{fmt, EnvFilter};

use types::*;

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Install a `tracing` subscriber writing to stderr, filtered by `RUST_LOG`.
///
/// Returns false if a subscriber was already installed.
#[unsafe(no_mangle)]
pub extern "C" fn petbook_init_logging() -> bool {
    catch_unwind(|| {
        fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init()
            .is_ok()
    })
    .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Store lifecycle
// ---------------------------------------------------------------------------

fn new_store(config: ClientConfig) -> *mut FfiPetStore {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("petbook")
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!(error = %e, "could not start runtime");
            return std::ptr::null_mut();
        }
    };
    let controller = remote_controller(&config);
    Box::into_raw(Box::new(FfiPetStore { runtime, controller }))
}

/// Create a store talking to `base_url`.
///
/// `timeout_ms` bounds each request; 0 selects the default. Returns null if
/// `base_url` is null, not UTF-8, or not an http(s) URL. The caller must free
/// the returned pointer with `petbook_store_free`.
#[unsafe(no_mangle)]
pub extern "C" fn petbook_store_new(base_url: *const c_char, timeout_ms: u64) -> *mut FfiPetStore {
    catch_unwind(|| {
        if base_url.is_null() {
            return std::ptr::null_mut();
        }
        let Ok(url) = unsafe { CStr::from_ptr(base_url) }.to_str() else {
            return std::ptr::null_mut();
        };
        let timeout = if timeout_ms == 0 {
            petbook_core::config::DEFAULT_TIMEOUT
        } else {
            Duration::from_millis(timeout_ms)
        };
        match ClientConfig::new(url, timeout) {
            Ok(config) => new_store(config),
            Err(e) => {
                tracing::warn!(error = %e, "rejected store config");
                std::ptr::null_mut()
            }
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Create a store configured from `PETBOOK_BASE_URL` and
/// `PETBOOK_TIMEOUT_SECS`. Returns null if either is invalid.
#[unsafe(no_mangle)]
pub extern "C" fn petbook_store_new_from_env() -> *mut FfiPetStore {
    catch_unwind(|| match ClientConfig::from_env() {
        Ok(config) => new_store(config),
        Err(e) => {
            tracing::warn!(error = %e, "rejected store config");
            std::ptr::null_mut()
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a store created by `petbook_store_new*`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn petbook_store_free(store: *mut FfiPetStore) {
    if !store.is_null() {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            drop(unsafe { Box::from_raw(store) });
        }));
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Run `op` against a non-null store, converting panics into `Panic`.
fn with_store<F>(store: *const FfiPetStore, op: F) -> FfiStatus
where
    F: FnOnce(&FfiPetStore) -> FfiStatus,
{
    if store.is_null() {
        return FfiStatus::NullArg;
    }
    let store = unsafe { &*store };
    catch_unwind(AssertUnwindSafe(|| op(store))).unwrap_or(FfiStatus::Panic)
}

/// Load the pet list. Call once when the list screen is first shown.
#[unsafe(no_mangle)]
pub extern "C" fn petbook_store_initialize(store: *const FfiPetStore) -> FfiStatus {
    with_store(store, |s| {
        s.runtime.block_on(s.controller.initialize());
        FfiStatus::Ok
    })
}

/// Reload the pet list from the server.
#[unsafe(no_mangle)]
pub extern "C" fn petbook_store_load_pets(store: *const FfiPetStore) -> FfiStatus {
    with_store(store, |s| {
        s.runtime.block_on(s.controller.load_pets());
        FfiStatus::Ok
    })
}

/// Fetch one pet into the snapshot's `selected_pet`.
#[unsafe(no_mangle)]
pub extern "C" fn petbook_store_get_pet(store: *const FfiPetStore, id: i64) -> FfiStatus {
    with_store(store, |s| {
        s.runtime.block_on(s.controller.get_pet_by_id(id));
        FfiStatus::Ok
    })
}

/// Create a pet, then reload the list. `name` and `kind` must be non-empty
/// UTF-8; the caller validates them before calling.
#[unsafe(no_mangle)]
pub extern "C" fn petbook_store_add_pet(
    store: *const FfiPetStore,
    name: *const c_char,
    kind: *const c_char,
    age: u32,
) -> FfiStatus {
    if name.is_null() || kind.is_null() {
        return FfiStatus::NullArg;
    }
    with_store(store, |s| {
        let name = unsafe { CStr::from_ptr(name) }.to_str();
        let kind = unsafe { CStr::from_ptr(kind) }.to_str();
        let (Ok(name), Ok(kind)) = (name, kind) else {
            return FfiStatus::InvalidUtf8;
        };
        s.runtime.block_on(s.controller.add_pet(name, kind, age));
        FfiStatus::Ok
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn petbook_store_clear_error(store: *const FfiPetStore) -> FfiStatus {
    with_store(store, |s| {
        s.controller.clear_error();
        FfiStatus::Ok
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn petbook_store_clear_selected_pet(store: *const FfiPetStore) -> FfiStatus {
    with_store(store, |s| {
        s.controller.clear_selected_pet();
        FfiStatus::Ok
    })
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Copy the current state. Returns null if `store` is null.
/// The caller must free the returned pointer with `petbook_free_state`.
#[unsafe(no_mangle)]
pub extern "C" fn petbook_store_snapshot(store: *const FfiPetStore) -> *mut FfiPetState {
    if store.is_null() {
        return std::ptr::null_mut();
    }
    let store = unsafe { &*store };
    catch_unwind(AssertUnwindSafe(|| FfiPetState::from_core(store.controller.state())))
        .unwrap_or(std::ptr::null_mut())
}

/// Free a snapshot returned by `petbook_store_snapshot`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn petbook_free_state(state: *mut FfiPetState) {
    if state.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let state = unsafe { Box::from_raw(state) };
        if !state.pets.is_null() && state.pets_len > 0 {
            let pets = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    state.pets,
                    state.pets_len as usize,
                ))
            };
            for pet in pets.iter() {
                pet.free_fields();
            }
        }
        if !state.selected_pet.is_null() {
            let pet = unsafe { Box::from_raw(state.selected_pet) };
            pet.free_fields();
        }
        free_c_string(state.error_message);
    });
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
