//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible representations:
//! `*mut c_char` instead of `String`, pointer + length instead of `Vec`, and
//! a null pointer instead of `None`. Conversion functions live here to keep
//! `lib.rs` focused on the `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use petbook_core::{Pet, PetState, RemotePetController};
use tokio::runtime::Runtime;

/// Opaque handle to a controller and the runtime that drives it. C callers
/// receive a pointer to this and pass it back into every store function.
pub struct FfiPetStore {
    pub(crate) runtime: Runtime,
    pub(crate) controller: RemotePetController,
}

/// Status returned by store operations. Network and server failures are not
/// statuses: they land in the snapshot's `error_message`.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiStatus {
    Ok = 0,
    NullArg = 1,
    InvalidUtf8 = 2,
    Panic = 3,
}

/// A single pet exposed to C.
#[repr(C)]
pub struct FfiPet {
    pub id: i64,
    pub name: *mut c_char,
    pub kind: *mut c_char,
    pub age: u32,
}

impl FfiPet {
    fn from_core(pet: Pet) -> Self {
        FfiPet {
            id: pet.id,
            name: to_c_string(pet.name),
            kind: to_c_string(pet.kind),
            age: pet.age,
        }
    }

    /// Free the C-string fields (but not the struct itself).
    pub(crate) fn free_fields(&self) {
        free_c_string(self.name);
        free_c_string(self.kind);
    }
}

/// Snapshot of the controller state.
///
/// `pets` points to `pets_len` items (null when empty). `selected_pet` and
/// `error_message` are null when absent. Free with `petbook_free_state`.
#[repr(C)]
pub struct FfiPetState {
    pub pets: *mut FfiPet,
    pub pets_len: u32,
    pub selected_pet: *mut FfiPet,
    pub is_loading: bool,
    pub error_message: *mut c_char,
}

impl FfiPetState {
    /// Lists longer than `u32::MAX` are cut so `pets_len` always matches
    /// the allocation.
    pub(crate) fn from_core(mut state: PetState) -> *mut Self {
        let pets_len = u32::try_from(state.pets.len()).unwrap_or(u32::MAX);
        state.pets.truncate(pets_len as usize);
        let pets = if state.pets.is_empty() {
            std::ptr::null_mut()
        } else {
            let items: Box<[FfiPet]> = state.pets.into_iter().map(FfiPet::from_core).collect();
            Box::into_raw(items) as *mut FfiPet
        };
        let selected_pet = match state.selected_pet {
            Some(pet) => Box::into_raw(Box::new(FfiPet::from_core(pet))),
            None => std::ptr::null_mut(),
        };
        let error_message = match state.error_message {
            Some(msg) => to_c_string(msg),
            None => std::ptr::null_mut(),
        };

        Box::into_raw(Box::new(FfiPetState {
            pets,
            pets_len,
            selected_pet,
            is_loading: state.is_loading,
            error_message,
        }))
    }
}

/// Allocate a C string. Interior NUL bytes are dropped rather than failing.
pub(crate) fn to_c_string(s: String) -> *mut c_char {
    let s = if s.contains('\0') { s.replace('\0', "") } else { s };
    CString::new(s).unwrap_or_default().into_raw()
}

pub(crate) fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}
