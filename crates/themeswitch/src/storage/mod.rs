//! Persistence backends for the selected theme.
//!
//! This module provides:
//!
//! - [`StorageLike`]: The key-value contract a backend satisfies
//! - [`MemoryStorage`]: A map living as long as the process (the `session` store)
//! - [`FileStorage`]: A JSON file on disk (the `local` store)
//!
//! On `wasm32` with the `web` feature, the built-in selections bind to the
//! browser's `localStorage` and `sessionStorage` instead.

mod file;
mod memory;

pub use file::{FileStorage, STORAGE_DIR_ENV};
pub use memory::MemoryStorage;

use crate::options::StorageChoice;

/// A key-value store the controller persists the selected theme into.
///
/// Implementations are expected to treat every failure as absence: a value
/// that can't be read is `None`, a write that fails is dropped.
pub trait StorageLike {
    /// Returns the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`.
    fn set(&mut self, key: &str, value: &str);

    /// Removes the value stored under `key`.
    ///
    /// Backends without removal support keep the default, which does nothing.
    fn remove(&mut self, _key: &str) {}
}

impl<S: StorageLike + ?Sized> StorageLike for Box<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) {
        (**self).remove(key)
    }
}

/// Turns a storage selection into a backend, or `None` when persistence is off.
pub(crate) fn resolve(choice: StorageChoice) -> Option<Box<dyn StorageLike>> {
    match choice {
        StorageChoice::Local => local_backend(),
        StorageChoice::Session => session_backend(),
        StorageChoice::None => None,
        StorageChoice::Custom(storage) => Some(storage),
    }
}

#[cfg(not(all(feature = "web", target_arch = "wasm32")))]
fn local_backend() -> Option<Box<dyn StorageLike>> {
    Some(Box::new(FileStorage::new(FileStorage::default_location())))
}

#[cfg(not(all(feature = "web", target_arch = "wasm32")))]
fn session_backend() -> Option<Box<dyn StorageLike>> {
    Some(Box::new(MemoryStorage::session()))
}

#[cfg(all(feature = "web", target_arch = "wasm32"))]
fn local_backend() -> Option<Box<dyn StorageLike>> {
    crate::web::WebStorage::local().map(|s| Box::new(s) as Box<dyn StorageLike>)
}

#[cfg(all(feature = "web", target_arch = "wasm32"))]
fn session_backend() -> Option<Box<dyn StorageLike>> {
    crate::web::WebStorage::session().map(|s| Box::new(s) as Box<dyn StorageLike>)
}
