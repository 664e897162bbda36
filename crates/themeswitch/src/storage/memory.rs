//! In-memory storage.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::StorageLike;

thread_local! {
    static SESSION: MemoryStorage = MemoryStorage::new();
}

/// A key-value map held in memory.
///
/// Clones share the same map, so a test (or the embedding app) can keep a
/// handle on a store it gave to a controller.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the store backing the built-in `session` selection.
    ///
    /// It lives until the thread exits and is shared by every controller on
    /// that thread.
    pub fn session() -> Self {
        SESSION.with(|s| s.clone())
    }

    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl StorageLike for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}
