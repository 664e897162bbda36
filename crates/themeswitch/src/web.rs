//! Browser bindings (feature = "web").
//!
//! [`DocumentRoot`] writes markers to `document.documentElement` and
//! [`WebStorage`] wraps `localStorage` / `sessionStorage`. On `wasm32` the
//! built-in [`StorageChoice::Local`](crate::StorageChoice::Local) and
//! [`StorageChoice::Session`](crate::StorageChoice::Session) selections
//! resolve to these stores.
//!
//! ```rust,ignore
//! use themeswitch::{DocumentRoot, ThemeConfig, ThemeController, ThemeOptions};
//!
//! let options = ThemeOptions::new(["light", "dark"])
//!     .theme("dark", ThemeConfig::new().with_class("dark").with_data_theme("dark"))
//!     .detect_theme(|| prefers_dark().then(|| "dark".to_string()));
//! let root = DocumentRoot::current().expect("no document");
//! let mut controller = ThemeController::new(options, root)?;
//! controller.initialize();
//! ```

use web_sys::{Element, Storage};

use crate::root::RootElement;
use crate::storage::StorageLike;

/// The document's top-level element.
#[derive(Debug, Clone)]
pub struct DocumentRoot {
    element: Element,
}

impl DocumentRoot {
    /// Returns the root of the current document, if there is one.
    pub fn current() -> Option<Self> {
        let element = web_sys::window()?.document()?.document_element()?;
        Some(Self { element })
    }

    /// Wraps an arbitrary element.
    pub fn from_element(element: Element) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &Element {
        &self.element
    }
}

// DOM mutations on a live element can't fail for valid names; errors are dropped.
impl RootElement for DocumentRoot {
    fn add_class(&mut self, class: &str) {
        let _ = self.element.class_list().add_1(class);
    }

    fn remove_class(&mut self, class: &str) {
        let _ = self.element.class_list().remove_1(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.element.class_list().contains(class)
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        let _ = self.element.set_attribute(name, value);
    }

    fn remove_attribute(&mut self, name: &str) {
        let _ = self.element.remove_attribute(name);
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.element.get_attribute(name)
    }
}

/// A browser `Storage` object.
///
/// Browsers may refuse access (private mode, quota, disabled cookies); such
/// failures read as absent and drop writes.
#[derive(Debug, Clone)]
pub struct WebStorage {
    storage: Storage,
}

impl WebStorage {
    /// Returns `window.localStorage`, if available.
    pub fn local() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        Some(Self { storage })
    }

    /// Returns `window.sessionStorage`, if available.
    pub fn session() -> Option<Self> {
        let storage = web_sys::window()?.session_storage().ok()??;
        Some(Self { storage })
    }
}

impl StorageLike for WebStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        if self.storage.set_item(key, value).is_err() {
            log::warn!("failed to persist '{}' to web storage", key);
        }
    }

    fn remove(&mut self, key: &str) {
        let _ = self.storage.remove_item(key);
    }
}
