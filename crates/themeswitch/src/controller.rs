//! The theme controller.
//!
//! [`ThemeController`] owns the current theme and keeps three things in step:
//! the observable state, the markers on the root element, and the persisted
//! selection. It starts on the default theme and is brought in line with the
//! stored (or detected) choice by a single call to
//! [`initialize`](ThemeController::initialize), typically right after the
//! view is mounted.
//!
//! # Startup Resolution
//!
//! `initialize` picks the first usable value in this order:
//!
//! 1. The stored selection, if it names an available theme
//! 2. The detection function's result, if it names an available theme
//! 3. The default theme
//!
//! A prior explicit choice always wins over detection.
//!
//! # Example
//!
//! ```rust
//! use themeswitch::{
//!     MemoryRoot, MemoryStorage, RootElement, StorageChoice, StorageLike, ThemeConfig,
//!     ThemeController, ThemeOptions,
//! };
//!
//! let storage = MemoryStorage::new();
//! let options = ThemeOptions::new(["red", "blue"])
//!     .theme("red", ThemeConfig::new().with_class("theme-red"))
//!     .theme("blue", ThemeConfig::new().with_class("theme-blue").with_data_theme("blue"))
//!     .default_theme("blue")
//!     .storage(StorageChoice::custom(storage.clone()));
//!
//! let mut controller = ThemeController::new(options, MemoryRoot::new()).unwrap();
//! controller.initialize();
//!
//! assert_eq!(controller.current(), "blue");
//! assert!(controller.root().has_class("theme-blue"));
//! assert_eq!(controller.root().attribute("data-theme").as_deref(), Some("blue"));
//! assert_eq!(storage.get("theme").as_deref(), Some("blue"));
//!
//! controller.toggle_theme();
//! assert_eq!(controller.current(), "red");
//! assert!(!controller.root().has_class("theme-blue"));
//! ```

use std::collections::HashMap;
use std::fmt;

use crate::error::OptionsError;
use crate::options::{Detector, ThemeConfig, ThemeOptions};
use crate::root::{RootElement, DATA_THEME_ATTRIBUTE};
use crate::state::Observable;
use crate::storage::{self, StorageLike};

/// Switches between a fixed set of named themes.
///
/// Single-threaded: the state handle is `Rc`-based, so the controller is
/// neither `Send` nor `Sync`.
pub struct ThemeController<R: RootElement> {
    available: Vec<String>,
    themes: HashMap<String, ThemeConfig>,
    default_theme: String,
    key: String,
    storage: Option<Box<dyn StorageLike>>,
    detect_theme: Option<Detector>,
    root: R,
    state: Observable<String>,
    initialized: bool,
}

impl<R: RootElement> ThemeController<R> {
    /// Creates a controller writing markers to `root`.
    ///
    /// The state starts on the default theme; nothing is read, written or
    /// applied until [`initialize`](Self::initialize) runs. Duplicate names in
    /// `available` are dropped, keeping the first occurrence.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::EmptyAvailable`] if no themes are available,
    /// or [`OptionsError::UnknownDefault`] if the configured default is not
    /// one of them.
    pub fn new(options: ThemeOptions, root: R) -> Result<Self, OptionsError> {
        let ThemeOptions {
            available,
            themes,
            default_theme,
            key,
            storage,
            detect_theme,
        } = options;

        let mut unique: Vec<String> = Vec::with_capacity(available.len());
        for name in available {
            if !unique.contains(&name) {
                unique.push(name);
            }
        }
        let available = unique;
        let first = available
            .first()
            .cloned()
            .ok_or(OptionsError::EmptyAvailable)?;

        let default_theme = match default_theme {
            Some(name) if available.contains(&name) => name,
            Some(name) => return Err(OptionsError::UnknownDefault { name }),
            None => first,
        };

        Ok(Self {
            available,
            themes,
            state: Observable::new(default_theme.clone()),
            default_theme,
            key,
            storage: storage::resolve(storage),
            detect_theme,
            root,
            initialized: false,
        })
    }

    /// Resolves the startup theme and applies it.
    ///
    /// Unlike [`set_theme`](Self::set_theme), this always writes the markers
    /// and the stored value, even when the resolved theme is the one the
    /// controller started on, so root and storage agree with the state
    /// afterwards. Calling it again re-runs the resolution.
    pub fn initialize(&mut self) {
        let resolved = self.resolve_startup_theme();
        self.commit(&resolved);
        self.initialized = true;
    }

    /// Switches to `name`.
    ///
    /// Names outside the available set are ignored, as is the current theme.
    pub fn set_theme(&mut self, name: &str) {
        if !self.is_available(name) {
            log::debug!("ignoring unknown theme '{}'", name);
            return;
        }
        if self.state.with(|current| current == name) {
            return;
        }
        self.commit(name);
    }

    /// Advances to the next available theme, wrapping after the last one.
    pub fn toggle_theme(&mut self) {
        let current = self.state.get();
        let index = self
            .available
            .iter()
            .position(|name| *name == current)
            .unwrap_or(0);
        let next = self.available[(index + 1) % self.available.len()].clone();
        self.set_theme(&next);
    }

    /// Removes the persisted selection, leaving the current theme applied.
    pub fn forget(&mut self) {
        if let Some(storage) = self.storage.as_mut() {
            storage.remove(&self.key);
        }
    }

    /// Returns the current theme name.
    pub fn current(&self) -> String {
        self.state.get()
    }

    /// Returns the observable current theme, for subscribing to changes.
    pub fn state(&self) -> &Observable<String> {
        &self.state
    }

    /// Returns the available themes in cycle order.
    pub fn available(&self) -> &[String] {
        &self.available
    }

    /// Returns the fallback theme.
    pub fn default_theme(&self) -> &str {
        &self.default_theme
    }

    /// Returns the storage key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the visual markers configured for `name`.
    pub fn theme_config(&self, name: &str) -> Option<&ThemeConfig> {
        self.themes.get(name)
    }

    /// Returns true if a storage backend is configured.
    pub fn has_storage(&self) -> bool {
        self.storage.is_some()
    }

    /// Returns true once [`initialize`](Self::initialize) has run.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn root(&self) -> &R {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut R {
        &mut self.root
    }

    /// Consumes the controller, returning its root.
    pub fn into_root(self) -> R {
        self.root
    }

    fn is_available(&self, name: &str) -> bool {
        self.available.iter().any(|n| n == name)
    }

    fn resolve_startup_theme(&self) -> String {
        let stored = self
            .storage
            .as_ref()
            .and_then(|storage| storage.get(&self.key));
        if let Some(stored) = stored {
            if self.is_available(&stored) {
                log::debug!("restoring stored theme '{}'", stored);
                return stored;
            }
            log::debug!("ignoring stored theme '{}'", stored);
        }

        if let Some(detect) = self.detect_theme.as_ref() {
            match detect() {
                Some(detected) if self.is_available(&detected) => {
                    log::debug!("using detected theme '{}'", detected);
                    return detected;
                }
                Some(detected) => log::debug!("ignoring detected theme '{}'", detected),
                None => {}
            }
        }

        log::debug!("using default theme '{}'", self.default_theme);
        self.default_theme.clone()
    }

    /// Applies markers and persists `name`, then publishes it.
    ///
    /// Subscribers run last, so they observe a root and a store that already
    /// match the new state.
    fn commit(&mut self, name: &str) {
        self.apply_visuals(name);
        if let Some(storage) = self.storage.as_mut() {
            storage.set(&self.key, name);
        }
        self.state.replace(name.to_string());
    }

    fn apply_visuals(&mut self, name: &str) {
        for config in self.themes.values() {
            if let Some(class) = config.class() {
                self.root.remove_class(class);
            }
        }

        let config = self.themes.get(name);
        if let Some(class) = config.and_then(|c| c.class()) {
            self.root.add_class(class);
        }
        match config.and_then(|c| c.data_theme()) {
            Some(value) => self.root.set_attribute(DATA_THEME_ATTRIBUTE, value),
            None => self.root.remove_attribute(DATA_THEME_ATTRIBUTE),
        }
    }
}

impl<R: RootElement + fmt::Debug> fmt::Debug for ThemeController<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeController")
            .field("current", &self.state.get())
            .field("available", &self.available)
            .field("default_theme", &self.default_theme)
            .field("key", &self.key)
            .field("has_storage", &self.storage.is_some())
            .field("initialized", &self.initialized)
            .field("root", &self.root)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::StorageChoice;
    use crate::root::MemoryRoot;
    use crate::storage::MemoryStorage;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn red_blue() -> ThemeOptions {
        ThemeOptions::new(["red", "blue"])
            .theme("red", ThemeConfig::new().with_class("theme-red"))
            .theme(
                "blue",
                ThemeConfig::new()
                    .with_class("theme-blue")
                    .with_data_theme("blue"),
            )
    }

    fn with_storage(options: ThemeOptions) -> (ThemeController<MemoryRoot>, MemoryStorage) {
        let storage = MemoryStorage::new();
        let options = options.storage(StorageChoice::custom(storage.clone()));
        let controller = ThemeController::new(options, MemoryRoot::new()).unwrap();
        (controller, storage)
    }

    // =========================================================================
    // Construction
    // =========================================================================

    #[test]
    fn test_new_defaults_to_first_available() {
        let (controller, _) = with_storage(ThemeOptions::new(["a", "b"]));
        assert_eq!(controller.current(), "a");
        assert_eq!(controller.default_theme(), "a");
        assert_eq!(controller.key(), "theme");
        assert!(!controller.is_initialized());
    }

    #[test]
    fn test_new_uses_configured_default() {
        let (controller, storage) = with_storage(red_blue().default_theme("blue"));
        assert_eq!(controller.current(), "blue");
        // Nothing is applied or stored before initialize.
        assert!(controller.root().attributes().is_empty());
        assert_eq!(controller.root().classes().count(), 0);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_new_rejects_empty_available() {
        let options = ThemeOptions::new(Vec::<String>::new()).storage(StorageChoice::None);
        let result = ThemeController::new(options, MemoryRoot::new());
        assert!(matches!(result, Err(OptionsError::EmptyAvailable)));
    }

    #[test]
    fn test_new_rejects_unknown_default() {
        let options = red_blue()
            .default_theme("green")
            .storage(StorageChoice::None);
        let result = ThemeController::new(options, MemoryRoot::new());
        assert_eq!(
            result.err(),
            Some(OptionsError::UnknownDefault {
                name: "green".to_string()
            })
        );
    }

    #[test]
    fn test_new_drops_duplicate_available() {
        let (controller, _) = with_storage(ThemeOptions::new(["a", "b", "a", "c"]));
        assert_eq!(controller.available(), ["a", "b", "c"]);
    }

    #[test]
    fn test_none_storage_has_no_backend() {
        let options = red_blue().storage(StorageChoice::None);
        let mut controller = ThemeController::new(options, MemoryRoot::new()).unwrap();
        assert!(!controller.has_storage());

        controller.initialize();
        controller.set_theme("blue");
        controller.forget();
        assert_eq!(controller.current(), "blue");
    }

    // =========================================================================
    // set_theme
    // =========================================================================

    #[test]
    fn test_set_theme_updates_state_root_and_storage() {
        let (mut controller, storage) = with_storage(red_blue());
        controller.set_theme("blue");

        assert_eq!(controller.current(), "blue");
        assert!(controller.root().has_class("theme-blue"));
        assert_eq!(
            controller.root().attribute(DATA_THEME_ATTRIBUTE).as_deref(),
            Some("blue")
        );
        assert_eq!(storage.get("theme").as_deref(), Some("blue"));
    }

    #[test]
    fn test_set_theme_unknown_is_ignored() {
        let (mut controller, storage) = with_storage(red_blue());
        controller.initialize();
        let root_before = controller.root().clone();

        controller.set_theme("green");

        assert_eq!(controller.current(), "red");
        assert_eq!(*controller.root(), root_before);
        assert_eq!(storage.get("theme").as_deref(), Some("red"));
    }

    #[test]
    fn test_set_theme_same_value_is_noop() {
        let (mut controller, storage) = with_storage(red_blue());
        let notified = Rc::new(Cell::new(0));
        let counter = Rc::clone(&notified);
        controller
            .state()
            .subscribe(move |_| counter.set(counter.get() + 1));

        // The current theme is "red", so nothing happens at all.
        controller.set_theme("red");
        assert!(storage.is_empty());
        assert_eq!(controller.root().classes().count(), 0);
        assert_eq!(notified.get(), 0);

        controller.set_theme("blue");
        controller.set_theme("blue");
        assert_eq!(notified.get(), 1);
    }

    #[test]
    fn test_theme_without_config_clears_markers() {
        let (mut controller, _) = with_storage(
            ThemeOptions::new(["plain", "dark"]).theme(
                "dark",
                ThemeConfig::new()
                    .with_class("theme-dark")
                    .with_data_theme("dark"),
            ),
        );
        controller.set_theme("dark");
        controller.set_theme("plain");

        assert!(!controller.root().has_class("theme-dark"));
        assert!(controller.root().attribute(DATA_THEME_ATTRIBUTE).is_none());
    }

    #[test]
    fn test_class_without_data_theme_removes_attribute() {
        let (mut controller, _) = with_storage(red_blue());
        controller.set_theme("blue");
        controller.set_theme("red");

        assert!(controller.root().has_class("theme-red"));
        assert!(!controller.root().has_class("theme-blue"));
        assert!(controller.root().attribute(DATA_THEME_ATTRIBUTE).is_none());
    }

    #[test]
    fn test_apply_visuals_sweeps_stale_classes() {
        let root = MemoryRoot::new()
            .with_class("app")
            .with_class("theme-red")
            .with_class("theme-blue");
        let options = red_blue().storage(StorageChoice::None);
        let mut controller = ThemeController::new(options, root).unwrap();

        controller.set_theme("blue");

        assert!(controller.root().has_class("app"));
        assert!(controller.root().has_class("theme-blue"));
        assert!(!controller.root().has_class("theme-red"));
    }

    #[test]
    fn test_subscribers_see_consistent_root() {
        let root = Rc::new(RefCell::new(MemoryRoot::new()));
        let options = red_blue().storage(StorageChoice::None);
        let controller_root = Rc::clone(&root);
        let mut controller = ThemeController::new(options, controller_root).unwrap();

        let observed = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&observed);
        let watched = Rc::clone(&root);
        controller.state().subscribe(move |theme: &String| {
            let has_class = watched.borrow().has_class(&format!("theme-{}", theme));
            sink.borrow_mut().push((theme.clone(), has_class));
        });

        controller.set_theme("blue");
        controller.set_theme("red");

        assert_eq!(
            *observed.borrow(),
            vec![("blue".to_string(), true), ("red".to_string(), true)]
        );
    }

    // =========================================================================
    // toggle_theme
    // =========================================================================

    #[test]
    fn test_toggle_cycles_and_wraps() {
        let (mut controller, _) = with_storage(ThemeOptions::new(["a", "b", "c"]));
        let mut seen = Vec::new();
        for _ in 0..4 {
            controller.toggle_theme();
            seen.push(controller.current());
        }
        assert_eq!(seen, vec!["b", "c", "a", "b"]);
    }

    #[test]
    fn test_toggle_single_theme_is_noop() {
        let (mut controller, storage) = with_storage(ThemeOptions::new(["only"]));
        controller.toggle_theme();
        assert_eq!(controller.current(), "only");
        assert!(storage.is_empty());
    }

    // =========================================================================
    // initialize
    // =========================================================================

    #[test]
    fn test_initialize_scenario_default_applied() {
        let (mut controller, storage) = with_storage(red_blue().default_theme("blue"));
        controller.initialize();

        assert!(controller.is_initialized());
        assert_eq!(controller.current(), "blue");
        assert!(controller.root().has_class("theme-blue"));
        assert_eq!(
            controller.root().attribute(DATA_THEME_ATTRIBUTE).as_deref(),
            Some("blue")
        );
        assert_eq!(storage.get("theme").as_deref(), Some("blue"));
    }

    #[test]
    fn test_initialize_prefers_stored_over_detected() {
        let mut storage = MemoryStorage::new();
        storage.set("theme", "blue");
        let detect_calls = Rc::new(Cell::new(0));
        let calls = Rc::clone(&detect_calls);
        let options = ThemeOptions::new(["red", "blue", "green"])
            .storage(StorageChoice::custom(storage.clone()))
            .detect_theme(move || {
                calls.set(calls.get() + 1);
                Some("green".to_string())
            });
        let mut controller = ThemeController::new(options, MemoryRoot::new()).unwrap();

        controller.initialize();
        assert_eq!(controller.current(), "blue");
        assert_eq!(detect_calls.get(), 0);
    }

    #[test]
    fn test_initialize_uses_detected_when_nothing_stored() {
        let (mut controller, storage) =
            with_storage(red_blue().detect_theme(|| Some("blue".to_string())));
        controller.initialize();
        assert_eq!(controller.current(), "blue");
        assert_eq!(storage.get("theme").as_deref(), Some("blue"));
    }

    #[test]
    fn test_initialize_ignores_invalid_stored_value() {
        let mut storage = MemoryStorage::new();
        storage.set("theme", "purple");
        let options = red_blue()
            .storage(StorageChoice::custom(storage.clone()))
            .detect_theme(|| Some("blue".to_string()));
        let mut controller = ThemeController::new(options, MemoryRoot::new()).unwrap();

        controller.initialize();
        assert_eq!(controller.current(), "blue");
        assert_eq!(storage.get("theme").as_deref(), Some("blue"));
    }

    #[test]
    fn test_initialize_invalid_detection_falls_back_to_default() {
        let (mut controller, _) = with_storage(
            red_blue()
                .default_theme("blue")
                .detect_theme(|| Some("mauve".to_string())),
        );
        controller.initialize();
        assert_eq!(controller.current(), "blue");
    }

    #[test]
    fn test_initialize_detection_returning_nothing() {
        let (mut controller, _) = with_storage(red_blue().detect_theme(|| None));
        controller.initialize();
        assert_eq!(controller.current(), "red");
    }

    #[test]
    fn test_initialize_uses_custom_key() {
        let mut storage = MemoryStorage::new();
        storage.set("theme", "red");
        storage.set("palette", "blue");
        let options = red_blue()
            .key("palette")
            .storage(StorageChoice::custom(storage.clone()));
        let mut controller = ThemeController::new(options, MemoryRoot::new()).unwrap();

        controller.initialize();
        assert_eq!(controller.current(), "blue");
    }

    #[test]
    fn test_initialize_twice_is_stable() {
        let (mut controller, storage) = with_storage(red_blue().detect_theme(|| {
            Some("blue".to_string())
        }));
        controller.initialize();
        controller.set_theme("red");
        controller.initialize();

        // The stored choice from set_theme now outranks detection.
        assert_eq!(controller.current(), "red");
        assert_eq!(storage.get("theme").as_deref(), Some("red"));
    }

    // =========================================================================
    // forget
    // =========================================================================

    #[test]
    fn test_forget_removes_stored_value_only() {
        let (mut controller, storage) = with_storage(red_blue());
        controller.initialize();
        controller.set_theme("blue");

        controller.forget();
        assert!(storage.get("theme").is_none());
        assert_eq!(controller.current(), "blue");
        assert!(controller.root().has_class("theme-blue"));
    }

    #[test]
    fn test_into_root_returns_root() {
        let (mut controller, _) = with_storage(red_blue());
        controller.set_theme("blue");
        let root = controller.into_root();
        assert!(root.has_class("theme-blue"));
    }

    #[test]
    fn test_debug_output() {
        let (controller, _) = with_storage(red_blue());
        let debug = format!("{:?}", controller);
        assert!(debug.contains("current: \"red\""));
        assert!(debug.contains("initialized: false"));
    }
}
