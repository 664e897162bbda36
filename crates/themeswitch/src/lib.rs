//! # Themeswitch - Named Themes with Persistence
//!
//! `themeswitch` lets an application switch between a fixed set of named
//! themes, remember the choice across sessions and pick an initial theme from
//! the environment.
//!
//! ## Core Concepts
//!
//! - [`ThemeOptions`]: The available themes, their visual markers, the default,
//!   the storage key and backend, and an optional detection function
//! - [`ThemeController`]: Owns the current theme; exposes
//!   [`set_theme`](ThemeController::set_theme),
//!   [`toggle_theme`](ThemeController::toggle_theme) and a run-once
//!   [`initialize`](ThemeController::initialize)
//! - [`RootElement`]: The element receiving the theme's class and
//!   `data-theme` attribute ([`MemoryRoot`] in memory, `DocumentRoot` in a
//!   browser)
//! - [`StorageLike`]: Where the selection is persisted ([`FileStorage`],
//!   [`MemoryStorage`], browser storage, or your own)
//! - [`Observable`]: The current theme as a value you can subscribe to
//!
//! ## Quick Start
//!
//! ```rust
//! use themeswitch::{MemoryRoot, StorageChoice, ThemeConfig, ThemeController, ThemeOptions};
//!
//! let options = ThemeOptions::new(["light", "dark"])
//!     .theme("dark", ThemeConfig::new().with_class("dark").with_data_theme("dark"))
//!     .storage(StorageChoice::Session)
//!     .detect_theme(|| None);
//!
//! let mut controller = ThemeController::new(options, MemoryRoot::new()).unwrap();
//! controller.initialize();
//! controller.toggle_theme();
//! assert_eq!(controller.current(), "dark");
//! ```
//!
//! ## Permissive Behavior
//!
//! Runtime operations never fail. Unknown names passed to `set_theme` are
//! ignored, and stored or detected values that aren't available themes are
//! treated as absent. Only building a controller from invalid options
//! returns an [`OptionsError`].
//!
//! ## Feature Flags
//!
//! - `web`: `DocumentRoot` and `WebStorage` over `web-sys`; on `wasm32`, the
//!   `Local` and `Session` storage selections use the browser stores.

mod controller;
mod error;
mod options;
mod root;
mod state;
mod storage;
#[cfg(feature = "web")]
mod web;

pub use controller::ThemeController;
pub use error::OptionsError;
pub use options::{Detector, StorageChoice, ThemeConfig, ThemeOptions, DEFAULT_STORAGE_KEY};
pub use root::{MemoryRoot, RootElement, DATA_THEME_ATTRIBUTE};
pub use state::{Observable, Subscription};
pub use storage::{FileStorage, MemoryStorage, StorageLike, STORAGE_DIR_ENV};
#[cfg(feature = "web")]
pub use web::{DocumentRoot, WebStorage};
