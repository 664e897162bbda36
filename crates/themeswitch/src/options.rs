//! Construction-time configuration for a theme controller.
//!
//! Options can be built in code with a fluent API or loaded from YAML/JSON.
//!
//! ## Programmatic
//!
//! ```rust
//! use themeswitch::{StorageChoice, ThemeConfig, ThemeOptions};
//!
//! let options = ThemeOptions::new(["light", "dark", "sepia"])
//!     .theme("dark", ThemeConfig::new().with_class("theme-dark").with_data_theme("dark"))
//!     .theme("sepia", ThemeConfig::new().with_class("theme-sepia"))
//!     .default_theme("dark")
//!     .key("app-theme")
//!     .storage(StorageChoice::Session)
//!     .detect_theme(|| Some("light".to_string()));
//! ```
//!
//! ## From YAML
//!
//! ```rust
//! use themeswitch::ThemeOptions;
//!
//! let options = ThemeOptions::from_yaml(r#"
//! available: [red, blue]
//! defaultTheme: blue
//! storage: none
//! themes:
//!   red:
//!     class: theme-red
//!   blue:
//!     class: theme-blue
//!     dataTheme: blue
//! "#).unwrap();
//! assert_eq!(options.available(), ["red", "blue"]);
//! ```
//!
//! A detection function and custom storage backends can't be expressed in a
//! document; add them with the builder methods after loading.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::OptionsError;
use crate::storage::StorageLike;

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "theme";

/// Caller-supplied policy producing an initial theme guess.
pub type Detector = Box<dyn Fn() -> Option<String>>;

/// Visual markers applied to the root element for one theme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    class: Option<String>,
    #[serde(
        default,
        rename = "dataTheme",
        alias = "data_theme",
        skip_serializing_if = "Option::is_none"
    )]
    data_theme: Option<String>,
}

impl ThemeConfig {
    /// Creates a config with no markers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the class added to the root while the theme is active.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Sets the `data-theme` attribute value used while the theme is active.
    pub fn with_data_theme(mut self, value: impl Into<String>) -> Self {
        self.data_theme = Some(value.into());
        self
    }

    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    pub fn data_theme(&self) -> Option<&str> {
        self.data_theme.as_deref()
    }
}

/// Where the selected theme is persisted.
#[derive(Default)]
pub enum StorageChoice {
    /// The host's durable store: browser `localStorage` under the `web`
    /// feature on wasm, a JSON file in the config directory elsewhere.
    #[default]
    Local,
    /// The host's session store: browser `sessionStorage` under the `web`
    /// feature on wasm, a per-thread in-memory map elsewhere.
    Session,
    /// No persistence; reads find nothing and writes are skipped.
    None,
    /// A caller-supplied backend, used as is.
    Custom(Box<dyn StorageLike>),
}

impl StorageChoice {
    /// Wraps a custom backend.
    pub fn custom(storage: impl StorageLike + 'static) -> Self {
        StorageChoice::Custom(Box::new(storage))
    }
}

impl fmt::Debug for StorageChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageChoice::Local => write!(f, "Local"),
            StorageChoice::Session => write!(f, "Session"),
            StorageChoice::None => write!(f, "None"),
            StorageChoice::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// Storage selections that can be named in an options document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum StorageName {
    Local,
    Session,
    None,
}

impl From<StorageName> for StorageChoice {
    fn from(name: StorageName) -> Self {
        match name {
            StorageName::Local => StorageChoice::Local,
            StorageName::Session => StorageChoice::Session,
            StorageName::None => StorageChoice::None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct OptionsDocument {
    available: Vec<String>,
    #[serde(default)]
    themes: HashMap<String, ThemeConfig>,
    #[serde(default, alias = "default_theme")]
    default_theme: Option<String>,
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    storage: Option<StorageName>,
}

/// Configuration consumed by [`ThemeController::new`](crate::ThemeController::new).
///
/// `available` is the ordered set of legal theme names; it also fixes the
/// cycle order of `toggle_theme`. Everything else is optional:
///
/// | Option | Default |
/// |--------|---------|
/// | `themes` | no markers for any theme |
/// | `default_theme` | first available theme |
/// | `key` | `"theme"` |
/// | `storage` | [`StorageChoice::Local`] |
/// | `detect_theme` | none |
pub struct ThemeOptions {
    pub(crate) available: Vec<String>,
    pub(crate) themes: HashMap<String, ThemeConfig>,
    pub(crate) default_theme: Option<String>,
    pub(crate) key: String,
    pub(crate) storage: StorageChoice,
    pub(crate) detect_theme: Option<Detector>,
}

impl ThemeOptions {
    /// Creates options for the given available themes, in cycle order.
    pub fn new<I, S>(available: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            available: available.into_iter().map(Into::into).collect(),
            themes: HashMap::new(),
            default_theme: None,
            key: DEFAULT_STORAGE_KEY.to_string(),
            storage: StorageChoice::default(),
            detect_theme: None,
        }
    }

    /// Attaches visual markers to a theme, replacing any previous config.
    pub fn theme(mut self, name: impl Into<String>, config: ThemeConfig) -> Self {
        self.themes.insert(name.into(), config);
        self
    }

    /// Sets the fallback theme used when nothing stored or detected is valid.
    pub fn default_theme(mut self, name: impl Into<String>) -> Self {
        self.default_theme = Some(name.into());
        self
    }

    /// Sets the key the selection is stored under.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Selects the persistence backend.
    pub fn storage(mut self, storage: StorageChoice) -> Self {
        self.storage = storage;
        self
    }

    /// Sets the detection function consulted when nothing valid is stored.
    pub fn detect_theme<F>(mut self, detect: F) -> Self
    where
        F: Fn() -> Option<String> + 'static,
    {
        self.detect_theme = Some(Box::new(detect));
        self
    }

    /// Parses options from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::Parse`] if the document is malformed or has
    /// unknown fields.
    pub fn from_yaml(yaml: &str) -> Result<Self, OptionsError> {
        let doc: OptionsDocument = serde_yaml::from_str(yaml).map_err(|e| OptionsError::Parse {
            format: "yaml",
            message: e.to_string(),
        })?;
        Ok(Self::from_document(doc))
    }

    /// Parses options from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::Parse`] if the document is malformed or has
    /// unknown fields.
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        let doc: OptionsDocument = serde_json::from_str(json).map_err(|e| OptionsError::Parse {
            format: "json",
            message: e.to_string(),
        })?;
        Ok(Self::from_document(doc))
    }

    /// Loads options from a file; `.json` files are parsed as JSON, anything
    /// else as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::Load`] if the file can't be read, or
    /// [`OptionsError::Parse`] if its content is invalid.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, OptionsError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| OptionsError::Load {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        }
    }

    fn from_document(doc: OptionsDocument) -> Self {
        Self {
            available: doc.available,
            themes: doc.themes,
            default_theme: doc.default_theme,
            key: doc.key.unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string()),
            storage: doc.storage.map(Into::into).unwrap_or_default(),
            detect_theme: None,
        }
    }

    /// Returns the available themes in cycle order.
    pub fn available(&self) -> &[String] {
        &self.available
    }

    /// Returns the configured visual markers.
    pub fn themes(&self) -> &HashMap<String, ThemeConfig> {
        &self.themes
    }

    /// Returns the storage key.
    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// Returns the storage selection.
    pub fn storage_choice(&self) -> &StorageChoice {
        &self.storage
    }
}

impl fmt::Debug for ThemeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeOptions")
            .field("available", &self.available)
            .field("themes", &self.themes)
            .field("default_theme", &self.default_theme)
            .field("key", &self.key)
            .field("storage", &self.storage)
            .field("detect_theme", &self.detect_theme.is_some())
            .finish()
    }
}
