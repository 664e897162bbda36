//! Durable storage in a JSON file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::StorageLike;

/// Environment variable overriding the directory of the default store.
pub const STORAGE_DIR_ENV: &str = "THEMESWITCH_STORAGE_DIR";

const STORAGE_FILE_NAME: &str = "storage.json";

/// A key-value store persisted as a JSON object in a single file.
///
/// The file is read on every `get` and rewritten on every `set`, so several
/// stores pointing at the same path stay consistent. A missing, unreadable or
/// malformed file reads as empty; a write that fails is logged and dropped.
///
/// # Example
///
/// ```rust,ignore
/// use themeswitch::{FileStorage, StorageLike};
///
/// let mut storage = FileStorage::new("/tmp/app/storage.json");
/// storage.set("theme", "dark");
/// assert_eq!(storage.get("theme").as_deref(), Some("dark"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Creates a store backed by the file at `path`.
    ///
    /// Nothing is touched on disk until the first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the file used by the built-in `local` selection.
    ///
    /// The directory is taken from [`STORAGE_DIR_ENV`] when set, otherwise
    /// it is `themeswitch` under the platform config directory.
    pub fn default_location() -> PathBuf {
        let dir = match std::env::var_os(STORAGE_DIR_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("themeswitch"),
        };
        dir.join(STORAGE_FILE_NAME)
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> BTreeMap<String, String> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => return BTreeMap::new(),
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            log::debug!(
                "ignoring malformed storage file {}: {}",
                self.path.display(),
                e
            );
            BTreeMap::new()
        })
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(entries).map_err(std::io::Error::other)?;
        std::fs::write(&self.path, content)
    }

    fn store(&self, entries: &BTreeMap<String, String>) {
        if let Err(e) = self.write_entries(entries) {
            log::warn!(
                "failed to write storage file {}: {}",
                self.path.display(),
                e
            );
        }
    }
}

impl StorageLike for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.read_entries().remove(key)
    }

    fn set(&mut self, key: &str, value: &str) {
        let mut entries = self.read_entries();
        entries.insert(key.to_string(), value.to_string());
        self.store(&entries);
    }

    fn remove(&mut self, key: &str) {
        let mut entries = self.read_entries();
        if entries.remove(key).is_some() {
            self.store(&entries);
        }
    }
}
