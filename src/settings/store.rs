//! Persistent key-value settings document.
//!
//! The document is loaded once at startup with saved values merged over
//! hard-coded defaults key-by-key. Every accepted `set` updates the
//! in-memory document, notifies subscribers with `(key, value)`, then
//! persists the entire document atomically (write temp + rename). A missing
//! or unparsable file falls back to defaults; persist failures are swallowed
//! and the in-memory document stays authoritative for the session.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::error::{ClipmateError, ResultExt};
use crate::events::{SubscriptionId, Subscribers};

use super::defaults::{self, default_document};

pub struct SettingsStore {
    document: Mutex<Map<String, Value>>,
    path: PathBuf,
    subscribers: Subscribers<(String, Value)>,
}

impl SettingsStore {
    /// Load the settings document from `path`.
    ///
    /// Failure to read or parse is absorbed: the store starts from the
    /// all-defaults document (surfaced only by the document looking like
    /// defaults, plus a warn log).
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut document = default_document();

        match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Map<String, Value>>(&content) {
                Ok(saved) => {
                    let saved_keys = saved.len();
                    // Saved values win key-by-key; unknown keys are preserved
                    for (key, value) in saved {
                        document.insert(key, value);
                    }
                    info!(
                        path = %path.display(),
                        saved_keys,
                        "Loaded settings document"
                    );
                }
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "Settings file unparsable, using defaults"
                    );
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "Settings file not found, using defaults");
            }
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to read settings file, using defaults"
                );
            }
        }

        SettingsStore {
            document: Mutex::new(document),
            path,
            subscribers: Subscribers::new(),
        }
    }

    /// Default settings path (~/.clipmate/settings.json)
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".clipmate").join("settings.json"))
            .unwrap_or_else(|| std::env::temp_dir().join("clipmate-settings.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Register a callback invoked with `(key, value)` after every accepted change.
    pub fn subscribe(
        &self,
        callback: impl Fn(&(String, Value)) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.subscribers.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.document.lock().get(key).cloned()
    }

    pub fn get_or(&self, key: &str, default: Value) -> Value {
        self.get(key).unwrap_or(default)
    }

    /// Set `key` to `value`.
    ///
    /// Unchanged values (deep equality) are a no-op: no write, no
    /// notification. Otherwise the in-memory document is updated,
    /// subscribers are notified, and the whole document is persisted.
    pub fn set(&self, key: &str, value: Value) {
        {
            let mut document = self.document.lock();
            if document.get(key) == Some(&value) {
                debug!(key, "Settings value unchanged, skipping write");
                return;
            }
            document.insert(key.to_string(), value.clone());
        }

        self.subscribers.emit(&(key.to_string(), value));

        // Snapshot after notifying: a subscriber may have performed a nested
        // set (e.g. a bound change truncating a collection) and the disk must
        // end up with the latest document, not this mutation's intermediate.
        let snapshot = self.document.lock().clone();

        // At-most-once-durable: a failed write loses durability for this
        // mutation only, the in-memory document remains the session's truth.
        self.save_document(&snapshot).warn_on_err();
    }

    /// Snapshot of the full in-memory document.
    pub fn document_snapshot(&self) -> Map<String, Value> {
        self.document.lock().clone()
    }

    fn save_document(&self, document: &Map<String, Value>) -> Result<(), ClipmateError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| ClipmateError::SettingsPersist {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(document)?;

        // Atomic write: write to temp file, then rename
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, &json).map_err(|e| ClipmateError::SettingsPersist {
            path: temp_path.display().to_string(),
            source: e,
        })?;
        fs::rename(&temp_path, &self.path).map_err(|e| ClipmateError::SettingsPersist {
            path: self.path.display().to_string(),
            source: e,
        })?;

        debug!(
            path = %self.path.display(),
            bytes = json.len(),
            "Saved settings document"
        );
        Ok(())
    }

    // Typed accessors over the raw document

    pub fn usize_value(&self, key: &str, default: usize) -> usize {
        self.get(key)
            .and_then(|v| v.as_u64())
            .map(|n| n as usize)
            .unwrap_or(default)
    }

    pub fn string_value(&self, key: &str, default: &str) -> String {
        self.get(key)
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_else(|| default.to_string())
    }

    pub fn string_list(&self, key: &str) -> Vec<String> {
        self.get(key)
            .and_then(|v| {
                v.as_array().map(|items| {
                    items
                        .iter()
                        .filter_map(|item| item.as_str().map(str::to_string))
                        .collect()
                })
            })
            .unwrap_or_default()
    }

    pub fn set_string_list(&self, key: &str, items: &[String]) {
        self.set(
            key,
            Value::Array(items.iter().map(|s| Value::String(s.clone())).collect()),
        );
    }

    pub fn max_history_size(&self) -> usize {
        self.usize_value(
            defaults::KEY_MAX_HISTORY_SIZE,
            defaults::DEFAULT_MAX_HISTORY_SIZE as usize,
        )
    }

    pub fn max_images_size(&self) -> usize {
        self.usize_value(
            defaults::KEY_MAX_IMAGES_SIZE,
            defaults::DEFAULT_MAX_IMAGES_SIZE as usize,
        )
    }

    pub fn current_theme(&self) -> String {
        self.string_value(defaults::KEY_CURRENT_THEME, defaults::DEFAULT_CURRENT_THEME)
    }

    pub fn set_theme(&self, name: &str) {
        self.set(defaults::KEY_CURRENT_THEME, Value::String(name.to_string()));
    }

    pub fn global_hotkey(&self) -> String {
        self.string_value(defaults::KEY_GLOBAL_HOTKEY, defaults::DEFAULT_GLOBAL_HOTKEY)
    }

    pub fn set_global_hotkey(&self, combo: &str) {
        self.set(
            defaults::KEY_GLOBAL_HOTKEY,
            Value::String(combo.to_string()),
        );
    }
}
