//! Settings module - persisted key-value document and defaults
//!
//! This module provides:
//! - Hard-coded default values for every persisted key
//! - A file-backed document store with change notifications
//!
//! # Module Structure
//!
//! - `defaults` - Document keys and default values
//! - `store` - Load/save and the `set`-persists-immediately contract

mod defaults;
mod store;

pub use defaults::{
    default_document, DEFAULT_CURRENT_THEME, DEFAULT_GLOBAL_HOTKEY, DEFAULT_MAX_HISTORY_SIZE,
    DEFAULT_MAX_IMAGES_SIZE, DEFAULT_TABS_ORDER, KEY_CURRENT_THEME, KEY_GLOBAL_HOTKEY,
    KEY_HISTORY, KEY_IMAGES, KEY_MAX_HISTORY_SIZE, KEY_MAX_IMAGES_SIZE, KEY_PINNED_HISTORY,
    KEY_TABS_DATA, KEY_TABS_ORDER,
};
pub use store::SettingsStore;

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
