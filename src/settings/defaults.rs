//! Default settings values
//!
//! All persisted-document keys and their defaults are defined here.

use serde_json::{json, Map, Value};

/// Persisted document keys
pub const KEY_MAX_HISTORY_SIZE: &str = "max_history_size";
pub const KEY_MAX_IMAGES_SIZE: &str = "max_images_size";
pub const KEY_HISTORY: &str = "history";
pub const KEY_PINNED_HISTORY: &str = "pinned_history";
pub const KEY_IMAGES: &str = "images";
pub const KEY_GLOBAL_HOTKEY: &str = "global_hotkey";
pub const KEY_TABS_DATA: &str = "tabs_data";
pub const KEY_TABS_ORDER: &str = "tabs_order";
pub const KEY_CURRENT_THEME: &str = "current_theme";

/// Default bounds for the text history and image collections
pub const DEFAULT_MAX_HISTORY_SIZE: u64 = 10;
pub const DEFAULT_MAX_IMAGES_SIZE: u64 = 10;

/// Default summon key combo, consumed by the hotkey shim
pub const DEFAULT_GLOBAL_HOTKEY: &str = "Ctrl+Shift+H";

/// Default theme name, consumed by the styling shim
pub const DEFAULT_CURRENT_THEME: &str = "light";

/// Default tab order for the main window
pub const DEFAULT_TABS_ORDER: &[&str] = &["Main", "Images", "Pinned"];

/// Build the all-defaults settings document.
///
/// Saved values are merged over this key-by-key at load time.
pub fn default_document() -> Map<String, Value> {
    let mut document = Map::new();
    document.insert(
        KEY_MAX_HISTORY_SIZE.to_string(),
        json!(DEFAULT_MAX_HISTORY_SIZE),
    );
    document.insert(
        KEY_MAX_IMAGES_SIZE.to_string(),
        json!(DEFAULT_MAX_IMAGES_SIZE),
    );
    document.insert(KEY_HISTORY.to_string(), json!([]));
    document.insert(KEY_PINNED_HISTORY.to_string(), json!([]));
    document.insert(KEY_IMAGES.to_string(), json!([]));
    document.insert(KEY_GLOBAL_HOTKEY.to_string(), json!(DEFAULT_GLOBAL_HOTKEY));
    document.insert(KEY_TABS_DATA.to_string(), json!({}));
    document.insert(KEY_TABS_ORDER.to_string(), json!(DEFAULT_TABS_ORDER));
    document.insert(
        KEY_CURRENT_THEME.to_string(),
        json!(DEFAULT_CURRENT_THEME),
    );
    document
}
