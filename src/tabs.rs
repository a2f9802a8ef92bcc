//! Editable tab data
//!
//! Tab contents and ordering live in the settings document (`tabs_data`,
//! `tabs_order`). The window shim renders tabs; this module owns the data
//! operations so the UI never touches the document shape directly.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::debug;

use crate::settings::{self, SettingsStore};

pub struct TabManager {
    settings: Arc<SettingsStore>,
}

impl TabManager {
    pub fn new(settings: Arc<SettingsStore>) -> Self {
        TabManager { settings }
    }

    /// Saved content of a custom tab, if any.
    pub fn tab_content(&self, name: &str) -> Option<String> {
        self.tabs_data()
            .get(name)
            .and_then(|value| value.as_str().map(str::to_string))
    }

    /// Write a custom tab's content.
    pub fn set_tab_content(&self, name: &str, content: &str) {
        if name.is_empty() {
            return;
        }
        let mut data = self.tabs_data();
        data.insert(name.to_string(), Value::String(content.to_string()));
        self.settings.set(settings::KEY_TABS_DATA, Value::Object(data));
    }

    /// Move a tab's saved content to a new name and update the order.
    ///
    /// Refused (returns false) when either name is empty, the names are
    /// equal, or the target name is already taken.
    pub fn rename_tab(&self, old_name: &str, new_name: &str) -> bool {
        if old_name.is_empty() || new_name.is_empty() || old_name == new_name {
            return false;
        }

        let mut data = self.tabs_data();
        let order = self.tab_order();
        if data.contains_key(new_name) || order.iter().any(|name| name == new_name) {
            debug!(new_name, "Tab name already taken, refusing rename");
            return false;
        }

        if let Some(content) = data.remove(old_name) {
            data.insert(new_name.to_string(), content);
            self.settings.set(settings::KEY_TABS_DATA, Value::Object(data));
        }

        let renamed: Vec<String> = order
            .into_iter()
            .map(|name| {
                if name == old_name {
                    new_name.to_string()
                } else {
                    name
                }
            })
            .collect();
        self.settings
            .set_string_list(settings::KEY_TABS_ORDER, &renamed);
        true
    }

    /// Drop a tab's saved content and remove it from the order.
    pub fn remove_tab(&self, name: &str) {
        let mut data = self.tabs_data();
        if data.remove(name).is_some() {
            self.settings.set(settings::KEY_TABS_DATA, Value::Object(data));
        }

        let remaining: Vec<String> = self
            .tab_order()
            .into_iter()
            .filter(|tab| tab != name)
            .collect();
        self.settings
            .set_string_list(settings::KEY_TABS_ORDER, &remaining);
    }

    pub fn tab_order(&self) -> Vec<String> {
        self.settings.string_list(settings::KEY_TABS_ORDER)
    }

    /// Persist the order the window shim reports after a drag or close.
    pub fn set_tab_order(&self, names: &[String]) {
        self.settings.set_string_list(settings::KEY_TABS_ORDER, names);
    }

    fn tabs_data(&self) -> Map<String, Value> {
        self.settings
            .get(settings::KEY_TABS_DATA)
            .and_then(|value| value.as_object().cloned())
            .unwrap_or_default()
    }
}
