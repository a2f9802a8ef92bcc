//! Text history engine
//!
//! Owns the ordered, deduplicated, size-bounded history list, the unbounded
//! pinned list, and the substring filter. Every accepted mutation is written
//! through the settings store before subscribers are notified, so a
//! committed change is always durable (modulo the store's swallow-on-write
//! failure policy).
//!
//! Ordering is newest-first. A duplicate `add_text` keeps the entry at its
//! first-seen position; it does not bump to the front.

use std::sync::Arc;

use tracing::{debug, info};

use crate::events::{SubscriptionId, Subscribers};
use crate::settings::{self, SettingsStore};

pub struct HistoryEngine {
    settings: Arc<SettingsStore>,
    history: Vec<String>,
    pinned: Vec<String>,
    max_size: usize,
    current_filter: String,
    history_subscribers: Subscribers<Vec<String>>,
    pinned_subscribers: Subscribers<Vec<String>>,
}

impl HistoryEngine {
    /// Build the engine from the persisted document.
    pub fn new(settings: Arc<SettingsStore>) -> Self {
        let history = settings.string_list(settings::KEY_HISTORY);
        let pinned = settings.string_list(settings::KEY_PINNED_HISTORY);
        let max_size = settings.max_history_size().max(1);

        info!(
            history_len = history.len(),
            pinned_len = pinned.len(),
            max_size,
            "History engine loaded"
        );

        HistoryEngine {
            settings,
            history,
            pinned,
            max_size,
            current_filter: String::new(),
            history_subscribers: Subscribers::new(),
            pinned_subscribers: Subscribers::new(),
        }
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn pinned(&self) -> &[String] {
        &self.pinned
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Notifications carry the currently visible ordered list: the full list
    /// after a mutation, the filtered view after `filter`.
    pub fn subscribe_history(
        &self,
        callback: impl Fn(&Vec<String>) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.history_subscribers.subscribe(callback)
    }

    pub fn subscribe_pinned(
        &self,
        callback: impl Fn(&Vec<String>) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.pinned_subscribers.subscribe(callback)
    }

    /// Add trimmed text to the front of the history.
    ///
    /// Empty input and text already present anywhere in the list are silent
    /// no-ops; the tail beyond `max_size` is evicted.
    pub fn add_text(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        if self.history.iter().any(|entry| entry == text) {
            debug!(text_len = text.len(), "Text already in history, ignoring");
            return;
        }

        self.history.insert(0, text.to_string());
        self.history.truncate(self.max_size);
        debug!(
            text_len = text.len(),
            history_len = self.history.len(),
            "Added text entry to history"
        );
        self.commit_history();
    }

    /// Update the history bound; truncates immediately when now over.
    ///
    /// Non-positive bounds are clamped to 1, the collection is never unbounded.
    pub fn set_max_size(&mut self, new_size: usize) {
        self.max_size = new_size.max(1);
        if self.history.len() > self.max_size {
            self.history.truncate(self.max_size);
            self.commit_history();
        }
    }

    /// Pin text, deduplicated against the pinned list only.
    ///
    /// Pinning neither removes from nor requires membership in the history.
    pub fn pin_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.pinned.iter().any(|entry| entry == text) {
            debug!(text_len = text.len(), "Text already pinned, ignoring");
            return;
        }

        self.pinned.insert(0, text.to_string());
        self.commit_pinned();
    }

    /// Pin the most recent history entry, if any.
    pub fn pin_current_top(&mut self) {
        if let Some(top) = self.history.first().cloned() {
            self.pin_text(&top);
        }
    }

    /// Remove `text` from the pinned list. No match is a silent no-op:
    /// nothing is persisted and no notification fires.
    pub fn unpin(&mut self, text: &str) -> bool {
        let before = self.pinned.len();
        self.pinned.retain(|entry| entry != text);
        if self.pinned.len() == before {
            return false;
        }
        self.commit_pinned();
        true
    }

    /// Explicit user-initiated delete from the unfiltered history
    /// (distinct from bound eviction).
    pub fn remove(&mut self, text: &str) -> bool {
        let before = self.history.len();
        self.history.retain(|entry| entry != text);
        if self.history.len() == before {
            return false;
        }
        self.commit_history();
        true
    }

    pub fn clear(&mut self) {
        self.history.clear();
        self.commit_history();
    }

    pub fn clear_pinned(&mut self) {
        self.pinned.clear();
        self.commit_pinned();
    }

    /// Recompute both filtered views and notify both observer channels.
    ///
    /// Never mutates the underlying collections. An empty query restores
    /// the identity view.
    pub fn filter(&mut self, query: &str) {
        self.current_filter = query.trim().to_lowercase();
        self.history_subscribers
            .emit(&apply_filter(&self.history, &self.current_filter));
        self.pinned_subscribers
            .emit(&apply_filter(&self.pinned, &self.current_filter));
    }

    pub fn filtered_history(&self) -> Vec<String> {
        apply_filter(&self.history, &self.current_filter)
    }

    pub fn filtered_pinned(&self) -> Vec<String> {
        apply_filter(&self.pinned, &self.current_filter)
    }

    fn commit_history(&self) {
        self.settings
            .set_string_list(settings::KEY_HISTORY, &self.history);
        self.history_subscribers.emit(&self.history);
    }

    fn commit_pinned(&self) {
        self.settings
            .set_string_list(settings::KEY_PINNED_HISTORY, &self.pinned);
        self.pinned_subscribers.emit(&self.pinned);
    }
}

/// Case-insensitive substring filter; empty query is the identity.
fn apply_filter(items: &[String], query: &str) -> Vec<String> {
    if query.is_empty() {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|entry| entry.to_lowercase().contains(query))
        .cloned()
        .collect()
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
