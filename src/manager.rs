//! Clipboard manager facade
//!
//! Constructs the engines, the change detector, and the settings wiring,
//! and exposes the action entry points the UI/tray collaborators call. All
//! collection mutations funnel through the `Arc<Mutex<_>>` engine handles:
//! the public, already-synchronized entry points of the single-writer
//! contract. Background threads (monitor, hotkey listener) must go through
//! this facade and never touch engine internals.

use std::sync::Arc;

use arboard::ImageData;
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::clipboard_history::{
    is_empty_image, ChangeDetector, ClipboardSink, HistoryEngine, ImageStore,
};
use crate::error::ResultExt;
use crate::events::SubscriptionId;
use crate::paste::PasteTarget;
use crate::settings::{self, SettingsStore};

pub struct ClipboardManager {
    settings: Arc<SettingsStore>,
    history: Arc<Mutex<HistoryEngine>>,
    images: Arc<Mutex<ImageStore>>,
    detector: Arc<ChangeDetector>,
    paste: Arc<dyn PasteTarget>,
}

impl ClipboardManager {
    /// Build the facade from a loaded settings store and a paste collaborator.
    pub fn new(settings: Arc<SettingsStore>, paste: Arc<dyn PasteTarget>) -> Self {
        let history = Arc::new(Mutex::new(HistoryEngine::new(settings.clone())));
        let images = Arc::new(Mutex::new(ImageStore::new(settings.clone())));
        let detector = Arc::new(ChangeDetector::new());

        // Bound changes made through the settings surface (settings dialog)
        // propagate into the engines; their own persistence writes come back
        // through here too and fall through the match.
        let history_for_settings = history.clone();
        let images_for_settings = images.clone();
        settings.subscribe(move |(key, value)| {
            let Some(new_size) = value.as_u64() else {
                return;
            };
            match key.as_str() {
                settings::KEY_MAX_HISTORY_SIZE => {
                    history_for_settings.lock().set_max_size(new_size as usize);
                }
                settings::KEY_MAX_IMAGES_SIZE => {
                    images_for_settings.lock().set_max_size(new_size as usize);
                }
                _ => {}
            }
        });

        info!("Clipboard manager initialized");

        ClipboardManager {
            settings,
            history,
            images,
            detector,
            paste,
        }
    }

    pub fn settings(&self) -> &Arc<SettingsStore> {
        &self.settings
    }

    pub fn detector(&self) -> Arc<ChangeDetector> {
        self.detector.clone()
    }

    // Snapshots for pull-style consumers (tray menu build, window open)

    pub fn history(&self) -> Vec<String> {
        self.history.lock().history().to_vec()
    }

    pub fn pinned(&self) -> Vec<String> {
        self.history.lock().pinned().to_vec()
    }

    pub fn images(&self) -> Vec<String> {
        self.images.lock().images().to_vec()
    }

    // Subscription passthroughs

    pub fn subscribe_history(
        &self,
        callback: impl Fn(&Vec<String>) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.history.lock().subscribe_history(callback)
    }

    pub fn subscribe_pinned(
        &self,
        callback: impl Fn(&Vec<String>) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.history.lock().subscribe_pinned(callback)
    }

    pub fn subscribe_images(
        &self,
        callback: impl Fn(&Vec<String>) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.images.lock().subscribe(callback)
    }

    // Action entry points

    pub fn add_text(&self, text: &str) {
        self.history.lock().add_text(text);
    }

    pub fn pin_text(&self, text: &str) {
        self.history.lock().pin_text(text);
    }

    pub fn pin_current_top(&self) {
        self.history.lock().pin_current_top();
    }

    pub fn unpin(&self, text: &str) -> bool {
        self.history.lock().unpin(text)
    }

    pub fn remove_text(&self, text: &str) -> bool {
        self.history.lock().remove(text)
    }

    pub fn clear_history(&self) {
        self.history.lock().clear();
    }

    pub fn clear_pinned(&self) {
        self.history.lock().clear_pinned();
    }

    pub fn filter(&self, query: &str) {
        self.history.lock().filter(query);
    }

    pub fn remove_image(&self, token: &str) -> bool {
        self.images.lock().remove(token)
    }

    pub fn clear_images(&self) {
        self.images.lock().clear();
    }

    pub fn resolve_image(&self, token: &str) -> ImageData<'static> {
        self.images.lock().resolve(token)
    }

    /// Forward text to the paste collaborator.
    ///
    /// The detector is primed first so the clipboard write this triggers is
    /// recognized as our own echo, not new user-copied content.
    pub fn request_paste(&self, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        debug!(text_len = text.len(), "Paste requested");
        self.detector.mark_text_written(text);
        self.paste.paste_text(text).warn_on_err();
    }

    /// Forward a stored image to the paste collaborator.
    pub fn request_paste_image(&self, token: &str) {
        let image = self.images.lock().resolve(token);
        if is_empty_image(&image) {
            return;
        }
        debug!(
            width = image.width,
            height = image.height,
            "Image paste requested"
        );
        self.detector.mark_image_written(&image);
        self.paste.paste_image(&image).warn_on_err();
    }
}

/// The manager is the sink for classified clipboard events.
impl ClipboardSink for ClipboardManager {
    fn on_text(&self, text: String) {
        self.history.lock().add_text(&text);
    }

    fn on_image(&self, image: ImageData<'static>) {
        // Encoding failure is reported by the store and absorbed here:
        // a bad clipboard bitmap costs one missed entry, nothing else.
        self.images.lock().add(&image).warn_on_err();
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
