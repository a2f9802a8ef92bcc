//! Clipboard change detection
//!
//! Classifies raw clipboard-changed signals into deduplicated text/image
//! events. Platforms fire spurious signals with identical content, and this
//! app's own paste path writes to the clipboard; the detector's last-seen
//! state recognizes both as redundant, so observation never has to pause.
//!
//! Image payloads take priority over text when both are present.

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::error::ResultExt;

use super::clipboard::ClipboardProvider;
use super::image::image_fingerprint;

/// Receives classified clipboard events.
pub trait ClipboardSink {
    fn on_text(&self, text: String);
    fn on_image(&self, image: arboard::ImageData<'static>);
}

impl<T: ClipboardSink + ?Sized> ClipboardSink for std::sync::Arc<T> {
    fn on_text(&self, text: String) {
        (**self).on_text(text);
    }

    fn on_image(&self, image: arboard::ImageData<'static>) {
        (**self).on_image(image);
    }
}

#[derive(Debug, Default)]
struct DetectorState {
    last_text: Option<String>,
    last_image_fingerprint: Option<u64>,
}

/// Content-based clipboard change detector.
#[derive(Debug, Default)]
pub struct ChangeDetector {
    // try_lock doubles as the re-entrancy guard: a signal arriving while a
    // classification pass holds the lock is dropped, and the guard is
    // released on every exit path by drop.
    state: Mutex<DetectorState>,
}

impl ChangeDetector {
    pub fn new() -> Self {
        ChangeDetector {
            state: Mutex::new(DetectorState::default()),
        }
    }

    /// Process one raw clipboard-changed signal.
    ///
    /// Redundant signals (content equal to last seen) produce no event.
    /// Provider errors are absorbed: worst case is a missed history entry,
    /// never a crash of the observing thread.
    pub fn handle_change(&self, provider: &mut dyn ClipboardProvider, sink: &dyn ClipboardSink) {
        let Some(mut state) = self.state.try_lock() else {
            trace!("Re-entrant clipboard signal ignored");
            return;
        };

        // No event this tick when the read fails
        let Some(image_payload) = provider.read_image().warn_on_err() else {
            return;
        };

        if let Some(image) = image_payload {
            let fingerprint = image_fingerprint(&image);
            if state.last_image_fingerprint == Some(fingerprint) {
                trace!(fingerprint, "Redundant image signal");
            } else {
                state.last_image_fingerprint = Some(fingerprint);
                state.last_text = None;
                debug!(
                    width = image.width,
                    height = image.height,
                    "New image on clipboard"
                );
                sink.on_image(image);
            }
            // Image takes priority over text
            return;
        }

        let Some(text) = provider.read_text().warn_on_err() else {
            return;
        };
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        if state.last_text.as_deref() == Some(text) {
            trace!("Redundant text signal");
            return;
        }

        state.last_text = Some(text.to_string());
        state.last_image_fingerprint = None;
        debug!(text_len = text.len(), "New text on clipboard");
        sink.on_text(text.to_string());
    }

    /// Record a programmatic text write so its echo signal reads as redundant.
    pub fn mark_text_written(&self, text: &str) {
        let mut state = self.state.lock();
        state.last_text = Some(text.trim().to_string());
        state.last_image_fingerprint = None;
    }

    /// Record a programmatic image write so its echo signal reads as redundant.
    pub fn mark_image_written(&self, image: &arboard::ImageData) {
        let mut state = self.state.lock();
        state.last_image_fingerprint = Some(image_fingerprint(image));
        state.last_text = None;
    }
}

#[cfg(test)]
#[path = "detector_tests.rs"]
mod tests;
