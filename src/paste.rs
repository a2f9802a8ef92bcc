//! Paste collaborator boundary
//!
//! The real paste action (write the clipboard, then synthesize a keystroke
//! into the foreground application) is a platform shim outside this crate's
//! core. `PasteTarget` is its interface; `ClipboardWriteTarget` is the
//! headless rendition that stops at the clipboard write and leaves the
//! keystroke to the shim.

use anyhow::Result;
use arboard::ImageData;
use parking_lot::Mutex;
use tracing::debug;

use crate::clipboard_history::ClipboardProvider;

pub trait PasteTarget: Send + Sync {
    fn paste_text(&self, text: &str) -> Result<()>;
    fn paste_image(&self, image: &ImageData) -> Result<()>;
}

/// Paste target that writes the payload to the OS clipboard only.
pub struct ClipboardWriteTarget<P: ClipboardProvider + Send> {
    clipboard: Mutex<P>,
}

impl<P: ClipboardProvider + Send> ClipboardWriteTarget<P> {
    pub fn new(clipboard: P) -> Self {
        ClipboardWriteTarget {
            clipboard: Mutex::new(clipboard),
        }
    }
}

impl<P: ClipboardProvider + Send> PasteTarget for ClipboardWriteTarget<P> {
    fn paste_text(&self, text: &str) -> Result<()> {
        debug!(text_len = text.len(), "Writing paste payload to clipboard");
        self.clipboard.lock().write_text(text)
    }

    fn paste_image(&self, image: &ImageData) -> Result<()> {
        debug!(
            width = image.width,
            height = image.height,
            "Writing paste image to clipboard"
        );
        self.clipboard.lock().write_image(image)
    }
}
