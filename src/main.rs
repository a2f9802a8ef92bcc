//! Headless runner: records clipboard history in the background.
//!
//! Loads the settings document, wires the engines to the real OS clipboard
//! and polls until the process is killed. UI/tray/hotkey shims embed the
//! library instead of running this binary.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use clipmate::clipboard_history::{ClipboardMonitor, SystemClipboard};
use clipmate::logging;
use clipmate::manager::ClipboardManager;
use clipmate::paste::ClipboardWriteTarget;
use clipmate::settings::SettingsStore;

fn main() -> Result<()> {
    let _guard = logging::init();

    let settings = Arc::new(SettingsStore::load(SettingsStore::default_path()));
    let paste = Arc::new(ClipboardWriteTarget::new(SystemClipboard::new()?));
    let manager = Arc::new(ClipboardManager::new(settings.clone(), paste));

    info!(
        settings_path = %settings.path().display(),
        history_len = manager.history().len(),
        images_len = manager.images().len(),
        "Clipmate started"
    );

    let _monitor = ClipboardMonitor::start(
        SystemClipboard::new()?,
        manager.detector(),
        manager.clone(),
    );

    // The monitor owns its thread; nothing left to do on the main thread
    loop {
        std::thread::park();
    }
}
