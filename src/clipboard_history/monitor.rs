//! Clipboard monitoring
//!
//! Background thread that polls the OS clipboard and feeds each tick to the
//! change detector. Polling is the portable change signal; the detector's
//! content comparison makes the interval safe against spurious wakeups.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::info;

use super::clipboard::ClipboardProvider;
use super::detector::{ChangeDetector, ClipboardSink};

/// Polling interval for clipboard changes
const POLL_INTERVAL_MS: u64 = 500;

/// Granularity of the stop-flag check while sleeping
const STOP_CHECK_INTERVAL_MS: u64 = 25;

pub struct ClipboardMonitor {
    stop_flag: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl ClipboardMonitor {
    /// Spawn the monitoring thread. Each tick runs one detector pass.
    pub fn start<P, S>(provider: P, detector: Arc<ChangeDetector>, sink: S) -> Self
    where
        P: ClipboardProvider + Send + 'static,
        S: ClipboardSink + Send + 'static,
    {
        let stop_flag = Arc::new(AtomicBool::new(false));
        let thread_flag = stop_flag.clone();
        let handle = thread::spawn(move || {
            monitor_loop(provider, detector, sink, thread_flag);
        });

        info!(poll_interval_ms = POLL_INTERVAL_MS, "Clipboard monitor started");

        ClipboardMonitor {
            stop_flag,
            handle: Some(handle),
        }
    }

    /// Signal the thread to stop and wait for it to finish.
    pub fn stop(&mut self) {
        self.stop_flag.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
            info!("Clipboard monitor stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some() && !self.stop_flag.load(Ordering::Relaxed)
    }
}

impl Drop for ClipboardMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}

fn monitor_loop<P, S>(
    mut provider: P,
    detector: Arc<ChangeDetector>,
    sink: S,
    stop_flag: Arc<AtomicBool>,
) where
    P: ClipboardProvider,
    S: ClipboardSink,
{
    let poll_interval = Duration::from_millis(POLL_INTERVAL_MS);

    while !stop_flag.load(Ordering::Relaxed) {
        let start = Instant::now();

        detector.handle_change(&mut provider, &sink);

        // Sleep the remainder in short slices so stop() returns promptly
        while start.elapsed() < poll_interval {
            if stop_flag.load(Ordering::Relaxed) {
                return;
            }
            thread::sleep(Duration::from_millis(STOP_CHECK_INTERVAL_MS));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard_history::clipboard::mock::MockClipboard;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct CollectingSink {
        texts: Mutex<Vec<String>>,
    }

    impl ClipboardSink for CollectingSink {
        fn on_text(&self, text: String) {
            self.texts.lock().push(text);
        }

        fn on_image(&self, _image: arboard::ImageData<'static>) {}
    }

    #[test]
    fn test_monitor_captures_and_stops() {
        let detector = Arc::new(ChangeDetector::new());
        let sink = Arc::new(CollectingSink::default());
        let provider = MockClipboard::with_text("copied while running");

        let mut monitor = ClipboardMonitor::start(provider, detector, sink.clone());
        assert!(monitor.is_running());

        // First tick happens immediately; give the thread a moment
        let deadline = Instant::now() + Duration::from_secs(2);
        while sink.texts.lock().is_empty() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(10));
        }

        monitor.stop();
        assert!(!monitor.is_running());

        let texts = sink.texts.lock().clone();
        assert_eq!(
            texts,
            vec!["copied while running".to_string()],
            "one event despite repeated polling of identical content"
        );
    }

    #[test]
    fn test_stop_is_idempotent() {
        let detector = Arc::new(ChangeDetector::new());
        let sink = Arc::new(CollectingSink::default());
        let mut monitor =
            ClipboardMonitor::start(MockClipboard::default(), detector, sink);

        monitor.stop();
        monitor.stop();
    }
}
