use super::*;
use crate::clipboard_history::clipboard::mock::MockClipboard;
use std::sync::Arc;

#[derive(Default)]
struct CollectingSink {
    texts: Mutex<Vec<String>>,
    images: Mutex<Vec<(usize, usize)>>,
}

impl CollectingSink {
    fn texts(&self) -> Vec<String> {
        self.texts.lock().clone()
    }

    fn image_count(&self) -> usize {
        self.images.lock().len()
    }
}

impl ClipboardSink for CollectingSink {
    fn on_text(&self, text: String) {
        self.texts.lock().push(text);
    }

    fn on_image(&self, image: arboard::ImageData<'static>) {
        self.images.lock().push((image.width, image.height));
    }
}

fn bitmap(seed: u8) -> arboard::ImageData<'static> {
    arboard::ImageData {
        width: 2,
        height: 2,
        bytes: vec![seed; 16].into(),
    }
}

#[test]
fn test_new_text_produces_event_once() {
    let detector = ChangeDetector::new();
    let sink = CollectingSink::default();
    let mut provider = MockClipboard::with_text("hello");

    detector.handle_change(&mut provider, &sink);
    detector.handle_change(&mut provider, &sink);

    assert_eq!(sink.texts(), vec!["hello".to_string()], "echo suppressed");
}

#[test]
fn test_text_is_trimmed_and_blank_ignored() {
    let detector = ChangeDetector::new();
    let sink = CollectingSink::default();

    let mut provider = MockClipboard::with_text("  spaced  ");
    detector.handle_change(&mut provider, &sink);

    let mut blank = MockClipboard::with_text("   \n\t");
    detector.handle_change(&mut blank, &sink);

    assert_eq!(sink.texts(), vec!["spaced".to_string()]);
}

#[test]
fn test_image_takes_priority_over_text() {
    let detector = ChangeDetector::new();
    let sink = CollectingSink::default();

    let mut provider = MockClipboard::with_text("also present");
    provider.image = Some(bitmap(1));

    detector.handle_change(&mut provider, &sink);

    assert_eq!(sink.image_count(), 1);
    assert!(sink.texts().is_empty(), "text is not read when an image won");
}

#[test]
fn test_unchanged_image_fingerprint_is_redundant() {
    let detector = ChangeDetector::new();
    let sink = CollectingSink::default();
    let mut provider = MockClipboard::with_image(bitmap(1));

    detector.handle_change(&mut provider, &sink);
    detector.handle_change(&mut provider, &sink);
    assert_eq!(sink.image_count(), 1);

    provider.image = Some(bitmap(2));
    detector.handle_change(&mut provider, &sink);
    assert_eq!(sink.image_count(), 2, "changed pixels are a new event");
}

#[test]
fn test_image_event_clears_last_seen_text() {
    let detector = ChangeDetector::new();
    let sink = CollectingSink::default();

    let mut provider = MockClipboard::with_text("repeat me");
    detector.handle_change(&mut provider, &sink);

    let mut image_provider = MockClipboard::with_image(bitmap(3));
    detector.handle_change(&mut image_provider, &sink);

    // Same text again is a new event after the image interlude
    detector.handle_change(&mut provider, &sink);

    assert_eq!(
        sink.texts(),
        vec!["repeat me".to_string(), "repeat me".to_string()]
    );
}

#[test]
fn test_text_event_clears_last_seen_image() {
    let detector = ChangeDetector::new();
    let sink = CollectingSink::default();

    let mut image_provider = MockClipboard::with_image(bitmap(4));
    detector.handle_change(&mut image_provider, &sink);

    let mut text_provider = MockClipboard::with_text("interlude");
    detector.handle_change(&mut text_provider, &sink);

    detector.handle_change(&mut image_provider, &sink);

    assert_eq!(sink.image_count(), 2);
}

#[test]
fn test_provider_failure_is_absorbed() {
    let detector = ChangeDetector::new();
    let sink = CollectingSink::default();
    let mut provider = MockClipboard::failing();

    // Must not panic, must not emit
    detector.handle_change(&mut provider, &sink);

    assert!(sink.texts().is_empty());
    assert_eq!(sink.image_count(), 0);
}

#[test]
fn test_mark_text_written_suppresses_echo() {
    let detector = ChangeDetector::new();
    let sink = CollectingSink::default();

    detector.mark_text_written("pasted content");

    let mut provider = MockClipboard::with_text("pasted content");
    detector.handle_change(&mut provider, &sink);

    assert!(sink.texts().is_empty(), "own write must not re-enter history");
}

#[test]
fn test_mark_image_written_suppresses_echo() {
    let detector = ChangeDetector::new();
    let sink = CollectingSink::default();

    let image = bitmap(5);
    detector.mark_image_written(&image);

    let mut provider = MockClipboard::with_image(image);
    detector.handle_change(&mut provider, &sink);

    assert_eq!(sink.image_count(), 0);
}

struct ReentrantSink<'a> {
    detector: &'a ChangeDetector,
    inner: Arc<CollectingSink>,
}

impl ClipboardSink for ReentrantSink<'_> {
    fn on_text(&self, _text: String) {
        let mut provider = MockClipboard::with_text("from inside dispatch");
        self.detector.handle_change(&mut provider, &*self.inner);
    }

    fn on_image(&self, _image: arboard::ImageData<'static>) {}
}

#[test]
fn test_signal_during_dispatch_is_dropped() {
    let detector = ChangeDetector::new();
    let inner = Arc::new(CollectingSink::default());
    let sink = ReentrantSink {
        detector: &detector,
        inner: inner.clone(),
    };

    let mut provider = MockClipboard::with_text("outer");
    detector.handle_change(&mut provider, &sink);

    assert!(
        inner.texts().is_empty(),
        "guard must drop signals arriving mid-classification"
    );

    // The guard was released afterwards: the detector still works
    let after = CollectingSink::default();
    let mut provider = MockClipboard::with_text("later");
    detector.handle_change(&mut provider, &after);
    assert_eq!(after.texts(), vec!["later".to_string()]);
}

#[test]
fn test_arc_sink_delegation() {
    let detector = ChangeDetector::new();
    let sink = Arc::new(CollectingSink::default());
    let mut provider = MockClipboard::with_text("shared sink");

    detector.handle_change(&mut provider, &sink);

    assert_eq!(sink.texts(), vec!["shared sink".to_string()]);
}
