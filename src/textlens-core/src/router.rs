//! Result routing: editor insertion, clipboard fallback, notifications

use tracing::debug;

use crate::host::HostServices;
use textlens_ocr::RecognitionOutcome;

/// What the router did with an outcome. The session reacts to `Inserted` by
/// releasing the device stream and closing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Inserted,
    Copied,
    NotDelivered,
}

/// Deliver a recognition outcome through the host capabilities.
///
/// Success goes to the active editor's cursor, replacing the selection; with
/// no active editor the text goes to the clipboard instead and the user is
/// told so. Failures become user-visible notifications with diagnostic
/// detail on the secondary channel.
pub fn deliver(outcome: RecognitionOutcome, hosts: &HostServices) -> Delivery {
    match outcome {
        RecognitionOutcome::Success(text) => {
            if hosts.editor.has_active_sink() {
                hosts.editor.insert_at_cursor(&text);
                debug!("inserted {} recognized bytes into editor", text.len());
                Delivery::Inserted
            } else {
                match hosts.clipboard.write_text(&text) {
                    Ok(()) => {
                        hosts.notifier.notify(
                            "No active editor. The recognized text has been copied to the clipboard.",
                        );
                        Delivery::Copied
                    }
                    Err(e) => {
                        hosts
                            .notifier
                            .notify("No active editor, and copying to the clipboard failed.");
                        hosts.notifier.debug_detail(&e.to_string());
                        Delivery::NotDelivered
                    }
                }
            }
        }
        RecognitionOutcome::EngineFailure(detail) => {
            hosts
                .notifier
                .notify("Error running the recognition engine.");
            hosts.notifier.debug_detail(&detail);
            Delivery::NotDelivered
        }
        RecognitionOutcome::NoTextDetected => {
            hosts.notifier.notify("No text detected in image");
            Delivery::NotDelivered
        }
        // Upstream acquisition aborts before an empty buffer reaches the
        // engine, so this only fires if that guard is bypassed.
        RecognitionOutcome::Empty => {
            hosts.notifier.notify("No image data to recognize");
            Delivery::NotDelivered
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::test_support::TestHosts;

    #[test]
    fn test_success_with_editor_inserts_exact_text() {
        let hosts = TestHosts::new(true);

        let delivery = deliver(
            RecognitionOutcome::Success("hello".into()),
            &hosts.services(),
        );

        assert_eq!(delivery, Delivery::Inserted);
        assert_eq!(*hosts.editor.inserted.lock().unwrap(), vec!["hello"]);
        assert!(hosts.clipboard.copied.lock().unwrap().is_empty());
    }

    #[test]
    fn test_success_without_editor_copies_to_clipboard() {
        let hosts = TestHosts::new(false);

        let delivery = deliver(
            RecognitionOutcome::Success("hello".into()),
            &hosts.services(),
        );

        assert_eq!(delivery, Delivery::Copied);
        assert!(hosts.editor.inserted.lock().unwrap().is_empty());
        assert_eq!(*hosts.clipboard.copied.lock().unwrap(), vec!["hello"]);
        assert_eq!(hosts.notifier.notices.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_clipboard_failure_is_not_silent() {
        let mut hosts = TestHosts::new(false);
        hosts.clipboard = crate::host::test_support::RecordingClipboard::failing();

        let delivery = deliver(
            RecognitionOutcome::Success("hello".into()),
            &hosts.services(),
        );

        assert_eq!(delivery, Delivery::NotDelivered);
        assert_eq!(hosts.notifier.notices.lock().unwrap().len(), 1);
        assert_eq!(hosts.notifier.details.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_engine_failure_notifies_with_detail() {
        let hosts = TestHosts::new(true);

        let delivery = deliver(
            RecognitionOutcome::EngineFailure("exit status: 1".into()),
            &hosts.services(),
        );

        assert_eq!(delivery, Delivery::NotDelivered);
        assert!(hosts.editor.inserted.lock().unwrap().is_empty());
        assert_eq!(hosts.notifier.notices.lock().unwrap().len(), 1);
        assert_eq!(
            *hosts.notifier.details.lock().unwrap(),
            vec!["exit status: 1"]
        );
    }

    #[test]
    fn test_no_text_detected_notifies() {
        let hosts = TestHosts::new(true);

        let delivery = deliver(RecognitionOutcome::NoTextDetected, &hosts.services());

        assert_eq!(delivery, Delivery::NotDelivered);
        assert_eq!(
            *hosts.notifier.notices.lock().unwrap(),
            vec!["No text detected in image"]
        );
    }

    #[test]
    fn test_empty_outcome_delivers_nothing() {
        let hosts = TestHosts::new(true);

        let delivery = deliver(RecognitionOutcome::Empty, &hosts.services());

        assert_eq!(delivery, Delivery::NotDelivered);
        assert!(hosts.editor.inserted.lock().unwrap().is_empty());
        assert!(hosts.clipboard.copied.lock().unwrap().is_empty());
    }
}
