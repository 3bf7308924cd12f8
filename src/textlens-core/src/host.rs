//! Host capability boundary
//!
//! The host application (editor, clipboard, notification surface) is opaque
//! to the core. Each capability is a small trait so hosts can be swapped and
//! tests can record calls.

use std::sync::Arc;

/// The host document model, reduced to the two operations the core needs.
pub trait EditorSink: Send + Sync {
    /// Is there an active document view to insert into?
    fn has_active_sink(&self) -> bool;

    /// Replace the current selection at the cursor with `text`.
    fn insert_at_cursor(&self, text: &str);
}

/// System clipboard, write-only.
pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> anyhow::Result<()>;
}

/// User-visible notifications plus a low-priority diagnostic channel.
///
/// Every failure path must reach `notify`; `debug_detail` carries stderr
/// text and underlying errors in addition, never instead.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
    fn debug_detail(&self, detail: &str);
}

/// Bundle of host capabilities handed to a session.
#[derive(Clone)]
pub struct HostServices {
    pub editor: Arc<dyn EditorSink>,
    pub clipboard: Arc<dyn Clipboard>,
    pub notifier: Arc<dyn Notifier>,
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::sync::Mutex;

    pub struct RecordingEditor {
        pub active: bool,
        pub inserted: Mutex<Vec<String>>,
    }

    impl RecordingEditor {
        pub fn new(active: bool) -> Arc<Self> {
            Arc::new(Self {
                active,
                inserted: Mutex::new(Vec::new()),
            })
        }
    }

    impl EditorSink for RecordingEditor {
        fn has_active_sink(&self) -> bool {
            self.active
        }

        fn insert_at_cursor(&self, text: &str) {
            self.inserted.lock().unwrap().push(text.to_string());
        }
    }

    pub struct RecordingClipboard {
        pub fail: bool,
        pub copied: Mutex<Vec<String>>,
    }

    impl RecordingClipboard {
        pub fn new() -> Arc<Self> {
            Arc::new(Self {
                fail: false,
                copied: Mutex::new(Vec::new()),
            })
        }

        pub fn failing() -> Arc<Self> {
            Arc::new(Self {
                fail: true,
                copied: Mutex::new(Vec::new()),
            })
        }
    }

    impl Clipboard for RecordingClipboard {
        fn write_text(&self, text: &str) -> anyhow::Result<()> {
            if self.fail {
                anyhow::bail!("clipboard unavailable");
            }
            self.copied.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    pub struct RecordingNotifier {
        pub notices: Mutex<Vec<String>>,
        pub details: Mutex<Vec<String>>,
    }

    impl RecordingNotifier {
        pub fn new() -> Arc<Self> {
            Arc::new(Self::default())
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, message: &str) {
            self.notices.lock().unwrap().push(message.to_string());
        }

        fn debug_detail(&self, detail: &str) {
            self.details.lock().unwrap().push(detail.to_string());
        }
    }

    pub struct TestHosts {
        pub editor: Arc<RecordingEditor>,
        pub clipboard: Arc<RecordingClipboard>,
        pub notifier: Arc<RecordingNotifier>,
    }

    impl TestHosts {
        pub fn new(editor_active: bool) -> Self {
            Self {
                editor: RecordingEditor::new(editor_active),
                clipboard: RecordingClipboard::new(),
                notifier: RecordingNotifier::new(),
            }
        }

        pub fn services(&self) -> HostServices {
            HostServices {
                editor: self.editor.clone(),
                clipboard: self.clipboard.clone(),
                notifier: self.notifier.clone(),
            }
        }
    }
}
