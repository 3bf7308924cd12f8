//! Single-stream lifecycle management

use tracing::{debug, info};

use crate::device::{CaptureBackend, StreamConstraints, VideoStream};
use crate::error::{CaptureError, Result};

/// Owns the session's zero-or-one live stream.
///
/// All stream open/close goes through this manager; nothing else touches
/// platform capture devices. Invariant: at most one stream is bound at any
/// time, and opening a new one always closes the previous one first.
pub struct StreamManager {
    backend: Box<dyn CaptureBackend>,
    stream: Option<Box<dyn VideoStream>>,
}

impl StreamManager {
    pub fn new(backend: Box<dyn CaptureBackend>) -> Self {
        Self {
            backend,
            stream: None,
        }
    }

    /// The backend, for device enumeration.
    pub fn backend(&self) -> &dyn CaptureBackend {
        self.backend.as_ref()
    }

    /// Open a stream for the given device, closing any currently bound
    /// stream first. On backend failure the manager is left unbound and the
    /// error is returned for the caller to surface; there is no retry.
    pub fn open(&mut self, device_id: &str) -> Result<()> {
        if device_id.is_empty() {
            return Err(CaptureError::EmptyDeviceId);
        }

        self.close();

        let stream = self
            .backend
            .open_stream(device_id, &StreamConstraints::default())?;
        info!("stream bound to device {}", device_id);
        self.stream = Some(stream);
        Ok(())
    }

    /// Close the bound stream, stopping its tracks. Idempotent: a no-op when
    /// nothing is bound, safe even if a stream was never opened.
    pub fn close(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            debug!("closing stream for device {}", stream.device_id());
            stream.stop();
        }
    }

    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    /// The bound stream, if any.
    pub fn stream(&self) -> Option<&dyn VideoStream> {
        self.stream.as_deref()
    }
}

impl Drop for StreamManager {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{DeviceDescriptor, Frame};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Event log shared between the fake backend and its streams, used to
    /// assert open/close ordering.
    #[derive(Clone, Default)]
    struct EventLog(Arc<Mutex<Vec<String>>>);

    impl EventLog {
        fn push(&self, event: String) {
            self.0.lock().unwrap().push(event);
        }

        fn events(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    struct FakeStream {
        id: String,
        log: EventLog,
    }

    impl VideoStream for FakeStream {
        fn device_id(&self) -> &str {
            &self.id
        }

        fn current_frame(&self) -> Result<Frame> {
            Ok(Frame {
                width: 2,
                height: 2,
                data: vec![0; 16],
            })
        }

        fn stop(&mut self) {
            self.log.push(format!("close:{}", self.id));
        }
    }

    struct FakeBackend {
        log: EventLog,
        open_count: Arc<AtomicUsize>,
    }

    impl FakeBackend {
        fn new(log: EventLog) -> Self {
            Self {
                log,
                open_count: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    impl CaptureBackend for FakeBackend {
        fn enumerate_devices(&self) -> Result<Vec<DeviceDescriptor>> {
            Ok(vec![DeviceDescriptor {
                id: "cam1".into(),
                label: "Fake Camera".into(),
            }])
        }

        fn open_stream(
            &self,
            device_id: &str,
            _constraints: &StreamConstraints,
        ) -> Result<Box<dyn VideoStream>> {
            self.open_count.fetch_add(1, Ordering::SeqCst);
            self.log.push(format!("open:{device_id}"));
            Ok(Box::new(FakeStream {
                id: device_id.to_string(),
                log: self.log.clone(),
            }))
        }
    }

    fn manager_with_log() -> (StreamManager, EventLog) {
        let log = EventLog::default();
        let backend = FakeBackend::new(log.clone());
        (StreamManager::new(Box::new(backend)), log)
    }

    #[test]
    fn test_close_without_open_is_noop() {
        let (mut manager, log) = manager_with_log();
        manager.close();
        manager.close();
        assert!(log.events().is_empty());
        assert!(!manager.is_open());
    }

    #[test]
    fn test_open_rejects_empty_device_id() {
        let (mut manager, _log) = manager_with_log();
        assert!(matches!(
            manager.open(""),
            Err(CaptureError::EmptyDeviceId)
        ));
        assert!(!manager.is_open());
    }

    #[test]
    fn test_reopen_closes_previous_stream_first() {
        let (mut manager, log) = manager_with_log();

        manager.open("cam1").unwrap();
        manager.open("cam2").unwrap();

        assert_eq!(log.events(), vec!["open:cam1", "close:cam1", "open:cam2"]);
        assert!(manager.is_open());
        assert_eq!(manager.stream().unwrap().device_id(), "cam2");
    }

    #[test]
    fn test_close_is_idempotent_after_open() {
        let (mut manager, log) = manager_with_log();

        manager.open("cam1").unwrap();
        manager.close();
        manager.close();

        assert_eq!(log.events(), vec!["open:cam1", "close:cam1"]);
        assert!(!manager.is_open());
    }

    #[test]
    fn test_drop_closes_stream() {
        let (mut manager, log) = manager_with_log();
        manager.open("cam1").unwrap();
        drop(manager);
        assert_eq!(log.events(), vec!["open:cam1", "close:cam1"]);
    }
}
