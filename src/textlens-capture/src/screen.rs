//! Screen capture backend using xcap monitors as devices

use tracing::{debug, info};
use xcap::Monitor;

use crate::device::{CaptureBackend, DeviceDescriptor, Frame, StreamConstraints, VideoStream};
use crate::error::{CaptureError, Result};

/// Capture backend that exposes each attached monitor as a video-input
/// device. Frames are grabbed on demand rather than pushed, which fits the
/// snapshot-oriented session flow.
pub struct ScreenBackend;

impl ScreenBackend {
    pub fn new() -> Self {
        Self
    }

    fn monitors() -> Result<Vec<Monitor>> {
        Monitor::all().map_err(|e| CaptureError::Backend(e.to_string()))
    }

    fn find_monitor(device_id: &str) -> Result<Monitor> {
        let monitors = Self::monitors()?;
        if monitors.is_empty() {
            return Err(CaptureError::NoDevices);
        }

        monitors
            .into_iter()
            .find(|m| {
                m.id()
                    .map(|id| id.to_string() == device_id)
                    .unwrap_or(false)
            })
            .ok_or_else(|| CaptureError::DeviceNotFound(device_id.to_string()))
    }
}

impl Default for ScreenBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureBackend for ScreenBackend {
    fn enumerate_devices(&self) -> Result<Vec<DeviceDescriptor>> {
        let mut devices = Vec::new();

        for monitor in Self::monitors()? {
            let id = monitor
                .id()
                .map_err(|e| CaptureError::Backend(e.to_string()))?;
            let label = monitor.name().unwrap_or_else(|_| format!("Monitor {id}"));

            debug!("found capture device: {} ({})", label, id);
            devices.push(DeviceDescriptor {
                id: id.to_string(),
                label,
            });
        }

        info!("enumerated {} capture device(s)", devices.len());
        Ok(devices)
    }

    fn open_stream(
        &self,
        device_id: &str,
        constraints: &StreamConstraints,
    ) -> Result<Box<dyn VideoStream>> {
        let monitor = Self::find_monitor(device_id)?;

        let width = monitor.width().unwrap_or(0);
        let height = monitor.height().unwrap_or(0);
        if width != constraints.ideal_width || height != constraints.ideal_height {
            debug!(
                "device {} delivers {}x{} (requested {}x{})",
                device_id, width, height, constraints.ideal_width, constraints.ideal_height
            );
        }

        info!("opened stream for device {}", device_id);
        Ok(Box::new(MonitorStream {
            device_id: device_id.to_string(),
            monitor: Some(monitor),
        }))
    }
}

/// Live stream over one monitor. Dropping the monitor handle is all the
/// teardown xcap needs, so `stop` just releases it.
struct MonitorStream {
    device_id: String,
    monitor: Option<Monitor>,
}

impl VideoStream for MonitorStream {
    fn device_id(&self) -> &str {
        &self.device_id
    }

    fn current_frame(&self) -> Result<Frame> {
        let monitor = self.monitor.as_ref().ok_or(CaptureError::StreamNotOpen)?;

        let image = monitor
            .capture_image()
            .map_err(|e| CaptureError::Backend(e.to_string()))?;

        let (width, height) = (image.width(), image.height());
        Ok(Frame {
            width,
            height,
            data: image.into_raw(),
        })
    }

    fn stop(&mut self) {
        if self.monitor.take().is_some() {
            debug!("stopped stream for device {}", self.device_id);
        }
    }
}

// SAFETY: Monitor handles are OS display resources that are safe to move
// between threads; xcap only performs read-only capture calls on them.
unsafe impl Send for MonitorStream {}
