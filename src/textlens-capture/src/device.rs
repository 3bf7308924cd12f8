//! Capture device descriptors and backend abstraction

use crate::error::Result;

/// A video-input device as reported by the platform backend.
///
/// Descriptors are immutable once enumerated and are only valid for the
/// duration of the session that listed them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescriptor {
    /// Opaque platform identifier, used to open a stream.
    pub id: String,
    /// Human-readable label for pickers.
    pub label: String,
}

/// Resolution hints passed to the backend when opening a stream.
///
/// These are preferences, not requirements: a backend that cannot satisfy
/// them delivers whatever resolution the device supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamConstraints {
    pub ideal_width: u32,
    pub ideal_height: u32,
}

impl Default for StreamConstraints {
    fn default() -> Self {
        Self {
            ideal_width: 1920,
            ideal_height: 1080,
        }
    }
}

/// A single raster frame pulled from a live stream, RGBA byte order.
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// A live stream bound to one capture device.
///
/// Streams are owned by [`crate::StreamManager`]; consumers must not cache
/// one beyond the manager's lifetime.
pub trait VideoStream: Send {
    /// Identifier of the device this stream is bound to.
    fn device_id(&self) -> &str;

    /// Grab the current frame. Fails if the stream is stopped or the
    /// device cannot deliver a frame right now.
    fn current_frame(&self) -> Result<Frame>;

    /// Stop every constituent track. Further frame requests fail.
    fn stop(&mut self);
}

/// Platform capture service: device enumeration and stream acquisition.
pub trait CaptureBackend: Send {
    /// List the video-input devices currently available.
    fn enumerate_devices(&self) -> Result<Vec<DeviceDescriptor>>;

    /// Open a live stream for the given device id.
    fn open_stream(
        &self,
        device_id: &str,
        constraints: &StreamConstraints,
    ) -> Result<Box<dyn VideoStream>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constraints() {
        let c = StreamConstraints::default();
        assert_eq!(c.ideal_width, 1920);
        assert_eq!(c.ideal_height, 1080);
    }
}
