//! textlens-capture - Capture device access for Textlens
//!
//! Provides device enumeration, the single-stream lifecycle manager,
//! and still-frame snapshotting for live capture sources.

pub mod device;
pub mod error;
pub mod screen;
pub mod snapshot;
pub mod stream;

pub use device::{CaptureBackend, DeviceDescriptor, Frame, StreamConstraints, VideoStream};
pub use error::CaptureError;
pub use screen::ScreenBackend;
pub use snapshot::snapshot;
pub use stream::StreamManager;
