//! Capture error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("no capture devices found")]
    NoDevices,

    #[error("capture device not found: {0}")]
    DeviceNotFound(String),

    #[error("empty device identifier")]
    EmptyDeviceId,

    #[error("stream is not open")]
    StreamNotOpen,

    #[error("stream has no current frame")]
    NoFrame,

    #[error("frame conversion failed: {0}")]
    FrameConversion(String),

    #[error("capture backend error: {0}")]
    Backend(String),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, CaptureError>;
