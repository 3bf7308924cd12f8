//! Acquisition error types

use thiserror::Error;

/// Failures while obtaining image bytes, before the engine is involved.
///
/// Every variant is terminal for that attempt: the session reports it as a
/// notification and does not retry.
#[derive(Error, Debug)]
pub enum AcquisitionError {
    #[error("no file selected")]
    NoFileSelected,

    #[error("failed to read file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("no URL entered")]
    EmptyUrl,

    #[error("failed to fetch URL: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("no active capture stream")]
    NoStream,

    #[error("capture error: {0}")]
    Capture(#[from] textlens_capture::CaptureError),

    #[error("image contained no data")]
    EmptyImage,
}

pub type Result<T> = std::result::Result<T, AcquisitionError>;
