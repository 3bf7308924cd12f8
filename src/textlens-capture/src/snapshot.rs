//! Still-frame extraction from a live stream

use tracing::debug;

use crate::device::VideoStream;
use crate::error::{CaptureError, Result};

/// Render the stream's current frame into a PNG at native resolution.
///
/// Fails when the stream cannot deliver a frame or delivers one with zero
/// dimensions (no active surface); the caller is responsible for notifying.
pub fn snapshot(stream: &dyn VideoStream) -> Result<Vec<u8>> {
    let frame = stream.current_frame()?;

    if frame.width == 0 || frame.height == 0 {
        return Err(CaptureError::NoFrame);
    }

    let expected = (frame.width * frame.height * 4) as usize;
    if frame.data.len() != expected {
        return Err(CaptureError::FrameConversion(format!(
            "invalid frame data size: expected {}, got {}",
            expected,
            frame.data.len()
        )));
    }

    let img =
        image::RgbaImage::from_raw(frame.width, frame.height, frame.data).ok_or_else(|| {
            CaptureError::FrameConversion("failed to create image buffer".to_string())
        })?;

    let mut png = Vec::new();
    img.write_to(
        &mut std::io::Cursor::new(&mut png),
        image::ImageFormat::Png,
    )?;

    debug!(
        "snapshot: {}x{} frame encoded to {} PNG bytes",
        frame.width,
        frame.height,
        png.len()
    );
    Ok(png)
}
