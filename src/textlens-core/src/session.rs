//! One capture session, from acquisition to delivery
//!
//! A session corresponds to one open modal. It owns its own stream manager
//! (no ambient state) and drives the strictly sequential pipeline:
//! acquire bytes -> recognize -> route result -> release stream.

use std::path::Path;
use tracing::debug;

use textlens_capture::{CaptureBackend, DeviceDescriptor, StreamManager};
use textlens_ocr::Engine;

use crate::config::Settings;
use crate::error::{AcquisitionError, Result};
use crate::host::HostServices;
use crate::router::{self, Delivery};
use crate::selector::{AcquisitionMode, Controls, SourceSelector};

/// Raw encoded image bytes with their implicit format tag.
///
/// Produced by exactly one acquisition path and consumed exactly once by the
/// recognition engine; not retained afterward.
pub struct ImageData {
    pub bytes: Vec<u8>,
    /// Content type when known: `image/png` for snapshots, the transport
    /// content-type for URL fetches, unknown for local files.
    pub content_type: Option<String>,
}

impl ImageData {
    pub fn new(bytes: Vec<u8>, content_type: Option<String>) -> Self {
        Self {
            bytes,
            content_type,
        }
    }

    pub fn png(bytes: Vec<u8>) -> Self {
        Self::new(bytes, Some("image/png".to_string()))
    }
}

/// Event-driven capture session. Each public method is the handler for one
/// discrete user action; no handler assumes another handler's suspension
/// point has completed.
pub struct Session {
    selector: SourceSelector,
    streams: StreamManager,
    hosts: HostServices,
    engine: Engine,
    in_flight: bool,
    open: bool,
}

impl Session {
    pub fn new(
        backend: Box<dyn CaptureBackend>,
        hosts: HostServices,
        settings: &Settings,
    ) -> Self {
        Self {
            selector: SourceSelector::new(),
            streams: StreamManager::new(backend),
            engine: Engine::new(settings.engine_path.clone(), settings.engine_timeout()),
            hosts,
            in_flight: false,
            open: true,
        }
    }

    pub fn mode(&self) -> AcquisitionMode {
        self.selector.mode()
    }

    pub fn controls(&self) -> Controls {
        self.selector.controls()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn stream_open(&self) -> bool {
        self.streams.is_open()
    }

    /// Devices available for the picker, for the lifetime of this session.
    pub fn devices(&self) -> textlens_capture::error::Result<Vec<DeviceDescriptor>> {
        self.streams.backend().enumerate_devices()
    }

    /// Mode-change handler.
    ///
    /// Leaving LiveCapture tears the stream down; entering it opens a stream
    /// for the currently selected device, if any.
    pub fn set_mode(&mut self, mode: AcquisitionMode) {
        let previous = self.selector.set_mode(mode);
        if previous == mode {
            return;
        }
        debug!("acquisition mode: {:?} -> {:?}", previous, mode);

        if previous == AcquisitionMode::LiveCapture {
            self.streams.close();
        }

        if mode == AcquisitionMode::LiveCapture {
            if let Some(id) = self.selector.selected_device().map(str::to_string) {
                self.open_stream_for(&id);
            }
        }
    }

    /// Device-change handler. Always closes the previous stream first; the
    /// placeholder (empty) selection leaves no stream open.
    pub fn select_device(&mut self, device_id: Option<String>) {
        self.selector.select_device(device_id);

        if self.selector.mode() != AcquisitionMode::LiveCapture {
            return;
        }

        match self.selector.selected_device().map(str::to_string) {
            Some(id) => self.open_stream_for(&id),
            None => self.streams.close(),
        }
    }

    /// File-picker handler: read the chosen file and run it through the
    /// pipeline.
    pub async fn file_chosen(&mut self, path: Option<&Path>) {
        if self.reject_if_busy() {
            return;
        }

        let image = match self.read_file(path).await {
            Ok(image) => image,
            Err(e) => return self.report(e),
        };
        self.recognize_and_route(image).await;
    }

    /// URL-submit handler: fetch the image bytes and run them through the
    /// pipeline.
    pub async fn url_submitted(&mut self, url: &str) {
        if self.reject_if_busy() {
            return;
        }

        let image = match self.fetch_url(url).await {
            Ok(image) => image,
            Err(e) => return self.report(e),
        };
        self.recognize_and_route(image).await;
    }

    /// Capture-trigger handler: snapshot the live stream and run the frame
    /// through the pipeline.
    pub async fn capture_triggered(&mut self) {
        if self.reject_if_busy() {
            return;
        }

        let image = match self.snapshot_image() {
            Ok(image) => image,
            Err(e) => return self.report(e),
        };
        self.recognize_and_route(image).await;
    }

    /// Modal close hook: release any open stream. Idempotent.
    pub fn close(&mut self) {
        self.streams.close();
        self.open = false;
    }

    async fn read_file(&self, path: Option<&Path>) -> Result<ImageData> {
        let path = path.ok_or(AcquisitionError::NoFileSelected)?;
        let bytes = tokio::fs::read(path).await?;
        debug!("read {} bytes from {:?}", bytes.len(), path);
        Ok(ImageData::new(bytes, None))
    }

    async fn fetch_url(&self, url: &str) -> Result<ImageData> {
        if url.trim().is_empty() {
            return Err(AcquisitionError::EmptyUrl);
        }

        let response = reqwest::get(url).await?.error_for_status()?;
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?.to_vec();

        debug!("fetched {} bytes from {}", bytes.len(), url);
        Ok(ImageData::new(bytes, content_type))
    }

    fn snapshot_image(&self) -> Result<ImageData> {
        let stream = self.streams.stream().ok_or(AcquisitionError::NoStream)?;
        let png = textlens_capture::snapshot(stream)?;
        Ok(ImageData::png(png))
    }

    /// Recognize one image and route the outcome. A successful editor
    /// insertion releases the stream and closes the session; every other
    /// outcome leaves the session open for another attempt.
    async fn recognize_and_route(&mut self, image: ImageData) {
        if image.bytes.is_empty() {
            return self.report(AcquisitionError::EmptyImage);
        }

        self.in_flight = true;
        let outcome = self.engine.recognize(&image.bytes).await;
        self.in_flight = false;

        if let Delivery::Inserted = router::deliver(outcome, &self.hosts) {
            self.streams.close();
            self.open = false;
        }
    }

    fn open_stream_for(&mut self, device_id: &str) {
        if let Err(e) = self.streams.open(device_id) {
            self.hosts
                .notifier
                .notify("Could not open the selected capture device.");
            self.hosts.notifier.debug_detail(&e.to_string());
        }
    }

    fn reject_if_busy(&self) -> bool {
        if self.in_flight {
            self.hosts.notifier.notify("A recognition is already in progress");
        }
        self.in_flight
    }

    fn report(&self, error: AcquisitionError) {
        debug!("acquisition failed: {}", error);
        self.hosts.notifier.notify(&error.to_string());
    }

    #[cfg(test)]
    pub(crate) fn force_in_flight(&mut self) {
        self.in_flight = true;
    }
}
