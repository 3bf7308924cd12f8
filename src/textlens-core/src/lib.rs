//! Textlens Core Library
//!
//! Session orchestration for the capture-and-recognition pipeline: source
//! selection, acquisition paths, result routing, and the host capability
//! boundary.

pub mod config;
pub mod error;
pub mod host;
pub mod router;
pub mod selector;
pub mod session;

pub use config::Settings;
pub use error::AcquisitionError;
pub use host::{Clipboard, EditorSink, HostServices, Notifier};
pub use router::{deliver, Delivery};
pub use selector::{AcquisitionMode, Controls, SourceSelector};
pub use session::{ImageData, Session};
