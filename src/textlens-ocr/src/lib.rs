//! textlens-ocr - External recognition engine invocation
//!
//! Spawns the configured OCR executable as a subprocess, streams the image
//! to its stdin, and classifies the run into a [`RecognitionOutcome`].

pub mod engine;

pub use engine::{Engine, RecognitionOutcome, DEFAULT_TIMEOUT_SECS};
