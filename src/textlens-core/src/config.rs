//! Settings management
//!
//! The host persists settings as a small JSON document; the core reads the
//! engine path and timeout from it. Missing file or fields fall back to
//! defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use textlens_ocr::DEFAULT_TIMEOUT_SECS;

pub const DEFAULT_ENGINE_PATH: &str = "tesseract";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Path to the recognition engine executable.
    pub engine_path: String,

    /// Wall-clock limit for one engine run, in seconds.
    pub engine_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            engine_path: DEFAULT_ENGINE_PATH.to_string(),
            engine_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    /// Default settings file location under the platform config directory.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("Textlens")
            .join("settings.json")
    }

    /// Load settings, falling back to defaults when the file is absent.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn engine_timeout(&self) -> Duration {
        Duration::from_secs(self.engine_timeout_secs)
    }
}
