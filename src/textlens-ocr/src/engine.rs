//! Recognition engine subprocess invocation

use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

/// Default wall-clock limit for one engine run, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Result of one engine invocation. Produced exactly once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionOutcome {
    /// Engine produced text; stdout content verbatim, no trimming.
    Success(String),
    /// The process failed to launch, exited non-zero, or timed out.
    EngineFailure(String),
    /// Valid run with empty stdout.
    NoTextDetected,
    /// A zero-length image buffer was handed to the invoker.
    Empty,
}

/// Handle to the external recognition executable.
///
/// The engine is invoked as `<path> - -`: the two positional dashes tell it
/// to read the image from stdin and write recognized text to stdout. Each
/// invocation is one-shot; there is no retry and no coordination between
/// concurrent runs.
pub struct Engine {
    path: String,
    timeout: Duration,
}

impl Engine {
    pub fn new(path: impl Into<String>, timeout: Duration) -> Self {
        Self {
            path: path.into(),
            timeout,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Run the engine over one image buffer.
    ///
    /// Suspends until the subprocess terminates, errors, or exceeds the
    /// configured timeout. The classification table:
    /// launch/exit error or timeout -> `EngineFailure`; clean exit with
    /// empty stdout -> `NoTextDetected`; non-empty stdout -> `Success`.
    /// stderr content is logged but is not a failure on its own.
    pub async fn recognize(&self, image: &[u8]) -> RecognitionOutcome {
        if image.is_empty() {
            return RecognitionOutcome::Empty;
        }

        debug!("invoking {} on {} image bytes", self.path, image.len());

        let mut child = match Command::new(&self.path)
            .arg("-")
            .arg("-")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                warn!("failed to launch {}: {}", self.path, e);
                return RecognitionOutcome::EngineFailure(e.to_string());
            }
        };

        // Write the full buffer, then close stdin to signal end-of-input.
        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(image).await {
                warn!("failed to write image to engine stdin: {}", e);
                return RecognitionOutcome::EngineFailure(e.to_string());
            }
        }

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => return RecognitionOutcome::EngineFailure(e.to_string()),
            Err(_) => {
                warn!("{} timed out after {:?}", self.path, self.timeout);
                return RecognitionOutcome::EngineFailure(format!(
                    "engine timed out after {}s",
                    self.timeout.as_secs()
                ));
            }
        };

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.is_empty() {
            warn!(
                "engine stderr: {}",
                stderr.chars().take(500).collect::<String>()
            );
        }

        if !output.status.success() {
            let detail = if stderr.trim().is_empty() {
                output.status.to_string()
            } else {
                stderr.into_owned()
            };
            return RecognitionOutcome::EngineFailure(detail);
        }

        if output.stdout.is_empty() {
            return RecognitionOutcome::NoTextDetected;
        }

        RecognitionOutcome::Success(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Check whether the configured engine executable can be launched at all.
pub fn is_available(path: &str) -> bool {
    std::process::Command::new(path)
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}
