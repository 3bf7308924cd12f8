//! Textlens - Image OCR capture CLI
//!
//! Acquires an image from a file, URL, or capture device and pipes it
//! through the configured recognition engine.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command as ProcessCommand, Stdio};
use std::sync::Arc;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use textlens_capture::{CaptureBackend, ScreenBackend};
use textlens_core::config::Settings;
use textlens_core::host::{Clipboard, EditorSink, HostServices, Notifier};
use textlens_core::selector::AcquisitionMode;
use textlens_core::session::Session;

#[derive(Parser)]
#[command(name = "textlens")]
#[command(about = "Run OCR on images from files, URLs, or capture devices")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Recognize text in a local image file
    File {
        /// Image file to read
        path: PathBuf,

        /// Copy the result to the clipboard instead of printing it
        #[arg(long)]
        copy: bool,
    },

    /// Fetch an image URL and recognize its text
    Url {
        /// Image URL to fetch
        url: String,

        /// Copy the result to the clipboard instead of printing it
        #[arg(long)]
        copy: bool,
    },

    /// Snapshot a capture device and recognize its text
    Capture {
        /// Device id (see `textlens devices`); defaults to the first device
        #[arg(short, long)]
        device: Option<String>,

        /// Copy the result to the clipboard instead of printing it
        #[arg(long)]
        copy: bool,
    },

    /// List capture devices
    Devices,

    /// Show or change settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Check that the recognition engine is available
    Check,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print current settings
    Show,

    /// Set the recognition engine path
    SetEngine { path: String },

    /// Set the engine timeout in seconds
    SetTimeout { secs: u64 },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .init();

    let settings_path = cli
        .config
        .clone()
        .unwrap_or_else(Settings::default_path);
    let settings = Settings::load(&settings_path)?;

    match cli.command {
        Commands::File { path, copy } => {
            cmd_file(settings, path, copy)?;
        }
        Commands::Url { url, copy } => {
            cmd_url(settings, url, copy)?;
        }
        Commands::Capture { device, copy } => {
            cmd_capture(settings, device, copy)?;
        }
        Commands::Devices => {
            cmd_devices()?;
        }
        Commands::Config { action } => {
            cmd_config(settings, &settings_path, action)?;
        }
        Commands::Check => {
            cmd_check(&settings);
        }
    }

    Ok(())
}

#[tokio::main]
async fn cmd_file(settings: Settings, path: PathBuf, copy: bool) -> Result<()> {
    let mut session = cli_session(&settings, copy);
    session.file_chosen(Some(&path)).await;
    Ok(())
}

#[tokio::main]
async fn cmd_url(settings: Settings, url: String, copy: bool) -> Result<()> {
    let mut session = cli_session(&settings, copy);
    session.set_mode(AcquisitionMode::RemoteUrl);
    session.url_submitted(&url).await;
    Ok(())
}

#[tokio::main]
async fn cmd_capture(settings: Settings, device: Option<String>, copy: bool) -> Result<()> {
    let mut session = cli_session(&settings, copy);
    session.set_mode(AcquisitionMode::LiveCapture);

    let device_id = match device {
        Some(id) => id,
        None => {
            let devices = session.devices()?;
            let first = devices
                .first()
                .ok_or_else(|| anyhow::anyhow!("no capture devices found"))?;
            debug!("defaulting to device {} ({})", first.id, first.label);
            first.id.clone()
        }
    };

    session.select_device(Some(device_id));
    session.capture_triggered().await;
    session.close();
    Ok(())
}

fn cmd_devices() -> Result<()> {
    let backend = ScreenBackend::new();
    let devices = backend.enumerate_devices()?;

    println!("found {} capture device(s):\n", devices.len());
    for d in &devices {
        println!("  [{}] {}", d.id, d.label);
    }

    Ok(())
}

fn cmd_config(mut settings: Settings, path: &PathBuf, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            println!("settings file: {:?}", path);
            println!("engine path: {}", settings.engine_path);
            println!("engine timeout: {}s", settings.engine_timeout_secs);
        }
        ConfigAction::SetEngine { path: engine_path } => {
            settings.engine_path = engine_path;
            settings.save(path)?;
            println!("engine path set to: {}", settings.engine_path);
        }
        ConfigAction::SetTimeout { secs } => {
            settings.engine_timeout_secs = secs;
            settings.save(path)?;
            println!("engine timeout set to: {}s", secs);
        }
    }

    Ok(())
}

fn cmd_check(settings: &Settings) {
    println!("checking recognition engine...\n");

    let ok = textlens_ocr::engine::is_available(&settings.engine_path);
    println!(
        "  {}: {}",
        settings.engine_path,
        if ok { "OK" } else { "NOT FOUND" }
    );

    if !ok {
        println!();
        println!("The recognition engine could not be launched.");
        println!("Install tesseract or point textlens at it with:");
        println!("  textlens config set-engine /path/to/tesseract");
    }
}

fn cli_session(settings: &Settings, copy: bool) -> Session {
    let hosts = HostServices {
        // With --copy the "editor" is absent, so results route to the
        // clipboard exactly like a host without an active document view.
        editor: Arc::new(StdoutEditor { active: !copy }),
        clipboard: Arc::new(SystemClipboard),
        notifier: Arc::new(TermNotifier),
    };
    Session::new(Box::new(ScreenBackend::new()), hosts, settings)
}

/// Editor sink over stdout: inserting at the cursor prints the text.
struct StdoutEditor {
    active: bool,
}

impl EditorSink for StdoutEditor {
    fn has_active_sink(&self) -> bool {
        self.active
    }

    fn insert_at_cursor(&self, text: &str) {
        print!("{text}");
        let _ = std::io::stdout().flush();
    }
}

/// System clipboard via the platform clipboard tool.
struct SystemClipboard;

#[cfg(target_os = "macos")]
const CLIPBOARD_COMMANDS: &[&[&str]] = &[&["pbcopy"]];

#[cfg(target_os = "windows")]
const CLIPBOARD_COMMANDS: &[&[&str]] = &[&["clip"]];

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const CLIPBOARD_COMMANDS: &[&[&str]] = &[
    &["wl-copy"],
    &["xclip", "-selection", "clipboard"],
    &["xsel", "--clipboard", "--input"],
];

impl Clipboard for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        let mut last_error = None;

        for command in CLIPBOARD_COMMANDS {
            let mut child = match ProcessCommand::new(command[0])
                .args(&command[1..])
                .stdin(Stdio::piped())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()
            {
                Ok(child) => child,
                Err(e) => {
                    last_error = Some(e.into());
                    continue;
                }
            };

            if let Some(mut stdin) = child.stdin.take() {
                stdin.write_all(text.as_bytes())?;
            }

            let status = child.wait()?;
            if status.success() {
                debug!("copied {} bytes via {}", text.len(), command[0]);
                return Ok(());
            }
            last_error = Some(anyhow::anyhow!("{} exited with {}", command[0], status));
        }

        Err(last_error.unwrap_or_else(|| anyhow::anyhow!("no clipboard tool available")))
    }
}

/// Notifications to stderr; diagnostic detail at debug level.
struct TermNotifier;

impl Notifier for TermNotifier {
    fn notify(&self, message: &str) {
        eprintln!("{message}");
    }

    fn debug_detail(&self, detail: &str) {
        debug!("{detail}");
    }
}
