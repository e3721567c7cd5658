//! Snap-Craft: region screenshots with rounded corners, a drop shadow and
//! a solid background.
//!
//! This is the app shell that wires together:
//! - Region capture through an external tool (capture/)
//! - The styling pipeline (style/)
//! - Settings and the take-screenshot action (settings.rs, snap.rs)

pub mod capture;
pub mod settings;
pub mod snap;
pub mod style;

pub use capture::{CaptureError, CaptureProvider, CommandCapture};
pub use settings::Settings;
pub use snap::{take_screenshot, SnapError};

/// Entry point. Takes one screenshot with default settings.
///
/// Failures are logged and returned so the binary can set its exit status.
pub fn run() -> Result<std::path::PathBuf, SnapError> {
    env_logger::init();

    let settings = Settings::default();
    let provider = CommandCapture::detect();
    log::info!(
        "Snap-Craft starting up — tool: {}, directory: {}, background: {}",
        provider.program(),
        settings.output_dir.display(),
        settings.background_color
    );

    take_screenshot(&settings, &provider).inspect_err(|e| log::error!("{}", e))
}
