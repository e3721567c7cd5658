//! The "take screenshot" action: capture, style, save.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use image::{ImageFormat, RgbaImage};

use crate::capture::{CaptureError, CaptureProvider, TempCapture};
use crate::settings::Settings;
use crate::style;

#[derive(Debug, thiserror::Error)]
pub enum SnapError {
    #[error("Could not create directory: {path}\n{reason}")]
    CreateDir { path: String, reason: String },

    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error("Could not read captured image: {0}")]
    Decode(String),

    #[error("Could not save screenshot: {0}")]
    Save(String),
}

/// `screenshot_<YYYYMMDD_HHMMSS>.png`
pub fn screenshot_file_name(time: &DateTime<Local>) -> String {
    format!("screenshot_{}.png", time.format("%Y%m%d_%H%M%S"))
}

/// Captures a region with `provider`, styles it and writes a timestamped PNG
/// into `settings.output_dir`. Returns the path written.
///
/// The output directory is created before the capture tool runs. The temp
/// capture file is removed on every exit path.
pub fn take_screenshot(
    settings: &Settings,
    provider: &dyn CaptureProvider,
) -> Result<PathBuf, SnapError> {
    ensure_output_dir(&settings.output_dir)?;

    let output = settings
        .output_dir
        .join(screenshot_file_name(&Local::now()));

    let temp = TempCapture::new(&settings.temp_path);

    log::info!("Select the area you want to screenshot...");
    let start = std::time::Instant::now();
    provider.capture_region(temp.path())?;
    log::info!(
        "[CAPTURE] Region captured in {}ms",
        start.elapsed().as_millis()
    );

    let capture = image::open(temp.path())
        .map_err(|e| SnapError::Decode(e.to_string()))?
        .to_rgba8();

    let styled = style::stylize(capture, &settings.style, &settings.background_color);

    save_png(&styled, &output)?;

    log::info!("Screenshot saved as: {}", output.display());
    Ok(output)
}

/// Encodes `image` to `path`, removing any partially written file on failure.
fn save_png(image: &RgbaImage, path: &Path) -> Result<(), SnapError> {
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| {
            if path.exists() {
                if let Err(remove) = std::fs::remove_file(path) {
                    log::warn!(
                        "Failed to remove partial screenshot {}: {}",
                        path.display(),
                        remove
                    );
                }
            }
            SnapError::Save(e.to_string())
        })
}

fn ensure_output_dir(dir: &Path) -> Result<(), SnapError> {
    if dir.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(dir).map_err(|e| SnapError::CreateDir {
        path: dir.display().to_string(),
        reason: e.to_string(),
    })?;
    log::info!("Created screenshot directory {}", dir.display());
    Ok(())
}
