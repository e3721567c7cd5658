//! User-facing settings for a capture.
//!
//! Settings are an explicit value handed to [`crate::snap::take_screenshot`];
//! nothing is read from ambient state and nothing is persisted between runs.

use std::path::{Path, PathBuf};

use crate::style::{StyleOptions, DEFAULT_BACKGROUND};

/// Fixed name of the intermediate capture, relative to the working directory.
pub const TEMP_CAPTURE_FILE: &str = "temp_screenshot.png";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Where finished screenshots are written. Created if missing.
    pub output_dir: PathBuf,
    /// Background color string, hex or named.
    pub background_color: String,
    /// Where the capture tool writes before processing. Always removed afterwards.
    pub temp_path: PathBuf,
    pub style: StyleOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            background_color: DEFAULT_BACKGROUND.to_string(),
            temp_path: PathBuf::from(TEMP_CAPTURE_FILE),
            style: StyleOptions::default(),
        }
    }
}

impl Settings {
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = color.into();
        self
    }

    pub fn with_temp_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.temp_path = path.into();
        self
    }

    pub fn with_style(mut self, style: StyleOptions) -> Self {
        self.style = style;
        self
    }
}

/// `<Pictures>/screenshots` if it already exists, otherwise `<Pictures>`.
///
/// `<Pictures>` is the platform pictures directory, or `~/Pictures` when the
/// platform does not define one.
pub fn default_output_dir() -> PathBuf {
    let pictures = dirs::picture_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Pictures")))
        .unwrap_or_else(|| PathBuf::from("Pictures"));
    pick_output_dir(&pictures)
}

fn pick_output_dir(pictures: &Path) -> PathBuf {
    let screenshots = pictures.join("screenshots");
    if screenshots.is_dir() {
        screenshots
    } else {
        pictures.to_path_buf()
    }
}
