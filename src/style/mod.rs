//! Screenshot styling: public API.
//!
//! Pure pixel pipeline with no I/O: round the corners, drop a shadow,
//! flatten onto the background color.

mod color;
mod composite;
mod corners;
mod shadow;

pub use color::{parse_color, try_parse_color, ColorError, DEFAULT_BACKGROUND, FALLBACK_COLOR};
pub use composite::{composite, composite_over};
pub use corners::{put_alpha, round_corners, rounded_rect_mask};
pub use shadow::{add_shadow, blur, ShadowOptions};

use image::RgbaImage;

/// Corner radius applied to captures.
pub const DEFAULT_CORNER_RADIUS: u32 = 15;

/// Geometry of the styling applied to every capture.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleOptions {
    pub corner_radius: u32,
    pub shadow: ShadowOptions,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            corner_radius: DEFAULT_CORNER_RADIUS,
            shadow: ShadowOptions::default(),
        }
    }
}

/// Runs the full pipeline on a capture and returns the opaque result.
pub fn stylize(capture: RgbaImage, options: &StyleOptions, background: &str) -> RgbaImage {
    let start = std::time::Instant::now();
    let (width, height) = capture.dimensions();

    let rounded = round_corners(capture, options.corner_radius);
    let shadowed = add_shadow(&rounded, &options.shadow);
    let flattened = composite(&shadowed, background);

    log::info!(
        "[STYLE] Styled {}x{} capture into {}x{} in {}ms",
        width,
        height,
        flattened.width(),
        flattened.height(),
        start.elapsed().as_millis()
    );

    flattened
}
