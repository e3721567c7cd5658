//! Rounded-corner mask builder, the functional core.
//!
//! Pure raster geometry: dimensions and a radius in, an 8-bit mask out.

use image::{GrayImage, Luma, RgbaImage};

const OPAQUE: Luma<u8> = Luma([255]);

/// The four corners of the mask, each carrying the angular sweep of its
/// quarter-disk (degrees, 0° = +x, clockwise since y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Corner {
    /// 180° → 270°
    TopLeft,
    /// 270° → 360°
    TopRight,
    /// 90° → 180°
    BottomLeft,
    /// 0° → 90°
    BottomRight,
}

impl Corner {
    const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// Top-left pixel of the corner's `radius × radius` square, signed so a
    /// degenerate radius can reach past the image edge.
    fn origin(self, width: u32, height: u32, radius: u32) -> (i64, i64) {
        let right = width as i64 - radius as i64;
        let bottom = height as i64 - radius as i64;
        match self {
            Corner::TopLeft => (0, 0),
            Corner::TopRight => (right, 0),
            Corner::BottomLeft => (0, bottom),
            Corner::BottomRight => (right, bottom),
        }
    }

    /// Disk centre in doubled pixel coordinates (the inner corner of the square).
    fn centre2(self, width: u32, height: u32, radius: u32) -> (i64, i64) {
        let (x0, y0) = self.origin(width, height, radius);
        let r = radius as i64;
        match self {
            Corner::TopLeft => (2 * (x0 + r), 2 * (y0 + r)),
            Corner::TopRight => (2 * x0, 2 * (y0 + r)),
            Corner::BottomLeft => (2 * (x0 + r), 2 * y0),
            Corner::BottomRight => (2 * x0, 2 * y0),
        }
    }
}

/// Builds a `width × height` mask shaped like a rectangle with quarter-circle
/// corners of `radius` pixels.
///
/// The mask starts fully transparent and is painted opaque in two passes:
/// a cross of two rectangles covering everything but the four corner
/// squares, then a quarter-disk in each corner square.
///
/// A radius above half the shorter side overlaps the arcs. That input is not
/// rejected; the result is simply the union of whatever the fills cover.
pub fn rounded_rect_mask(width: u32, height: u32, radius: u32) -> GrayImage {
    let mut mask = GrayImage::new(width, height);

    fill_rect(&mut mask, radius, 0, width.saturating_sub(radius), height);
    fill_rect(&mut mask, 0, radius, width, height.saturating_sub(radius));

    if radius > 0 {
        for corner in Corner::ALL {
            fill_quarter_disk(&mut mask, corner, radius);
        }
    }

    mask
}

/// Replaces the image's alpha channel with a rounded-rectangle mask.
///
/// Takes the image by value: the original alpha is overwritten, so the
/// caller gives it up rather than keeping an alias to stale data.
pub fn round_corners(mut image: RgbaImage, radius: u32) -> RgbaImage {
    let mask = rounded_rect_mask(image.width(), image.height(), radius);
    put_alpha(&mut image, &mask);
    log::debug!(
        "[STYLE] Rounded corners of {}x{} image, radius {}",
        image.width(),
        image.height(),
        radius
    );
    image
}

/// Overwrites every pixel's alpha with the mask value at the same position.
///
/// Both images must have the same dimensions.
pub fn put_alpha(image: &mut RgbaImage, mask: &GrayImage) {
    debug_assert_eq!(image.dimensions(), mask.dimensions());
    for (pixel, alpha) in image.pixels_mut().zip(mask.pixels()) {
        pixel.0[3] = alpha.0[0];
    }
}

/// Paints the half-open rectangle `[x0, x1) × [y0, y1)`, clipped to the mask.
fn fill_rect(mask: &mut GrayImage, x0: u32, y0: u32, x1: u32, y1: u32) {
    let x1 = x1.min(mask.width());
    let y1 = y1.min(mask.height());
    for y in y0..y1 {
        for x in x0..x1 {
            mask.put_pixel(x, y, OPAQUE);
        }
    }
}

/// Paints the quarter-disk of `corner`, tangent to the two adjacent edges.
///
/// A pixel is inside when its centre lies within `radius - ½` of the disk
/// centre, which keeps the outermost corner pixel transparent for any
/// radius ≥ 1. Doubled coordinates keep the test in integers.
fn fill_quarter_disk(mask: &mut GrayImage, corner: Corner, radius: u32) {
    let (width, height) = mask.dimensions();
    let (x0, y0) = corner.origin(width, height, radius);
    let (cx2, cy2) = corner.centre2(width, height, radius);
    let limit = (2 * radius as i64 - 1).pow(2);

    for y in y0.max(0)..(y0 + radius as i64).min(height as i64) {
        for x in x0.max(0)..(x0 + radius as i64).min(width as i64) {
            let dx = 2 * x + 1 - cx2;
            let dy = 2 * y + 1 - cy2;
            if dx * dx + dy * dy <= limit {
                mask.put_pixel(x as u32, y as u32, OPAQUE);
            }
        }
    }
}
