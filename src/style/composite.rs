//! Flattening onto a solid background.

use image::{Rgba, RgbaImage};

use super::color::parse_color;

/// Composites `image` over a solid background named by `background`.
///
/// An unparseable color string resolves to the fallback color instead of
/// failing; see [`parse_color`].
pub fn composite(image: &RgbaImage, background: &str) -> RgbaImage {
    composite_over(image, parse_color(background))
}

/// Composites `image` over an opaque canvas of `background`, using the
/// "over" operator. The background's own alpha is ignored, so the result
/// is fully opaque.
pub fn composite_over(image: &RgbaImage, background: Rgba<u8>) -> RgbaImage {
    let mut out = RgbaImage::new(image.width(), image.height());
    for (dst, src) in out.pixels_mut().zip(image.pixels()) {
        *dst = over(*src, background);
    }
    out
}

fn over(fg: Rgba<u8>, bg: Rgba<u8>) -> Rgba<u8> {
    let a = fg.0[3] as u32;
    let mix = |f: u8, b: u8| ((f as u32 * a + b as u32 * (255 - a) + 127) / 255) as u8;
    Rgba([
        mix(fg.0[0], bg.0[0]),
        mix(fg.0[1], bg.0[1]),
        mix(fg.0[2], bg.0[2]),
        255,
    ])
}
