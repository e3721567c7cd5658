//! Drop-shadow synthesis.
//!
//! The shadow is the image's alpha channel stamped in a flat tint onto a
//! padded canvas, softened by repeated passes of a small blur, with the
//! original pasted back on top.

use image::{Pixel, Rgba, RgbaImage};

/// Side of the blur kernel window.
const KERNEL_SIZE: usize = 5;

/// Ring kernel: weight 1 on the 16 outer cells of the 5×5 window, 0 inside.
#[rustfmt::skip]
const BLUR_KERNEL: [[u32; KERNEL_SIZE]; KERNEL_SIZE] = [
    [1, 1, 1, 1, 1],
    [1, 0, 0, 0, 1],
    [1, 0, 0, 0, 1],
    [1, 0, 0, 0, 1],
    [1, 1, 1, 1, 1],
];

const BLUR_DIVISOR: u32 = 16;

/// Pixels closer than this to any canvas edge are left untouched by a pass.
const BLUR_MARGIN: u32 = (KERNEL_SIZE / 2) as u32;

/// Shape and tint of the drop shadow.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowOptions {
    /// Shadow displacement relative to the image, in pixels.
    pub offset: (i32, i32),
    /// Fill of the enlarged canvas before the shadow is stamped.
    pub background: Rgba<u8>,
    /// Tint of the silhouette; a low alpha keeps it translucent.
    pub color: Rgba<u8>,
    /// Padding added on all four sides.
    pub border: u32,
    /// Number of blur passes. 0 leaves a hard-edged silhouette.
    pub iterations: u32,
}

impl Default for ShadowOptions {
    fn default() -> Self {
        Self {
            offset: (10, 10),
            background: Rgba([0, 0, 0, 0]),
            color: Rgba([0, 0, 0, 80]),
            border: 50,
            iterations: 5,
        }
    }
}

impl ShadowOptions {
    /// Canvas size for an image of `width × height`, saturating at `u32::MAX`.
    pub fn canvas_size(&self, width: u32, height: u32) -> (u32, u32) {
        let padding = self.border.saturating_mul(2);
        (
            width
                .saturating_add(self.offset.0.unsigned_abs())
                .saturating_add(padding),
            height
                .saturating_add(self.offset.1.unsigned_abs())
                .saturating_add(padding),
        )
    }

    /// Where the silhouette's top-left corner lands on the canvas.
    /// A negative offset grows the canvas but never moves the silhouette.
    fn shadow_origin(&self) -> (u32, u32) {
        (
            self.border.saturating_add(self.offset.0.max(0) as u32),
            self.border.saturating_add(self.offset.1.max(0) as u32),
        )
    }
}

/// Places `image` on an enlarged canvas above a blurred, tinted copy of its
/// silhouette.
///
/// The canvas grows by `|offset|` plus `2 * border` on each axis. The
/// original is pasted at `(border, border)` through its own alpha, so fully
/// opaque pixels come through unchanged.
pub fn add_shadow(image: &RgbaImage, options: &ShadowOptions) -> RgbaImage {
    let (width, height) = options.canvas_size(image.width(), image.height());
    let mut canvas = RgbaImage::from_pixel(width, height, options.background);

    let (shadow_x, shadow_y) = options.shadow_origin();
    stamp_silhouette(&mut canvas, image, shadow_x, shadow_y, options.color);

    for _ in 0..options.iterations {
        canvas = blur(&canvas);
    }

    paste_masked(&mut canvas, image, options.border, options.border);

    log::debug!(
        "[STYLE] Shadow canvas {}x{} (offset {:?}, border {}, {} blur passes)",
        width,
        height,
        options.offset,
        options.border,
        options.iterations
    );

    canvas
}

/// One pass of the fixed ring blur, per channel.
///
/// Pixels within [`BLUR_MARGIN`] of an edge are copied as they are.
pub fn blur(source: &RgbaImage) -> RgbaImage {
    let (width, height) = source.dimensions();
    let mut out = source.clone();
    if width <= 2 * BLUR_MARGIN || height <= 2 * BLUR_MARGIN {
        return out;
    }

    for y in BLUR_MARGIN..height - BLUR_MARGIN {
        for x in BLUR_MARGIN..width - BLUR_MARGIN {
            let mut sums = [0u32; 4];
            for (ky, row) in BLUR_KERNEL.iter().enumerate() {
                for (kx, &weight) in row.iter().enumerate() {
                    if weight == 0 {
                        continue;
                    }
                    let sample = source.get_pixel(
                        x + kx as u32 - BLUR_MARGIN,
                        y + ky as u32 - BLUR_MARGIN,
                    );
                    for (sum, &channel) in sums.iter_mut().zip(sample.channels()) {
                        *sum += weight * channel as u32;
                    }
                }
            }
            let blurred = sums.map(|sum| ((sum + BLUR_DIVISOR / 2) / BLUR_DIVISOR) as u8);
            out.put_pixel(x, y, Rgba(blurred));
        }
    }

    out
}

/// Fills `color` onto the canvas through `stencil`'s alpha channel.
fn stamp_silhouette(
    canvas: &mut RgbaImage,
    stencil: &RgbaImage,
    x: u32,
    y: u32,
    color: Rgba<u8>,
) {
    for (sx, sy, pixel) in stencil.enumerate_pixels() {
        let (cx, cy) = (x.saturating_add(sx), y.saturating_add(sy));
        if cx >= canvas.width() || cy >= canvas.height() {
            continue;
        }
        let dst = canvas.get_pixel_mut(cx, cy);
        *dst = blend(*dst, color, pixel.0[3]);
    }
}

/// Pastes `image` onto the canvas using its own alpha as the paste mask.
fn paste_masked(canvas: &mut RgbaImage, image: &RgbaImage, x: u32, y: u32) {
    for (sx, sy, pixel) in image.enumerate_pixels() {
        let (cx, cy) = (x.saturating_add(sx), y.saturating_add(sy));
        if cx >= canvas.width() || cy >= canvas.height() {
            continue;
        }
        let dst = canvas.get_pixel_mut(cx, cy);
        *dst = blend(*dst, *pixel, pixel.0[3]);
    }
}

/// Linear per-channel blend of `src` over `dst` by `mask`, alpha included.
fn blend(dst: Rgba<u8>, src: Rgba<u8>, mask: u8) -> Rgba<u8> {
    match mask {
        0 => dst,
        255 => src,
        m => {
            let m = m as u32;
            dst.map2(&src, |d, s| ((s as u32 * m + d as u32 * (255 - m) + 127) / 255) as u8)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opaque(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([200, 30, 40, 255]))
    }

    #[test]
    fn canvas_size_follows_offset_and_border() {
        for (offset, border) in [((10, 10), 50), ((-7, 3), 0), ((0, -12), 4), ((0, 0), 0)] {
            let options = ShadowOptions {
                offset,
                border,
                iterations: 1,
                ..ShadowOptions::default()
            };
            let out = add_shadow(&opaque(13, 9), &options);
            assert_eq!(
                out.dimensions(),
                (
                    13 + offset.0.unsigned_abs() + 2 * border,
                    9 + offset.1.unsigned_abs() + 2 * border
                )
            );
        }
    }

    #[test]
    fn original_pixels_survive_at_border() {
        let mut image = opaque(20, 12);
        image.put_pixel(3, 4, Rgba([1, 2, 3, 255]));
        let options = ShadowOptions::default();
        let out = add_shadow(&image, &options);
        let b = options.border;
        for (x, y, pixel) in image.enumerate_pixels() {
            assert_eq!(out.get_pixel(b + x, b + y), pixel);
        }
    }

    #[test]
    fn zero_iterations_leaves_hard_silhouette() {
        let options = ShadowOptions {
            offset: (4, 4),
            border: 2,
            iterations: 0,
            ..ShadowOptions::default()
        };
        let out = add_shadow(&opaque(10, 10), &options);
        // Silhouette spans (6..16, 6..16); only its bottom-right part is uncovered.
        assert_eq!(*out.get_pixel(14, 14), options.color);
        assert_eq!(*out.get_pixel(0, 0), options.background);
        assert_eq!(*out.get_pixel(17, 17), options.background);
    }

    #[test]
    fn negative_offset_grows_canvas_without_moving_silhouette() {
        let options = ShadowOptions {
            offset: (-4, -4),
            border: 2,
            iterations: 0,
            ..ShadowOptions::default()
        };
        let image = opaque(10, 10);
        let out = add_shadow(&image, &options);

        assert_eq!(out.dimensions(), (18, 18));
        // Silhouette sits exactly under the pasted image.
        assert_eq!(out.get_pixel(2, 2), image.get_pixel(0, 0));
        assert_eq!(*out.get_pixel(12, 12), options.background);
        assert_eq!(*out.get_pixel(12, 5), options.background);
        assert_eq!(*out.get_pixel(1, 1), options.background);
    }

    #[test]
    fn canvas_size_saturates_on_huge_border() {
        let options = ShadowOptions {
            border: u32::MAX / 2,
            offset: (i32::MIN, 10),
            ..ShadowOptions::default()
        };
        assert_eq!(options.canvas_size(100, 60), (u32::MAX, u32::MAX));
        assert_eq!(options.shadow_origin(), (u32::MAX / 2, u32::MAX / 2 + 10));
    }

    #[test]
    fn blur_softens_silhouette_edges() {
        let sharp = ShadowOptions {
            iterations: 0,
            ..ShadowOptions::default()
        };
        let soft = ShadowOptions::default();
        let image = opaque(30, 30);
        let hard = add_shadow(&image, &sharp);
        let blurred = add_shadow(&image, &soft);
        // Just outside the silhouette's right edge: empty before blur, tinted after.
        let (x, y) = (50 + 10 + 30 + 1, 50 + 10 + 15);
        assert_eq!(hard.get_pixel(x, y).0[3], 0);
        assert!(blurred.get_pixel(x, y).0[3] > 0);
    }

    #[test]
    fn blur_keeps_uniform_image_and_margins() {
        let uniform = RgbaImage::from_pixel(9, 9, Rgba([50, 60, 70, 80]));
        assert_eq!(blur(&uniform), uniform);

        let mut dot = RgbaImage::new(9, 9);
        dot.put_pixel(4, 4, Rgba([255, 255, 255, 255]));
        let out = blur(&dot);
        // Centre has kernel weight 0 on itself
        assert_eq!(out.get_pixel(4, 4).0[3], 0);
        // Ring cells two steps away each pick up 255 / 16
        assert_eq!(out.get_pixel(6, 4).0[3], 16);
        assert_eq!(out.get_pixel(0, 0).0[3], 0);
    }

    #[test]
    fn blend_is_linear_in_mask() {
        let dst = Rgba([0, 0, 0, 0]);
        let src = Rgba([255, 255, 255, 255]);
        assert_eq!(blend(dst, src, 0), dst);
        assert_eq!(blend(dst, src, 255), src);
        assert_eq!(blend(dst, src, 128), Rgba([128, 128, 128, 128]));
    }
}
