//! Color-string parsing.
//!
//! CSS notations (hex, `rgb()`/`rgba()`, `hsl()`, named colors and the
//! newer functional forms) go through the `color` crate. The `hsv()`/`hsb()`
//! form a desktop color picker may hand back is not CSS and is handled here.
//! Parsing never fails from the caller's point of view: [`parse_color`]
//! falls back to [`FALLBACK_COLOR`].

use ::color::Srgb;
use image::Rgba;
use regex::Regex;
use std::sync::LazyLock;

/// Dark slate gray, `#263238`. Default background and parse fallback.
pub const FALLBACK_COLOR: Rgba<u8> = Rgba([38, 50, 56, 255]);

/// Hex form of [`FALLBACK_COLOR`], as a user would type it.
pub const DEFAULT_BACKGROUND: &str = "#263238";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("Empty color string")]
    Empty,

    #[error("Unknown color specifier '{spec}': {reason}")]
    Unknown { spec: String, reason: String },

    #[error("Color component out of range in '{0}'")]
    OutOfRange(String),
}

static HSV: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^hs[bv]\(\s*(\d+\.?\d*)\s*,\s*(\d+\.?\d*)%\s*,\s*(\d+\.?\d*)%\s*\)$").unwrap()
});

/// Resolves a color string, falling back to [`FALLBACK_COLOR`] on any error.
pub fn parse_color(spec: &str) -> Rgba<u8> {
    match try_parse_color(spec) {
        Ok(color) => color,
        Err(e) => {
            log::warn!("[COLOR] {} — using fallback {}", e, DEFAULT_BACKGROUND);
            FALLBACK_COLOR
        }
    }
}

/// Resolves a color string to RGBA, reporting why it could not be parsed.
pub fn try_parse_color(spec: &str) -> Result<Rgba<u8>, ColorError> {
    let spec = spec.trim().to_ascii_lowercase();
    if spec.is_empty() {
        return Err(ColorError::Empty);
    }

    if let Some(caps) = HSV.captures(&spec) {
        let (h, s, v) = hue_triplet(&caps).ok_or_else(|| ColorError::OutOfRange(spec.clone()))?;
        let [r, g, b] = hsv_to_rgb(h, s, v);
        return Ok(Rgba([r, g, b, 255]));
    }

    let parsed = ::color::parse_color(&spec).map_err(|e| ColorError::Unknown {
        spec: spec.clone(),
        reason: e.to_string(),
    })?;
    let rgba = parsed.to_alpha_color::<Srgb>().to_rgba8();
    Ok(Rgba([rgba.r, rgba.g, rgba.b, rgba.a]))
}

/// Percentage in `0..=100` as a unit fraction.
fn parse_percent(text: &str) -> Option<f64> {
    let value: f64 = text.parse().ok()?;
    (0.0..=100.0).contains(&value).then_some(value / 100.0)
}

/// Hue in degrees plus two percentages, as unit fractions.
fn hue_triplet(caps: &regex::Captures<'_>) -> Option<(f64, f64, f64)> {
    let hue: f64 = caps[1].parse().ok()?;
    let h = (hue % 360.0) / 360.0;
    Some((h, parse_percent(&caps[2])?, parse_percent(&caps[3])?))
}

fn unit_to_byte(value: f64) -> u8 {
    (value * 255.0 + 0.5).clamp(0.0, 255.0) as u8
}

fn hsv_to_rgb(h: f64, s: f64, v: f64) -> [u8; 3] {
    if s == 0.0 {
        let c = unit_to_byte(v);
        return [c, c, c];
    }
    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    let (r, g, b) = match sector as i32 % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    [unit_to_byte(r), unit_to_byte(g), unit_to_byte(b)]
}
