//! Integration tests for the take-screenshot action.
//!
//! A fake capture provider stands in for the interactive tool: it writes a
//! fixture PNG (or garbage, or nothing) to the requested path.

use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use snap_craft_lib::capture::{CaptureError, CaptureProvider};
use snap_craft_lib::snap::{take_screenshot, SnapError};
use snap_craft_lib::Settings;
use tempfile::TempDir;

enum Fake {
    Writes(RgbaImage),
    WritesGarbage,
    Fails,
}

impl CaptureProvider for Fake {
    fn capture_region(&self, dest: &Path) -> Result<(), CaptureError> {
        match self {
            Fake::Writes(image) => {
                image.save(dest).expect("write fixture");
                Ok(())
            }
            Fake::WritesGarbage => {
                std::fs::write(dest, b"definitely not a png").expect("write garbage");
                Ok(())
            }
            Fake::Fails => Err(CaptureError::ToolFailed {
                program: "maim".to_string(),
                status: "exit status: 1".to_string(),
            }),
        }
    }
}

fn red_fixture() -> RgbaImage {
    RgbaImage::from_pixel(100, 60, Rgba([255, 0, 0, 255]))
}

fn settings_in(dir: &TempDir) -> (Settings, PathBuf) {
    let temp = dir.path().join("temp_screenshot.png");
    let settings = Settings::default()
        .with_output_dir(dir.path().join("out"))
        .with_background_color("white")
        .with_temp_path(&temp);
    (settings, temp)
}

// ── Success path ─────────────────────────────────────────────────────

#[test]
fn writes_styled_png_and_removes_temp_file() {
    let dir = TempDir::new().unwrap();
    let (settings, temp) = settings_in(&dir);

    let path = take_screenshot(&settings, &Fake::Writes(red_fixture())).unwrap();

    assert!(!temp.exists(), "temp capture should be removed");
    assert_eq!(path.parent(), Some(settings.output_dir.as_path()));
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("screenshot_"), "unexpected name {}", name);
    assert!(name.ends_with(".png"));
    assert_eq!(name.len(), "screenshot_YYYYMMDD_HHMMSS.png".len());

    let saved = image::open(&path).unwrap().to_rgba8();
    assert_eq!(saved.dimensions(), (210, 170));
    assert!(saved.pixels().all(|p| p.0[3] == 255));
    assert_eq!(*saved.get_pixel(0, 0), Rgba([255, 255, 255, 255]));
    assert_eq!(*saved.get_pixel(100, 80), Rgba([255, 0, 0, 255]));
}

#[test]
fn creates_nested_output_directory() {
    let dir = TempDir::new().unwrap();
    let (settings, _) = settings_in(&dir);
    let settings = settings.with_output_dir(dir.path().join("a").join("b"));

    let path = take_screenshot(&settings, &Fake::Writes(red_fixture())).unwrap();
    assert!(path.starts_with(dir.path().join("a").join("b")));
    assert!(path.is_file());
}

#[test]
fn bad_background_color_falls_back() {
    let dir = TempDir::new().unwrap();
    let (settings, _) = settings_in(&dir);
    let settings = settings.with_background_color("not-a-color");

    let path = take_screenshot(&settings, &Fake::Writes(red_fixture())).unwrap();
    let saved = image::open(&path).unwrap().to_rgba8();
    assert_eq!(*saved.get_pixel(0, 0), Rgba([38, 50, 56, 255]));
}

// ── Failure paths ────────────────────────────────────────────────────

#[test]
fn capture_failure_is_reported_and_cleaned_up() {
    let dir = TempDir::new().unwrap();
    let (settings, temp) = settings_in(&dir);

    let result = take_screenshot(&settings, &Fake::Fails);

    assert!(matches!(
        result,
        Err(SnapError::Capture(CaptureError::ToolFailed { .. }))
    ));
    assert!(!temp.exists());
    let written = std::fs::read_dir(&settings.output_dir).unwrap().count();
    assert_eq!(written, 0, "no output file on abort");
}

#[test]
fn undecodable_capture_is_reported_and_cleaned_up() {
    let dir = TempDir::new().unwrap();
    let (settings, temp) = settings_in(&dir);

    let result = take_screenshot(&settings, &Fake::WritesGarbage);

    assert!(matches!(result, Err(SnapError::Decode(_))));
    assert!(!temp.exists());
}

#[cfg(unix)]
#[test]
fn uncreatable_directory_aborts_before_capture() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("file");
    std::fs::write(&blocker, b"").unwrap();
    let (settings, temp) = settings_in(&dir);
    let settings = settings.with_output_dir(blocker.join("sub"));

    let result = take_screenshot(&settings, &Fake::Writes(red_fixture()));

    assert!(matches!(result, Err(SnapError::CreateDir { .. })));
    assert!(!temp.exists(), "capture must not run");
}
