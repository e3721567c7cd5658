//! Region capture domain: public API.
//!
//! This module owns everything that talks to the OS to obtain pixels.
//! The styling pipeline never sees a process or a path; it gets an image.

mod screenshot;
mod temp_file;

pub use screenshot::{CaptureError, CommandCapture};
pub use temp_file::TempCapture;

use std::path::Path;

/// Something that can ask the user for a screen region and save it as PNG.
///
/// Blocks until the selection finishes or is cancelled.
pub trait CaptureProvider {
    fn capture_region(&self, dest: &Path) -> Result<(), CaptureError>;
}
