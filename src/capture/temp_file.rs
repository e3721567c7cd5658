//! Scoped ownership of the temporary capture file.

use std::path::{Path, PathBuf};

/// Deletes the file at `path` when dropped, whether or not it was ever
/// written. Covers early returns and panics during processing alike.
#[derive(Debug)]
pub struct TempCapture {
    path: PathBuf,
}

impl TempCapture {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempCapture {
    fn drop(&mut self) {
        if !self.path.exists() {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => log::debug!("[CAPTURE] Removed temp file {}", self.path.display()),
            Err(e) => log::warn!(
                "[CAPTURE] Failed to remove temp file {}: {}",
                self.path.display(),
                e
            ),
        }
    }
}
