//! Region capture through an external selection tool.
//!
//! This is the infrastructure layer. It spawns a process and waits.
//! Region selection, multi-monitor handling and cancellation all belong to
//! the tool; we only see its exit status and the file it leaves behind.

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use super::CaptureProvider;

/// Known interactive region-capture tools, in detection order.
/// The destination path is appended after `args`.
const PRESETS: &[(&str, &[&str])] = &[
    ("maim", &["-s"]),
    ("scrot", &["-s", "-o"]),
    ("gnome-screenshot", &["-a", "-f"]),
    ("screencapture", &["-i"]),
];

/// Captures by running `program args... <dest>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandCapture {
    program: String,
    args: Vec<String>,
}

impl CommandCapture {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// `maim -s <dest>`: interactive selection on X11.
    pub fn maim() -> Self {
        Self::new("maim", ["-s"])
    }

    /// First preset whose executable is on `PATH`, or [`CommandCapture::maim`]
    /// when none is, so the error names the tool the user is expected to install.
    pub fn detect() -> Self {
        Self::detect_with(|program| which::which(program).is_ok())
    }

    fn detect_with(is_installed: impl Fn(&str) -> bool) -> Self {
        PRESETS
            .iter()
            .find(|(program, _)| is_installed(program))
            .map(|&(program, args)| Self::new(program, args.iter().copied()))
            .unwrap_or_else(Self::maim)
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for CommandCapture {
    fn default() -> Self {
        Self::maim()
    }
}

impl CaptureProvider for CommandCapture {
    fn capture_region(&self, dest: &Path) -> Result<(), CaptureError> {
        let executable = which::which(&self.program).map_err(|_| CaptureError::ToolNotFound {
            program: self.program.clone(),
        })?;

        log::info!(
            "[CAPTURE] Running {} {} {}",
            self.program,
            self.args.join(" "),
            dest.display()
        );

        let status = Command::new(executable)
            .args(&self.args)
            .arg(dest)
            .status()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => CaptureError::ToolNotFound {
                    program: self.program.clone(),
                },
                _ => CaptureError::Spawn(e.to_string()),
            })?;

        check_outcome(&self.program, status, dest)
    }
}

/// A zero exit with no file means the tool swallowed a cancelled selection.
fn check_outcome(program: &str, status: ExitStatus, dest: &Path) -> Result<(), CaptureError> {
    if !status.success() {
        return Err(CaptureError::ToolFailed {
            program: program.to_string(),
            status: status.to_string(),
        });
    }
    if !dest.is_file() {
        return Err(CaptureError::NoOutput {
            path: dest.to_path_buf(),
        });
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("Could not find '{program}'. Please install {program} first.")]
    ToolNotFound { program: String },

    #[error("Failed to start capture tool: {0}")]
    Spawn(String),

    #[error("Failed to take screenshot: {program} {status}")]
    ToolFailed { program: String, status: String },

    #[error("Capture tool produced no image at {}", path.display())]
    NoOutput { path: PathBuf },
}
