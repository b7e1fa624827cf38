//! # External Tools
//!
//! Everything interesting this program does happens in other executables:
//! the renderer turns a notation file into a PDF and a MIDI file, the
//! merger concatenates PDFs, the opener shows a file in the desktop's
//! default viewer, and the player is whatever command the user passes to
//! `listen`.
//!
//! The [`Toolchain`] trait is the seam between orchestration and those
//! processes:
//!
//! - [`process::ProcessTools`]: spawns the real executables
//! - [`fake::FakeTools`]: scripted outcomes for tests, writes the artifacts
//!   a real renderer would
//!
//! Calls are synchronous; each returns once the child has exited.

use crate::error::Result;
use std::path::{Path, PathBuf};

#[cfg(any(test, feature = "test_utils"))]
pub mod fake;
pub mod process;

/// Extensions a renderer may use for its MIDI output.
pub const MIDI_EXTENSIONS: [&str; 2] = ["midi", "mid"];

/// Exit outcome of an external process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolStatus {
    pub success: bool,
    pub code: Option<i32>,
    /// Captured stderr, empty when the stream was inherited
    pub stderr: String,
}

impl ToolStatus {
    pub fn ok() -> Self {
        Self {
            success: true,
            code: Some(0),
            stderr: String::new(),
        }
    }

    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            code: Some(code),
            stderr: stderr.into(),
        }
    }
}

/// Result of one renderer run: the exit status plus whichever artifacts
/// exist next to the output base afterwards.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub status: ToolStatus,
    pub pdf: Option<PathBuf>,
    pub midi: Option<PathBuf>,
}

impl RenderOutput {
    pub fn collect(status: ToolStatus, output_base: &Path) -> Self {
        Self {
            status,
            pdf: existing(output_base, &["pdf"]),
            midi: existing(output_base, &MIDI_EXTENSIONS),
        }
    }
}

/// `<output_base>.<ext>`, appended rather than replacing: IDs may contain dots.
pub fn artifact_path(output_base: &Path, ext: &str) -> PathBuf {
    let mut name = output_base.as_os_str().to_owned();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

fn existing(output_base: &Path, extensions: &[&str]) -> Option<PathBuf> {
    extensions
        .iter()
        .map(|ext| artifact_path(output_base, ext))
        .find(|path| path.is_file())
}

/// Remove artifacts a previous render left at `output_base`.
pub fn clear_artifacts(output_base: &Path) -> Result<()> {
    for ext in std::iter::once("pdf").chain(MIDI_EXTENSIONS) {
        let path = artifact_path(output_base, ext);
        match std::fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Narrow interface over the external executables.
pub trait Toolchain {
    /// Name of the renderer, for messages
    fn render_tool(&self) -> &str;

    /// Name of the PDF merger, for messages
    fn merge_tool(&self) -> &str;

    /// Render `source`, writing `<output_base>.pdf` and `<output_base>.midi`.
    /// A missing renderer executable is an error; a non-zero exit is not.
    fn render(&self, source: &Path, output_base: &Path) -> Result<RenderOutput>;

    /// Whether the merger can be found.
    fn merge_available(&self) -> bool;

    /// Concatenate `inputs` in order into `output`.
    fn merge(&self, inputs: &[PathBuf], output: &Path) -> Result<ToolStatus>;

    /// Open `path` with the platform's default application.
    fn open(&self, path: &Path) -> Result<ToolStatus>;

    /// Run `command` through the shell with `media` appended, and wait.
    fn play(&self, command: &str, media: &Path) -> Result<ToolStatus>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_collect_finds_mid_fallback() {
        let temp = TempDir::new().unwrap();
        let base = temp.path().join("temp");
        fs::write(base.with_extension("pdf"), b"%PDF").unwrap();
        fs::write(base.with_extension("mid"), b"MThd").unwrap();

        let out = RenderOutput::collect(ToolStatus::ok(), &base);
        assert_eq!(out.pdf, Some(base.with_extension("pdf")));
        assert_eq!(out.midi, Some(base.with_extension("mid")));
    }

    #[test]
    fn test_artifact_path_keeps_dots_in_id() {
        let base = Path::new("/tmp/ws/1.5_1");
        assert_eq!(artifact_path(base, "pdf"), PathBuf::from("/tmp/ws/1.5_1.pdf"));
    }

    #[test]
    fn test_clear_artifacts() {
        let temp = TempDir::new().unwrap();
        let base = temp.path().join("temp");
        fs::write(base.with_extension("pdf"), b"%PDF").unwrap();
        fs::write(base.with_extension("midi"), b"MThd").unwrap();

        clear_artifacts(&base).unwrap();
        let out = RenderOutput::collect(ToolStatus::ok(), &base);
        assert!(out.pdf.is_none());
        assert!(out.midi.is_none());

        // Nothing left to remove is fine too.
        clear_artifacts(&base).unwrap();
    }
}
