use super::{RenderOutput, ToolStatus, Toolchain};
use crate::error::{Result, ScoreDbError};
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tracing::debug;

/// Toolchain backed by real executables found on `PATH`.
#[derive(Debug, Clone)]
pub struct ProcessTools {
    render_tool: String,
    merge_tool: String,
}

impl ProcessTools {
    pub fn new(render_tool: &str, merge_tool: &str) -> Self {
        Self {
            render_tool: render_tool.to_string(),
            merge_tool: merge_tool.to_string(),
        }
    }
}

/// Turn a spawn failure into `ToolMissing` when the executable isn't there.
fn spawn_error(tool: &str, err: io::Error) -> ScoreDbError {
    if err.kind() == io::ErrorKind::NotFound {
        ScoreDbError::ToolMissing {
            tool: tool.to_string(),
        }
    } else {
        ScoreDbError::Io(err)
    }
}

fn status_of(output: &Output) -> ToolStatus {
    ToolStatus {
        success: output.status.success(),
        code: output.status.code(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}

/// Run with stdout and stderr captured.
fn run_captured(tool: &str, cmd: &mut Command) -> Result<ToolStatus> {
    debug!(?cmd, "running {}", tool);
    let output = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| spawn_error(tool, e))?;

    let status = status_of(&output);
    if !status.success {
        debug!(code = ?status.code, stderr = %status.stderr.trim_end(), "{} failed", tool);
    }
    Ok(status)
}

/// Run attached to the terminal.
fn run_inherited(tool: &str, cmd: &mut Command) -> Result<ToolStatus> {
    debug!(?cmd, "running {}", tool);
    let status = cmd.status().map_err(|e| spawn_error(tool, e))?;
    Ok(ToolStatus {
        success: status.success(),
        code: status.code(),
        stderr: String::new(),
    })
}

/// Quote a path for the platform shell.
fn shell_quote(path: &Path) -> String {
    let raw = path.to_string_lossy();
    if cfg!(windows) {
        format!("\"{}\"", raw)
    } else {
        format!("'{}'", raw.replace('\'', "'\\''"))
    }
}

fn shell_command(line: &str) -> Command {
    if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", line]);
        cmd
    } else {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", line]);
        cmd
    }
}

#[cfg(target_os = "macos")]
fn opener_command(path: &Path) -> (&'static str, Command) {
    let mut cmd = Command::new("open");
    cmd.arg(path);
    ("open", cmd)
}

#[cfg(target_os = "windows")]
fn opener_command(path: &Path) -> (&'static str, Command) {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", ""]).arg(path);
    ("start", cmd)
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener_command(path: &Path) -> (&'static str, Command) {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(path);
    ("xdg-open", cmd)
}

impl Toolchain for ProcessTools {
    fn render_tool(&self) -> &str {
        &self.render_tool
    }

    fn merge_tool(&self) -> &str {
        &self.merge_tool
    }

    fn render(&self, source: &Path, output_base: &Path) -> Result<RenderOutput> {
        let mut output_arg = std::ffi::OsString::from("--output=");
        output_arg.push(output_base.as_os_str());

        let mut cmd = Command::new(&self.render_tool);
        cmd.arg("--silent").arg(output_arg).arg(source);

        let status = run_captured(&self.render_tool, &mut cmd)?;
        Ok(RenderOutput::collect(status, output_base))
    }

    fn merge_available(&self) -> bool {
        which::which(&self.merge_tool).is_ok()
    }

    fn merge(&self, inputs: &[PathBuf], output: &Path) -> Result<ToolStatus> {
        let mut cmd = Command::new(&self.merge_tool);
        cmd.args(inputs).arg("cat").arg("output").arg(output);
        run_captured(&self.merge_tool, &mut cmd)
    }

    fn open(&self, path: &Path) -> Result<ToolStatus> {
        let (name, mut cmd) = opener_command(path);
        run_captured(name, &mut cmd)
    }

    fn play(&self, command: &str, media: &Path) -> Result<ToolStatus> {
        let line = format!("{} {}", command, shell_quote(media));
        run_inherited("player", &mut shell_command(&line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_shell_quote_escapes_single_quotes() {
        assert_eq!(
            shell_quote(Path::new("/tmp/it's/a.midi")),
            "'/tmp/it'\\''s/a.midi'"
        );
    }

    #[test]
    fn test_render_missing_tool() {
        let tools = ProcessTools::new("scoredb-no-such-renderer", "pdftk");
        let temp = tempfile::TempDir::new().unwrap();
        let err = tools
            .render(Path::new("1_1.ly"), &temp.path().join("out"))
            .unwrap_err();
        assert!(
            matches!(err, ScoreDbError::ToolMissing { ref tool } if tool == "scoredb-no-such-renderer")
        );
    }

    #[test]
    fn test_merge_unavailable() {
        let tools = ProcessTools::new("lilypond", "scoredb-no-such-merger");
        assert!(!tools.merge_available());
    }

    #[cfg(unix)]
    #[test]
    fn test_play_appends_media_path() {
        let temp = tempfile::TempDir::new().unwrap();
        let media = temp.path().join("it's here.midi");
        let tools = ProcessTools::new("lilypond", "pdftk");

        assert!(!tools.play("test -f", &media).unwrap().success);

        std::fs::write(&media, b"MThd").unwrap();
        assert!(tools.play("test -f", &media).unwrap().success);
    }
}
