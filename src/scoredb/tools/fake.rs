use super::{artifact_path, RenderOutput, ToolStatus, Toolchain};
use crate::error::{Result, ScoreDbError};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// What the fake renderer does for a given source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeRender {
    /// Exit 0, write PDF and MIDI
    Good,
    /// Exit 1, write nothing
    Invalid,
    /// Exit 0, write MIDI only
    NoPdf,
    /// Exit 0, write PDF only
    NoMidi,
}

/// A recorded toolchain call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCall {
    Render { source: PathBuf, output_base: PathBuf },
    Merge { inputs: Vec<PathBuf>, output: PathBuf },
    Open(PathBuf),
    Play { command: String, media: PathBuf },
}

/// Toolchain with scripted outcomes, keyed by source file stem.
///
/// Writes real artifact files so callers that copy or merge them work
/// unchanged. The merged "PDF" is the inputs' bytes concatenated.
#[derive(Debug)]
pub struct FakeTools {
    renders: HashMap<String, FakeRender>,
    merge_available: bool,
    merge_fails: bool,
    player_fails: bool,
    calls: RefCell<Vec<ToolCall>>,
}

impl Default for FakeTools {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeTools {
    pub fn new() -> Self {
        Self {
            renders: HashMap::new(),
            merge_available: true,
            merge_fails: false,
            player_fails: false,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn with_render(mut self, stem: &str, behavior: FakeRender) -> Self {
        self.renders.insert(stem.to_string(), behavior);
        self
    }

    pub fn without_merger(mut self) -> Self {
        self.merge_available = false;
        self
    }

    pub fn with_failing_merge(mut self) -> Self {
        self.merge_fails = true;
        self
    }

    pub fn with_failing_player(mut self) -> Self {
        self.player_fails = true;
        self
    }

    pub fn calls(&self) -> Vec<ToolCall> {
        self.calls.borrow().clone()
    }

    pub fn render_count(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, ToolCall::Render { .. }))
            .count()
    }

    fn record(&self, call: ToolCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl Toolchain for FakeTools {
    fn render_tool(&self) -> &str {
        "fake-lilypond"
    }

    fn merge_tool(&self) -> &str {
        "fake-pdftk"
    }

    fn render(&self, source: &Path, output_base: &Path) -> Result<RenderOutput> {
        self.record(ToolCall::Render {
            source: source.to_path_buf(),
            output_base: output_base.to_path_buf(),
        });

        let stem = source
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        let behavior = self
            .renders
            .get(stem)
            .copied()
            .unwrap_or(FakeRender::Good);

        let (status, pdf, midi) = match behavior {
            FakeRender::Good => (ToolStatus::ok(), true, true),
            FakeRender::Invalid => (ToolStatus::failed(1, "syntax error"), false, false),
            FakeRender::NoPdf => (ToolStatus::ok(), false, true),
            FakeRender::NoMidi => (ToolStatus::ok(), true, false),
        };
        if pdf {
            fs::write(
                artifact_path(output_base, "pdf"),
                format!("%PDF {}\n", stem),
            )?;
        }
        if midi {
            fs::write(artifact_path(output_base, "midi"), b"MThd")?;
        }

        Ok(RenderOutput::collect(status, output_base))
    }

    fn merge_available(&self) -> bool {
        self.merge_available
    }

    fn merge(&self, inputs: &[PathBuf], output: &Path) -> Result<ToolStatus> {
        self.record(ToolCall::Merge {
            inputs: inputs.to_vec(),
            output: output.to_path_buf(),
        });
        if !self.merge_available {
            return Err(ScoreDbError::ToolMissing {
                tool: self.merge_tool().to_string(),
            });
        }
        if self.merge_fails {
            return Ok(ToolStatus::failed(1, "merge failed"));
        }

        let mut merged = Vec::new();
        for input in inputs {
            merged.extend(fs::read(input)?);
        }
        fs::write(output, merged)?;
        Ok(ToolStatus::ok())
    }

    fn open(&self, path: &Path) -> Result<ToolStatus> {
        self.record(ToolCall::Open(path.to_path_buf()));
        Ok(ToolStatus::ok())
    }

    fn play(&self, command: &str, media: &Path) -> Result<ToolStatus> {
        self.record(ToolCall::Play {
            command: command.to_string(),
            media: media.to_path_buf(),
        });
        if self.player_fails {
            Ok(ToolStatus::failed(2, ""))
        } else {
            Ok(ToolStatus::ok())
        }
    }
}
