use crate::config::ScoreDbConfig;
use crate::model::ExcerptId;
use std::path::PathBuf;

pub mod check;
pub mod checkout;
pub mod config;
pub mod export;
pub mod export_all;
pub mod helpers;
pub mod init;
pub mod list;
pub mod listen;
pub mod view;

pub use check::Verdict;

#[derive(Debug, Clone)]
pub struct ScoreDbPaths {
    /// Database root, holding `scoredb.json`
    pub root: PathBuf,
    /// Where `view` places PDFs handed to the desktop viewer
    pub view_cache: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Receives messages while a command runs.
///
/// Batch commands report each item as it finishes, so messages cannot wait
/// for the `CmdResult`. The CLI prints them immediately; tests collect them.
pub trait Reporter {
    fn report(&mut self, message: CmdMessage);

    /// Start of a line that a later `report` completes, shown before slow work.
    fn progress(&mut self, message: CmdMessage) {
        self.report(message);
    }
}

impl Reporter for Vec<CmdMessage> {
    fn report(&mut self, message: CmdMessage) {
        self.push(message);
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub listed: Vec<ExcerptId>,
    pub copied: Vec<PathBuf>,
    pub verdicts: Vec<(ExcerptId, Verdict)>,
    pub output: Option<PathBuf>,
    pub kept_workspace: Option<PathBuf>,
    pub config: Option<ScoreDbConfig>,
}

impl CmdResult {
    pub fn with_listed(mut self, ids: Vec<ExcerptId>) -> Self {
        self.listed = ids;
        self
    }

    pub fn with_copied(mut self, paths: Vec<PathBuf>) -> Self {
        self.copied = paths;
        self
    }

    pub fn with_verdicts(mut self, verdicts: Vec<(ExcerptId, Verdict)>) -> Self {
        self.verdicts = verdicts;
        self
    }

    pub fn with_output(mut self, path: PathBuf) -> Self {
        self.output = Some(path);
        self
    }

    pub fn with_kept_workspace(mut self, path: PathBuf) -> Self {
        self.kept_workspace = Some(path);
        self
    }

    pub fn with_config(mut self, config: ScoreDbConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// IDs whose verdict is anything but good, as notation file names.
    pub fn broken(&self, extension: &str) -> Vec<String> {
        self.verdicts
            .iter()
            .filter(|(_, verdict)| !verdict.is_good())
            .map(|(id, _)| id.file_name(extension))
            .collect()
    }
}
