use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoreDbError {
    #[error("{0}")]
    Usage(String),

    #[error("File {0} does not exist.")]
    ScoreNotFound(String),

    #[error("Not a score database: {0} (run `scoredb init` first)")]
    NotADatabase(PathBuf),

    #[error("Required file {0} is missing from the database")]
    MissingDocument(PathBuf),

    #[error("{0} already exists. Exiting...")]
    DestinationExists(PathBuf),

    #[error("Cannot check out to {0}: it contains the database itself")]
    DestinationContainsSource(PathBuf),

    #[error("{tool} not found. Please install {tool}.")]
    ToolMissing { tool: String },

    #[error("Error when calling {tool}. File {file} might be broken.")]
    ToolFailed { tool: String, file: String },

    #[error("{tool} produced no {artifact} output for {file}")]
    MissingOutput {
        tool: String,
        artifact: &'static str,
        file: String,
    },

    #[error("Error concatenating PDF files. Individual PDF files are preserved in {}", .0.display())]
    MergeFailed(PathBuf),

    #[error("There are broken score files: {}", .0.join(" "))]
    BrokenScores(Vec<String>),

    #[error("Interrupted. Exiting...")]
    Interrupted,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl ScoreDbError {
    /// Process exit code for this error kind.
    pub fn exit_code(&self) -> u8 {
        match self {
            ScoreDbError::Io(_) | ScoreDbError::Serialization(_) | ScoreDbError::Config(_) => 1,
            ScoreDbError::Usage(_) => 2,
            ScoreDbError::ScoreNotFound(_)
            | ScoreDbError::NotADatabase(_)
            | ScoreDbError::MissingDocument(_) => 3,
            ScoreDbError::DestinationExists(_) => 4,
            ScoreDbError::DestinationContainsSource(_) => 5,
            ScoreDbError::ToolMissing { .. } => 6,
            ScoreDbError::ToolFailed { .. }
            | ScoreDbError::MissingOutput { .. }
            | ScoreDbError::MergeFailed(_) => 7,
            ScoreDbError::BrokenScores(_) => 8,
            ScoreDbError::Interrupted => 130,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScoreDbError>;
