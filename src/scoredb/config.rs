use crate::error::{Result, ScoreDbError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path};

pub const CONFIG_FILENAME: &str = "scoredb.json";
const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_EXTENSION: &str = ".ly";
const DEFAULT_SEPARATOR: &str = "_";
const DEFAULT_RENDER_TOOL: &str = "lilypond";
const DEFAULT_MERGE_TOOL: &str = "pdftk";

/// Database configuration, stored in `<root>/scoredb.json`.
///
/// The file doubles as the database manifest: a directory holding it is a
/// database root, and checkouts carry a copy of it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreDbConfig {
    /// Directory (relative to the root) holding the notation files
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Extension of notation files, including the dot
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Delimiter between an ID and its variant suffix
    #[serde(default = "default_separator")]
    pub separator: String,

    /// Executable used to render PDF and MIDI output
    #[serde(default = "default_render_tool")]
    pub render_tool: String,

    /// Executable used to concatenate PDFs
    #[serde(default = "default_merge_tool")]
    pub merge_tool: String,

    /// Documentation files copied alongside every checkout
    #[serde(default = "default_documents")]
    pub documents: Vec<String>,
}

fn default_data_dir() -> String {
    DEFAULT_DATA_DIR.to_string()
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

fn default_render_tool() -> String {
    DEFAULT_RENDER_TOOL.to_string()
}

fn default_merge_tool() -> String {
    DEFAULT_MERGE_TOOL.to_string()
}

fn default_documents() -> Vec<String> {
    vec!["README.md".to_string()]
}

impl Default for ScoreDbConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            extension: default_extension(),
            separator: default_separator(),
            render_tool: default_render_tool(),
            merge_tool: default_merge_tool(),
            documents: default_documents(),
        }
    }
}

/// The keys settable through `scoredb config KEY VALUE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    DataDir,
    Extension,
    Separator,
    RenderTool,
    MergeTool,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 5] = [
        ConfigKey::DataDir,
        ConfigKey::Extension,
        ConfigKey::Separator,
        ConfigKey::RenderTool,
        ConfigKey::MergeTool,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::DataDir => "data-dir",
            ConfigKey::Extension => "extension",
            ConfigKey::Separator => "separator",
            ConfigKey::RenderTool => "render-tool",
            ConfigKey::MergeTool => "merge-tool",
        }
    }

    pub fn parse(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|key| key.name() == name)
            .ok_or_else(|| {
                let known: Vec<_> = Self::ALL.iter().map(|k| k.name()).collect();
                ScoreDbError::Usage(format!(
                    "Unknown config key: {} (known keys: {})",
                    name,
                    known.join(", ")
                ))
            })
    }
}

impl ScoreDbConfig {
    /// Load config from the given root, or return defaults if not found
    pub fn load<P: AsRef<Path>>(root: P) -> Result<Self> {
        let config_path = root.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: ScoreDbConfig = serde_json::from_str(&content)?;
        validate_data_dir(&config.data_dir)?;
        Ok(config)
    }

    /// Save config into the given root
    pub fn save<P: AsRef<Path>>(&self, root: P) -> Result<()> {
        let root = root.as_ref();
        if !root.exists() {
            fs::create_dir_all(root)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(root.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn get(&self, key: ConfigKey) -> &str {
        match key {
            ConfigKey::DataDir => &self.data_dir,
            ConfigKey::Extension => &self.extension,
            ConfigKey::Separator => &self.separator,
            ConfigKey::RenderTool => &self.render_tool,
            ConfigKey::MergeTool => &self.merge_tool,
        }
    }

    pub fn set(&mut self, key: ConfigKey, value: &str) -> Result<()> {
        if value.is_empty() {
            return Err(ScoreDbError::Config(format!(
                "{} cannot be empty",
                key.name()
            )));
        }
        match key {
            ConfigKey::DataDir => {
                validate_data_dir(value)?;
                self.data_dir = value.to_string();
            }
            ConfigKey::Extension => self.set_extension(value),
            ConfigKey::Separator => self.separator = value.to_string(),
            ConfigKey::RenderTool => self.render_tool = value.to_string(),
            ConfigKey::MergeTool => self.merge_tool = value.to_string(),
        }
        Ok(())
    }

    /// Set the notation extension (normalizes to start with a dot)
    pub fn set_extension(&mut self, ext: &str) {
        if ext.starts_with('.') {
            self.extension = ext.to_string();
        } else {
            self.extension = format!(".{}", ext);
        }
    }
}

/// The data directory must stay inside the root, so checkouts write to
/// `<dest>/<data_dir>` and never back into the source.
fn validate_data_dir(value: &str) -> Result<()> {
    let path = Path::new(value);
    let inside_root = path.components().next().is_some()
        && path
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
    if inside_root {
        Ok(())
    } else {
        Err(ScoreDbError::Config(format!(
            "data-dir must be a relative path inside the database: {}",
            value
        )))
    }
}
