use crate::api::ScoreDbApi;
use crate::commands::ScoreDbPaths;
use crate::config::{ScoreDbConfig, CONFIG_FILENAME};
use crate::error::{Result, ScoreDbError};
use crate::interrupt::Interrupt;
use crate::tools::process::ProcessTools;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const VIEW_DIR_ENV: &str = "SCOREDB_VIEW_DIR";

pub struct ScoreDbContext {
    pub api: ScoreDbApi<ProcessTools>,
    pub config: ScoreDbConfig,
}

/// Find the database root by walking up from cwd looking for a directory
/// holding `scoredb.json`. Returns None once the filesystem root is passed.
pub fn find_database_root(cwd: &Path) -> Option<PathBuf> {
    let mut current = cwd.to_path_buf();

    loop {
        if current.join(CONFIG_FILENAME).is_file() {
            return Some(current);
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent.to_path_buf();
            }
            _ => return None,
        }
    }
}

/// Pick the database root: an explicit override wins, then the nearest
/// manifest above cwd, then cwd itself if it has a `data/` directory.
pub fn resolve_root(cwd: &Path, root_override: Option<&Path>) -> Result<PathBuf> {
    if let Some(root) = root_override {
        let root = if root.is_absolute() {
            root.to_path_buf()
        } else {
            cwd.join(root)
        };
        if !root.is_dir() {
            return Err(ScoreDbError::NotADatabase(root));
        }
        return Ok(root);
    }

    if let Some(root) = find_database_root(cwd) {
        return Ok(root);
    }

    let legacy = cwd.join(ScoreDbConfig::default().data_dir);
    if legacy.is_dir() {
        debug!(root = %cwd.display(), "no manifest, using data directory in cwd");
        return Ok(cwd.to_path_buf());
    }

    Err(ScoreDbError::NotADatabase(cwd.to_path_buf()))
}

/// Directory for PDFs handed to the desktop viewer.
pub fn view_cache_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(VIEW_DIR_ENV) {
        return PathBuf::from(dir);
    }
    ProjectDirs::from("", "", "scoredb")
        .map(|dirs| dirs.cache_dir().join("view"))
        .unwrap_or_else(|| std::env::temp_dir().join("scoredb-view"))
}

pub fn initialize(cwd: &Path, root_override: Option<&Path>, interrupt: Interrupt) -> Result<ScoreDbContext> {
    let root = resolve_root(cwd, root_override)?;
    let config = ScoreDbConfig::load(&root)?;
    debug!(root = %root.display(), data_dir = %config.data_dir, "database resolved");

    let tools = ProcessTools::new(&config.render_tool, &config.merge_tool);
    let paths = ScoreDbPaths {
        root,
        view_cache: view_cache_dir(),
    };
    let api = ScoreDbApi::new(config.clone(), paths, tools).with_interrupt(interrupt);

    Ok(ScoreDbContext { api, config })
}
