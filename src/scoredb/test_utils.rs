use crate::api::ScoreDbApi;
use crate::commands::ScoreDbPaths;
use crate::config::ScoreDbConfig;
use crate::store::ScoreStore;
use crate::tools::Toolchain;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub const VALID_SCORE: &str = "\\version \"2.24.0\"\n\\score { \\relative c' { c d e f } \\layout { } \\midi { } }\n";

/// A database in a temp directory: `scoredb.json`, `data/`, `README.md`.
pub struct TestEnv {
    // Keeps the directory alive until the test is done
    pub _temp_dir: TempDir,
    pub root: PathBuf,
    pub config: ScoreDbConfig,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir
            .path()
            .canonicalize()
            .expect("failed to canonicalize temp dir")
            .join("db");
        let config = ScoreDbConfig::default();
        fs::create_dir_all(root.join(&config.data_dir)).expect("failed to create data dir");
        fs::write(root.join("README.md"), "# Scores\n").expect("failed to write readme");
        config.save(&root).expect("failed to save config");
        Self {
            _temp_dir: temp_dir,
            root,
            config,
        }
    }

    pub fn with_scores(self, names: &[&str]) -> Self {
        for name in names {
            fs::write(self.data_dir().join(name), VALID_SCORE).expect("failed to write score");
        }
        self
    }

    /// Scratch directory next to the database, outside of it.
    pub fn outside(&self) -> PathBuf {
        self._temp_dir
            .path()
            .canonicalize()
            .expect("failed to canonicalize temp dir")
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.join(&self.config.data_dir)
    }

    pub fn store(&self) -> ScoreStore {
        ScoreStore::new(self.data_dir(), &self.config.extension)
    }

    pub fn paths(&self) -> ScoreDbPaths {
        ScoreDbPaths {
            root: self.root.clone(),
            view_cache: self.outside().join("view-cache"),
        }
    }

    pub fn api<T: Toolchain>(&self, tools: T) -> ScoreDbApi<T> {
        ScoreDbApi::new(self.config.clone(), self.paths(), tools)
    }
}
