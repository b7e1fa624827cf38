//! # Score Store
//!
//! The database is a flat directory of notation files. There is no index:
//! every lookup lists the directory and matches names.
//!
//! ```text
//! <root>/
//! ├── scoredb.json        # Manifest and configuration
//! ├── README.md           # Documentation, copied with checkouts
//! └── data/
//!     ├── 1_1.ly          # Excerpt "1", variant "1"
//!     ├── 1_2.ly
//!     └── 123_1.ly
//! ```

use crate::error::{Result, ScoreDbError};
use crate::model::ExcerptId;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ScoreStore {
    data_dir: PathBuf,
    extension: String,
}

impl ScoreStore {
    pub fn new(data_dir: PathBuf, extension: &str) -> Self {
        Self {
            data_dir,
            extension: extension.to_string(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn id(&self, raw: &str) -> ExcerptId {
        ExcerptId::new(raw, &self.extension)
    }

    /// Names of all notation files, unsorted.
    fn file_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.data_dir)? {
            let entry = entry?;
            // Follows symlinks, like `resolve`
            if !entry.path().is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if name.ends_with(&self.extension) {
                    names.push(name.to_string());
                }
            }
        }
        Ok(names)
    }

    /// All excerpt IDs (file names without extension), sorted.
    pub fn list(&self) -> Result<Vec<ExcerptId>> {
        let mut ids: Vec<_> = self
            .file_names()?
            .iter()
            .map(|name| self.id(name))
            .collect();
        ids.sort();
        Ok(ids)
    }

    /// Path of an excerpt's notation file, whether or not it exists.
    pub fn path_of(&self, id: &ExcerptId) -> PathBuf {
        self.data_dir.join(id.file_name(&self.extension))
    }

    /// Path of an existing notation file, or `ScoreNotFound`.
    pub fn resolve(&self, id: &ExcerptId) -> Result<PathBuf> {
        let path = self.path_of(id);
        if path.is_file() {
            Ok(path)
        } else {
            Err(ScoreDbError::ScoreNotFound(id.file_name(&self.extension)))
        }
    }

    /// Files whose names start with `id + separator`, sorted.
    pub fn variants(&self, id: &ExcerptId, separator: &str) -> Result<Vec<PathBuf>> {
        let mut names: Vec<_> = self
            .file_names()?
            .into_iter()
            .filter(|name| id.matches(name, separator, &self.extension))
            .collect();
        names.sort();
        Ok(names.into_iter().map(|n| self.data_dir.join(n)).collect())
    }
}
