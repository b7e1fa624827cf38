//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for every scoredb action, whatever the UI.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Owns per-invocation resources**: it acquires a fresh [`Workspace`] for
//!   each rendering action and lets it drop when the action returns
//! - **Fills defaults** from the configuration (separator, tool names)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `commands/*.rs`
//! - **Presentation**: messages go to the caller's [`Reporter`], results are data
//!
//! ## Generic Over Toolchain
//!
//! `ScoreDbApi<T: Toolchain>` is generic over the external programs:
//! - Production: `ScoreDbApi<ProcessTools>`
//! - Testing: `ScoreDbApi<FakeTools>`
//!
//! This keeps every action testable without LilyPond installed.

use crate::commands::{self, CmdResult, Reporter, ScoreDbPaths};
use crate::config::ScoreDbConfig;
use crate::error::Result;
use crate::interrupt::Interrupt;
use crate::store::ScoreStore;
use crate::tools::Toolchain;
use crate::workspace::Workspace;
use std::path::{Path, PathBuf};

pub use commands::config::ConfigAction;
pub use commands::export_all::TempFiles;

/// The main API facade for scoredb operations.
pub struct ScoreDbApi<T: Toolchain> {
    store: ScoreStore,
    tools: T,
    config: ScoreDbConfig,
    paths: ScoreDbPaths,
    interrupt: Interrupt,
    workspace_parent: Option<PathBuf>,
}

impl<T: Toolchain> ScoreDbApi<T> {
    pub fn new(config: ScoreDbConfig, paths: ScoreDbPaths, tools: T) -> Self {
        let store = ScoreStore::new(paths.root.join(&config.data_dir), &config.extension);
        Self {
            store,
            tools,
            config,
            paths,
            interrupt: Interrupt::new(),
            workspace_parent: None,
        }
    }

    /// Share a cancellation flag with a signal handler.
    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = interrupt;
        self
    }

    /// Create workspaces under `parent` instead of the system temp dir.
    pub fn with_workspace_parent(mut self, parent: PathBuf) -> Self {
        self.workspace_parent = Some(parent);
        self
    }

    pub fn list(&self) -> Result<CmdResult> {
        commands::list::run(&self.store)
    }

    pub fn checkout(
        &self,
        list_file: &Path,
        dest: &Path,
        separator: Option<&str>,
        out: &mut dyn Reporter,
    ) -> Result<CmdResult> {
        let separator = separator.unwrap_or(&self.config.separator);
        commands::checkout::run(
            &self.store,
            &self.config,
            &self.paths,
            &self.interrupt,
            list_file,
            dest,
            separator,
            out,
        )
    }

    pub fn check_integrity<I: AsRef<str>>(
        &self,
        ids: &[I],
        out: &mut dyn Reporter,
    ) -> Result<CmdResult> {
        let targets: Vec<String> = ids.iter().map(|id| id.as_ref().to_string()).collect();
        let workspace = self.workspace()?;
        commands::check::run(
            &self.store,
            &self.tools,
            &workspace,
            &self.interrupt,
            &targets,
            out,
        )
    }

    pub fn view(&self, id: &str, out: &mut dyn Reporter) -> Result<CmdResult> {
        let workspace = self.workspace()?;
        commands::view::run(
            &self.store,
            &self.tools,
            &self.paths,
            &workspace,
            &self.interrupt,
            id,
            out,
        )
    }

    pub fn export(
        &self,
        id: &str,
        dest: Option<&str>,
        out: &mut dyn Reporter,
    ) -> Result<CmdResult> {
        let workspace = self.workspace()?;
        commands::export::run(
            &self.store,
            &self.tools,
            &workspace,
            &self.interrupt,
            id,
            dest,
            out,
        )
    }

    pub fn export_all(
        &self,
        dest: &str,
        temp_files: TempFiles,
        out: &mut dyn Reporter,
    ) -> Result<CmdResult> {
        let workspace = self.workspace()?;
        commands::export_all::run(
            &self.store,
            &self.tools,
            workspace,
            &self.interrupt,
            dest,
            temp_files,
            out,
        )
    }

    pub fn listen(&self, id: &str, command: &str, out: &mut dyn Reporter) -> Result<CmdResult> {
        let workspace = self.workspace()?;
        commands::listen::run(
            &self.store,
            &self.tools,
            &workspace,
            &self.interrupt,
            id,
            command,
            out,
        )
    }

    pub fn config(&self, action: ConfigAction, out: &mut dyn Reporter) -> Result<CmdResult> {
        commands::config::run(&self.paths.root, action, out)
    }

    pub fn paths(&self) -> &ScoreDbPaths {
        &self.paths
    }

    pub fn current_config(&self) -> &ScoreDbConfig {
        &self.config
    }

    pub fn tools(&self) -> &T {
        &self.tools
    }

    fn workspace(&self) -> Result<Workspace> {
        match &self.workspace_parent {
            Some(parent) => Workspace::acquire_in(parent),
            None => Workspace::acquire(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONFIG_FILENAME;
    use crate::test_utils::TestEnv;
    use crate::tools::fake::{FakeRender, FakeTools, ToolCall};
    use std::fs;

    fn workspaces_left(parent: &Path) -> usize {
        fs::read_dir(parent)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with("scoredb-"))
            .count()
    }

    #[test]
    fn test_list_dispatches_to_store() {
        let env = TestEnv::new().with_scores(&["2_1.ly", "1_1.ly"]);
        let api = env.api(FakeTools::new());

        let result = api.list().unwrap();
        let listed: Vec<_> = result.listed.iter().map(|id| id.to_string()).collect();
        assert_eq!(listed, vec!["1_1", "2_1"]);
    }

    #[test]
    fn test_checkout_defaults_separator_from_config() {
        let mut env = TestEnv::new().with_scores(&["1-1.ly", "1_1.ly"]);
        env.config.separator = "-".to_string();
        let list = env.outside().join("ids.txt");
        fs::write(&list, "1\n").unwrap();
        let dest = env.outside().join("subset");
        let api = env.api(FakeTools::new());

        let result = api.checkout(&list, &dest, None, &mut Vec::new()).unwrap();

        assert_eq!(result.copied, vec![dest.join("data").join("1-1.ly")]);
        let manifest = fs::read_to_string(dest.join(CONFIG_FILENAME)).unwrap();
        assert!(manifest.contains("\"separator\": \"-\""));
    }

    #[test]
    fn test_rendering_actions_release_workspace() {
        let env = TestEnv::new().with_scores(&["1_1.ly", "2_1.ly"]);
        let scratch = env.outside().join("scratch");
        fs::create_dir_all(&scratch).unwrap();
        let api = env
            .api(FakeTools::new().with_render("2_1", FakeRender::Invalid))
            .with_workspace_parent(scratch.clone());

        let checked = api.check_integrity::<&str>(&[], &mut Vec::new()).unwrap();
        assert_eq!(checked.broken(".ly"), vec!["2_1.ly"]);
        assert_eq!(workspaces_left(&scratch), 0);

        assert!(api.export("2_1", None, &mut Vec::new()).is_err());
        assert_eq!(workspaces_left(&scratch), 0);
    }

    #[test]
    fn test_view_hands_cached_pdf_to_opener() {
        let env = TestEnv::new().with_scores(&["1_1.ly"]);
        let api = env.api(FakeTools::new());

        let result = api.view("1_1", &mut Vec::new()).unwrap();

        let shown = env.paths().view_cache.join("1_1.pdf");
        assert_eq!(result.output, Some(shown.clone()));
        assert!(api.tools().calls().contains(&ToolCall::Open(shown)));
    }

    #[test]
    fn test_config_reads_database_root() {
        let env = TestEnv::new();
        let api = env.api(FakeTools::new());

        let result = api.config(ConfigAction::ShowAll, &mut Vec::new()).unwrap();
        assert_eq!(result.config, Some(ScoreDbConfig::default()));
    }

    #[test]
    fn test_interrupt_is_shared() {
        let env = TestEnv::new().with_scores(&["1_1.ly"]);
        let interrupt = Interrupt::new();
        let api = env.api(FakeTools::new()).with_interrupt(interrupt.clone());

        interrupt.trigger();
        let err = api.listen("1_1", "timidity", &mut Vec::new()).unwrap_err();
        assert!(matches!(err, crate::error::ScoreDbError::Interrupted));
    }
}
