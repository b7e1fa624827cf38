use crate::commands::helpers::{render_score, require_pdf};
use crate::commands::{CmdMessage, CmdResult, Reporter, ScoreDbPaths};
use crate::error::{Result, ScoreDbError};
use crate::interrupt::Interrupt;
use crate::store::ScoreStore;
use crate::tools::Toolchain;
use crate::workspace::Workspace;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Render one excerpt and hand the PDF to the desktop viewer.
///
/// The opener returns before the viewer has read the file, so the PDF is
/// copied out of the workspace into the view cache first. Only the latest
/// PDF is kept there.
pub fn run<T: Toolchain>(
    store: &ScoreStore,
    tools: &T,
    paths: &ScoreDbPaths,
    workspace: &Workspace,
    interrupt: &Interrupt,
    raw_id: &str,
    out: &mut dyn Reporter,
) -> Result<CmdResult> {
    let id = store.id(raw_id);
    store.resolve(&id)?;

    out.report(CmdMessage::info("Generating score..."));
    let output = render_score(store, tools, interrupt, &id, &workspace.output_base("view"))?;
    let pdf = require_pdf(&output, tools, store, &id)?;

    fs::create_dir_all(&paths.view_cache)?;
    clear_view_cache(&paths.view_cache)?;
    let shown = paths.view_cache.join(format!("{}.pdf", id));
    fs::copy(&pdf, &shown)?;

    let status = tools.open(&shown)?;
    if !status.success {
        return Err(ScoreDbError::ToolFailed {
            tool: "opener".to_string(),
            file: shown.display().to_string(),
        });
    }
    Ok(CmdResult::default().with_output(shown))
}

fn clear_view_cache(dir: &Path) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "pdf") {
            debug!(path = %path.display(), "removing stale view");
            fs::remove_file(&path)?;
        }
    }
    Ok(())
}
