use crate::commands::helpers::{pdf_destination, render_score, require_pdf};
use crate::commands::{CmdMessage, CmdResult, Reporter};
use crate::error::Result;
use crate::interrupt::Interrupt;
use crate::store::ScoreStore;
use crate::tools::Toolchain;
use crate::workspace::Workspace;
use std::fs;

/// Render one excerpt and copy its PDF to `dest` (default `<ID>.pdf`).
pub fn run<T: Toolchain>(
    store: &ScoreStore,
    tools: &T,
    workspace: &Workspace,
    interrupt: &Interrupt,
    raw_id: &str,
    dest: Option<&str>,
    out: &mut dyn Reporter,
) -> Result<CmdResult> {
    let id = store.id(raw_id);
    let dest = pdf_destination(dest.unwrap_or(id.as_str()))?;
    store.resolve(&id)?;

    out.report(CmdMessage::info(format!("Generating score {}...", id)));
    let output = render_score(store, tools, interrupt, &id, &workspace.output_base("export"))?;
    let pdf = require_pdf(&output, tools, store, &id)?;

    fs::copy(&pdf, &dest)?;
    out.report(CmdMessage::success(format!("Done: {}", dest.display())));
    Ok(CmdResult::default().with_output(dest))
}
