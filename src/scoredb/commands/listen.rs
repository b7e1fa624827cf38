use crate::commands::helpers::{render_score, require_midi};
use crate::commands::{CmdMessage, CmdResult, Reporter};
use crate::error::{Result, ScoreDbError};
use crate::interrupt::Interrupt;
use crate::store::ScoreStore;
use crate::tools::Toolchain;
use crate::workspace::Workspace;

/// Render one excerpt's MIDI and play it with `command`, which receives the
/// MIDI path as its last argument. Blocks until the player exits.
pub fn run<T: Toolchain>(
    store: &ScoreStore,
    tools: &T,
    workspace: &Workspace,
    interrupt: &Interrupt,
    raw_id: &str,
    command: &str,
    out: &mut dyn Reporter,
) -> Result<CmdResult> {
    let id = store.id(raw_id);
    store.resolve(&id)?;

    out.report(CmdMessage::info(format!("Generating midi {}...", id)));
    let output = render_score(store, tools, interrupt, &id, &workspace.output_base("listen"))?;
    let midi = require_midi(&output, tools, store, &id)?;

    out.report(CmdMessage::info("Playing..."));
    let status = tools.play(command, &midi)?;
    interrupt.check()?;
    if !status.success {
        return Err(ScoreDbError::ToolFailed {
            tool: command.to_string(),
            file: midi.display().to_string(),
        });
    }
    Ok(CmdResult::default().with_output(midi))
}
