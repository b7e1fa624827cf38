use crate::commands::{CmdMessage, CmdResult, Reporter};
use crate::error::Result;
use crate::interrupt::Interrupt;
use crate::model::{progress_label, ExcerptId};
use crate::store::ScoreStore;
use crate::tools::{clear_artifacts, Toolchain};
use crate::workspace::Workspace;
use tracing::info;

/// Outcome of checking one notation file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Good,
    Missing,
    RenderFailed,
    NoPdf,
    NoMidi,
}

impl Verdict {
    pub fn is_good(&self) -> bool {
        matches!(self, Verdict::Good)
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Verdict::Good => "Good.",
            Verdict::Missing => "Missing: no such score file.",
            Verdict::RenderFailed => "Broken: invalid notation.",
            Verdict::NoPdf => "Broken: no PDF output.",
            Verdict::NoMidi => "Broken: no MIDI output.",
        }
    }
}

/// Render every target and classify the result. A broken file never stops
/// the batch; only an interrupt or a missing renderer does.
pub fn run<T: Toolchain>(
    store: &ScoreStore,
    tools: &T,
    workspace: &Workspace,
    interrupt: &Interrupt,
    targets: &[String],
    out: &mut dyn Reporter,
) -> Result<CmdResult> {
    let ids: Vec<ExcerptId> = if targets.is_empty() {
        store.list()?
    } else {
        targets.iter().map(|raw| store.id(raw)).collect()
    };

    let output_base = workspace.output_base("check");
    let total = ids.len();
    let mut verdicts = Vec::with_capacity(total);

    for (index, id) in ids.into_iter().enumerate() {
        interrupt.check()?;
        out.progress(CmdMessage::info(format!(
            "{} Checking {}...",
            progress_label(index + 1, total),
            id
        )));
        let verdict = check_one(store, tools, interrupt, &id, &output_base)?;

        out.report(if verdict.is_good() {
            CmdMessage::info(verdict.describe())
        } else {
            CmdMessage::error(verdict.describe())
        });
        verdicts.push((id, verdict));
    }

    let broken = verdicts.iter().filter(|(_, v)| !v.is_good()).count();
    info!(total, broken, "integrity check finished");
    Ok(CmdResult::default().with_verdicts(verdicts))
}

fn check_one<T: Toolchain>(
    store: &ScoreStore,
    tools: &T,
    interrupt: &Interrupt,
    id: &ExcerptId,
    output_base: &std::path::Path,
) -> Result<Verdict> {
    let source = store.path_of(id);
    if !source.is_file() {
        return Ok(Verdict::Missing);
    }

    clear_artifacts(output_base)?;
    let output = tools.render(&source, output_base)?;
    interrupt.check()?;

    let verdict = if !output.status.success {
        Verdict::RenderFailed
    } else if output.pdf.is_none() {
        Verdict::NoPdf
    } else if output.midi.is_none() {
        Verdict::NoMidi
    } else {
        Verdict::Good
    };
    Ok(verdict)
}
