use crate::commands::helpers::{pdf_destination, render_score, require_pdf};
use crate::commands::{CmdMessage, CmdResult, Reporter};
use crate::error::{Result, ScoreDbError};
use crate::interrupt::Interrupt;
use crate::model::progress_label;
use crate::store::ScoreStore;
use crate::tools::Toolchain;
use crate::workspace::Workspace;
use tracing::{info, warn};

/// Whether the workspace survives a successful `export_all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TempFiles {
    #[default]
    Discard,
    Keep,
}

impl TempFiles {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw {
            "discard" => Ok(TempFiles::Discard),
            "keep" => Ok(TempFiles::Keep),
            other => Err(ScoreDbError::Usage(format!(
                "KEEP_TEMP_FILES must be \"keep\" or \"discard\", got \"{}\"",
                other
            ))),
        }
    }
}

/// Render every excerpt and concatenate the PDFs, in listing order, into
/// `dest`. Rendering stops at the first failure.
///
/// Takes the workspace by value: it is kept when asked to, or when the
/// merge fails so the individual PDFs are not lost.
pub fn run<T: Toolchain>(
    store: &ScoreStore,
    tools: &T,
    workspace: Workspace,
    interrupt: &Interrupt,
    dest: &str,
    temp_files: TempFiles,
    out: &mut dyn Reporter,
) -> Result<CmdResult> {
    let dest = pdf_destination(dest)?;
    if !tools.merge_available() {
        return Err(ScoreDbError::ToolMissing {
            tool: tools.merge_tool().to_string(),
        });
    }

    let ids = store.list()?;
    if ids.is_empty() {
        return Err(ScoreDbError::ScoreNotFound(format!(
            "matching *{} in {}",
            store.extension(),
            store.data_dir().display()
        )));
    }

    let total = ids.len();
    let mut pdfs = Vec::with_capacity(total);
    for (index, id) in ids.iter().enumerate() {
        interrupt.check()?;
        out.report(CmdMessage::info(format!(
            "{} Generating score {}...",
            progress_label(index + 1, total),
            id
        )));
        let output = render_score(store, tools, interrupt, id, &workspace.output_base(id.as_str()))?;
        pdfs.push(require_pdf(&output, tools, store, id)?);
    }

    let status = tools.merge(&pdfs, &dest)?;
    if !status.success {
        let kept = workspace.keep();
        warn!(path = %kept.display(), "merge failed, keeping individual PDFs");
        return Err(ScoreDbError::MergeFailed(kept));
    }
    info!(count = total, dest = %dest.display(), "exported all scores");
    out.report(CmdMessage::success(format!("Done: {}", dest.display())));

    let result = CmdResult::default().with_output(dest);
    match temp_files {
        TempFiles::Keep => {
            let kept = workspace.keep();
            out.report(CmdMessage::info(format!(
                "Temp file directory: {}",
                kept.display()
            )));
            Ok(result.with_kept_workspace(kept))
        }
        TempFiles::Discard => Ok(result),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestEnv;
    use crate::tools::fake::{FakeRender, FakeTools, ToolCall};
    use std::fs;

    #[test]
    fn merges_in_listing_order() {
        let env = TestEnv::new().with_scores(&["2_1.ly", "1_2.ly", "1_1.ly"]);
        let tools = FakeTools::new();
        let ws = Workspace::acquire_in(env.outside()).unwrap();
        let ws_path = ws.path().to_path_buf();
        let dest = env.outside().join("book");

        let result = run(
            &env.store(),
            &tools,
            ws,
            &Interrupt::new(),
            dest.to_str().unwrap(),
            TempFiles::Discard,
            &mut Vec::new(),
        )
        .unwrap();

        let book = env.outside().join("book.pdf");
        assert_eq!(result.output, Some(book.clone()));
        assert_eq!(
            fs::read_to_string(&book).unwrap(),
            "%PDF 1_1\n%PDF 1_2\n%PDF 2_1\n"
        );
        assert!(result.kept_workspace.is_none());
        assert!(!ws_path.exists());
    }

    #[test]
    fn keep_preserves_workspace() {
        let env = TestEnv::new().with_scores(&["1_1.ly"]);
        let tools = FakeTools::new();
        let ws = Workspace::acquire_in(env.outside()).unwrap();
        let dest = env.outside().join("book.pdf");
        let mut messages = Vec::new();

        let result = run(
            &env.store(),
            &tools,
            ws,
            &Interrupt::new(),
            dest.to_str().unwrap(),
            TempFiles::Keep,
            &mut messages,
        )
        .unwrap();

        let kept = result.kept_workspace.unwrap();
        assert!(kept.join("1_1.pdf").is_file());
        assert!(kept.join("1_1.midi").is_file());
        assert!(messages
            .iter()
            .any(|m| m.content.starts_with("Temp file directory: ")));
    }

    #[test]
    fn requires_merge_tool() {
        let env = TestEnv::new().with_scores(&["1_1.ly"]);
        let tools = FakeTools::new().without_merger();
        let ws = Workspace::acquire_in(env.outside()).unwrap();
        let dest = env.outside().join("book.pdf");

        let err = run(
            &env.store(),
            &tools,
            ws,
            &Interrupt::new(),
            dest.to_str().unwrap(),
            TempFiles::Discard,
            &mut Vec::new(),
        )
        .unwrap_err();

        assert!(matches!(err, ScoreDbError::ToolMissing { .. }));
        assert_eq!(tools.render_count(), 0);
    }

    #[test]
    fn aborts_on_first_broken_score() {
        let env = TestEnv::new().with_scores(&["1_1.ly", "2_1.ly", "3_1.ly"]);
        let tools = FakeTools::new().with_render("2_1", FakeRender::Invalid);
        let ws = Workspace::acquire_in(env.outside()).unwrap();
        let dest = env.outside().join("book.pdf");

        let err = run(
            &env.store(),
            &tools,
            ws,
            &Interrupt::new(),
            dest.to_str().unwrap(),
            TempFiles::Discard,
            &mut Vec::new(),
        )
        .unwrap_err();

        assert!(matches!(err, ScoreDbError::ToolFailed { ref file, .. } if file == "2_1.ly"));
        assert_eq!(tools.render_count(), 2);
        assert!(!dest.exists());
    }

    #[test]
    fn failed_merge_keeps_individual_pdfs() {
        let env = TestEnv::new().with_scores(&["1_1.ly", "2_1.ly"]);
        let tools = FakeTools::new().with_failing_merge();
        let ws = Workspace::acquire_in(env.outside()).unwrap();
        let dest = env.outside().join("book.pdf");

        let err = run(
            &env.store(),
            &tools,
            ws,
            &Interrupt::new(),
            dest.to_str().unwrap(),
            TempFiles::Discard,
            &mut Vec::new(),
        )
        .unwrap_err();

        match err {
            ScoreDbError::MergeFailed(kept) => {
                assert!(kept.join("1_1.pdf").is_file());
                assert!(kept.join("2_1.pdf").is_file());
            }
            other => panic!("unexpected error: {other}"),
        }
        let merged = tools
            .calls()
            .into_iter()
            .find_map(|c| match c {
                ToolCall::Merge { inputs, .. } => Some(inputs),
                _ => None,
            })
            .unwrap();
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn refuses_existing_destination_before_rendering() {
        let env = TestEnv::new().with_scores(&["1_1.ly"]);
        let tools = FakeTools::new();
        let ws = Workspace::acquire_in(env.outside()).unwrap();
        let dest = env.outside().join("book.pdf");
        fs::write(&dest, b"old").unwrap();

        let err = run(
            &env.store(),
            &tools,
            ws,
            &Interrupt::new(),
            dest.to_str().unwrap(),
            TempFiles::Discard,
            &mut Vec::new(),
        )
        .unwrap_err();

        assert!(matches!(err, ScoreDbError::DestinationExists(_)));
        assert!(tools.calls().is_empty());
    }

    #[test]
    fn empty_database_is_an_error() {
        let env = TestEnv::new();
        let tools = FakeTools::new();
        let ws = Workspace::acquire_in(env.outside()).unwrap();
        let dest = env.outside().join("book.pdf");

        let err = run(
            &env.store(),
            &tools,
            ws,
            &Interrupt::new(),
            dest.to_str().unwrap(),
            TempFiles::Discard,
            &mut Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(err, ScoreDbError::ScoreNotFound(_)));
    }

    #[test]
    fn parse_temp_files() {
        assert_eq!(TempFiles::parse("keep").unwrap(), TempFiles::Keep);
        assert_eq!(TempFiles::parse("discard").unwrap(), TempFiles::Discard);
        assert!(matches!(
            TempFiles::parse("maybe"),
            Err(ScoreDbError::Usage(_))
        ));
    }
}
