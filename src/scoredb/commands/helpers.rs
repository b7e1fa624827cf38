use crate::error::{Result, ScoreDbError};
use crate::interrupt::Interrupt;
use crate::model::ExcerptId;
use crate::store::ScoreStore;
use crate::tools::{clear_artifacts, RenderOutput, Toolchain};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Render one excerpt to `output_base`, failing on a non-zero exit.
pub fn render_score<T: Toolchain>(
    store: &ScoreStore,
    tools: &T,
    interrupt: &Interrupt,
    id: &ExcerptId,
    output_base: &Path,
) -> Result<RenderOutput> {
    let source = store.resolve(id)?;
    clear_artifacts(output_base)?;

    debug!(id = %id, "rendering");
    let output = tools.render(&source, output_base)?;
    interrupt.check()?;

    if !output.status.success {
        return Err(ScoreDbError::ToolFailed {
            tool: tools.render_tool().to_string(),
            file: id.file_name(store.extension()),
        });
    }
    Ok(output)
}

pub fn require_pdf<T: Toolchain>(
    output: &RenderOutput,
    tools: &T,
    store: &ScoreStore,
    id: &ExcerptId,
) -> Result<PathBuf> {
    output.pdf.clone().ok_or_else(|| ScoreDbError::MissingOutput {
        tool: tools.render_tool().to_string(),
        artifact: "PDF",
        file: id.file_name(store.extension()),
    })
}

pub fn require_midi<T: Toolchain>(
    output: &RenderOutput,
    tools: &T,
    store: &ScoreStore,
    id: &ExcerptId,
) -> Result<PathBuf> {
    output.midi.clone().ok_or_else(|| ScoreDbError::MissingOutput {
        tool: tools.render_tool().to_string(),
        artifact: "MIDI",
        file: id.file_name(store.extension()),
    })
}

/// Absolute, `..`-free form of `path`. The longest existing prefix is
/// canonicalized so symlinks compare equal to their targets.
pub fn normalize(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path)?;

    let mut lexical = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::ParentDir => {
                lexical.pop();
            }
            Component::CurDir => {}
            other => lexical.push(other),
        }
    }

    let mut existing = lexical.as_path();
    let mut rest = Vec::new();
    while !existing.exists() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                rest.push(name.to_os_string());
                existing = parent;
            }
            _ => return Ok(lexical),
        }
    }

    let mut resolved = existing.canonicalize()?;
    for name in rest.into_iter().rev() {
        resolved.push(name);
    }
    Ok(resolved)
}

/// Normalize a PDF destination: append `.pdf` when missing, make it
/// absolute, and refuse to overwrite.
pub fn pdf_destination(raw: &str) -> Result<PathBuf> {
    let with_ext = if raw.ends_with(".pdf") {
        raw.to_string()
    } else {
        format!("{}.pdf", raw)
    };
    let path = normalize(Path::new(&with_ext))?;
    if path.exists() {
        return Err(ScoreDbError::DestinationExists(path));
    }
    Ok(path)
}
