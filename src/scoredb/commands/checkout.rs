use crate::commands::helpers::normalize;
use crate::commands::{CmdMessage, CmdResult, Reporter, ScoreDbPaths};
use crate::config::ScoreDbConfig;
use crate::error::{Result, ScoreDbError};
use crate::interrupt::Interrupt;
use crate::store::ScoreStore;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Copy every variant of the IDs listed in `list_file` into a new database
/// at `dest`.
pub fn run(
    store: &ScoreStore,
    config: &ScoreDbConfig,
    paths: &ScoreDbPaths,
    interrupt: &Interrupt,
    list_file: &Path,
    dest: &Path,
    separator: &str,
    out: &mut dyn Reporter,
) -> Result<CmdResult> {
    let ids = read_id_list(store, list_file)?;

    let source_root = normalize(&paths.root)?;
    let dest = normalize(dest)?;
    if source_root.starts_with(&dest) {
        return Err(ScoreDbError::DestinationContainsSource(dest));
    }
    if dest.exists() {
        return Err(ScoreDbError::DestinationExists(dest));
    }

    let documents: Vec<PathBuf> = config
        .documents
        .iter()
        .map(|name| paths.root.join(name))
        .collect();
    if let Some(missing) = documents.iter().find(|doc| !doc.is_file()) {
        return Err(ScoreDbError::MissingDocument(missing.clone()));
    }

    let dest_data = dest.join(&config.data_dir);
    if normalize(&dest_data)? == normalize(store.data_dir())? {
        return Err(ScoreDbError::DestinationContainsSource(dest_data));
    }
    fs::create_dir_all(&dest_data)?;
    info!(dest = %dest.display(), ids = ids.len(), "checking out");

    let mut copied = Vec::new();
    for id in &ids {
        interrupt.check()?;
        let variants = store.variants(id, separator)?;
        if variants.is_empty() {
            out.report(CmdMessage::warning(format!(
                "warning: No files found for {}",
                id
            )));
            continue;
        }
        for source in variants {
            let target = dest_data.join(source.file_name().unwrap_or_default());
            debug!(from = %source.display(), to = %target.display(), "copy");
            fs::copy(&source, &target)?;
            copied.push(target);
        }
    }

    let mut manifest = config.clone();
    manifest.separator = separator.to_string();
    manifest.save(&dest)?;

    for (name, source) in config.documents.iter().zip(&documents) {
        fs::copy(source, dest.join(name))?;
    }

    out.report(CmdMessage::success("Done."));
    Ok(CmdResult::default().with_copied(copied).with_output(dest))
}

/// Whitespace-separated IDs, sorted and deduplicated.
fn read_id_list(store: &ScoreStore, list_file: &Path) -> Result<Vec<crate::model::ExcerptId>> {
    let content = fs::read_to_string(list_file)?;
    let mut ids: Vec<_> = content.split_whitespace().map(|raw| store.id(raw)).collect();
    ids.sort();
    ids.dedup();
    Ok(ids)
}
