use crate::commands::{CmdMessage, CmdResult, Reporter};
use crate::config::{ScoreDbConfig, CONFIG_FILENAME};
use crate::error::Result;
use std::fs;
use std::path::Path;

const README_STUB: &str = "# Score database\n\nManaged with `scoredb`. Run `scoredb help` for usage.\n";

/// Turn `root` into a database: manifest, data directory, documentation.
/// Existing files are left alone.
pub fn run(root: &Path, out: &mut dyn Reporter) -> Result<CmdResult> {
    let manifest = root.join(CONFIG_FILENAME);
    if manifest.exists() {
        let config = ScoreDbConfig::load(root)?;
        out.report(CmdMessage::info(format!(
            "Already initialized: {}",
            root.display()
        )));
        return Ok(CmdResult::default().with_config(config));
    }

    let config = ScoreDbConfig::default();
    fs::create_dir_all(root.join(&config.data_dir))?;
    config.save(root)?;

    for name in &config.documents {
        let doc = root.join(name);
        if !doc.exists() {
            fs::write(doc, README_STUB)?;
        }
    }

    out.report(CmdMessage::success(format!(
        "Initialized score database in {}",
        root.display()
    )));
    Ok(CmdResult::default().with_config(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn creates_layout() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("scores");

        run(&root, &mut Vec::new()).unwrap();

        assert!(root.join(CONFIG_FILENAME).is_file());
        assert!(root.join("data").is_dir());
        assert!(root.join("README.md").is_file());
    }

    #[test]
    fn keeps_existing_readme() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("README.md"), "mine").unwrap();

        run(temp.path(), &mut Vec::new()).unwrap();

        assert_eq!(
            fs::read_to_string(temp.path().join("README.md")).unwrap(),
            "mine"
        );
    }

    #[test]
    fn second_run_changes_nothing() {
        let temp = TempDir::new().unwrap();
        run(temp.path(), &mut Vec::new()).unwrap();
        fs::write(
            temp.path().join(CONFIG_FILENAME),
            r#"{ "separator": "-" }"#,
        )
        .unwrap();

        let mut messages = Vec::new();
        let result = run(temp.path(), &mut messages).unwrap();

        assert_eq!(result.config.unwrap().separator, "-");
        assert!(messages[0].content.starts_with("Already initialized"));
    }
}
