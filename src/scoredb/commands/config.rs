use crate::commands::{CmdMessage, CmdResult, Reporter};
use crate::config::{ConfigKey, ScoreDbConfig};
use crate::error::Result;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(ConfigKey),
    Set(ConfigKey, String),
}

impl ConfigAction {
    pub fn from_args(key: Option<&str>, value: Option<&str>) -> Result<Self> {
        match (key, value) {
            (None, _) => Ok(ConfigAction::ShowAll),
            (Some(key), None) => Ok(ConfigAction::ShowKey(ConfigKey::parse(key)?)),
            (Some(key), Some(value)) => Ok(ConfigAction::Set(
                ConfigKey::parse(key)?,
                value.to_string(),
            )),
        }
    }
}

pub fn run(root: &Path, action: ConfigAction, out: &mut dyn Reporter) -> Result<CmdResult> {
    let mut config = ScoreDbConfig::load(root)?;

    match action {
        ConfigAction::ShowAll => {}
        ConfigAction::ShowKey(key) => {
            out.report(CmdMessage::info(format!(
                "{} = {}",
                key.name(),
                config.get(key)
            )));
        }
        ConfigAction::Set(key, value) => {
            config.set(key, &value)?;
            config.save(root)?;
            out.report(CmdMessage::success(format!(
                "{} set to {}",
                key.name(),
                config.get(key)
            )));
        }
    }

    Ok(CmdResult::default().with_config(config))
}
