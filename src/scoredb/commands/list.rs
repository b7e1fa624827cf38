use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::ScoreStore;

pub fn run(store: &ScoreStore) -> Result<CmdResult> {
    let ids = store.list()?;
    Ok(CmdResult::default().with_listed(ids))
}
