use crate::error::{Result, ScoreDbError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Ctrl-C flag polled between external processes.
///
/// The child process receives the terminal's SIGINT on its own; this flag
/// only tells the orchestration to stop and unwind so the workspace drops.
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    flag: Arc<AtomicBool>,
}

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route Ctrl-C to this flag instead of terminating the process.
    pub fn install(&self) -> Result<()> {
        let flag = self.flag.clone();
        ctrlc::set_handler(move || {
            flag.store(true, Ordering::SeqCst);
        })
        .map_err(|e| ScoreDbError::Config(format!("Failed to install Ctrl-C handler: {}", e)))
    }

    pub fn trigger(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    pub fn check(&self) -> Result<()> {
        if self.is_set() {
            Err(ScoreDbError::Interrupted)
        } else {
            Ok(())
        }
    }
}
