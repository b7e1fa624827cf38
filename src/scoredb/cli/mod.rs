//! # CLI Layer
//!
//! One client of the scoredb library. It is the only place that knows about
//! terminal output, exit codes, and signal handling.
//!
//! ## Verbs
//!
//! Verbs keep their historical underscore names (`check_integrity`,
//! `export_all`); the kebab-case spellings are accepted as aliases.
//! Positional arguments follow the old `manage.py` order, so existing shell
//! habits keep working:
//!
//! ```text
//! scoredb checkout LISTFILE DESTINATION [SEPARATOR]
//! scoredb export_all DESTINATION [keep|discard]
//! scoredb listen ID "aplaymidi --port=129:0"
//! ```
//!
//! ## Exit Codes
//!
//! `run` never calls `std::process::exit`. Errors bubble up to it as
//! `ScoreDbError`, are printed once, and become the process exit code via
//! `ScoreDbError::exit_code`. Returning normally lets the workspace of the
//! failed command drop first.
//!
//! ## Module Structure
//!
//! - `commands`: dispatch and per-verb handlers
//! - `logging`: tracing subscriber setup
//! - `render`: message and list output
//! - `setup`: clap definitions and help text

mod commands;
mod logging;
mod render;
mod setup;

pub use commands::run;
