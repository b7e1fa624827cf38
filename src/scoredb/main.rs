//! # Scoredb CLI
//!
//! Binary entry point. Everything runs inside `cli::run`, which returns the
//! exit code instead of calling `std::process::exit`, so temp directories held
//! by the failing command are removed before the process ends.

mod cli;

use std::process::ExitCode;

fn main() -> ExitCode {
    cli::run()
}
