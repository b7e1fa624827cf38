use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "SCOREDB_LOG";

/// Diagnostics go to stderr so they never mix with command output.
/// `SCOREDB_LOG` takes precedence over `--verbose`.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
