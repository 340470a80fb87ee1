// src/logging.rs

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing::Subscriber;
use tracing_subscriber::EnvFilter;

/// Builds a subscriber writing plain-text logs to `log_file`, truncating it.
///
/// The subscriber is returned rather than installed globally; callers scope it
/// around their work with `tracing::subscriber::with_default`. `RUST_LOG`
/// overrides the level picked from `verbosity` (0 info, 1 debug, 2+ trace).
pub fn file_subscriber(log_file: &Path, verbosity: u8) -> io::Result<impl Subscriber + Send + Sync + 'static> {
    let file = File::create(log_file)?;
    let default_filter = match verbosity {
        0 => "repo_diff=info",
        1 => "repo_diff=debug",
        _ => "repo_diff=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    Ok(tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(filter)
        .finish())
}
