//! Logs go to a file because the terminal is busy showing fireworks.

use std::path::PathBuf;

use color_eyre::eyre::{Result, WrapErr as _};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

use crate::constants::{LOG_ENV_VAR, LOG_FILE_NAME};

pub fn log_path() -> PathBuf {
    std::env::temp_dir().join(LOG_FILE_NAME)
}

/// Set up the global subscriber. Verbosity comes from `FIREWORKS_LOG` and
/// defaults to `info`.
pub fn setup_logging() -> Result<PathBuf> {
    let path = log_path();
    let file = std::fs::File::create(&path)
        .wrap_err_with(|| format!("Couldn't create log file {}", path.display()))?;

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .with_env_var(LOG_ENV_VAR)
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_writer(file)
        .with_ansi(false)
        .with_env_filter(filter)
        .init();
    Ok(path)
}
