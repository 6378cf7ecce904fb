//! Config directory resolution.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Log file name, written next to the config file while the TUI runs.
const LOG_FILE_NAME: &str = "cinesearch.log";

/// Resolves the config file path.
///
/// - If `dir` is `Some`, returns `{dir}/config.toml`.
/// - Otherwise returns `~/.config/cinesearch/config.toml`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined (when `dir` is `None`).
pub fn resolve_config_path(dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join("config.toml"));
    }

    let home = std::env::var("HOME").context("HOME environment variable is not set")?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join("cinesearch")
        .join("config.toml"))
}

/// Resolves the TUI log file path (sibling of the config file).
///
/// # Errors
///
/// Same as [`resolve_config_path`].
pub fn resolve_log_path(dir: Option<&Path>) -> Result<PathBuf> {
    Ok(resolve_config_path(dir)?.with_file_name(LOG_FILE_NAME))
}
