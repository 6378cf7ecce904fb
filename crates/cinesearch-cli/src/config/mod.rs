//! Application configuration module.
//!
//! Manages the TOML config file holding request policy and UI settings.
//! The TMDB token is read from the environment, never from this file.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::AppConfig;
pub use paths::{resolve_config_path, resolve_log_path};
