//! Subcommand handlers.

pub mod config;
pub mod list;
pub mod run;

use anyhow::Context;
use presskit_core::AppConfig;
use std::path::Path;

/// Load the file (explicit or default location) with environment overrides applied.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    AppConfig::load_with_env(path).context("failed to load configuration")
}
