use super::load_config;
use anyhow::Context;
use presskit_core::AppConfig;
use std::path::Path;

pub fn execute(config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let location = match config_path {
        Some(path) => path.to_path_buf(),
        None => AppConfig::config_path()?,
    };
    let rendered = config.to_toml().context("failed to render configuration")?;

    println!("# {}", location.display());
    print!("{rendered}");
    Ok(())
}
