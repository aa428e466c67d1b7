use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Deserialize;
use std::fs;

use crate::paths::config_path;

/// Which platform acts as the fetch source when attaching an existing
/// working copy. Shared by the CLI flag and the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchChoice {
    Primary,
    Secondary,
}

/// Optional configuration loaded from `$(gitduo home)/config.toml`.
///
/// Everything in it is a default that CLI flags override. A missing file
/// is not an error; it just means empty defaults.
///
/// Example TOML:
/// ```toml
/// [identity]
/// email = "dev@example.com"
/// name  = "Dev"
///
/// [defaults]
/// fetch_from = "primary"
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub identity: Identity,
    #[serde(default)]
    pub defaults: Defaults,
}

/// Default local author identity applied to configured working copies.
#[derive(Debug, Default, Deserialize)]
pub struct Identity {
    pub email: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Defaults {
    pub fetch_from: Option<FetchChoice>,
}

/// Load `config.toml`, or defaults when the file does not exist.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config() -> Result<Config> {
    let path = config_path()?;
    let txt = match fs::read_to_string(&path) {
        Ok(txt) => txt,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
        Err(e) => {
            return Err(e).with_context(|| format!("failed to read {}", path.display()));
        }
    };
    let cfg: Config = toml::from_str(&txt)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(cfg)
}
