use anyhow::Result;
use std::{env, path::PathBuf};

/// Resolve the gitduo configuration directory.
///
/// `$XDG_CONFIG_HOME/gitduo`, falling back to `$HOME/.config/gitduo`.
pub fn gitduo_home() -> Result<PathBuf> {
    let xdg = env::var_os("XDG_CONFIG_HOME");
    let base = xdg
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env::var_os("HOME").unwrap_or_default()).join(".config"));
    Ok(base.join("gitduo"))
}

/// Path of the optional configuration file.
pub fn config_path() -> Result<PathBuf> {
    Ok(gitduo_home()?.join("config.toml"))
}
