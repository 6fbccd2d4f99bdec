use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::types::AppConfig;

/// Discover and load the config.
///
/// Priority:
/// 1. `--config` flag (explicit path)
/// 2. `$MDRENDER_CONFIG` environment variable
/// 3. `$XDG_CONFIG_HOME/mdrender/config.toml`
/// 4. `~/.config/mdrender/config.toml`
///
/// When nothing is found the built-in defaults are used. An explicit path
/// that cannot be read is an error; discovered paths are only used if they
/// exist.
pub fn load_config(explicit_path: Option<&Path>) -> Result<AppConfig> {
    let path = match explicit_path {
        Some(path) => path.to_path_buf(),
        None => match find_config() {
            Some(path) => path,
            None => {
                tracing::debug!("no config file found, using defaults");
                return Ok(AppConfig::default());
            }
        },
    };
    load_config_file(&path)
}

/// Read and parse a single config file.
pub fn load_config_file(path: &Path) -> Result<AppConfig> {
    tracing::debug!(path = %path.display(), "loading config");
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let config: AppConfig = toml::from_str(&contents)
        .with_context(|| format!("parsing TOML from {}", path.display()))?;
    Ok(config)
}

fn find_config() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("MDRENDER_CONFIG") {
        let p = PathBuf::from(&path);
        if p.is_file() {
            return Some(p);
        }
    }

    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        let p = PathBuf::from(xdg).join("mdrender/config.toml");
        if p.is_file() {
            return Some(p);
        }
    }

    let home = std::env::var("HOME").ok().map(PathBuf::from)?;
    let p = home.join(".config/mdrender/config.toml");
    p.is_file().then_some(p)
}
