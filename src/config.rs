//! Optional config file loading. Search order: ./redditurls.toml, then
//! $XDG_CONFIG_HOME/redditurls/config.toml (or ~/.config/redditurls/config.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file contents. All fields optional; only present keys override defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct Config {
    /// Scheme and host serving the listing API (default https://www.reddit.com).
    pub base_url: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

/// Config locations in lookup order.
pub fn search_paths() -> Result<Vec<PathBuf>, String> {
    let cwd = std::env::current_dir()
        .map_err(|e| format!("Cannot determine current directory: {}", e))?;
    let mut paths = vec![cwd.join("redditurls.toml")];
    if let Some(d) = dirs::config_dir() {
        paths.push(d.join("redditurls").join("config.toml"));
    }
    Ok(paths)
}

/// Read and parse one config file.
pub fn load_from(path: &Path) -> Result<Config, String> {
    let s = std::fs::read_to_string(path)
        .map_err(|e| format!("Cannot read config {}: {}", path.display(), e))?;
    toml::from_str(&s).map_err(|e| format!("Invalid config {}: {}", path.display(), e))
}

/// First existing file among `paths`. No existing file returns Ok(None).
/// Invalid TOML or I/O error reading a present file returns Err.
pub fn load_config_from(paths: &[PathBuf]) -> Result<Option<Config>, String> {
    for path in paths {
        if path.exists() {
            return load_from(path).map(Some);
        }
    }
    Ok(None)
}

/// Load from the default search order.
pub fn load_config() -> Result<Option<Config>, String> {
    load_config_from(&search_paths()?)
}
