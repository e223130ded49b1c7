//! Configuration loading and parsing.
//!
//! Parses `ox-find.toml` (or an override path provided by the binary):
//!
//! ```toml
//! [search]
//! prompt = "/"
//! replace_prompt = "replace with: "
//! size_limit = 10485760
//! wrap_notice = true
//!
//! [render]
//! styled = true
//! ```
//!
//! Every field is optional. Unknown fields are ignored so older binaries
//! tolerate newer files. A file that fails to parse falls back to defaults
//! with a warning. The floored compiled size limit is derived on demand and
//! never written back into `file`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::Path, path::PathBuf};
use tracing::{info, warn};

/// File name looked up in the working directory and the platform config dir.
pub const CONFIG_FILE_NAME: &str = "ox-find.toml";

/// Smallest compiled-pattern size limit accepted from configuration.
pub const MIN_SIZE_LIMIT: usize = 64 * 1024;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    #[serde(default = "SearchConfig::default_prompt")]
    pub prompt: String,
    #[serde(default = "SearchConfig::default_replace_prompt")]
    pub replace_prompt: String,
    #[serde(default = "SearchConfig::default_size_limit")]
    pub size_limit: usize,
    /// Report a notice when navigation wraps around the buffer.
    #[serde(default = "SearchConfig::default_wrap_notice")]
    pub wrap_notice: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            prompt: Self::default_prompt(),
            replace_prompt: Self::default_replace_prompt(),
            size_limit: Self::default_size_limit(),
            wrap_notice: Self::default_wrap_notice(),
        }
    }
}

impl SearchConfig {
    fn default_prompt() -> String {
        "/".to_string()
    }
    fn default_replace_prompt() -> String {
        "replace with: ".to_string()
    }
    const fn default_size_limit() -> usize {
        10 * (1 << 20)
    }
    const fn default_wrap_notice() -> bool {
        true
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Style layer highlighting; `false` falls back to reverse video.
    #[serde(default = "RenderConfig::default_styled")]
    pub styled: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            styled: Self::default_styled(),
        }
    }
}

impl RenderConfig {
    const fn default_styled() -> bool {
        true
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
}

/// Best-effort config path: working directory first, then the platform
/// config dir (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("ox-find").join(CONFIG_FILE_NAME);
    }
    local
}

/// Load configuration, tolerating a missing or malformed file.
pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    match fs::read_to_string(&path) {
        Ok(content) => Ok(parse_or_default(&path, content)),
        Err(_) => Ok(Config::default()),
    }
}

/// Load a file the user named explicitly; a missing or unreadable file is an error.
pub fn load_required(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    Ok(parse_or_default(path, content))
}

fn parse_or_default(path: &Path, content: String) -> Config {
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), "config_loaded");
            Config {
                raw: Some(content),
                file,
            }
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed");
            Config::default()
        }
    }
}

impl Config {
    /// Compiled pattern size limit, floored at [`MIN_SIZE_LIMIT`].
    pub fn search_size_limit(&self) -> usize {
        let raw = self.file.search.size_limit;
        if raw < MIN_SIZE_LIMIT {
            info!(target: "config", raw, floor = MIN_SIZE_LIMIT, "size_limit_raised");
        }
        raw.max(MIN_SIZE_LIMIT)
    }
}
