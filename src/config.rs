use anyhow::{Context, Result};
use log::debug;
use serde::Deserialize;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use crate::cli::Cli;
use crate::listing::Format;

pub const CONFIG_FILE: &str = "lsl.toml";
pub const CONFIG_ENV: &str = "LSL_CONFIG";

#[derive(Debug, Default, Deserialize)]
pub struct LslConfig {
    #[serde(default)]
    pub listing: ListingConfig,
}

#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq)]
pub struct ListingConfig {
    #[serde(default)]
    pub all: bool,
    #[serde(default)]
    pub long: bool,
}

impl LslConfig {
    /// Flags only switch features on; the file supplies the defaults.
    pub fn format(&self, cli: &Cli) -> Format {
        Format {
            include_hidden: self.listing.all || cli.all,
            long: self.listing.long || cli.long,
        }
    }
}

/// `$LSL_CONFIG` if set, else `lsl.toml` in the current directory.
pub fn config_path() -> Result<PathBuf> {
    resolve_config_path(env::var_os(CONFIG_ENV), env::current_dir)
}

/// The working directory is only consulted without an explicit path, so a
/// deleted cwd does not matter when `$LSL_CONFIG` is set.
fn resolve_config_path<F>(explicit: Option<OsString>, current_dir: F) -> Result<PathBuf>
where
    F: FnOnce() -> io::Result<PathBuf>,
{
    match explicit {
        Some(path) => Ok(PathBuf::from(path)),
        None => {
            let dir = current_dir().context("Failed to resolve the current directory")?;
            Ok(dir.join(CONFIG_FILE))
        }
    }
}

/// A missing file means defaults. A broken one is an error.
pub fn load_config(path: &Path) -> Result<LslConfig> {
    if !path.exists() {
        return Ok(LslConfig::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: LslConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    debug!("Loaded config from {}: {:?}", path.display(), config);
    Ok(config)
}
