//! Locating the dump directory.
//!
//! Precedence, highest first: an explicit directory override, then the
//! config file (passed path, else the `DYNACCESS_CONFIG` environment
//! variable, else `dynaccess.json` in the working directory). A missing
//! config file is not an error; it resolves to defaults.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, error, info};
use serde::{Deserialize, Serialize};

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "DYNACCESS_CONFIG";

/// Config file looked up when neither a path nor the environment variable
/// is set.
pub const DEFAULT_CONFIG_PATH: &str = "dynaccess.json";

/// Where to find the dumped collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DumpConfig {
    /// Directory holding one `<collection>.json` file per entity set.
    #[serde(default = "default_dump_dir")]
    pub dump_dir: PathBuf,
}

fn default_dump_dir() -> PathBuf {
    PathBuf::from(".")
}

impl DumpConfig {
    pub fn new(dump_dir: impl Into<PathBuf>) -> Self {
        Self {
            dump_dir: dump_dir.into(),
        }
    }
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            dump_dir: default_dump_dir(),
        }
    }
}

/// Load the dump configuration, applying the directory override last.
pub fn load_dump_config(
    config_path: Option<&str>,
    dump_dir_override: Option<PathBuf>,
) -> Result<DumpConfig, io::Error> {
    let mut config = read_config_file(config_path)?;
    if let Some(dump_dir) = dump_dir_override {
        debug!("overriding dump directory with '{}'", dump_dir.display());
        config.dump_dir = dump_dir;
    }
    Ok(config)
}

fn read_config_file(config_path: Option<&str>) -> Result<DumpConfig, io::Error> {
    let path = config_path
        .map(ToString::to_string)
        .or_else(|| env::var(CONFIG_ENV_VAR).ok())
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    if !Path::new(&path).exists() {
        debug!("no config file at '{path}', using defaults");
        return Ok(DumpConfig::default());
    }

    info!("loading configuration from '{path}'");
    let raw = std::fs::read_to_string(&path)?;
    serde_json::from_str(&raw).map_err(|e| {
        error!("failed to parse config file '{path}': {e}");
        io::Error::new(io::ErrorKind::InvalidData, e)
    })
}
