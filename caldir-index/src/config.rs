//! Index configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::{IndexError, IndexResult};

static DEFAULT_CALDIR_PATH: &str = "~/calendar";

fn default_caldir_path() -> PathBuf {
    PathBuf::from(DEFAULT_CALDIR_PATH)
}

fn default_extensions() -> Vec<String> {
    vec!["ics".to_string()]
}

/// Configuration read from ~/.config/caldir/config.toml, overridable with
/// `CALDIR_*` environment variables (`CALDIR_EXTENSIONS` is comma-separated).
#[derive(Deserialize, Clone, Debug)]
pub struct IndexConfig {
    /// Where calendar directories live
    #[serde(default = "default_caldir_path")]
    pub calendar_dir: PathBuf,

    /// File extensions (without the dot) that hold events
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        IndexConfig {
            calendar_dir: default_caldir_path(),
            extensions: default_extensions(),
        }
    }
}

impl IndexConfig {
    pub fn config_path() -> IndexResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| IndexError::Config("Could not determine config directory".into()))?
            .join("caldir");

        Ok(config_dir.join("config.toml"))
    }

    pub fn load() -> IndexResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from a specific file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> IndexResult<Self> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(
                Environment::with_prefix("CALDIR")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("extensions"),
            )
            .build()
            .map_err(|e| IndexError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| IndexError::Config(e.to_string()))
    }

    /// The calendar directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.calendar_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }
}
