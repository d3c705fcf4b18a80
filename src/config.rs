//! Saver configuration loading.

use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the saver looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/team_saver.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "TEAM_SAVER_CONFIG_PATH";
const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_STORE_NAME: &str = "TeamSaver";
const DEFAULT_LOG_FILE: &str = "logs/team_saver.log";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
/// Runtime configuration of the saver.
pub struct AppConfig {
    /// Clear the durable store when the world's persistent data is reset.
    #[serde(rename = "Wipe Teams on Map Wipe")]
    pub wipe_teams_on_map_wipe: bool,
    /// Directory holding the data file.
    #[serde(rename = "Data Directory")]
    pub data_dir: PathBuf,
    /// Logical store name; the data file is `<data_dir>/<store_name>.json`.
    #[serde(rename = "Store Name")]
    pub store_name: String,
    /// Activity log destination.
    #[serde(rename = "Log File")]
    pub log_file: PathBuf,
}

impl AppConfig {
    /// Load the configuration from disk, falling back to defaults on any failure.
    pub fn load() -> Self {
        Self::load_from(&resolve_config_path())
    }

    /// Load the configuration from `path`, falling back to defaults on any failure.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<Self>(&contents) {
                Ok(config) => {
                    info!(
                        path = %path.display(),
                        wipe_on_map_wipe = config.wipe_teams_on_map_wipe,
                        "loaded saver config"
                    );
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            wipe_teams_on_map_wipe: true,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            store_name: DEFAULT_STORE_NAME.into(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
