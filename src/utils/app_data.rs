use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "triesearch";
const CONFIG_FILE: &str = "config.json";

/// Default snapshot location, relative to the working directory
pub const DEFAULT_SNAPSHOT_FILE: &str = "index.json";

/// Application configuration stored in the app data directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Snapshot file used by `save`, `load` and the one-shot subcommands.
    /// Relative paths resolve against the working directory.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,

    /// Load the snapshot when a session starts
    #[serde(default = "default_autoload")]
    pub autoload: bool,

    /// Save the snapshot when the interactive loop exits
    #[serde(default)]
    pub autosave_on_exit: bool,
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from(DEFAULT_SNAPSHOT_FILE)
}

fn default_autoload() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
            autoload: default_autoload(),
            autosave_on_exit: false,
        }
    }
}

impl AppConfig {
    /// Load config from the app data directory, or return default if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&get_config_path()?)
    }

    /// Load config from an explicit file, or return default if it does not exist
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = fs::read_to_string(config_path)
                .context("Failed to read config file")?;
            let config: AppConfig = serde_json::from_str(&content)
                .context("Failed to parse config file")?;
            log::debug!("loaded config from {}", config_path.display());
            Ok(config)
        } else {
            log::debug!("no config at {}, using defaults", config_path.display());
            Ok(Self::default())
        }
    }

    /// Override the snapshot path when one was given on the command line
    pub fn with_snapshot_override(mut self, snapshot: Option<PathBuf>) -> Self {
        if let Some(path) = snapshot {
            self.snapshot_path = path;
        }
        self
    }
}

/// Get the path to the config file
pub fn get_config_path() -> Result<PathBuf> {
    let app_dir = get_app_data_dir()?;
    Ok(app_dir.join(CONFIG_FILE))
}

/// Get the application data directory
pub fn get_app_data_dir() -> Result<PathBuf> {
    let base = if cfg!(target_os = "macos") {
        dirs::home_dir()
            .map(|h| h.join("Library").join("Application Support"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
    } else {
        // Linux/Unix: use XDG_DATA_HOME or ~/.local/share
        dirs::data_dir()
    };

    let base = base.context("Could not determine app data directory")?;
    let app_dir = base.join(APP_NAME);

    fs::create_dir_all(&app_dir)?;
    Ok(app_dir)
}
