use crate::core::currency::Denomination;
use crate::core::store::DEFAULT_SOURCE_NAME;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

/// Name of the folder holding catalog sources inside the data directory.
const SOURCES_DIR_NAME: &str = "json_files";

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    /// Folder holding the JSON catalog sources.
    pub data_path: Option<String>,
    /// Denomination for price bounds when none is given on the command line.
    #[serde(default)]
    pub default_unit: Denomination,
    /// Catalog copied into an empty folder on first run.
    pub bundled_prices: Option<String>,
}

impl AppConfig {
    /// Loads the config from the default location, falling back to defaults
    /// when no config file has been created yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(path = %config_path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "goldenanvil", "compendium")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn sources_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("com", "goldenanvil", "compendium")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().join(SOURCES_DIR_NAME))
    }

    /// Bundled default catalog, `prices.json` beside the executable unless configured.
    pub fn bundled_prices_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.bundled_prices {
            return Ok(PathBuf::from(custom_path));
        }
        let exe = std::env::current_exe().context("Could not determine executable path")?;
        let dir = exe
            .parent()
            .context("Executable path has no parent directory")?;
        Ok(dir.join(DEFAULT_SOURCE_NAME))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
