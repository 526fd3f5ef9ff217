//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};

const DEFAULT_STATUS_MS: u64 = 1500;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub(crate) struct Config {
    /// Prompt catalog CSV (`role,title,prompt[,author]`)
    pub(crate) catalog: Option<PathBuf>,

    /// Concept builder examples CSV (`concept,example`)
    pub(crate) concepts: Option<PathBuf>,

    /// How long a copy acknowledgement stays visible
    #[serde(rename = "status-ms")]
    pub(crate) status_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: None,
            concepts: None,
            status_ms: DEFAULT_STATUS_MS,
        }
    }
}

impl Config {
    /// Explicit path first, then `~/.config/plib/plib.yml`, then defaults.
    pub(crate) fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path)
                .context(format!("Failed to load config from {}", path.display()));
        }

        if let Ok(dir) = crate::system::app_dir() {
            let user_config = dir.join("plib.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    pub(crate) fn with_overrides(mut self, catalog: Option<PathBuf>, concepts: Option<PathBuf>) -> Self {
        if catalog.is_some() {
            self.catalog = catalog;
        }
        if concepts.is_some() {
            self.concepts = concepts;
        }
        self
    }
}
