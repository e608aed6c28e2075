//! Configuration file support for Just Calories.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/just-calories/config.toml`.

use crate::{Error, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Output formatting for the CLI
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Show logged actual weights next to projections
    #[serde(default = "default_show_actuals")]
    pub show_actuals: bool,

    /// chrono format string for human-readable dates
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_actuals: default_show_actuals(),
            date_format: default_date_format(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        std::env::var_os("HOME")
            .map(|home| PathBuf::from(home).join(".local/share"))
            .unwrap_or_else(|| PathBuf::from("."))
    });
    base.join("just-calories")
}

fn default_show_actuals() -> bool {
    true
}

fn default_date_format() -> String {
    "%m/%d/%Y".into()
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Reject settings the CLI cannot use
    pub fn validate(&self) -> Result<()> {
        if self.display.date_format.trim().is_empty() {
            return Err(Error::Config("display.date_format must not be empty".into()));
        }
        let format = &self.display.date_format;
        if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
            return Err(Error::Config(format!(
                "display.date_format {:?} is not a valid strftime format",
                format
            )));
        }
        // Time-of-day fields are valid strftime but cannot render a date
        let sample = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();
        let mut rendered = String::new();
        if write!(rendered, "{}", sample.format(format)).is_err() {
            return Err(Error::Config(format!(
                "display.date_format {:?} cannot format a calendar date",
                format
            )));
        }
        Ok(())
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            std::env::var_os("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .unwrap_or_else(|| PathBuf::from("."))
        });
        base.join("just-calories").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
