//! Configuration for the adlens dashboard.
//!
//! The configuration is a small YAML document; every field is optional.
//!
//! ```yaml
//! title: Marketing Performance
//! data_path: /srv/exports/campaigns.json
//! default_sort:
//!   key: totalSpend
//!   direction: desc
//! theme: dark
//! filter:
//!   min_len: 0
//!   max_len: 40
//! tick_rate_ms: 50
//! ```
//!
//! Lookup order: an explicit path (which must exist), then
//! `~/.adlens/config.yaml` when present, then built-in defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use adlens_core::{AdlensError, Result, SortState};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Config file name inside `~/.adlens`.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Color palette selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    #[default]
    Default,
    Dark,
    Light,
}

/// Validation rules for the channel filter input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterRules {
    /// Minimum length of a non-empty filter (0 disables the check)
    pub min_len: usize,
    /// Maximum filter length
    pub max_len: usize,
}

impl Default for FilterRules {
    fn default() -> Self {
        Self {
            min_len: 0,
            max_len: 40,
        }
    }
}

/// Dashboard configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Title shown in the header
    pub title: String,
    /// JSON data file; the bundled fixture is used when unset
    pub data_path: Option<PathBuf>,
    /// Initial sort column and direction
    pub default_sort: SortState,
    /// Color palette
    pub theme: ThemeChoice,
    /// Filter input validation
    pub filter: FilterRules,
    /// Event poll interval in milliseconds
    pub tick_rate_ms: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "Marketing Performance Dashboard".to_string(),
            data_path: None,
            default_sort: SortState::default(),
            theme: ThemeChoice::default(),
            filter: FilterRules::default(),
            tick_rate_ms: 50,
        }
    }
}

impl DashboardConfig {
    /// Parse a configuration from YAML text and validate it.
    pub fn from_yaml_str(content: &str, origin: &Path) -> Result<Self> {
        let config: DashboardConfig =
            serde_yaml::from_str(content).map_err(|e| AdlensError::ConfigInvalid {
                path: origin.to_path_buf(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load the configuration from a file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => AdlensError::config_not_found_with_source(path, e),
            _ => AdlensError::io("reading configuration", path, e),
        })?;
        let config = Self::from_yaml_str(&content, path)?;
        info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Resolve and load the configuration.
    ///
    /// An explicit path must exist. Without one, the default location is
    /// used if a file is there; otherwise defaults apply.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        match default_config_path() {
            Ok(path) if path.exists() => Self::load_from(&path),
            _ => {
                debug!("no configuration file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Check values that deserialize fine but make no sense.
    pub fn validate(&self) -> Result<()> {
        if self.filter.max_len == 0 {
            return Err(AdlensError::config_validation("filter.max_len must be at least 1"));
        }
        if self.filter.min_len > self.filter.max_len {
            return Err(AdlensError::config_validation(format!(
                "filter.min_len ({}) exceeds filter.max_len ({})",
                self.filter.min_len, self.filter.max_len
            )));
        }
        if self.tick_rate_ms == 0 {
            return Err(AdlensError::config_validation("tick_rate_ms must be positive"));
        }
        if self.title.trim().is_empty() {
            return Err(AdlensError::config_validation("title must not be empty"));
        }
        Ok(())
    }
}

/// Default configuration path (`~/.adlens/config.yaml`).
pub fn default_config_path() -> Result<PathBuf> {
    Ok(adlens_core::logging::adlens_home()?.join(CONFIG_FILE_NAME))
}
