//! Configuration management for chatgpt-usage.
//!
//! Handles:
//! - Candidate locations of the export file
//! - Analysis settings (cutoff date, tokenizer model, role scope)
//! - Chart output settings

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analytics::RoleScope;
use crate::error::{Result, UsageError};
use crate::parser::DEFAULT_SEARCH_PATHS;
use crate::tokenizer::DEFAULT_MODEL;
use crate::util::atomic_write;

/// Date format accepted for the cutoff.
pub const CUTOFF_FORMAT: &str = "%Y-%m-%d";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Input settings.
    #[serde(default)]
    pub input: InputConfig,
    /// Analysis settings.
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from the default location, or defaults if absent.
    pub fn load() -> Result<Self> {
        let config_path = default_config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            UsageError::io(format!("Failed to read config file: {}", path.display()), e)
        })?;

        toml::from_str(&content).map_err(|e| UsageError::InvalidConfig {
            message: e.to_string(),
        })
    }

    /// Merge another config into this one (non-default values in `other` win).
    pub fn merge_from(&mut self, other: &Config) {
        let defaults = Config::default();

        if other.input.search_paths != defaults.input.search_paths {
            self.input.search_paths = other.input.search_paths.clone();
        }

        if other.analysis.cutoff_date != defaults.analysis.cutoff_date {
            self.analysis.cutoff_date = other.analysis.cutoff_date.clone();
        }
        if other.analysis.model != defaults.analysis.model {
            self.analysis.model = other.analysis.model.clone();
        }
        if other.analysis.role_scope != defaults.analysis.role_scope {
            self.analysis.role_scope = other.analysis.role_scope;
        }

        if other.output.chart_path != defaults.output.chart_path {
            self.output.chart_path = other.output.chart_path.clone();
        }
        self.output.open_chart = other.output.open_chart;
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<()> {
        let config_path = default_config_path()?;
        self.save_to(&config_path)
    }

    /// Save configuration to a specific path, atomically.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| UsageError::InvalidConfig {
            message: format!("Failed to serialize config: {e}"),
        })?;

        atomic_write(path, content.as_bytes())
    }
}

/// Where to look for the export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Candidate paths, tried in order.
    #[serde(default = "default_search_paths")]
    pub search_paths: Vec<PathBuf>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            search_paths: default_search_paths(),
        }
    }
}

/// What to count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Inclusive lower bound on message dates, `YYYY-MM-DD`.
    #[serde(default = "default_cutoff")]
    pub cutoff_date: String,
    /// Model identifier used to pick a token encoding.
    #[serde(default = "default_model")]
    pub model: String,
    /// Which roles feed the daily buckets.
    #[serde(default)]
    pub role_scope: RoleScope,
}

impl AnalysisConfig {
    /// Parse the configured cutoff date.
    pub fn cutoff(&self) -> Result<NaiveDate> {
        parse_cutoff(&self.cutoff_date)
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            cutoff_date: default_cutoff(),
            model: default_model(),
            role_scope: RoleScope::default(),
        }
    }
}

/// Chart output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Chart image path. Overwritten on every run.
    #[serde(default = "default_chart_path")]
    pub chart_path: PathBuf,
    /// Open the chart in the system viewer after rendering.
    #[serde(default = "default_true")]
    pub open_chart: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            chart_path: default_chart_path(),
            open_chart: true,
        }
    }
}

/// Parse a `YYYY-MM-DD` cutoff date.
pub fn parse_cutoff(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), CUTOFF_FORMAT).map_err(|e| {
        UsageError::invalid_argument("cutoff_date", format!("'{value}' is not YYYY-MM-DD: {e}"))
    })
}

// Default value functions for serde
fn default_true() -> bool {
    true
}

fn default_search_paths() -> Vec<PathBuf> {
    DEFAULT_SEARCH_PATHS.iter().map(PathBuf::from).collect()
}

fn default_cutoff() -> String {
    "2020-01-01".to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_chart_path() -> PathBuf {
    PathBuf::from("chatgpt_usage.png")
}

/// Get the default configuration path.
pub fn default_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().ok_or_else(|| UsageError::InvalidConfig {
        message: "could not determine the user configuration directory".to_string(),
    })?;

    Ok(config_dir.join("chatgpt-usage").join("config.toml"))
}
