//! Configuration for the calculator.
//!
//! Loaded from `config.toml` in the platform config directory (or an explicit
//! path). A missing file means built-in defaults. The file is only ever read.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::control::FieldRange;
use crate::schedule::DEFAULT_PAGE_SIZE;

/// Initial value and slider range for one input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub default: f64,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl FieldConfig {
    pub fn range(&self) -> FieldRange {
        FieldRange {
            min: self.min,
            max: self.max,
            step: self.step,
        }
    }

    fn validate(&self, name: &str) -> Result<()> {
        if self.min.is_nan() || self.max.is_nan() || self.min >= self.max {
            bail!("{name}: min ({}) must be below max ({})", self.min, self.max);
        }
        if self.step.is_nan() || self.step <= 0.0 {
            bail!("{name}: step must be positive, got {}", self.step);
        }
        if self.default < self.min || self.default > self.max {
            bail!(
                "{name}: default {} is outside {}..={}",
                self.default,
                self.min,
                self.max
            );
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_principal")]
    pub principal: FieldConfig,
    #[serde(default = "default_interest_rate")]
    pub interest_rate: FieldConfig,
    #[serde(default = "default_tenure")]
    pub tenure: FieldConfig,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            principal: default_principal(),
            interest_rate: default_interest_rate(),
            tenure: default_tenure(),
        }
    }
}

fn default_principal() -> FieldConfig {
    FieldConfig {
        default: 100_000.0,
        min: 10_000.0,
        max: 10_000_000.0,
        step: 10_000.0,
    }
}

fn default_interest_rate() -> FieldConfig {
    FieldConfig {
        default: 8.5,
        min: 1.0,
        max: 20.0,
        step: 0.1,
    }
}

fn default_tenure() -> FieldConfig {
    FieldConfig {
        default: 5.0,
        min: 1.0,
        max: 30.0,
        step: 1.0,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Rows per amortization table page
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Counter animation length in milliseconds (0 disables it)
    #[serde(default = "default_animation_ms")]
    pub animation_ms: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            animation_ms: default_animation_ms(),
        }
    }
}

impl DisplayConfig {
    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_ms)
    }
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_animation_ms() -> u64 {
    300
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub inputs: InputConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    /// Where the interactive UI writes its log. Defaults to the config directory.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// - Linux: `~/.config/emicalc/`
    /// - macOS: `~/Library/Application Support/emicalc/`
    /// - Windows: `%APPDATA%\emicalc\`
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join("emicalc");

        Ok(config_dir)
    }

    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads from `path`, or the default location when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::config_file_path()?,
        };

        if !config_path.exists() {
            log::debug!("no config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }

        Self::from_file(&config_path)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .context(format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .context(format!("Invalid config file: {}", path.display()))?;

        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.inputs.principal.validate("principal")?;
        self.inputs.interest_rate.validate("interest_rate")?;
        self.inputs.tenure.validate("tenure")?;

        if self.inputs.principal.min <= 0.0 {
            bail!("principal: min must be greater than zero");
        }
        if self.inputs.interest_rate.min < 0.0 {
            bail!("interest_rate: min must not be negative");
        }
        if self.inputs.tenure.min <= 0.0 {
            bail!("tenure: min must be greater than zero");
        }
        if self.display.page_size == 0 {
            bail!("display.page_size must be at least 1");
        }
        Ok(())
    }

    pub fn log_file_path(&self) -> Result<PathBuf> {
        match &self.log_file {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join("emicalc.log")),
        }
    }
}
