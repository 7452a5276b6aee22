//! Configuration management for Drive Sense
//!
//! This module provides configuration persistence for refresh throttling,
//! drive enumeration and report options.

use crate::error::{Result, SmartError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Drive Sense configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Refresh throttling options
    #[serde(default)]
    pub update: UpdateConfig,
    /// Drive enumeration options
    #[serde(default)]
    pub storage: StorageConfig,
    /// Diagnostic report options
    #[serde(default)]
    pub report: ReportConfig,
}

/// Refresh throttling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateConfig {
    /// Number of `update()` calls per transport read
    #[serde(default = "default_refresh_divider")]
    pub refresh_divider: u32,
}

/// Drive enumeration configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Number of drive indices probed during discovery
    #[serde(default = "default_max_drives")]
    pub max_drives: usize,
    /// Create default-hidden sensors as visible
    #[serde(default)]
    pub show_hidden: bool,
}

/// Diagnostic report configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Read thresholds for the `Thres` column
    #[serde(default = "default_true")]
    pub include_thresholds: bool,
}

// Default value functions
fn default_refresh_divider() -> u32 {
    30
}

fn default_max_drives() -> usize {
    32
}

fn default_true() -> bool {
    true
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            refresh_divider: default_refresh_divider(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            max_drives: default_max_drives(),
            show_hidden: false,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            include_thresholds: true,
        }
    }
}

impl UpdateConfig {
    /// Refresh divider clamped to at least one call per read
    pub fn divider(&self) -> u32 {
        self.refresh_divider.max(1)
    }
}

impl Config {
    /// Get the default configuration directory
    ///
    /// Returns `~/.config/drivesense` on Unix-like systems,
    /// or `%APPDATA%\drivesense` on Windows.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if cfg!(windows) {
            std::env::var("APPDATA")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("."))
        } else {
            std::env::var("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .unwrap_or_else(|_| PathBuf::from(".config"))
        };

        Ok(config_dir.join("drivesense"))
    }

    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_file = Self::default_path()?.join("config.toml");

        if !config_file.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&config_file)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| SmartError::Parse(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_dir = Self::default_path()?;
        std::fs::create_dir_all(&config_dir)?;
        self.save_to(&config_dir.join("config.toml"))
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| SmartError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}
