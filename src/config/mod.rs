//! Configuration module for the ETL monitor
//!
//! This module handles application configuration:
//! - `config.toml` with canvas, fixture and UI sections
//! - Platform data directory for the config file and logs
//!
//! Viewport state (zoom, pan) and node positions are never written back;
//! every launch starts from the configured defaults.
//!
//! # App Data Location
//!
//! - **Linux**: `~/.local/share/dev.etl-monitor/`
//! - **macOS**: `~/Library/Application Support/dev.etl-monitor/`
//! - **Windows**: `%APPDATA%\dev.etl-monitor\`
//!
//! Set `ETL_MONITOR_CONFIG` to read the config from another path.
//!
//! # Example
//!
//! ```toml
//! [canvas]
//! initial_zoom = 0.8
//!
//! [fixture]
//! path = "/srv/flows/nightly.json"
//!
//! [ui]
//! dark_mode = true
//! ```

pub mod settings;

pub use settings::*;

use crate::error::{MonitorError, Result, ResultExt};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application identifier for data directories
pub const APP_ID: &str = "dev.etl-monitor";

/// Config filename inside the app data directory
pub const CONFIG_FILE: &str = "config.toml";

/// Environment variable overriding the config path
pub const CONFIG_ENV: &str = "ETL_MONITOR_CONFIG";

/// Log directory inside the app data directory
pub const LOG_DIR: &str = "logs";

// ==================== App Data Directory ====================

/// Get the application data directory path
pub fn app_data_dir() -> Option<PathBuf> {
    dirs_next::data_dir().map(|p| p.join(APP_ID))
}

/// Ensure the app data directory exists
pub fn ensure_app_data_dir() -> Result<PathBuf> {
    let dir = app_data_dir().ok_or_else(|| {
        MonitorError::Config("Could not determine app data directory".to_string())
    })?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| {
            MonitorError::Config(format!("Failed to create app data directory: {}", e))
        })?;
    }

    Ok(dir)
}

/// Path the config is read from: `$ETL_MONITOR_CONFIG` or the data directory
pub fn config_path() -> Option<PathBuf> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) if !path.is_empty() => Some(PathBuf::from(path)),
        _ => app_data_dir().map(|p| p.join(CONFIG_FILE)),
    }
}

// ==================== Monitor Config ====================

/// Where the node set comes from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureSettings {
    /// JSON fixture loaded at startup; the built-in flow map when unset
    pub path: Option<PathBuf>,
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub canvas: CanvasSettings,
    pub fixture: FixtureSettings,
    pub ui: UiPreferences,
}

impl MonitorConfig {
    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read a config file; a missing file yields defaults
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Load from [`config_path`], returning defaults on any error
    pub fn load_or_default() -> Self {
        let Some(path) = config_path() else {
            return Self::default();
        };
        Self::load_from(&path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }
}
