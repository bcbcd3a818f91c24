use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::rendering::{CameraConfig, LightingConfig, ShaderPaths};
use super::window::WindowConfig;

/// Looked up in the working directory at startup.
pub const CONFIG_FILE: &str = "glsteps.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Unknown log level: {0}")]
    LogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub shaders: ShaderPaths,
    pub camera: CameraConfig,
    pub lighting: LightingConfig,
    pub clear_color: [f32; 4],
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            shaders: ShaderPaths::default(),
            camera: CameraConfig::default(),
            lighting: LightingConfig::default(),
            clear_color: [0.1, 0.1, 0.1, 1.0],
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Defaults when the file is absent; a present but broken file is an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }

    /// Level to start the logger at. Unknown names fall back to `Info`;
    /// callers report `level_filter()`'s error once logging is up.
    pub fn level_filter_or_info(&self) -> LevelFilter {
        self.level_filter().unwrap_or(LevelFilter::Info)
    }
}
