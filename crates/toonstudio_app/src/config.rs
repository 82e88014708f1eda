// SPDX-License-Identifier: MIT OR Apache-2.0
//! Application configuration.

use crate::history::MAX_HISTORY;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use toonstudio_timeline::ExportSettings;

/// Default log filter when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "toonstudio_app=info,toonstudio_timeline=info";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Config file error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid RON
    #[error("Config parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Settings read from `toonstudio.ron`; missing fields use defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Maximum undo depth
    pub history_depth: usize,
    /// Export frame rate given to new projects
    pub default_fps: u32,
    /// Export width given to new projects
    pub default_width: u32,
    /// Export height given to new projects
    pub default_height: u32,
    /// Whether new projects blend between keyframes on export
    pub interpolate_export: bool,
    /// `tracing` filter directives
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            history_depth: MAX_HISTORY,
            default_fps: 30,
            default_width: 1280,
            default_height: 720,
            interpolate_export: true,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    /// Parse configuration from RON text
    pub fn from_ron_str(content: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(content)?)
    }

    /// Load configuration, falling back to defaults when no file is given
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_ron_str(&std::fs::read_to_string(path)?),
            None => Ok(Self::default()),
        }
    }

    /// Export settings built from the configured defaults
    pub fn export_settings(&self) -> ExportSettings {
        ExportSettings {
            width: self.default_width,
            height: self.default_height,
            fps: self.default_fps,
            interpolate: self.interpolate_export,
        }
    }
}
