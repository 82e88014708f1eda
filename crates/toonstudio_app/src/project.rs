// SPDX-License-Identifier: MIT OR Apache-2.0
//! Movie project files.
//!
//! A project stores the timeline (keyframes, live scene, cursor), the
//! soundtrack and the export format as pretty RON.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use toonstudio_timeline::{AudioTrack, ExportSettings, Timeline};

/// Current project format version
pub const PROJECT_FORMAT_VERSION: u32 = 1;

/// Project file name
pub const PROJECT_FILE_NAME: &str = "movie.toon";

/// Project file errors
#[derive(Debug, Error)]
pub enum ProjectError {
    /// File system error
    #[error("File error: {0}")]
    Io(#[from] std::io::Error),

    /// File content is not a valid project
    #[error("Deserialization error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Project could not be written as RON
    #[error("Serialization error: {0}")]
    Serialize(#[from] ron::Error),

    /// Written by a newer version
    #[error("Project version {found} is newer than supported version {supported}")]
    UnsupportedVersion {
        /// Version in the file
        found: u32,
        /// Newest readable version
        supported: u32,
    },

    /// Session has no file to save to
    #[error("No project path set")]
    NoPath,
}

/// A saved movie
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieProject {
    /// Format version
    pub version: u32,
    /// Movie name
    pub name: String,
    /// Keyframes, live scene and cursor
    pub timeline: Timeline,
    /// Soundtrack
    #[serde(default)]
    pub audio: Option<AudioTrack>,
    /// Export format
    #[serde(default)]
    pub export: ExportSettings,
}

impl Default for MovieProject {
    fn default() -> Self {
        Self::new("Untitled Movie")
    }
}

impl MovieProject {
    /// Create an empty movie
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: PROJECT_FORMAT_VERSION,
            name: name.into(),
            timeline: Timeline::new(),
            audio: None,
            export: ExportSettings::default(),
        }
    }

    /// Parse a project from RON text
    pub fn from_ron_str(content: &str) -> Result<Self, ProjectError> {
        let mut project: MovieProject = ron::from_str(content)?;

        if project.version > PROJECT_FORMAT_VERSION {
            return Err(ProjectError::UnsupportedVersion {
                found: project.version,
                supported: PROJECT_FORMAT_VERSION,
            });
        }

        project.timeline.normalize();
        Ok(project)
    }

    /// Render the project as pretty RON
    pub fn to_ron_string(&self) -> Result<String, ProjectError> {
        let config = ron::ser::PrettyConfig::default()
            .struct_names(true)
            .enumerate_arrays(false);
        Ok(ron::ser::to_string_pretty(self, config)?)
    }

    /// Load a project file
    pub fn load(path: &Path) -> Result<Self, ProjectError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_ron_str(&content)
    }

    /// Save to a project file
    pub fn save(&self, path: &Path) -> Result<(), ProjectError> {
        let content = self.to_ron_string()?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Project file path inside a project directory
    pub fn project_file_path(project_dir: &Path) -> PathBuf {
        project_dir.join(PROJECT_FILE_NAME)
    }
}
