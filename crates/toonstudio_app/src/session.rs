// SPDX-License-Identifier: MIT OR Apache-2.0
//! Editing session: the open movie, its catalog and undo history.

use crate::commands::{CommandError, EditCommand};
use crate::history::{History, StateSnapshot};
use crate::project::{MovieProject, ProjectError};
use std::path::{Path, PathBuf};
use toonstudio_timeline::{AudioTrack, CharacterCatalog, ExportSettings, Timeline};

/// Outcome of running a script
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptReport {
    /// Commands that ran
    pub applied: usize,
    /// Commands the user would have been warned about
    pub skipped: usize,
}

/// Main editor session
pub struct EditorSession {
    /// Movie name
    pub name: String,
    /// Keyframes and live scene
    pub timeline: Timeline,
    /// Characters available for spawning
    pub catalog: CharacterCatalog,
    /// Soundtrack
    pub audio: Option<AudioTrack>,
    /// Export format
    pub export: ExportSettings,
    /// Undo/redo history
    history: History,
    /// Project file the session was loaded from
    project_path: Option<PathBuf>,
    /// Whether the movie has unsaved changes
    dirty: bool,
}

impl EditorSession {
    /// Create a session for a new movie
    pub fn new(name: impl Into<String>, history_depth: usize) -> Self {
        Self::from_project(MovieProject::new(name), history_depth)
    }

    /// Create a session from a loaded project
    pub fn from_project(project: MovieProject, history_depth: usize) -> Self {
        Self {
            name: project.name,
            timeline: project.timeline,
            catalog: CharacterCatalog::new(),
            audio: project.audio,
            export: project.export,
            history: History::with_max_depth(history_depth),
            project_path: None,
            dirty: false,
        }
    }

    /// Open a project file
    pub fn open(path: &Path, history_depth: usize) -> Result<Self, ProjectError> {
        let project = MovieProject::load(path)?;
        let mut session = Self::from_project(project, history_depth);
        session.project_path = Some(path.to_path_buf());
        tracing::info!("Opened movie '{}' from {:?}", session.name, path);
        Ok(session)
    }

    /// Snapshot of the session as a project
    pub fn to_project(&self) -> MovieProject {
        MovieProject {
            name: self.name.clone(),
            timeline: self.timeline.clone(),
            audio: self.audio.clone(),
            export: self.export,
            ..MovieProject::default()
        }
    }

    /// Save back to the project file the session was opened from
    pub fn save(&mut self) -> Result<(), ProjectError> {
        let Some(path) = self.project_path.clone() else {
            return Err(ProjectError::NoPath);
        };
        self.save_to_path(&path)
    }

    /// Save to a specific path
    pub fn save_to_path(&mut self, path: &Path) -> Result<(), ProjectError> {
        self.to_project().save(path)?;
        self.project_path = Some(path.to_path_buf());
        self.dirty = false;
        tracing::info!("Saved movie to {:?}", path);
        Ok(())
    }

    /// Check if the movie has unsaved changes
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    /// Undo/redo history
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Execute a command, recording edits in the undo history
    pub fn execute(&mut self, command: &EditCommand) -> Result<(), CommandError> {
        match command {
            EditCommand::Undo => return self.undo(),
            EditCommand::Redo => return self.redo(),
            _ => {}
        }

        if !command.is_edit() {
            return command.apply(&mut self.timeline, &self.catalog);
        }

        let before = StateSnapshot::from_value(&self.timeline)?;
        command.apply(&mut self.timeline, &self.catalog)?;
        let after = StateSnapshot::from_value(&self.timeline)?;

        if !before.same_state(&after) {
            self.history.commit(command.description(), before, after);
            self.dirty = true;
        }
        Ok(())
    }

    /// Undo the last edit
    pub fn undo(&mut self) -> Result<(), CommandError> {
        let operation = self.history.undo()?;
        let restored: Timeline = operation.before.to_value()?;
        tracing::debug!("Undo #{}: {}", operation.id, operation.description);
        self.timeline = restored;
        self.dirty = true;
        Ok(())
    }

    /// Redo the last undone edit
    pub fn redo(&mut self) -> Result<(), CommandError> {
        let operation = self.history.redo()?;
        let restored: Timeline = operation.after.to_value()?;
        tracing::debug!("Redo #{}: {}", operation.id, operation.description);
        self.timeline = restored;
        self.dirty = true;
        Ok(())
    }

    /// Run commands in order.
    ///
    /// Blocked or out-of-range actions are logged and skipped, the way the
    /// editor would show an alert; any other error stops the script.
    pub fn run_script(&mut self, commands: &[EditCommand]) -> Result<ScriptReport, CommandError> {
        let mut report = ScriptReport::default();
        for (line, command) in commands.iter().enumerate() {
            match self.execute(command) {
                Ok(()) => report.applied += 1,
                Err(e) if e.is_soft() => {
                    tracing::warn!("Skipped command {} ({}): {}", line, command.description(), e);
                    report.skipped += 1;
                }
                Err(e) => {
                    tracing::error!("Command {} ({}) failed: {}", line, command.description(), e);
                    return Err(e);
                }
            }
        }
        tracing::info!(
            applied = report.applied,
            skipped = report.skipped,
            "Script finished"
        );
        Ok(report)
    }
}
