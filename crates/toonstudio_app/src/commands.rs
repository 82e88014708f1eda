// SPDX-License-Identifier: MIT OR Apache-2.0
//! Editor commands.
//!
//! Commands describe every user action on the timeline. They are
//! deserializable so edit scripts can be written in RON, e.g.
//! `[Spawn(entry: "bunny", position: (10.0, 20.0)), AddKeyframe(time: 1.5)]`.

use crate::history::HistoryError;
use serde::{Deserialize, Serialize};
use toonstudio_timeline::{
    AnimationState, CharacterCatalog, CharacterId, GestureEvent, Timeline, TimelineError,
};

/// Error type for command execution
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// The timeline rejected the operation
    #[error(transparent)]
    Timeline(#[from] TimelineError),

    /// History error
    #[error("History error: {0}")]
    History(#[from] HistoryError),

    /// No live character matches the reference
    #[error("Character not found: {0}")]
    UnknownCharacter(String),

    /// Command targets the selection but nothing is selected
    #[error("No character selected")]
    NoSelection,
}

impl CommandError {
    /// Errors that are reported to the user but leave the session usable
    pub fn is_soft(&self) -> bool {
        matches!(
            self,
            CommandError::Timeline(
                TimelineError::IndexOutOfRange { .. }
                    | TimelineError::LastKeyframe
                    | TimelineError::InvalidTime(_)
            ) | CommandError::History(HistoryError::NothingToUndo | HistoryError::NothingToRedo)
        )
    }
}

/// How a command names the character it acts on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CharacterRef {
    /// The selected character
    Selected,
    /// First live character with this name
    Name(String),
    /// Exact character ID
    Id(CharacterId),
}

impl CharacterRef {
    /// Resolve against the live scene
    pub fn resolve(&self, timeline: &Timeline) -> Result<CharacterId, CommandError> {
        match self {
            CharacterRef::Selected => timeline.selected().ok_or(CommandError::NoSelection),
            CharacterRef::Name(name) => timeline
                .characters()
                .find_by_name(name)
                .map(|c| c.id)
                .ok_or_else(|| CommandError::UnknownCharacter(name.clone())),
            CharacterRef::Id(id) => {
                if timeline.characters().contains(id) {
                    Ok(*id)
                } else {
                    Err(CommandError::UnknownCharacter(id.to_string()))
                }
            }
        }
    }
}

/// A user action on the movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EditCommand {
    /// Snapshot the scene into a new keyframe
    AddKeyframe {
        /// Keyframe time in seconds
        time: f32,
    },
    /// Show a stored keyframe
    GoToKeyframe {
        /// Keyframe index
        index: usize,
    },
    /// Commit the live scene into the active keyframe
    UpdateKeyframe,
    /// Delete a keyframe
    DeleteKeyframe {
        /// Keyframe index
        index: usize,
    },
    /// Retime a keyframe
    MoveKeyframe {
        /// Keyframe index
        index: usize,
        /// New time in seconds
        time: f32,
    },
    /// Copy a keyframe to another time
    DuplicateKeyframe {
        /// Keyframe index
        index: usize,
        /// Time of the copy
        time: f32,
    },
    /// Place a character from the catalog
    Spawn {
        /// Catalog entry ID
        entry: String,
        /// Canvas position
        position: [f32; 2],
    },
    /// Delete a character
    RemoveCharacter {
        /// Character to delete
        target: CharacterRef,
    },
    /// Select a character
    Select {
        /// Character to select
        target: CharacterRef,
    },
    /// Select whatever is under a canvas point
    Tap {
        /// Canvas point
        point: [f32; 2],
    },
    /// Drag, rotate or pinch a character
    Gesture {
        /// Character to transform
        target: CharacterRef,
        /// Gesture to apply
        gesture: GestureEvent,
    },
    /// Change a character's animation
    SetAnimation {
        /// Character to change
        target: CharacterRef,
        /// New animation
        animation: AnimationState,
    },
    /// Rename a character
    Rename {
        /// Character to rename
        target: CharacterRef,
        /// New name
        name: String,
    },
    /// Move the playback time
    Seek {
        /// Time in seconds
        time: f32,
    },
    /// Undo the last edit
    Undo,
    /// Redo the last undone edit
    Redo,
}

impl EditCommand {
    /// Human-readable description for history and logs
    pub fn description(&self) -> String {
        match self {
            EditCommand::AddKeyframe { time } => format!("Add keyframe at {time:.2}s"),
            EditCommand::GoToKeyframe { index } => format!("Go to keyframe {index}"),
            EditCommand::UpdateKeyframe => "Update keyframe".to_string(),
            EditCommand::DeleteKeyframe { index } => format!("Delete keyframe {index}"),
            EditCommand::MoveKeyframe { index, time } => format!("Move keyframe {index} to {time:.2}s"),
            EditCommand::DuplicateKeyframe { index, time } => {
                format!("Duplicate keyframe {index} to {time:.2}s")
            }
            EditCommand::Spawn { entry, .. } => format!("Add {entry}"),
            EditCommand::RemoveCharacter { .. } => "Remove character".to_string(),
            EditCommand::Select { .. } | EditCommand::Tap { .. } => "Select".to_string(),
            EditCommand::Gesture { gesture, .. } => match gesture {
                GestureEvent::Drag { .. } => "Move character".to_string(),
                GestureEvent::Rotate { .. } => "Rotate character".to_string(),
                GestureEvent::Pinch { .. } => "Scale character".to_string(),
            },
            EditCommand::SetAnimation { animation, .. } => format!("Set animation {}", animation.name()),
            EditCommand::Rename { name, .. } => format!("Rename to {name}"),
            EditCommand::Seek { time } => format!("Seek to {time:.2}s"),
            EditCommand::Undo => "Undo".to_string(),
            EditCommand::Redo => "Redo".to_string(),
        }
    }

    /// Whether the command edits the movie (and so belongs in undo history)
    pub fn is_edit(&self) -> bool {
        !matches!(
            self,
            EditCommand::GoToKeyframe { .. }
                | EditCommand::Select { .. }
                | EditCommand::Tap { .. }
                | EditCommand::Seek { .. }
                | EditCommand::Undo
                | EditCommand::Redo
        )
    }

    /// Apply a timeline command. Undo and redo are handled by the session.
    pub fn apply(&self, timeline: &mut Timeline, catalog: &CharacterCatalog) -> Result<(), CommandError> {
        match self {
            EditCommand::AddKeyframe { time } => {
                timeline.add_keyframe(*time)?;
            }
            EditCommand::GoToKeyframe { index } => timeline.go_to_keyframe(*index)?,
            EditCommand::UpdateKeyframe => timeline.update_current_keyframe(),
            EditCommand::DeleteKeyframe { index } => {
                timeline.delete_keyframe(*index)?;
            }
            EditCommand::MoveKeyframe { index, time } => {
                timeline.move_keyframe(*index, *time)?;
            }
            EditCommand::DuplicateKeyframe { index, time } => {
                timeline.duplicate_keyframe(*index, *time)?;
            }
            EditCommand::Spawn { entry, position } => {
                timeline.spawn_from_catalog(catalog, entry, *position)?;
            }
            EditCommand::RemoveCharacter { target } => {
                let id = target.resolve(timeline)?;
                timeline.remove_character(id)?;
            }
            EditCommand::Select { target } => {
                let id = target.resolve(timeline)?;
                timeline.select(id)?;
            }
            EditCommand::Tap { point } => {
                timeline.tap(*point);
            }
            EditCommand::Gesture { target, gesture } => {
                let id = target.resolve(timeline)?;
                if !timeline.apply_gesture(id, *gesture)? {
                    tracing::debug!("Ignored gesture {:?}", gesture);
                }
            }
            EditCommand::SetAnimation { target, animation } => {
                let id = target.resolve(timeline)?;
                timeline.set_animation(id, *animation)?;
            }
            EditCommand::Rename { target, name } => {
                let id = target.resolve(timeline)?;
                timeline.rename_character(id, name.clone())?;
            }
            EditCommand::Seek { time } => {
                timeline.seek(*time);
            }
            EditCommand::Undo | EditCommand::Redo => {}
        }
        Ok(())
    }
}

/// Parse a RON edit script
pub fn parse_script(source: &str) -> Result<Vec<EditCommand>, ron::error::SpannedError> {
    ron::from_str(source)
}
