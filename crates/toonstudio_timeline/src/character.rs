// SPDX-License-Identifier: MIT OR Apache-2.0
//! Characters placed on the canvas.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a character on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterId(pub Uuid);

impl CharacterId {
    /// Create a new random character ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CharacterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Animation a character is playing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AnimationState {
    /// Standing still
    #[default]
    Idle,
    /// Walking cycle
    Walk,
    /// Running cycle
    Run,
    /// Single jump
    Jump,
    /// Waving hand
    Wave,
    /// Mouth animation for dialogue
    Talk,
    /// Dance loop
    Dance,
}

impl AnimationState {
    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Walk => "Walk",
            Self::Run => "Run",
            Self::Jump => "Jump",
            Self::Wave => "Wave",
            Self::Talk => "Talk",
            Self::Dance => "Dance",
        }
    }

    /// Get all animation states
    pub fn all() -> &'static [AnimationState] {
        &[
            Self::Idle,
            Self::Walk,
            Self::Run,
            Self::Jump,
            Self::Wave,
            Self::Talk,
            Self::Dance,
        ]
    }

    /// Look up a state by its label, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|state| state.name().eq_ignore_ascii_case(name.trim()))
    }
}

/// Reference to a character's preview art
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreviewRef(pub String);

impl PreviewRef {
    /// Create a preview reference from an asset path or URI
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Get the underlying path
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A character on the canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Unique character ID
    pub id: CharacterId,
    /// Display name
    pub name: String,
    /// Canvas position (x, y)
    pub position: [f32; 2],
    /// Uniform scale
    pub scale: f32,
    /// Rotation in degrees
    pub rotation: f32,
    /// Current animation
    pub animation: AnimationState,
    /// Preview art
    pub preview: PreviewRef,
}

impl Character {
    /// Create a new character at the origin
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CharacterId::new(),
            name: name.into(),
            position: [0.0, 0.0],
            scale: 1.0,
            rotation: 0.0,
            animation: AnimationState::Idle,
            preview: PreviewRef::default(),
        }
    }

    /// Set the position
    pub fn with_position(mut self, position: [f32; 2]) -> Self {
        self.position = position;
        self
    }

    /// Set the scale
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Set the rotation in degrees
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the animation
    pub fn with_animation(mut self, animation: AnimationState) -> Self {
        self.animation = animation;
        self
    }

    /// Set the preview art
    pub fn with_preview(mut self, preview: PreviewRef) -> Self {
        self.preview = preview;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = Character::new("Bunny");
        assert_eq!(c.name, "Bunny");
        assert_eq!(c.position, [0.0, 0.0]);
        assert_eq!(c.scale, 1.0);
        assert_eq!(c.animation, AnimationState::Idle);
    }

    #[test]
    fn test_animation_from_name() {
        assert_eq!(AnimationState::from_name("walk"), Some(AnimationState::Walk));
        assert_eq!(AnimationState::from_name(" DANCE "), Some(AnimationState::Dance));
        assert_eq!(AnimationState::from_name("fly"), None);
    }

    #[test]
    fn test_clone_is_deep_equal() {
        let c = Character::new("Fox")
            .with_position([10.0, 20.0])
            .with_rotation(45.0)
            .with_animation(AnimationState::Wave);
        assert_eq!(c.clone(), c);
    }
}
