// SPDX-License-Identifier: MIT OR Apache-2.0
//! Keyframe definitions and scene interpolation.

use crate::character::Character;
use crate::registry::CharacterRegistry;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a keyframe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyframeId(pub Uuid);

impl KeyframeId {
    /// Create a new random keyframe ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for KeyframeId {
    fn default() -> Self {
        Self::new()
    }
}

/// A timestamped snapshot of every character on the canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Unique keyframe ID
    pub id: KeyframeId,
    /// Time in seconds
    pub time: f32,
    /// Characters at this time
    pub characters: CharacterRegistry,
}

impl Keyframe {
    /// Create a new keyframe from a snapshot
    pub fn new(time: f32, characters: CharacterRegistry) -> Self {
        Self {
            id: KeyframeId::new(),
            time,
            characters,
        }
    }

    /// Blend this keyframe's scene towards `next`.
    ///
    /// Characters missing from `next` keep their state; characters only in
    /// `next` have not appeared yet and are left out.
    pub fn blend(&self, next: &Keyframe, t: f32) -> CharacterRegistry {
        let t = t.clamp(0.0, 1.0);
        self.characters
            .iter()
            .map(|a| match next.characters.get(&a.id) {
                Some(b) => Interpolation::character(a, b, t),
                None => a.clone(),
            })
            .collect()
    }
}

/// Interpolation utilities
pub struct Interpolation;

impl Interpolation {
    /// Linear interpolation between two floats
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Interpolate Vec2
    pub fn lerp_vec2(a: [f32; 2], b: [f32; 2], t: f32) -> [f32; 2] {
        [Self::lerp(a[0], b[0], t), Self::lerp(a[1], b[1], t)]
    }

    /// Interpolate angles in degrees along the shorter arc
    pub fn lerp_angle(a: f32, b: f32, t: f32) -> f32 {
        let mut delta = (b - a) % 360.0;
        if delta > 180.0 {
            delta -= 360.0;
        } else if delta < -180.0 {
            delta += 360.0;
        }
        a + delta * t
    }

    /// Interpolate the transform of a character; discrete fields come from `a`
    pub fn character(a: &Character, b: &Character, t: f32) -> Character {
        Character {
            position: Self::lerp_vec2(a.position, b.position, t),
            scale: Self::lerp(a.scale, b.scale, t),
            rotation: Self::lerp_angle(a.rotation, b.rotation, t),
            ..a.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::AnimationState;

    #[test]
    fn test_lerp_angle_short_arc() {
        assert!((Interpolation::lerp_angle(350.0, 10.0, 0.5) - 360.0).abs() < 1e-4);
        assert!((Interpolation::lerp_angle(10.0, 350.0, 0.5) - 0.0).abs() < 1e-4);
        assert!((Interpolation::lerp_angle(0.0, 90.0, 0.5) - 45.0).abs() < 1e-4);
    }

    #[test]
    fn test_blend_characters() {
        let start = Character::new("Dog").with_position([0.0, 0.0]);
        let id = start.id;
        let mut end = start.clone().with_position([100.0, 50.0]).with_scale(3.0);
        end.animation = AnimationState::Run;
        let ghost = Character::new("Ghost");

        let a = Keyframe::new(0.0, [start].into_iter().collect());
        let b = Keyframe::new(1.0, [end, ghost].into_iter().collect());

        let mid = a.blend(&b, 0.5);
        let dog = mid.get(&id).unwrap();
        assert_eq!(dog.position, [50.0, 25.0]);
        assert_eq!(dog.scale, 2.0);
        assert_eq!(dog.animation, AnimationState::Idle);
        assert_eq!(mid.len(), 1);
    }
}
