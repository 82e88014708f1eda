// SPDX-License-Identifier: MIT OR Apache-2.0
//! Gesture input applied to characters.

use crate::character::Character;
use serde::{Deserialize, Serialize};

/// A gesture coming from the platform input layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GestureEvent {
    /// Pan gesture delta in canvas units
    Drag {
        /// Horizontal delta
        dx: f32,
        /// Vertical delta
        dy: f32,
    },
    /// Rotation delta in degrees
    Rotate {
        /// Degrees to add
        degrees: f32,
    },
    /// Pinch scale factor
    Pinch {
        /// Multiplier applied to the current scale
        factor: f32,
    },
}

/// Bounds applied when gestures change a character's scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureLimits {
    /// Smallest allowed scale
    pub min_scale: f32,
    /// Largest allowed scale
    pub max_scale: f32,
}

impl Default for GestureLimits {
    fn default() -> Self {
        Self {
            min_scale: 0.1,
            max_scale: 5.0,
        }
    }
}

impl GestureEvent {
    /// Apply the gesture to a character.
    ///
    /// Returns `false` when the event was ignored.
    pub fn apply(&self, character: &mut Character, limits: &GestureLimits) -> bool {
        match *self {
            GestureEvent::Drag { dx, dy } => {
                if !dx.is_finite() || !dy.is_finite() {
                    return false;
                }
                character.position[0] += dx;
                character.position[1] += dy;
                true
            }
            GestureEvent::Rotate { degrees } => {
                if !degrees.is_finite() {
                    return false;
                }
                character.rotation = normalize_degrees(character.rotation + degrees);
                true
            }
            GestureEvent::Pinch { factor } => {
                if !factor.is_finite() || factor <= 0.0 {
                    return false;
                }
                character.scale = (character.scale * factor).clamp(limits.min_scale, limits.max_scale);
                true
            }
        }
    }
}

/// Wrap an angle into `[0, 360)`
pub fn normalize_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}
