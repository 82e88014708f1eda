// SPDX-License-Identifier: MIT OR Apache-2.0
//! Recorded audio synced to the movie.

use serde::{Deserialize, Serialize};

/// An audio clip placed on the movie timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioTrack {
    /// Asset path to the audio file
    pub asset_path: String,
    /// Start time in the movie
    pub offset: f32,
    /// Start offset within the audio file
    pub clip_start: f32,
    /// Playable length in seconds
    pub duration: f32,
    /// Volume multiplier
    pub volume: f32,
}

impl AudioTrack {
    /// Create a clip starting at the beginning of the movie
    pub fn new(asset_path: impl Into<String>, duration: f32) -> Self {
        Self {
            asset_path: asset_path.into(),
            offset: 0.0,
            clip_start: 0.0,
            duration: duration.max(0.0),
            volume: 1.0,
        }
    }

    /// Set the movie start time
    pub fn with_offset(mut self, offset: f32) -> Self {
        self.offset = offset.max(0.0);
        self
    }

    /// Movie time at which the clip ends
    pub fn end_time(&self) -> f32 {
        self.offset + self.duration
    }

    /// Whether the clip is audible at a movie time
    pub fn is_active_at(&self, time: f32) -> bool {
        time >= self.offset && time < self.end_time()
    }

    /// Position within the audio file for a movie time
    pub fn source_time(&self, time: f32) -> Option<f32> {
        self.is_active_at(time)
            .then(|| self.clip_start + (time - self.offset))
    }
}
