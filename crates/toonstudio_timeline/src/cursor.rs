// SPDX-License-Identifier: MIT OR Apache-2.0
//! Playback cursor.

use serde::{Deserialize, Serialize};

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Stopped
    #[default]
    Stopped,
    /// Playing forward
    Playing,
    /// Paused
    Paused,
}

/// Current playback time and active keyframe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackCursor {
    /// Current time in seconds
    pub time: f32,
    /// Index of the active keyframe
    pub index: usize,
    /// Playback state
    pub state: PlaybackState,
    /// Playback speed multiplier
    pub speed: f32,
}

impl PlaybackCursor {
    /// Create a cursor at the first keyframe
    pub fn new() -> Self {
        Self {
            time: 0.0,
            index: 0,
            state: PlaybackState::Stopped,
            speed: 1.0,
        }
    }

    /// Play from current position
    pub fn play(&mut self) {
        self.state = PlaybackState::Playing;
    }

    /// Pause playback
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
    }

    /// Stop playback; the timeline rewinds the time
    pub fn stop(&mut self) {
        self.state = PlaybackState::Stopped;
    }

    /// Toggle play/pause
    pub fn toggle_playback(&mut self) {
        match self.state {
            PlaybackState::Playing => self.pause(),
            PlaybackState::Paused | PlaybackState::Stopped => self.play(),
        }
    }

    /// Is currently playing
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }
}

impl Default for PlaybackCursor {
    fn default() -> Self {
        Self::new()
    }
}
