// SPDX-License-Identifier: MIT OR Apache-2.0
//! Export planning for an external video encoder.
//!
//! The timeline does not encode video itself. It produces an ordered frame
//! schedule plus the audio reference, and hands them to a [`FrameSink`].

use crate::audio::AudioTrack;
use crate::registry::CharacterRegistry;
use crate::timeline::Timeline;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    /// Settings cannot produce a video
    #[error("Invalid export settings: {0}")]
    InvalidSettings(String),

    /// The frame sink failed
    #[error("Encoder error: {0}")]
    Sink(String),
}

/// Output format requested from the encoder
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Frames per second
    pub fps: u32,
    /// Blend between keyframes instead of holding each snapshot
    pub interpolate: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fps: 30,
            interpolate: true,
        }
    }
}

impl ExportSettings {
    /// Check the settings can be encoded
    pub fn validate(&self) -> Result<(), ExportError> {
        if self.width == 0 || self.height == 0 {
            return Err(ExportError::InvalidSettings(
                "width/height must be non-zero".to_string(),
            ));
        }
        if self.fps == 0 {
            return Err(ExportError::InvalidSettings("fps must be non-zero".to_string()));
        }
        // yuv420p output needs even dimensions
        if self.width % 2 != 0 || self.height % 2 != 0 {
            return Err(ExportError::InvalidSettings(
                "width/height must be even".to_string(),
            ));
        }
        Ok(())
    }
}

/// One frame of the export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FramePlan {
    /// Frame number
    pub index: u32,
    /// Movie time in seconds
    pub time: f32,
    /// Keyframe in effect at this time
    pub keyframe_index: usize,
    /// Scene to render
    pub characters: CharacterRegistry,
}

/// Everything the encoder needs, in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportPlan {
    /// Output format
    pub settings: ExportSettings,
    /// Frames in presentation order
    pub frames: Vec<FramePlan>,
    /// Soundtrack, if any
    pub audio: Option<AudioTrack>,
}

/// Receives frames from an export, e.g. a process wrapping a media toolkit
pub trait FrameSink {
    /// Prepare for `plan`
    fn begin(&mut self, plan: &ExportPlan) -> Result<(), ExportError>;

    /// Receive the next frame
    fn push_frame(&mut self, frame: &FramePlan) -> Result<(), ExportError>;

    /// All frames were delivered
    fn finish(&mut self) -> Result<(), ExportError>;
}

impl ExportPlan {
    /// Movie length covered by the plan
    pub fn duration(&self) -> f32 {
        self.frames.len() as f32 / self.settings.fps as f32
    }

    /// Feed every frame to `sink` in order
    pub fn drive(&self, sink: &mut impl FrameSink) -> Result<(), ExportError> {
        sink.begin(self)?;
        for frame in &self.frames {
            sink.push_frame(frame)?;
        }
        sink.finish()?;
        tracing::info!("Exported {} frames", self.frames.len());
        Ok(())
    }
}

/// Build the frame schedule for a timeline.
///
/// The movie covers the timeline end time or the end of the audio,
/// whichever is later, and always has at least one frame.
pub fn plan_export(
    timeline: &Timeline,
    audio: Option<&AudioTrack>,
    settings: &ExportSettings,
) -> Result<ExportPlan, ExportError> {
    settings.validate()?;

    let audio_end = audio.map(AudioTrack::end_time).unwrap_or(0.0);
    let duration = timeline.end_time().max(audio_end);
    let total = (duration * settings.fps as f32).ceil();
    if !total.is_finite() || total >= u32::MAX as f32 {
        return Err(ExportError::InvalidSettings(format!(
            "movie length {duration}s is too long to export at {} fps",
            settings.fps
        )));
    }
    let frame_count = (total as u32).max(1);

    let frames = (0..frame_count)
        .map(|index| {
            let time = index as f32 / settings.fps as f32;
            let characters = if settings.interpolate {
                timeline.interpolated_scene_at(time)
            } else {
                timeline.scene_at(time).clone()
            };
            FramePlan {
                index,
                time,
                keyframe_index: timeline.keyframe_index_at(time),
                characters,
            }
        })
        .collect();

    tracing::debug!(frame_count, duration, "Planned export");
    Ok(ExportPlan {
        settings: *settings,
        frames,
        audio: audio.cloned(),
    })
}
