// SPDX-License-Identifier: MIT OR Apache-2.0
//! JSON-lines export manifest for the external encoder.
//!
//! The first line is a header with the output format and soundtrack,
//! followed by one line per frame in presentation order.

use serde::Serialize;
use std::io::Write;
use toonstudio_timeline::{AudioTrack, ExportError, ExportPlan, ExportSettings, FramePlan, FrameSink};

#[derive(Serialize)]
struct ManifestHeader<'a> {
    settings: &'a ExportSettings,
    audio: Option<&'a AudioTrack>,
    frame_count: usize,
}

/// Writes an export plan as JSON lines
pub struct ManifestWriter<W: Write> {
    out: W,
    frames_written: usize,
}

impl<W: Write> ManifestWriter<W> {
    /// Create a writer over any output
    pub fn new(out: W) -> Self {
        Self {
            out,
            frames_written: 0,
        }
    }

    /// Frames written so far
    pub fn frames_written(&self) -> usize {
        self.frames_written
    }

    fn write_line(&mut self, value: &impl Serialize) -> Result<(), ExportError> {
        serde_json::to_writer(&mut self.out, value).map_err(|e| ExportError::Sink(e.to_string()))?;
        self.out
            .write_all(b"\n")
            .map_err(|e| ExportError::Sink(e.to_string()))
    }
}

impl<W: Write> FrameSink for ManifestWriter<W> {
    fn begin(&mut self, plan: &ExportPlan) -> Result<(), ExportError> {
        self.frames_written = 0;
        self.write_line(&ManifestHeader {
            settings: &plan.settings,
            audio: plan.audio.as_ref(),
            frame_count: plan.frames.len(),
        })
    }

    fn push_frame(&mut self, frame: &FramePlan) -> Result<(), ExportError> {
        self.write_line(frame)?;
        self.frames_written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ExportError> {
        self.out.flush().map_err(|e| ExportError::Sink(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toonstudio_timeline::{plan_export, Character, Timeline};

    #[test]
    fn test_manifest_lines() {
        let mut timeline = Timeline::new();
        timeline.duration = 1.0;
        timeline.add_character(Character::new("Duck"));
        let settings = ExportSettings {
            fps: 3,
            ..Default::default()
        };
        let audio = AudioTrack::new("quack.wav", 0.5);
        let plan = plan_export(&timeline, Some(&audio), &settings).unwrap();

        let mut out = Vec::new();
        let mut writer = ManifestWriter::new(&mut out);
        plan.drive(&mut writer).unwrap();
        assert_eq!(writer.frames_written(), 3);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0]["frame_count"], 3);
        assert_eq!(lines[0]["audio"]["asset_path"], "quack.wav");
        assert_eq!(lines[3]["index"], 2);
    }
}
