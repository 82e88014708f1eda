// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timeline of scene keyframes with a live, editable scene.

use crate::catalog::CharacterCatalog;
use crate::character::{AnimationState, Character, CharacterId};
use crate::cursor::PlaybackCursor;
use crate::gesture::{normalize_degrees, GestureEvent, GestureLimits};
use crate::keyframe::{Keyframe, KeyframeId};
use crate::registry::CharacterRegistry;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Length of a new movie in seconds
pub const DEFAULT_DURATION: f32 = 10.0;

/// Timeline errors. Every rejected operation leaves the timeline unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimelineError {
    /// Keyframe index outside the store
    #[error("Keyframe index {index} out of range ({len} keyframes)")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of keyframes
        len: usize,
    },

    /// Deleting would leave the timeline without keyframes
    #[error("Cannot delete the last remaining keyframe")]
    LastKeyframe,

    /// Time is NaN or infinite
    #[error("Invalid keyframe time: {0}")]
    InvalidTime(f32),

    /// Character is not in the live scene
    #[error("Character not found: {0}")]
    CharacterNotFound(CharacterId),

    /// Catalog has no such entry
    #[error("Unknown catalog entry: {0}")]
    UnknownCatalogEntry(String),
}

/// Keyframe store, live scene and playback cursor of one movie
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeline {
    /// Keyframes sorted by time, never empty
    keyframes: Vec<Keyframe>,
    /// Scene being edited
    live: CharacterRegistry,
    /// Active keyframe and playback time
    cursor: PlaybackCursor,
    /// Selected character in the live scene
    selected: Option<CharacterId>,
    /// Movie duration (can be longer than the keyframes)
    pub duration: f32,
    /// Frame rate
    pub frame_rate: f32,
    /// Whether playback loops
    pub looping: bool,
    /// Scale bounds for gestures
    #[serde(default)]
    pub limits: GestureLimits,
}

impl Timeline {
    /// Create a timeline with a single empty keyframe at time zero
    pub fn new() -> Self {
        Self {
            keyframes: vec![Keyframe::new(0.0, CharacterRegistry::new())],
            live: CharacterRegistry::new(),
            cursor: PlaybackCursor::new(),
            selected: None,
            duration: DEFAULT_DURATION,
            frame_rate: 30.0,
            looping: false,
            limits: GestureLimits::default(),
        }
    }

    /// All keyframes in time order
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    /// Get a keyframe
    pub fn keyframe(&self, index: usize) -> Option<&Keyframe> {
        self.keyframes.get(index)
    }

    /// Keyframe count
    pub fn keyframe_count(&self) -> usize {
        self.keyframes.len()
    }

    /// Live scene
    pub fn characters(&self) -> &CharacterRegistry {
        &self.live
    }

    /// Playback cursor
    pub fn cursor(&self) -> &PlaybackCursor {
        &self.cursor
    }

    /// Index of the active keyframe
    pub fn current_index(&self) -> usize {
        self.cursor.index
    }

    /// Active keyframe
    pub fn current_keyframe(&self) -> &Keyframe {
        &self.keyframes[self.cursor.index]
    }

    /// Selected character ID
    pub fn selected(&self) -> Option<CharacterId> {
        self.selected
    }

    /// Selected character
    pub fn selected_character(&self) -> Option<&Character> {
        self.selected.and_then(|id| self.live.get(&id))
    }

    fn check_index(&self, index: usize) -> Result<(), TimelineError> {
        if index < self.keyframes.len() {
            Ok(())
        } else {
            tracing::debug!(index, len = self.keyframes.len(), "Keyframe index out of range");
            Err(TimelineError::IndexOutOfRange {
                index,
                len: self.keyframes.len(),
            })
        }
    }

    fn check_time(time: f32) -> Result<f32, TimelineError> {
        if time.is_finite() {
            Ok(time.max(0.0))
        } else {
            tracing::debug!(time, "Rejected non-finite keyframe time");
            Err(TimelineError::InvalidTime(time))
        }
    }

    /// Position after every keyframe at or before `time`
    fn insertion_index(&self, time: f32) -> usize {
        self.keyframes.partition_point(|k| k.time <= time)
    }

    /// Make `index` the active keyframe and show its snapshot
    fn activate(&mut self, index: usize) {
        self.live = self.keyframes[index].characters.clone();
        self.cursor.index = index;
        self.reconcile_selection();
    }

    fn reconcile_selection(&mut self) {
        if let Some(id) = self.selected {
            if !self.live.contains(&id) {
                self.selected = self.live.first().map(|c| c.id);
            }
        }
    }

    /// Snapshot the live scene into a new keyframe and make it active.
    ///
    /// Keyframes sharing a time stay in insertion order.
    pub fn add_keyframe(&mut self, time: f32) -> Result<KeyframeId, TimelineError> {
        let time = Self::check_time(time)?;
        let keyframe = Keyframe::new(time, self.live.clone());
        let id = keyframe.id;
        let index = self.insertion_index(time);
        self.keyframes.insert(index, keyframe);
        self.cursor.index = index;
        self.cursor.time = time;
        tracing::debug!(index, time, "Added keyframe");
        Ok(id)
    }

    /// Replace the live scene with a copy of the keyframe at `index`
    pub fn go_to_keyframe(&mut self, index: usize) -> Result<(), TimelineError> {
        self.check_index(index)?;
        self.activate(index);
        self.cursor.time = self.keyframes[index].time;
        Ok(())
    }

    /// Overwrite the active keyframe with a copy of the live scene
    pub fn update_current_keyframe(&mut self) {
        let index = self.cursor.index;
        self.keyframes[index].characters = self.live.clone();
    }

    /// Remove a keyframe. The last remaining keyframe cannot be deleted.
    pub fn delete_keyframe(&mut self, index: usize) -> Result<Keyframe, TimelineError> {
        self.check_index(index)?;
        if self.keyframes.len() == 1 {
            tracing::debug!("Refused to delete the last keyframe");
            return Err(TimelineError::LastKeyframe);
        }

        let removed = self.keyframes.remove(index);
        let current = self.cursor.index;
        if index < current {
            self.cursor.index = current - 1;
        } else if index == current {
            let neighbour = index.min(self.keyframes.len() - 1);
            self.activate(neighbour);
            self.cursor.time = self.keyframes[neighbour].time;
        }
        tracing::debug!(index, cursor = self.cursor.index, "Deleted keyframe");
        Ok(removed)
    }

    /// Retime a keyframe; the cursor stays on the keyframe it pointed at.
    ///
    /// Returns the keyframe's new index.
    pub fn move_keyframe(&mut self, index: usize, new_time: f32) -> Result<usize, TimelineError> {
        self.check_index(index)?;
        let new_time = Self::check_time(new_time)?;
        let active_id = self.current_keyframe().id;

        let mut keyframe = self.keyframes.remove(index);
        keyframe.time = new_time;
        let new_index = self.insertion_index(new_time);
        self.keyframes.insert(new_index, keyframe);

        if let Some(pos) = self.keyframes.iter().position(|k| k.id == active_id) {
            self.cursor.index = pos;
        }
        if new_index == self.cursor.index {
            self.cursor.time = new_time;
        }
        Ok(new_index)
    }

    /// Copy a keyframe's snapshot to a new time without changing the active keyframe
    pub fn duplicate_keyframe(&mut self, index: usize, new_time: f32) -> Result<KeyframeId, TimelineError> {
        self.check_index(index)?;
        let new_time = Self::check_time(new_time)?;

        let copy = Keyframe::new(new_time, self.keyframes[index].characters.clone());
        let id = copy.id;
        let insert_at = self.insertion_index(new_time);
        self.keyframes.insert(insert_at, copy);
        if insert_at <= self.cursor.index {
            self.cursor.index += 1;
        }
        Ok(id)
    }

    /// Index of the keyframe in effect at `time`
    pub fn keyframe_index_at(&self, time: f32) -> usize {
        self.insertion_index(time).saturating_sub(1)
    }

    /// Scene shown at `time` without interpolation
    pub fn scene_at(&self, time: f32) -> &CharacterRegistry {
        &self.keyframes[self.keyframe_index_at(time)].characters
    }

    /// Scene at `time` blended between the surrounding keyframes
    pub fn interpolated_scene_at(&self, time: f32) -> CharacterRegistry {
        let index = self.keyframe_index_at(time);
        let a = &self.keyframes[index];
        match self.keyframes.get(index + 1) {
            Some(b) if time > a.time && b.time > a.time => {
                let t = (time - a.time) / (b.time - a.time);
                a.blend(b, t)
            }
            _ => a.characters.clone(),
        }
    }

    /// Time of the last keyframe
    pub fn content_duration(&self) -> f32 {
        self.keyframes.last().map(|k| k.time).unwrap_or(0.0)
    }

    /// End of playback: the movie duration or the last keyframe, whichever is later
    pub fn end_time(&self) -> f32 {
        self.duration.max(self.content_duration())
    }

    /// Convert time to frame number
    pub fn time_to_frame(&self, time: f32) -> u32 {
        (time.max(0.0) * self.frame_rate) as u32
    }

    /// Convert frame number to time
    pub fn frame_to_time(&self, frame: u32) -> f32 {
        frame as f32 / self.frame_rate
    }

    /// Move the playback time, activating the keyframe in effect there.
    ///
    /// Returns `true` when the active keyframe changed.
    pub fn seek(&mut self, time: f32) -> bool {
        if !time.is_finite() {
            return false;
        }
        let time = time.clamp(0.0, self.end_time());
        self.cursor.time = time;
        let index = self.keyframe_index_at(time);
        if index != self.cursor.index {
            self.activate(index);
            true
        } else {
            false
        }
    }

    /// Start playback
    pub fn play(&mut self) {
        self.cursor.play();
    }

    /// Pause playback
    pub fn pause(&mut self) {
        self.cursor.pause();
    }

    /// Stop playback and rewind
    pub fn stop(&mut self) {
        self.cursor.stop();
        self.seek(0.0);
    }

    /// Set playback speed multiplier
    pub fn set_speed(&mut self, speed: f32) {
        if speed.is_finite() && speed > 0.0 {
            self.cursor.speed = speed;
        }
    }

    /// Advance playback by `delta` seconds.
    ///
    /// Returns `true` when the active keyframe changed.
    pub fn tick(&mut self, delta: f32) -> bool {
        if !self.cursor.is_playing() || !delta.is_finite() {
            return false;
        }
        let end = self.end_time();
        let mut time = self.cursor.time + delta * self.cursor.speed;
        if time >= end {
            if self.looping && end > 0.0 {
                time %= end;
            } else {
                time = end;
                self.cursor.stop();
            }
        }
        self.seek(time)
    }

    /// Put a character on the canvas and select it
    pub fn add_character(&mut self, character: Character) -> CharacterId {
        let id = self.live.insert(character);
        self.selected = Some(id);
        self.update_current_keyframe();
        id
    }

    /// Put a new character from the catalog on the canvas
    pub fn spawn_from_catalog(
        &mut self,
        catalog: &CharacterCatalog,
        entry_id: &str,
        position: [f32; 2],
    ) -> Result<CharacterId, TimelineError> {
        let character = catalog
            .spawn(entry_id, position)
            .ok_or_else(|| TimelineError::UnknownCatalogEntry(entry_id.to_string()))?;
        Ok(self.add_character(character))
    }

    /// Remove a character from the live scene
    pub fn remove_character(&mut self, id: CharacterId) -> Result<Character, TimelineError> {
        let removed = self
            .live
            .remove(&id)
            .ok_or(TimelineError::CharacterNotFound(id))?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        self.update_current_keyframe();
        Ok(removed)
    }

    /// Select a character in the live scene
    pub fn select(&mut self, id: CharacterId) -> Result<(), TimelineError> {
        if !self.live.contains(&id) {
            return Err(TimelineError::CharacterNotFound(id));
        }
        self.selected = Some(id);
        Ok(())
    }

    /// Clear the selection
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Select the character under a canvas point; a miss clears the selection
    pub fn tap(&mut self, point: [f32; 2]) -> Option<CharacterId> {
        self.selected = self.live.hit_test(point);
        self.selected
    }

    fn edit_character(
        &mut self,
        id: CharacterId,
        edit: impl FnOnce(&mut Character, &GestureLimits),
    ) -> Result<(), TimelineError> {
        let limits = self.limits;
        let character = self
            .live
            .get_mut(&id)
            .ok_or(TimelineError::CharacterNotFound(id))?;
        edit(character, &limits);
        self.update_current_keyframe();
        Ok(())
    }

    /// Apply a gesture to a character and commit it to the active keyframe.
    ///
    /// Returns `false` when the gesture carried no usable values.
    pub fn apply_gesture(&mut self, id: CharacterId, gesture: GestureEvent) -> Result<bool, TimelineError> {
        let mut applied = false;
        self.edit_character(id, |c, limits| applied = gesture.apply(c, limits))?;
        Ok(applied)
    }

    /// Change a character's animation
    pub fn set_animation(&mut self, id: CharacterId, animation: AnimationState) -> Result<(), TimelineError> {
        self.edit_character(id, |c, _| c.animation = animation)
    }

    /// Rename a character
    pub fn rename_character(&mut self, id: CharacterId, name: impl Into<String>) -> Result<(), TimelineError> {
        let name = name.into();
        self.edit_character(id, |c, _| c.name = name)
    }

    /// Place a character
    pub fn set_position(&mut self, id: CharacterId, position: [f32; 2]) -> Result<(), TimelineError> {
        self.edit_character(id, |c, _| {
            if position.iter().all(|v| v.is_finite()) {
                c.position = position;
            }
        })
    }

    /// Set a character's scale, clamped to the gesture limits
    pub fn set_scale(&mut self, id: CharacterId, scale: f32) -> Result<(), TimelineError> {
        self.edit_character(id, |c, limits| {
            if scale.is_finite() {
                c.scale = scale.clamp(limits.min_scale, limits.max_scale);
            }
        })
    }

    /// Set a character's rotation in degrees
    pub fn set_rotation(&mut self, id: CharacterId, degrees: f32) -> Result<(), TimelineError> {
        self.edit_character(id, |c, _| {
            if degrees.is_finite() {
                c.rotation = normalize_degrees(degrees);
            }
        })
    }

    /// Restore the timeline invariants after loading external data
    pub fn normalize(&mut self) {
        for keyframe in &mut self.keyframes {
            if !keyframe.time.is_finite() || keyframe.time < 0.0 {
                keyframe.time = 0.0;
            }
        }
        self.keyframes.sort_by(|a, b| a.time.total_cmp(&b.time));
        if self.keyframes.is_empty() {
            self.keyframes.push(Keyframe::new(0.0, self.live.clone()));
        }
        let index = self.cursor.index.min(self.keyframes.len() - 1);
        self.activate(index);
        if !self.cursor.time.is_finite() {
            self.cursor.time = self.keyframes[index].time;
        }
        if !self.frame_rate.is_finite() || self.frame_rate <= 0.0 {
            self.frame_rate = 30.0;
        }
        if !self.duration.is_finite() || self.duration < 0.0 {
            self.duration = DEFAULT_DURATION;
        }
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogEntry;

    fn is_sorted(timeline: &Timeline) -> bool {
        timeline
            .keyframes()
            .windows(2)
            .all(|w| w[0].time <= w[1].time)
    }

    fn timeline_with_cat() -> (Timeline, CharacterId) {
        let mut timeline = Timeline::new();
        let id = timeline.add_character(Character::new("Cat").with_position([10.0, 10.0]));
        (timeline, id)
    }

    #[test]
    fn test_new_has_one_keyframe() {
        let timeline = Timeline::new();
        assert_eq!(timeline.keyframe_count(), 1);
        assert_eq!(timeline.current_index(), 0);
        assert!(timeline.characters().is_empty());
    }

    #[test]
    fn test_add_keyframe_keeps_order_and_moves_cursor() {
        let mut timeline = Timeline::new();
        timeline.add_keyframe(3.0).unwrap();
        timeline.add_keyframe(1.0).unwrap();
        assert!(is_sorted(&timeline));
        assert_eq!(timeline.current_index(), 1);
        assert_eq!(timeline.cursor().time, 1.0);

        timeline.add_keyframe(5.0).unwrap();
        assert_eq!(timeline.current_index(), 3);
    }

    #[test]
    fn test_duplicate_times_keep_insertion_order() {
        let mut timeline = Timeline::new();
        let first = timeline.add_keyframe(2.0).unwrap();
        let second = timeline.add_keyframe(2.0).unwrap();
        assert_eq!(timeline.keyframe(1).unwrap().id, first);
        assert_eq!(timeline.keyframe(2).unwrap().id, second);
        assert_eq!(timeline.current_index(), 2);
    }

    #[test]
    fn test_add_keyframe_rejects_nan() {
        let mut timeline = Timeline::new();
        assert!(matches!(
            timeline.add_keyframe(f32::NAN),
            Err(TimelineError::InvalidTime(_))
        ));
        assert_eq!(timeline.keyframe_count(), 1);
        timeline.add_keyframe(-4.0).unwrap();
        assert_eq!(timeline.keyframe(0).unwrap().time, 0.0);
    }

    #[test]
    fn test_go_to_restores_snapshot() {
        let (mut timeline, cat) = timeline_with_cat();
        timeline.add_keyframe(1.0).unwrap();
        timeline
            .apply_gesture(cat, GestureEvent::Drag { dx: 50.0, dy: 0.0 })
            .unwrap();

        timeline.go_to_keyframe(0).unwrap();
        assert_eq!(timeline.characters(), &timeline.keyframe(0).unwrap().characters);
        assert_eq!(timeline.characters().get(&cat).unwrap().position, [10.0, 10.0]);

        timeline.go_to_keyframe(1).unwrap();
        assert_eq!(timeline.characters(), &timeline.keyframe(1).unwrap().characters);
        assert_eq!(timeline.characters().get(&cat).unwrap().position, [60.0, 10.0]);
        assert_eq!(timeline.cursor().time, 1.0);
    }

    #[test]
    fn test_go_to_out_of_range_is_noop() {
        let (mut timeline, _) = timeline_with_cat();
        let before = timeline.characters().clone();
        assert_eq!(
            timeline.go_to_keyframe(7),
            Err(TimelineError::IndexOutOfRange { index: 7, len: 1 })
        );
        assert_eq!(timeline.characters(), &before);
        assert_eq!(timeline.current_index(), 0);
    }

    #[test]
    fn test_go_to_falls_back_selection() {
        let mut timeline = Timeline::new();
        let first = timeline.add_character(Character::new("First"));
        timeline.add_keyframe(1.0).unwrap();
        let late = timeline.add_character(Character::new("Late"));
        assert_eq!(timeline.selected(), Some(late));

        timeline.go_to_keyframe(0).unwrap();
        assert_eq!(timeline.selected(), Some(first));
    }

    #[test]
    fn test_go_to_empty_snapshot_clears_selection() {
        let mut timeline = Timeline::new();
        timeline.add_keyframe(1.0).unwrap();
        timeline.add_character(Character::new("Only"));
        timeline.go_to_keyframe(0).unwrap();
        assert_eq!(timeline.selected(), None);
    }

    #[test]
    fn test_update_current_keyframe_copies_live() {
        let (mut timeline, cat) = timeline_with_cat();
        timeline.set_animation(cat, AnimationState::Dance).unwrap();
        timeline.update_current_keyframe();
        assert_eq!(timeline.current_keyframe().characters, *timeline.characters());
        assert_eq!(
            timeline.current_keyframe().characters.get(&cat).unwrap().animation,
            AnimationState::Dance
        );
    }

    #[test]
    fn test_delete_last_keyframe_blocked() {
        let (mut timeline, _) = timeline_with_cat();
        assert_eq!(timeline.delete_keyframe(0), Err(TimelineError::LastKeyframe));
        assert_eq!(timeline.keyframe_count(), 1);
    }

    #[test]
    fn test_delete_current_moves_to_neighbour() {
        let mut timeline = Timeline::new();
        timeline.add_keyframe(1.0).unwrap();
        timeline.add_keyframe(2.0).unwrap();

        timeline.delete_keyframe(2).unwrap();
        assert_eq!(timeline.current_index(), 1);
        assert_eq!(timeline.cursor().time, 1.0);

        timeline.go_to_keyframe(0).unwrap();
        timeline.delete_keyframe(0).unwrap();
        assert_eq!(timeline.current_index(), 0);
        assert_eq!(timeline.keyframe_count(), 1);
    }

    #[test]
    fn test_delete_current_loads_neighbour_scene() {
        let (mut timeline, cat) = timeline_with_cat();
        timeline.add_keyframe(1.0).unwrap();
        timeline.set_position(cat, [300.0, 300.0]).unwrap();
        timeline.go_to_keyframe(0).unwrap();

        timeline.delete_keyframe(0).unwrap();
        assert_eq!(timeline.characters().get(&cat).unwrap().position, [300.0, 300.0]);
    }

    #[test]
    fn test_delete_before_cursor_shifts_index() {
        let mut timeline = Timeline::new();
        timeline.add_keyframe(1.0).unwrap();
        let active = timeline.add_keyframe(2.0).unwrap();
        timeline.delete_keyframe(0).unwrap();
        assert_eq!(timeline.current_index(), 1);
        assert_eq!(timeline.current_keyframe().id, active);
    }

    #[test]
    fn test_store_never_empty_and_sorted() {
        let mut timeline = Timeline::new();
        let mut seed: u32 = 0x1234_5678;
        let mut next = move || {
            seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            seed >> 8
        };

        for _ in 0..500 {
            let len = timeline.keyframe_count();
            if next() % 3 == 0 {
                let _ = timeline.delete_keyframe(next() as usize % (len + 1));
            } else {
                timeline.add_keyframe((next() % 1000) as f32 / 100.0).unwrap();
            }
            assert!(timeline.keyframe_count() >= 1);
            assert!(timeline.current_index() < timeline.keyframe_count());
            assert!(is_sorted(&timeline));
        }
    }

    #[test]
    fn test_move_keyframe_cursor_follows() {
        let mut timeline = Timeline::new();
        let a = timeline.add_keyframe(1.0).unwrap();
        timeline.add_keyframe(2.0).unwrap();
        timeline.go_to_keyframe(1).unwrap();

        let new_index = timeline.move_keyframe(1, 5.0).unwrap();
        assert_eq!(new_index, 2);
        assert_eq!(timeline.current_keyframe().id, a);
        assert_eq!(timeline.cursor().time, 5.0);
        assert!(is_sorted(&timeline));
    }

    #[test]
    fn test_duplicate_keyframe() {
        let (mut timeline, cat) = timeline_with_cat();
        let active = timeline.current_keyframe().id;
        timeline.duplicate_keyframe(0, 0.0).unwrap();
        assert_eq!(timeline.keyframe_count(), 2);
        assert_eq!(timeline.current_keyframe().id, active);
        assert!(timeline.keyframe(1).unwrap().characters.contains(&cat));
    }

    #[test]
    fn test_seek_activates_keyframe() {
        let (mut timeline, cat) = timeline_with_cat();
        timeline.add_keyframe(2.0).unwrap();
        timeline.set_position(cat, [0.0, 0.0]).unwrap();

        assert!(timeline.seek(0.5));
        assert_eq!(timeline.current_index(), 0);
        assert_eq!(timeline.characters().get(&cat).unwrap().position, [10.0, 10.0]);
        assert!(!timeline.seek(1.5));
        assert!(timeline.seek(2.5));
        assert_eq!(timeline.current_index(), 1);
    }

    #[test]
    fn test_interpolated_scene() {
        let (mut timeline, cat) = timeline_with_cat();
        timeline.add_keyframe(2.0).unwrap();
        timeline.set_position(cat, [30.0, 10.0]).unwrap();

        let mid = timeline.interpolated_scene_at(1.0);
        assert_eq!(mid.get(&cat).unwrap().position, [20.0, 10.0]);
        let stepped = timeline.scene_at(1.0);
        assert_eq!(stepped.get(&cat).unwrap().position, [10.0, 10.0]);
        let after = timeline.interpolated_scene_at(9.0);
        assert_eq!(after.get(&cat).unwrap().position, [30.0, 10.0]);
    }

    #[test]
    fn test_tick_plays_through_keyframes() {
        let mut timeline = Timeline::new();
        timeline.duration = 2.0;
        timeline.add_keyframe(1.0).unwrap();
        timeline.go_to_keyframe(0).unwrap();

        timeline.play();
        assert!(!timeline.tick(0.5));
        assert!(timeline.tick(0.6));
        assert_eq!(timeline.current_index(), 1);

        timeline.tick(5.0);
        assert!(!timeline.cursor().is_playing());
        assert_eq!(timeline.cursor().time, 2.0);
    }

    #[test]
    fn test_tick_loops() {
        let mut timeline = Timeline::new();
        timeline.duration = 2.0;
        timeline.looping = true;
        timeline.play();
        timeline.tick(2.5);
        assert!(timeline.cursor().is_playing());
        assert!((timeline.cursor().time - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_character_edits_commit_to_keyframe() {
        let (mut timeline, cat) = timeline_with_cat();
        timeline
            .apply_gesture(cat, GestureEvent::Rotate { degrees: 90.0 })
            .unwrap();
        timeline.rename_character(cat, "Tom").unwrap();
        timeline.set_scale(cat, 50.0).unwrap();

        let stored = timeline.current_keyframe().characters.get(&cat).unwrap();
        assert_eq!(stored.rotation, 90.0);
        assert_eq!(stored.name, "Tom");
        assert_eq!(stored.scale, timeline.limits.max_scale);
    }

    #[test]
    fn test_unknown_character() {
        let mut timeline = Timeline::new();
        let ghost = CharacterId::new();
        assert_eq!(
            timeline.set_animation(ghost, AnimationState::Run),
            Err(TimelineError::CharacterNotFound(ghost))
        );
        assert!(timeline.select(ghost).is_err());
    }

    #[test]
    fn test_spawn_and_remove() {
        let mut catalog = CharacterCatalog::new();
        catalog.insert(CatalogEntry::new("bear", "Bear", "art/bear.png"));
        let mut timeline = Timeline::new();

        let bear = timeline.spawn_from_catalog(&catalog, "bear", [5.0, 5.0]).unwrap();
        assert_eq!(timeline.selected(), Some(bear));
        assert!(timeline.current_keyframe().characters.contains(&bear));
        assert!(matches!(
            timeline.spawn_from_catalog(&catalog, "yeti", [0.0, 0.0]),
            Err(TimelineError::UnknownCatalogEntry(_))
        ));

        timeline.remove_character(bear).unwrap();
        assert_eq!(timeline.selected(), None);
        assert!(timeline.current_keyframe().characters.is_empty());
    }

    #[test]
    fn test_tap_selects_topmost() {
        let (mut timeline, cat) = timeline_with_cat();
        timeline.clear_selection();
        assert_eq!(timeline.tap([12.0, 12.0]), Some(cat));
        assert_eq!(timeline.tap([900.0, 900.0]), None);
        assert_eq!(timeline.selected(), None);
    }

    #[test]
    fn test_normalize_repairs_loaded_data() {
        let (mut timeline, cat) = timeline_with_cat();
        timeline.keyframes.clear();
        timeline.cursor.index = 4;
        timeline.frame_rate = 0.0;

        timeline.normalize();
        assert_eq!(timeline.keyframe_count(), 1);
        assert_eq!(timeline.current_index(), 0);
        assert!(timeline.current_keyframe().characters.contains(&cat));
        assert_eq!(timeline.frame_rate, 30.0);
    }

    #[test]
    fn test_normalize_resets_bad_duration() {
        let mut timeline = Timeline::new();
        timeline.duration = f32::INFINITY;
        timeline.normalize();
        assert_eq!(timeline.duration, DEFAULT_DURATION);
        assert!(timeline.end_time().is_finite());

        timeline.duration = -3.0;
        timeline.normalize();
        assert_eq!(timeline.duration, DEFAULT_DURATION);
    }
}
