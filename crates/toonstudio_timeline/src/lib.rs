// SPDX-License-Identifier: MIT OR Apache-2.0
//! Keyframe timeline for toonstudio.
//!
//! This crate provides the movie-creation model:
//! - Characters placed on a 2D canvas
//! - A live character registry edited by gestures
//! - Time-ordered keyframes holding full scene snapshots
//! - A playback cursor for stepping and scrubbing
//! - Export planning for an external video encoder
//!
//! ## Architecture
//!
//! Edits go to the live [`CharacterRegistry`] owned by a [`Timeline`].
//! The timeline commits the live registry into the keyframe under the
//! cursor, and navigating between keyframes swaps the live registry for
//! a copy of the stored snapshot.

pub mod audio;
pub mod catalog;
pub mod character;
pub mod cursor;
pub mod export;
pub mod gesture;
pub mod keyframe;
pub mod registry;
pub mod timeline;

pub use audio::AudioTrack;
pub use catalog::{CatalogEntry, CatalogError, CharacterCatalog};
pub use character::{AnimationState, Character, CharacterId, PreviewRef};
pub use cursor::{PlaybackCursor, PlaybackState};
pub use export::{plan_export, ExportError, ExportPlan, ExportSettings, FramePlan, FrameSink};
pub use gesture::{GestureEvent, GestureLimits};
pub use keyframe::{Interpolation, Keyframe, KeyframeId};
pub use registry::CharacterRegistry;
pub use timeline::{Timeline, TimelineError};
