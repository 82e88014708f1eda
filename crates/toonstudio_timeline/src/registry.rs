// SPDX-License-Identifier: MIT OR Apache-2.0
//! Ordered collection of characters making up one scene.

use crate::character::{Character, CharacterId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Hit radius of a character at scale 1.0, in canvas units
pub const BASE_HIT_RADIUS: f32 = 50.0;

/// Characters on the canvas, in insertion (draw) order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterRegistry {
    characters: IndexMap<CharacterId, Character>,
}

impl CharacterRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a character, replacing any character with the same ID
    pub fn insert(&mut self, character: Character) -> CharacterId {
        let id = character.id;
        self.characters.insert(id, character);
        id
    }

    /// Get a character
    pub fn get(&self, id: &CharacterId) -> Option<&Character> {
        self.characters.get(id)
    }

    /// Get a mutable character
    pub fn get_mut(&mut self, id: &CharacterId) -> Option<&mut Character> {
        self.characters.get_mut(id)
    }

    /// Remove a character, keeping the order of the rest
    pub fn remove(&mut self, id: &CharacterId) -> Option<Character> {
        self.characters.shift_remove(id)
    }

    /// Check whether a character is present
    pub fn contains(&self, id: &CharacterId) -> bool {
        self.characters.contains_key(id)
    }

    /// Number of characters
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    /// Whether the registry holds no characters
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Iterate characters in draw order
    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.characters.values()
    }

    /// Character IDs in draw order
    pub fn ids(&self) -> Vec<CharacterId> {
        self.characters.keys().copied().collect()
    }

    /// First character in draw order
    pub fn first(&self) -> Option<&Character> {
        self.characters.first().map(|(_, c)| c)
    }

    /// Find the first character with the given name
    pub fn find_by_name(&self, name: &str) -> Option<&Character> {
        self.characters.values().find(|c| c.name == name)
    }

    /// Top-most character under a canvas point
    pub fn hit_test(&self, point: [f32; 2]) -> Option<CharacterId> {
        self.characters
            .values()
            .rev()
            .find(|c| {
                let dx = c.position[0] - point[0];
                let dy = c.position[1] - point[1];
                let radius = BASE_HIT_RADIUS * c.scale.abs();
                dx * dx + dy * dy <= radius * radius
            })
            .map(|c| c.id)
    }
}

impl FromIterator<Character> for CharacterRegistry {
    fn from_iter<I: IntoIterator<Item = Character>>(iter: I) -> Self {
        let mut registry = Self::new();
        for character in iter {
            registry.insert(character);
        }
        registry
    }
}
