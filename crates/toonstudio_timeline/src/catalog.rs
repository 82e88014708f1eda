// SPDX-License-Identifier: MIT OR Apache-2.0
//! Catalog of characters the user can place on the canvas.

use crate::character::{Character, PreviewRef};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog text could not be parsed
    #[error("Catalog parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Two entries share an ID
    #[error("Duplicate catalog entry: {0}")]
    DuplicateEntry(String),
}

/// One selectable character in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Catalog identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Preview art
    pub preview: PreviewRef,
}

impl CatalogEntry {
    /// Create a catalog entry
    pub fn new(id: impl Into<String>, name: impl Into<String>, preview: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            preview: PreviewRef::new(preview),
        }
    }
}

/// Ordered set of catalog entries keyed by ID
#[derive(Debug, Clone, Default)]
pub struct CharacterCatalog {
    entries: IndexMap<String, CatalogEntry>,
}

impl CharacterCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a RON list of entries
    pub fn from_ron_str(source: &str) -> Result<Self, CatalogError> {
        let list: Vec<CatalogEntry> = ron::from_str(source)?;
        let mut catalog = Self::new();
        for entry in list {
            if catalog.entries.contains_key(&entry.id) {
                return Err(CatalogError::DuplicateEntry(entry.id));
            }
            catalog.insert(entry);
        }
        tracing::debug!("Loaded catalog with {} entries", catalog.len());
        Ok(catalog)
    }

    /// Add or replace an entry
    pub fn insert(&mut self, entry: CatalogEntry) {
        self.entries.insert(entry.id.clone(), entry);
    }

    /// Get an entry
    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.get(id)
    }

    /// All entries in catalog order
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }

    /// Entry count
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Create a new character from an entry
    pub fn spawn(&self, id: &str, position: [f32; 2]) -> Option<Character> {
        let entry = self.get(id)?;
        Some(
            Character::new(entry.name.clone())
                .with_position(position)
                .with_preview(entry.preview.clone()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"[
        (id: "bunny", name: "Bunny", preview: "art/bunny.png"),
        (id: "fox", name: "Fox", preview: "art/fox.png"),
    ]"#;

    #[test]
    fn test_parse_catalog() {
        let catalog = CharacterCatalog::from_ron_str(CATALOG).unwrap();
        assert_eq!(catalog.len(), 2);
        let ids: Vec<_> = catalog.entries().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["bunny", "fox"]);
        assert_eq!(catalog.get("fox").unwrap().preview.as_str(), "art/fox.png");
    }

    #[test]
    fn test_duplicate_entry_rejected() {
        let source = r#"[
            (id: "a", name: "A", preview: "a.png"),
            (id: "a", name: "Again", preview: "b.png"),
        ]"#;
        assert!(matches!(
            CharacterCatalog::from_ron_str(source),
            Err(CatalogError::DuplicateEntry(id)) if id == "a"
        ));
    }

    #[test]
    fn test_spawn_creates_fresh_ids() {
        let catalog = CharacterCatalog::from_ron_str(CATALOG).unwrap();
        let a = catalog.spawn("bunny", [1.0, 2.0]).unwrap();
        let b = catalog.spawn("bunny", [1.0, 2.0]).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.name, "Bunny");
        assert_eq!(a.position, [1.0, 2.0]);
        assert!(catalog.spawn("dragon", [0.0, 0.0]).is_none());
    }
}
