// SPDX-License-Identifier: MIT OR Apache-2.0
//! Undo/redo history of timeline snapshots.
//!
//! Each operation stores the serialized document before and after an edit,
//! so undo and redo are plain snapshot restores.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use thiserror::Error;

/// Default maximum undo history depth
pub const MAX_HISTORY: usize = 100;

/// History errors
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Nothing to undo
    #[error("Nothing to undo")]
    NothingToUndo,

    /// Nothing to redo
    #[error("Nothing to redo")]
    NothingToRedo,

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),
}

/// Result type for history operations
pub type Result<T> = std::result::Result<T, HistoryError>;

/// Serialized document state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Serialized state
    pub data: Vec<u8>,
}

impl StateSnapshot {
    /// Create from serializable value
    pub fn from_value<T: Serialize>(value: &T) -> Result<Self> {
        Ok(Self {
            data: bincode::serialize(value)?,
        })
    }

    /// Deserialize to value
    pub fn to_value<T: for<'de> Deserialize<'de>>(&self) -> Result<T> {
        Ok(bincode::deserialize(&self.data)?)
    }

    /// Size in bytes
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Whether two snapshots hold the same state
    pub fn same_state(&self, other: &StateSnapshot) -> bool {
        self.data == other.data
    }
}

/// An edit that can be undone/redone
#[derive(Debug, Clone)]
pub struct Operation {
    /// Sequential operation ID
    pub id: u64,
    /// Human-readable description
    pub description: String,
    /// State before the edit (for undo)
    pub before: StateSnapshot,
    /// State after the edit (for redo)
    pub after: StateSnapshot,
}

impl Operation {
    /// Memory size of this operation
    pub fn memory_size(&self) -> usize {
        self.before.size() + self.after.size()
    }
}

/// History statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryStats {
    /// Operations in undo stack
    pub undo_count: usize,
    /// Operations in redo stack
    pub redo_count: usize,
    /// Memory used by the undo stack (bytes)
    pub memory_used: usize,
    /// Maximum history depth
    pub max_depth: usize,
}

/// Undo/redo history manager
#[derive(Debug)]
pub struct History {
    undo_stack: VecDeque<Operation>,
    redo_stack: VecDeque<Operation>,
    next_id: u64,
    max_depth: usize,
    memory_used: usize,
}

impl History {
    /// Create a new history manager
    pub fn new() -> Self {
        Self::with_max_depth(MAX_HISTORY)
    }

    /// Create with custom maximum depth
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            next_id: 1,
            max_depth: max_depth.max(1),
            memory_used: 0,
        }
    }

    /// Record an edit. Clears the redo stack.
    pub fn commit(&mut self, description: impl Into<String>, before: StateSnapshot, after: StateSnapshot) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        let operation = Operation {
            id,
            description: description.into(),
            before,
            after,
        };

        self.redo_stack.clear();
        self.memory_used += operation.memory_size();
        self.undo_stack.push_back(operation);

        while self.undo_stack.len() > self.max_depth {
            if let Some(oldest) = self.undo_stack.pop_front() {
                self.memory_used = self.memory_used.saturating_sub(oldest.memory_size());
            }
        }

        id
    }

    /// Undo the last operation, returning it so the caller can restore `before`
    pub fn undo(&mut self) -> Result<&Operation> {
        let operation = self
            .undo_stack
            .pop_back()
            .ok_or(HistoryError::NothingToUndo)?;

        self.memory_used = self.memory_used.saturating_sub(operation.memory_size());
        self.redo_stack.push_back(operation);
        self.redo_stack.back().ok_or(HistoryError::NothingToUndo)
    }

    /// Redo the last undone operation, returning it so the caller can restore `after`
    pub fn redo(&mut self) -> Result<&Operation> {
        let operation = self
            .redo_stack
            .pop_back()
            .ok_or(HistoryError::NothingToRedo)?;

        self.memory_used += operation.memory_size();
        self.undo_stack.push_back(operation);
        self.undo_stack.back().ok_or(HistoryError::NothingToRedo)
    }

    /// Get history statistics
    pub fn stats(&self) -> HistoryStats {
        HistoryStats {
            undo_count: self.undo_stack.len(),
            redo_count: self.redo_stack.len(),
            memory_used: self.memory_used,
            max_depth: self.max_depth,
        }
    }

    /// Description of next undo operation
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.back().map(|op| op.description.as_str())
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(value: u32) -> StateSnapshot {
        StateSnapshot::from_value(&value).unwrap()
    }

    #[test]
    fn test_undo_redo_cycle() {
        let mut history = History::new();
        history.commit("First", snap(0), snap(1));
        history.commit("Second", snap(1), snap(2));

        assert_eq!(history.undo_description(), Some("Second"));
        let restored: u32 = history.undo().unwrap().before.to_value().unwrap();
        assert_eq!(restored, 1);
        assert_eq!(history.stats().redo_count, 1);

        let redone: u32 = history.redo().unwrap().after.to_value().unwrap();
        assert_eq!(redone, 2);
        assert_eq!(history.stats().redo_count, 0);
    }

    #[test]
    fn test_commit_clears_redo() {
        let mut history = History::new();
        history.commit("A", snap(0), snap(1));
        history.undo().unwrap();
        history.commit("B", snap(0), snap(5));
        assert!(matches!(history.redo(), Err(HistoryError::NothingToRedo)));
    }

    #[test]
    fn test_depth_limit() {
        let mut history = History::with_max_depth(3);
        for i in 0..10 {
            history.commit(format!("Edit {i}"), snap(i), snap(i + 1));
        }
        let stats = history.stats();
        assert_eq!(stats.undo_count, 3);
        assert_eq!(stats.memory_used, 3 * 2 * snap(0).size());
        assert_eq!(history.undo_description(), Some("Edit 9"));
    }

    #[test]
    fn test_empty_history_errors() {
        let mut history = History::new();
        assert!(matches!(history.undo(), Err(HistoryError::NothingToUndo)));
        assert!(matches!(history.redo(), Err(HistoryError::NothingToRedo)));
    }
}
