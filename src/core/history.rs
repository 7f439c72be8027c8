//! Bounded, linear undo/redo history over committed edits.

use std::collections::VecDeque;

use crate::models::{EditAction, EditSnapshot};

pub const MAX_UNDO_STEPS: usize = 50;

/// LIFO edit history. Exceeding capacity silently evicts the oldest action;
/// that is the intended bounded-memory policy, not a failure. Committing after
/// an undo discards the divergent redo branch.
#[derive(Debug, Default)]
pub struct EditHistory {
    undo: VecDeque<EditAction>,
    redo: Vec<EditAction>,
}

impl EditHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commit(&mut self, action: EditAction) {
        self.undo.push_back(action);
        if self.undo.len() > MAX_UNDO_STEPS {
            self.undo.pop_front();
        }
        self.redo.clear();
    }

    /// Pop the most recent action and return the snapshot to restore.
    /// A no-op returning `None` when there is nothing to undo.
    pub fn undo(&mut self) -> Option<EditSnapshot> {
        let action = self.undo.pop_back()?;
        let snapshot = action.before.clone();
        self.redo.push(action);
        Some(snapshot)
    }

    pub fn redo(&mut self) -> Option<EditSnapshot> {
        let action = self.redo.pop()?;
        let snapshot = action.after.clone();
        self.undo.push_back(action);
        Some(snapshot)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }
}
