//! # Command History
//!
//! Undo/redo over recorded [`Mutation`]s.
//!
//! ## Design
//!
//! - Every successful edit is recorded after it has been applied
//! - Undo reverts the most recent record and moves it to the redo stack
//! - Redo re-applies it and moves it back
//! - Recording a new edit clears the redo stack
//! - The oldest records fall off once `max_levels` is exceeded
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut tree = DocumentTree::new();
//! let mut history = CommandHistory::new();
//!
//! let placement = tree.append_child("div", "main", "body", None)?;
//! history.record(Mutation::InsertNode(placement));
//!
//! history.undo(&mut tree)?;
//! history.redo(&mut tree)?;
//! ```

use crate::mutations::{Mutation, MutationError};
use crate::tree::DocumentTree;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    /// The stack for the requested direction (`"undo"` or `"redo"`) is empty
    #[error("Nothing to {0}")]
    EmptyHistory(&'static str),

    #[error(transparent)]
    Mutation(#[from] MutationError),
}

/// Linear undo/redo history for one document
#[derive(Debug, Clone)]
pub struct CommandHistory {
    /// Applied records (most recent last)
    undo_stack: Vec<Mutation>,

    /// Undone records (most recent last)
    redo_stack: Vec<Mutation>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,
}

impl CommandHistory {
    /// Create a history with the default limit (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    /// Create a history with a custom limit
    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
        }
    }

    /// Record an edit that has already been applied
    pub fn record(&mut self, mutation: Mutation) {
        debug!(mutation = mutation.name(), "recording edit");
        self.undo_stack.push(mutation);
        self.redo_stack.clear();

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }
    }

    /// Revert the most recent edit.
    ///
    /// If reverting fails the record stays on the undo stack.
    pub fn undo(&mut self, tree: &mut DocumentTree) -> Result<&Mutation, HistoryError> {
        let mutation = self.undo_stack.pop().ok_or(HistoryError::EmptyHistory("undo"))?;

        if let Err(err) = mutation.revert(tree) {
            self.undo_stack.push(mutation);
            return Err(err.into());
        }

        debug!(mutation = mutation.name(), "undid edit");
        self.redo_stack.push(mutation);
        Ok(&self.redo_stack[self.redo_stack.len() - 1])
    }

    /// Re-apply the most recently undone edit.
    ///
    /// If re-applying fails the record stays on the redo stack.
    pub fn redo(&mut self, tree: &mut DocumentTree) -> Result<&Mutation, HistoryError> {
        let mutation = self.redo_stack.pop().ok_or(HistoryError::EmptyHistory("redo"))?;

        if let Err(err) = mutation.apply(tree) {
            self.redo_stack.push(mutation);
            return Err(err.into());
        }

        debug!(mutation = mutation.name(), "redid edit");
        self.undo_stack.push(mutation);
        Ok(&self.undo_stack[self.undo_stack.len() - 1])
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Label of the edit the next undo would revert
    pub fn undo_label(&self) -> Option<String> {
        self.undo_stack.last().map(Mutation::label)
    }

    /// Label of the edit the next redo would re-apply
    pub fn redo_label(&self) -> Option<String> {
        self.redo_stack.last().map(Mutation::label)
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new()
    }
}
