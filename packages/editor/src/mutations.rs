//! # Mutations
//!
//! Recorded, invertible descriptions of successful tree edits.
//!
//! ## Design Principles
//!
//! 1. **Self-contained**: Each record carries everything needed to replay it
//!    in either direction, so undo never re-queries a tree that may have
//!    changed since the record was made.
//! 2. **Closed set**: Four variants cover every edit the tree supports.
//! 3. **Validated**: Replaying a record goes through the same checks as the
//!    original edit; a failed replay leaves the tree untouched.
//!
//! ## Inverses
//!
//! | Forward | Inverse |
//! |---|---|
//! | `InsertNode` (subtree S at index I under P) | `DeleteSubtree` of the same S, I, P |
//! | `DeleteSubtree` | `InsertNode` of the same S, I, P |
//! | `RenameId` old → new | `RenameId` new → old |
//! | `SetText` old → new | `SetText` new → old |

use crate::tree::DocumentTree;
use htmled_parser::Element;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MutationError {
    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    #[error("Unknown id: {0}")]
    UnknownId(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl MutationError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidOperation(message.into())
    }
}

/// Where a subtree sits (or sat) in the tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Id of the parent element
    pub parent_id: String,

    /// Position among the parent's children
    pub index: usize,

    /// Full copy of the subtree
    pub subtree: Element,
}

/// A recorded edit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mutation {
    /// A subtree was attached (insert-before or append-child)
    InsertNode(Placement),

    /// A subtree was removed
    DeleteSubtree(Placement),

    /// An element id was changed
    RenameId { old_id: String, new_id: String },

    /// An element's text was replaced
    SetText {
        node_id: String,
        old_text: Option<String>,
        new_text: Option<String>,
    },
}

impl Mutation {
    /// Re-apply the forward effect of this record
    pub fn apply(&self, tree: &mut DocumentTree) -> Result<(), MutationError> {
        match self {
            Mutation::InsertNode(placement) => {
                tree.attach(&placement.parent_id, placement.index, &placement.subtree)
            }

            Mutation::DeleteSubtree(placement) => {
                let current = tree.placement_of(&placement.subtree.id)?;
                if current.parent_id != placement.parent_id || current.index != placement.index {
                    return Err(MutationError::invalid(format!(
                        "'{}' is no longer at {}[{}]",
                        placement.subtree.id, placement.parent_id, placement.index
                    )));
                }
                tree.detach(&placement.subtree.id).map(|_| ())
            }

            Mutation::RenameId { old_id, new_id } => tree.rename_id(old_id, new_id),

            Mutation::SetText { node_id, new_text, .. } => {
                tree.set_text(node_id, new_text.as_deref()).map(|_| ())
            }
        }
    }

    /// Undo the effect of this record
    pub fn revert(&self, tree: &mut DocumentTree) -> Result<(), MutationError> {
        self.to_inverse().apply(tree)
    }

    /// Create the inverse record
    pub fn to_inverse(&self) -> Mutation {
        match self {
            Mutation::InsertNode(placement) => Mutation::DeleteSubtree(placement.clone()),
            Mutation::DeleteSubtree(placement) => Mutation::InsertNode(placement.clone()),
            Mutation::RenameId { old_id, new_id } => Mutation::RenameId {
                old_id: new_id.clone(),
                new_id: old_id.clone(),
            },
            Mutation::SetText {
                node_id,
                old_text,
                new_text,
            } => Mutation::SetText {
                node_id: node_id.clone(),
                old_text: new_text.clone(),
                new_text: old_text.clone(),
            },
        }
    }

    /// Short human-readable description, e.g. for "undid ..." messages
    pub fn label(&self) -> String {
        match self {
            Mutation::InsertNode(placement) => format!(
                "insert <{}> '{}' into '{}'",
                placement.subtree.tag, placement.subtree.id, placement.parent_id
            ),
            Mutation::DeleteSubtree(placement) => format!(
                "delete <{}> '{}'",
                placement.subtree.tag, placement.subtree.id
            ),
            Mutation::RenameId { old_id, new_id } => format!("rename '{}' to '{}'", old_id, new_id),
            Mutation::SetText { node_id, .. } => format!("edit text of '{}'", node_id),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mutation::InsertNode(_) => "InsertNode",
            Mutation::DeleteSubtree(_) => "DeleteSubtree",
            Mutation::RenameId { .. } => "RenameId",
            Mutation::SetText { .. } => "SetText",
        }
    }
}
