//! # htmled Editor
//!
//! Core editing engine for htmled.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ parser: markup text ⇄ Element               │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor                                      │
//! │  - DocumentTree: node arena + id index      │
//! │  - Mutation: invertible edit records        │
//! │  - CommandHistory: linear undo/redo         │
//! │  - Document / DocumentManager: open files   │
//! │  - render / spellcheck: read-only views     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ cli: interactive shell                      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Ids are the address**: every edit names its targets by element id
//! 2. **All or nothing**: a failed edit leaves the tree exactly as it was
//! 3. **Record on success**: only applied edits enter the history
//! 4. **Explicit context**: the active document is owned by
//!    [`DocumentManager`] and passed to whoever needs it
//!
//! ## Usage
//!
//! ```rust,ignore
//! use htmled_editor::{Document, DocumentManager};
//!
//! let mut manager = DocumentManager::new();
//! manager.open(Document::new_empty("index.html"))?;
//!
//! let doc = manager.active_mut()?;
//! doc.append_child("div", "main", "body", None)?;
//! doc.insert_before("p", "para1", "main", Some("Hello"))?;
//! doc.undo()?;
//!
//! println!("{}", doc.render_tree(None));
//! doc.save(None)?;
//! ```

mod document;
mod errors;
mod history;
mod manager;
mod mutations;
mod node;
mod render;
mod session;
mod spellcheck;
mod tree;

pub use document::{Document, DocumentOptions};
pub use errors::EditorError;
pub use history::{CommandHistory, HistoryError};
pub use manager::DocumentManager;
pub use mutations::{Mutation, MutationError, Placement};
pub use node::{Node, NodeKey};
pub use render::{indent_view, tree_view, DocumentView, TreeSource};
pub use session::{SessionFile, SessionState};
pub use spellcheck::{check_spelling, Lexicon, Misspelling, SpellReport, TextFragment};
pub use tree::DocumentTree;

// Re-export common types for convenience
pub use htmled_parser::Element;
