//! # Document Handle
//!
//! A Document is one open markup file and its editing state: the element
//! tree, the undo/redo history and a few display settings.
//!
//! ## Lifecycle
//!
//! ```text
//! Load → Parse → Edit → Serialize → Save
//!   ↓      ↓       ↓        ↓         ↓
//! File  Element  Mutations Markup    File
//! ```
//!
//! Every edit entry point applies the change to the tree and, only on
//! success, records it in the history.

use crate::history::CommandHistory;
use crate::mutations::Mutation;
use crate::tree::DocumentTree;
use crate::EditorError;
use htmled_parser::{parse, serialize_with_indent};
use std::path::{Path, PathBuf};
use tracing::info;

/// Per-document settings, usually taken from the user's configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentOptions {
    /// Spaces per level when serializing
    pub indent: usize,

    /// Show `#id` in tree views
    pub show_id: bool,

    /// Maximum undo levels (0 = unlimited)
    pub history_limit: usize,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            show_id: true,
            history_limit: 100,
        }
    }
}

/// Editable markup document
#[derive(Debug)]
pub struct Document {
    /// Path the document was loaded from or will be saved to
    pub path: PathBuf,

    /// Show `#id` in tree views
    pub show_id: bool,

    indent: usize,
    tree: DocumentTree,
    history: CommandHistory,
}

impl Document {
    /// Create a document holding the empty skeleton. Nothing is written
    /// until [`Document::save`].
    pub fn new_empty(path: impl Into<PathBuf>) -> Self {
        Self::from_tree(path.into(), DocumentTree::new())
    }

    /// Create a document from markup text
    pub fn from_source(path: impl Into<PathBuf>, source: &str) -> Result<Self, EditorError> {
        let root = parse(source)?;
        let tree = DocumentTree::from_element(&root)?;
        Ok(Self::from_tree(path.into(), tree))
    }

    /// Load a document from disk
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, EditorError> {
        let path = path.into();
        let source = std::fs::read_to_string(&path)?;
        let doc = Self::from_source(path, &source)?;
        info!(path = %doc.path.display(), nodes = doc.tree.len(), "loaded document");
        Ok(doc)
    }

    fn from_tree(path: PathBuf, tree: DocumentTree) -> Self {
        let defaults = DocumentOptions::default();
        Self {
            path,
            show_id: defaults.show_id,
            indent: defaults.indent,
            tree,
            history: CommandHistory::with_max_levels(defaults.history_limit),
        }
    }

    /// Apply settings. Replaces the history, so call before editing.
    pub fn with_options(mut self, options: &DocumentOptions) -> Self {
        self.indent = options.indent;
        self.show_id = options.show_id;
        self.history = CommandHistory::with_max_levels(options.history_limit);
        self
    }

    /// Display name: the path as given
    pub fn name(&self) -> String {
        self.path.display().to_string()
    }

    pub fn tree(&self) -> &DocumentTree {
        &self.tree
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn indent(&self) -> usize {
        self.indent
    }

    /// Check if document has unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.tree.is_dirty()
    }

    /// Current markup
    pub fn source(&self) -> String {
        self.source_with_indent(self.indent)
    }

    pub fn source_with_indent(&self, indent: usize) -> String {
        serialize_with_indent(&self.tree.to_element(), indent)
    }

    /// Write the document to `path`, or to its own path when `None`.
    ///
    /// On success the document adopts the path written to and is no longer
    /// dirty.
    pub fn save(&mut self, path: Option<&Path>) -> Result<PathBuf, EditorError> {
        let target = path.map(Path::to_path_buf).unwrap_or_else(|| self.path.clone());
        std::fs::write(&target, self.source())?;

        self.path = target.clone();
        self.tree.mark_clean();
        info!(path = %target.display(), "saved document");
        Ok(target)
    }

    // ---- Edits ----

    pub fn insert_before(
        &mut self,
        tag: &str,
        new_id: &str,
        target_id: &str,
        text: Option<&str>,
    ) -> Result<(), EditorError> {
        let placement = self.tree.insert_before(tag, new_id, target_id, text)?;
        self.commit(Mutation::InsertNode(placement));
        Ok(())
    }

    pub fn append_child(
        &mut self,
        tag: &str,
        new_id: &str,
        parent_id: &str,
        text: Option<&str>,
    ) -> Result<(), EditorError> {
        let placement = self.tree.append_child(tag, new_id, parent_id, text)?;
        self.commit(Mutation::InsertNode(placement));
        Ok(())
    }

    pub fn delete(&mut self, id: &str) -> Result<(), EditorError> {
        let placement = self.tree.delete(id)?;
        self.commit(Mutation::DeleteSubtree(placement));
        Ok(())
    }

    pub fn rename_id(&mut self, old_id: &str, new_id: &str) -> Result<(), EditorError> {
        self.tree.rename_id(old_id, new_id)?;
        self.commit(Mutation::RenameId {
            old_id: old_id.to_string(),
            new_id: new_id.to_string(),
        });
        Ok(())
    }

    pub fn set_text(&mut self, id: &str, text: Option<&str>) -> Result<(), EditorError> {
        let old_text = self.tree.set_text(id, text)?;
        let new_text = self.tree.get(id).and_then(|node| node.text()).map(str::to_string);
        self.commit(Mutation::SetText {
            node_id: id.to_string(),
            old_text,
            new_text,
        });
        Ok(())
    }

    /// Revert the most recent edit, returning its label
    pub fn undo(&mut self) -> Result<String, EditorError> {
        Ok(self.history.undo(&mut self.tree)?.label())
    }

    /// Re-apply the most recently undone edit, returning its label
    pub fn redo(&mut self) -> Result<String, EditorError> {
        Ok(self.history.redo(&mut self.tree)?.label())
    }

    fn commit(&mut self, mutation: Mutation) {
        self.history.record(mutation);
    }
}
