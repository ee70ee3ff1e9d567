//! # Rendering
//!
//! Text views of anything tree-shaped. A [`TreeSource`] describes the
//! shape; [`tree_view`] and [`indent_view`] turn it into text. Both are pure
//! functions of the source, so rendering the same state twice gives the same
//! bytes.
//!
//! ```text
//! html                    html
//! ├── head                  head
//! │   └── title               title
//! └── body                  body
//!     └── div#main            div#main
//! ```

use crate::document::Document;
use crate::node::NodeKey;
use crate::tree::DocumentTree;
use std::collections::HashSet;

/// Read-only view of a tree for rendering
pub trait TreeSource {
    type Key: Copy;

    fn root(&self) -> Self::Key;

    fn children(&self, key: Self::Key) -> Vec<Self::Key>;

    /// One-line description of a node
    fn label(&self, key: Self::Key) -> String;

    /// Extra leaf shown before the node's children
    fn leaf(&self, _key: Self::Key) -> Option<String> {
        None
    }
}

enum Entry<K> {
    Leaf(String),
    Node(K),
}

fn entries<S: TreeSource>(source: &S, key: S::Key) -> Vec<Entry<S::Key>> {
    let mut entries: Vec<_> = source.leaf(key).map(Entry::Leaf).into_iter().collect();
    entries.extend(source.children(key).into_iter().map(Entry::Node));
    entries
}

/// Render with box-drawing branches
pub fn tree_view<S: TreeSource>(source: &S) -> String {
    let root = source.root();
    let mut out = source.label(root);
    out.push('\n');
    write_branches(source, root, "", &mut out);
    out
}

fn write_branches<S: TreeSource>(source: &S, key: S::Key, prefix: &str, out: &mut String) {
    let entries = entries(source, key);
    let count = entries.len();

    for (i, entry) in entries.into_iter().enumerate() {
        let last = i + 1 == count;
        out.push_str(prefix);
        out.push_str(if last { "└── " } else { "├── " });

        match entry {
            Entry::Leaf(text) => {
                out.push_str(&text);
                out.push('\n');
            }
            Entry::Node(child) => {
                out.push_str(&source.label(child));
                out.push('\n');
                let next = format!("{}{}", prefix, if last { "    " } else { "│   " });
                write_branches(source, child, &next, out);
            }
        }
    }
}

/// Render with `indent` spaces per depth level, root at depth 0
pub fn indent_view<S: TreeSource>(source: &S, indent: usize) -> String {
    let mut out = String::new();
    write_indented(source, source.root(), 0, indent, &mut out);
    out
}

fn write_indented<S: TreeSource>(
    source: &S,
    key: S::Key,
    depth: usize,
    indent: usize,
    out: &mut String,
) {
    out.push_str(&" ".repeat(depth * indent));
    out.push_str(&source.label(key));
    out.push('\n');

    for entry in entries(source, key) {
        match entry {
            Entry::Leaf(text) => {
                out.push_str(&" ".repeat((depth + 1) * indent));
                out.push_str(&text);
                out.push('\n');
            }
            Entry::Node(child) => write_indented(source, child, depth + 1, indent, out),
        }
    }
}

/// A document tree as seen by the renderer
pub struct DocumentView<'a> {
    tree: &'a DocumentTree,
    show_id: bool,
    flagged: Option<&'a HashSet<String>>,
}

impl<'a> DocumentView<'a> {
    pub fn new(tree: &'a DocumentTree, show_id: bool) -> Self {
        Self {
            tree,
            show_id,
            flagged: None,
        }
    }

    /// Mark nodes whose ids are in `flagged` with `[X] `
    pub fn with_flagged(mut self, flagged: &'a HashSet<String>) -> Self {
        self.flagged = Some(flagged);
        self
    }
}

impl TreeSource for DocumentView<'_> {
    type Key = NodeKey;

    fn root(&self) -> NodeKey {
        self.tree.root()
    }

    fn children(&self, key: NodeKey) -> Vec<NodeKey> {
        self.tree
            .node(key)
            .map(|node| node.children().to_vec())
            .unwrap_or_default()
    }

    fn label(&self, key: NodeKey) -> String {
        let Some(node) = self.tree.node(key) else {
            return String::new();
        };

        let mut label = String::new();
        if self.flagged.is_some_and(|ids| ids.contains(node.id())) {
            label.push_str("[X] ");
        }
        label.push_str(node.tag());
        if self.show_id && node.id() != node.tag() {
            label.push('#');
            label.push_str(node.id());
        }
        label
    }

    fn leaf(&self, key: NodeKey) -> Option<String> {
        self.tree
            .node(key)
            .and_then(|node| node.text())
            .map(str::to_string)
    }
}

impl Document {
    /// Tree view, marking nodes in `flagged` (e.g. spelling issues)
    pub fn render_tree(&self, flagged: Option<&HashSet<String>>) -> String {
        let view = DocumentView::new(self.tree(), self.show_id);
        match flagged {
            Some(ids) => tree_view(&view.with_flagged(ids)),
            None => tree_view(&view),
        }
    }

    /// Indent view: the serialized markup at `indent` spaces per level
    pub fn render_indent(&self, indent: Option<usize>) -> String {
        self.source_with_indent(indent.unwrap_or(self.indent()))
    }
}
