//! Arena node storage

/// Stable handle of a node inside one [`DocumentTree`](crate::DocumentTree).
///
/// Handles are never reused within a tree, so a handle held past the removal
/// of its node simply stops resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey(u64);

impl NodeKey {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// A single element of the tree.
///
/// Parent and children are handles into the owning tree's node table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub(crate) id: String,
    pub(crate) tag: String,
    pub(crate) text: Option<String>,
    pub(crate) parent: Option<NodeKey>,
    pub(crate) children: Vec<NodeKey>,
}

impl Node {
    pub(crate) fn new(tag: String, id: String, text: Option<String>) -> Self {
        Self {
            id,
            tag,
            text,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
