//! # Document Tree
//!
//! Arena-backed element tree with an id index.
//!
//! Nodes live in a table keyed by [`NodeKey`]; parent and child links are
//! keys, never references. A second table maps each element id to its key,
//! so every lookup by id is a hash probe. The two tables are kept in step by
//! [`DocumentTree::attach`] and [`DocumentTree::detach`], which every edit
//! goes through.
//!
//! ## Invariants
//!
//! - Ids are unique and non-empty across the whole tree.
//! - The id index holds exactly the ids of the nodes in the table.
//! - The root has no parent; every other node appears exactly once in its
//!   parent's child list.
//! - A failed edit leaves the tree unchanged.
//! - Void elements (`img`, `br`, ...) have no children and no text.

use crate::mutations::{MutationError, Placement};
use crate::node::{Node, NodeKey};
use htmled_parser::{is_valid_tag_name, is_void_tag, Element};
use std::collections::{HashMap, HashSet};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct DocumentTree {
    nodes: HashMap<NodeKey, Node>,
    index: HashMap<String, NodeKey>,
    root: NodeKey,
    next_key: u64,
    dirty: bool,
}

impl DocumentTree {
    /// Create the minimal skeleton `html > [head > [title], body]`
    pub fn new() -> Self {
        Self::build_unchecked(&Element::empty_document())
    }

    /// Build a tree from an owned element.
    ///
    /// Fails if any id is empty or appears twice.
    pub fn from_element(root: &Element) -> Result<Self, MutationError> {
        validate_subtree(root, |_| false)?;
        Ok(Self::build_unchecked(root))
    }

    fn build_unchecked(root: &Element) -> Self {
        let mut tree = Self {
            nodes: HashMap::new(),
            index: HashMap::new(),
            root: NodeKey::new(0),
            next_key: 0,
            dirty: false,
        };
        tree.root = tree.build(root, None);
        tree
    }

    /// Snapshot the whole tree as an owned element
    pub fn to_element(&self) -> Element {
        self.snapshot(self.root)
    }

    /// Snapshot the subtree rooted at `id`
    pub fn subtree(&self, id: &str) -> Option<Element> {
        self.key_of(id).map(|key| self.snapshot(key))
    }

    fn snapshot(&self, key: NodeKey) -> Element {
        let node = &self.nodes[&key];
        Element {
            tag: node.tag.clone(),
            id: node.id.clone(),
            text: node.text.clone(),
            children: node.children.iter().map(|child| self.snapshot(*child)).collect(),
        }
    }

    pub fn root(&self) -> NodeKey {
        self.root
    }

    pub fn root_node(&self) -> &Node {
        &self.nodes[&self.root]
    }

    pub fn node(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(&key)
    }

    /// Resolve an element id to its handle
    pub fn key_of(&self, id: &str) -> Option<NodeKey> {
        self.index.get(id).copied()
    }

    /// Look up a node by element id
    pub fn get(&self, id: &str) -> Option<&Node> {
        self.key_of(id).and_then(|key| self.nodes.get(&key))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn parent_of(&self, id: &str) -> Option<&Node> {
        self.get(id)
            .and_then(|node| node.parent)
            .and_then(|parent| self.nodes.get(&parent))
    }

    /// Ids of `id`'s children, in order
    pub fn child_ids(&self, id: &str) -> Option<Vec<&str>> {
        let node = self.get(id)?;
        Some(
            node.children
                .iter()
                .map(|child| self.nodes[child].id.as_str())
                .collect(),
        )
    }

    /// Handles in depth-first pre-order, paired with their depth
    pub fn traverse(&self) -> Vec<(NodeKey, usize)> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![(self.root, 0)];
        while let Some((key, depth)) = stack.pop() {
            out.push((key, depth));
            for child in self.nodes[&key].children.iter().rev() {
                stack.push((*child, depth + 1));
            }
        }
        out
    }

    /// All element ids in pre-order
    pub fn ids(&self) -> Vec<&str> {
        self.traverse()
            .into_iter()
            .map(|(key, _)| self.nodes[&key].id.as_str())
            .collect()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Whether `key` is part of the required skeleton: the root, its
    /// `head` and `body` children, and the `title` inside that `head`.
    pub fn is_protected(&self, key: NodeKey) -> bool {
        if key == self.root {
            return true;
        }
        let Some(node) = self.nodes.get(&key) else {
            return false;
        };
        let Some(parent_key) = node.parent else {
            return false;
        };
        match node.tag.as_str() {
            "head" | "body" => parent_key == self.root,
            "title" => self
                .nodes
                .get(&parent_key)
                .map(|parent| parent.tag == "head" && parent.parent == Some(self.root))
                .unwrap_or(false),
            _ => false,
        }
    }

    /// Current placement of `id`: parent, index and a subtree snapshot
    pub fn placement_of(&self, id: &str) -> Result<Placement, MutationError> {
        let key = self.require(id)?;
        let node = &self.nodes[&key];
        let parent_key = node
            .parent
            .ok_or_else(|| MutationError::invalid("the root element has no placement"))?;
        let parent = &self.nodes[&parent_key];
        let index = parent
            .children
            .iter()
            .position(|child| *child == key)
            .unwrap_or(parent.children.len());

        Ok(Placement {
            parent_id: parent.id.clone(),
            index,
            subtree: self.snapshot(key),
        })
    }

    // ---- Edits ----

    /// Insert a new element as the immediate previous sibling of `target_id`
    pub fn insert_before(
        &mut self,
        tag: &str,
        new_id: &str,
        target_id: &str,
        text: Option<&str>,
    ) -> Result<Placement, MutationError> {
        let element = new_element(tag, new_id, text)?;
        let target = self.require(target_id)?;
        if self.contains(new_id) {
            return Err(MutationError::DuplicateId(new_id.to_string()));
        }
        let Some(parent_key) = self.nodes[&target].parent else {
            return Err(MutationError::invalid(format!(
                "cannot insert before the root element '{}'",
                target_id
            )));
        };

        let parent = &self.nodes[&parent_key];
        let parent_id = parent.id.clone();
        let index = parent
            .children
            .iter()
            .position(|child| *child == target)
            .unwrap_or(0);

        self.attach(&parent_id, index, &element)?;
        debug!(tag = %element.tag, id = %element.id, before = %target_id, "inserted element");

        Ok(Placement {
            parent_id,
            index,
            subtree: element,
        })
    }

    /// Insert a new element as the last child of `parent_id`
    pub fn append_child(
        &mut self,
        tag: &str,
        new_id: &str,
        parent_id: &str,
        text: Option<&str>,
    ) -> Result<Placement, MutationError> {
        let element = new_element(tag, new_id, text)?;
        let parent = self.require(parent_id)?;
        if self.contains(new_id) {
            return Err(MutationError::DuplicateId(new_id.to_string()));
        }

        let index = self.nodes[&parent].children.len();
        self.attach(parent_id, index, &element)?;
        debug!(tag = %element.tag, id = %element.id, parent = %parent_id, "appended element");

        Ok(Placement {
            parent_id: parent_id.to_string(),
            index,
            subtree: element,
        })
    }

    /// Remove `id` and all its descendants
    pub fn delete(&mut self, id: &str) -> Result<Placement, MutationError> {
        let key = self.require(id)?;
        if self.is_protected(key) {
            return Err(MutationError::invalid(format!(
                "'{}' is a required <{}> element and cannot be deleted",
                id, self.nodes[&key].tag
            )));
        }

        let placement = self.detach(id)?;
        debug!(id = %id, parent = %placement.parent_id, index = placement.index, "deleted subtree");
        Ok(placement)
    }

    /// Change an element's id. Renaming to the same id is a no-op that
    /// still succeeds.
    pub fn rename_id(&mut self, old_id: &str, new_id: &str) -> Result<(), MutationError> {
        if new_id.is_empty() {
            return Err(MutationError::invalid("id must not be empty"));
        }
        let key = self.require(old_id)?;
        if old_id == new_id {
            self.dirty = true;
            return Ok(());
        }
        if self.contains(new_id) {
            return Err(MutationError::DuplicateId(new_id.to_string()));
        }

        self.index.remove(old_id);
        self.index.insert(new_id.to_string(), key);
        if let Some(node) = self.nodes.get_mut(&key) {
            node.id = new_id.to_string();
        }
        self.dirty = true;

        debug!(old_id = %old_id, new_id = %new_id, "renamed element");
        Ok(())
    }

    /// Replace an element's text, returning the previous text.
    ///
    /// `None` or an empty string clears the text.
    pub fn set_text(
        &mut self,
        id: &str,
        text: Option<&str>,
    ) -> Result<Option<String>, MutationError> {
        let key = self.require(id)?;
        let text = normalize_text(text);
        let node = self
            .nodes
            .get_mut(&key)
            .ok_or_else(|| MutationError::UnknownId(id.to_string()))?;
        if text.is_some() && is_void_tag(&node.tag) {
            return Err(MutationError::invalid(format!(
                "<{}> '{}' cannot hold text",
                node.tag, id
            )));
        }
        let previous = std::mem::replace(&mut node.text, text);
        self.dirty = true;

        debug!(id = %id, "set element text");
        Ok(previous)
    }

    // ---- Structural primitives ----

    /// Attach a copy of `subtree` under `parent_id` at `index`.
    ///
    /// Every id in the subtree is checked before anything is inserted.
    pub(crate) fn attach(
        &mut self,
        parent_id: &str,
        index: usize,
        subtree: &Element,
    ) -> Result<(), MutationError> {
        let parent = self.require(parent_id)?;
        let parent_tag = &self.nodes[&parent].tag;
        if is_void_tag(parent_tag) {
            return Err(MutationError::invalid(format!(
                "<{}> '{}' cannot have children",
                parent_tag, parent_id
            )));
        }
        let len = self.nodes[&parent].children.len();
        if index > len {
            return Err(MutationError::invalid(format!(
                "index {} is out of range for '{}' with {} children",
                index, parent_id, len
            )));
        }
        validate_subtree(subtree, |id| self.index.contains_key(id))?;

        let key = self.build(subtree, Some(parent));
        if let Some(parent) = self.nodes.get_mut(&parent) {
            parent.children.insert(index, key);
        }
        self.dirty = true;
        Ok(())
    }

    /// Remove the subtree rooted at `id`, returning where it was.
    ///
    /// No skeleton check is made here; undo and redo may need to remove
    /// any previously attached subtree.
    pub(crate) fn detach(&mut self, id: &str) -> Result<Placement, MutationError> {
        let placement = self.placement_of(id)?;
        let key = self.require(id)?;

        if let Some(parent_key) = self.nodes[&key].parent {
            if let Some(parent) = self.nodes.get_mut(&parent_key) {
                parent.children.retain(|child| *child != key);
            }
        }

        let mut stack = vec![key];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                self.index.remove(&node.id);
                stack.extend(node.children);
            }
        }

        self.dirty = true;
        Ok(placement)
    }

    fn build(&mut self, element: &Element, parent: Option<NodeKey>) -> NodeKey {
        let key = NodeKey::new(self.next_key);
        self.next_key += 1;

        let mut node = Node::new(element.tag.clone(), element.id.clone(), element.text.clone());
        node.parent = parent;
        self.index.insert(element.id.clone(), key);
        self.nodes.insert(key, node);

        let children: Vec<NodeKey> = element
            .children
            .iter()
            .map(|child| self.build(child, Some(key)))
            .collect();
        if let Some(node) = self.nodes.get_mut(&key) {
            node.children = children;
        }
        key
    }

    fn require(&self, id: &str) -> Result<NodeKey, MutationError> {
        self.key_of(id)
            .ok_or_else(|| MutationError::UnknownId(id.to_string()))
    }

    /// Check that the id index and the node table agree, and that parent
    /// and child links are symmetric.
    pub fn check_consistency(&self) -> Result<(), String> {
        if self.index.len() != self.nodes.len() {
            return Err(format!(
                "index has {} ids but the table has {} nodes",
                self.index.len(),
                self.nodes.len()
            ));
        }
        for (id, key) in &self.index {
            match self.nodes.get(key) {
                Some(node) if &node.id == id => {}
                Some(node) => return Err(format!("index maps '{}' to node '{}'", id, node.id)),
                None => return Err(format!("index maps '{}' to a missing node", id)),
            }
        }
        for (key, node) in &self.nodes {
            match node.parent {
                None if *key != self.root => return Err(format!("'{}' has no parent", node.id)),
                Some(parent) => {
                    let count = self
                        .nodes
                        .get(&parent)
                        .map(|p| p.children.iter().filter(|c| *c == key).count())
                        .unwrap_or(0);
                    if count != 1 {
                        return Err(format!(
                            "'{}' appears {} times under its parent",
                            node.id, count
                        ));
                    }
                }
                None => {}
            }
        }
        if self.traverse().len() != self.nodes.len() {
            return Err("unreachable nodes in the table".to_string());
        }
        Ok(())
    }
}

impl Default for DocumentTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Trees are equal when their element structure is equal; node handles and
/// the dirty flag are ignored.
impl PartialEq for DocumentTree {
    fn eq(&self, other: &Self) -> bool {
        self.to_element() == other.to_element()
    }
}

impl Eq for DocumentTree {}

fn new_element(tag: &str, id: &str, text: Option<&str>) -> Result<Element, MutationError> {
    let tag = tag.trim().to_ascii_lowercase();
    if !is_valid_tag_name(&tag) {
        return Err(MutationError::invalid(format!("invalid tag name '{}'", tag)));
    }
    if id.is_empty() {
        return Err(MutationError::invalid("id must not be empty"));
    }

    let text = normalize_text(text);
    if text.is_some() && is_void_tag(&tag) {
        return Err(MutationError::invalid(format!("<{}> cannot hold text", tag)));
    }

    let mut element = Element::new(tag, id);
    element.text = text;
    Ok(element)
}

fn normalize_text(text: Option<&str>) -> Option<String> {
    text.filter(|t| !t.is_empty()).map(str::to_string)
}

/// Check that every id in `root` is non-empty, unique within the subtree,
/// and not rejected by `taken`.
fn validate_subtree(root: &Element, taken: impl Fn(&str) -> bool) -> Result<(), MutationError> {
    let mut seen = HashSet::new();
    let mut result = Ok(());
    root.walk(&mut |el| {
        if result.is_err() {
            return;
        }
        if el.id.is_empty() {
            result = Err(MutationError::invalid(format!("<{}> has an empty id", el.tag)));
        } else if !seen.insert(el.id.as_str()) || taken(&el.id) {
            result = Err(MutationError::DuplicateId(el.id.clone()));
        }
    });
    result
}
