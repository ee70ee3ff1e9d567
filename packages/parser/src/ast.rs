use serde::{Deserialize, Serialize};

/// Tags that make up the minimal document skeleton.
pub const SKELETON_TAGS: [&str; 4] = ["html", "head", "title", "body"];

/// Elements that never have children or a closing tag.
pub const VOID_TAGS: [&str; 13] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

pub fn is_skeleton_tag(tag: &str) -> bool {
    SKELETON_TAGS.contains(&tag)
}

pub fn is_void_tag(tag: &str) -> bool {
    VOID_TAGS.contains(&tag)
}

/// Whether `tag` lexes as a single tag name: a letter, `_` or `:` followed
/// by letters, digits, `_`, `:`, `.` or `-`.
pub fn is_valid_tag_name(tag: &str) -> bool {
    let mut chars = tag.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | ':' | '.' | '-'))
}

/// Owned element tree.
///
/// This is the interchange shape between markup text and the editor: the
/// parser produces it, the serializer consumes it, and the editor uses it to
/// carry detached subtrees around (e.g. for undo of a delete).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub tag: String,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            id: id.into(),
            text: None,
            children: Vec::new(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.text = if text.is_empty() { None } else { Some(text) };
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// `html > [head > [title], body]`, every id equal to its tag.
    pub fn empty_document() -> Self {
        Element::new("html", "html")
            .with_child(Element::new("head", "head").with_child(Element::new("title", "title")))
            .with_child(Element::new("body", "body"))
    }

    /// Depth-first, pre-order walk over this element and its descendants.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Element)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    /// Ids of this element and all descendants, in pre-order.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        self.walk(&mut |el| ids.push(el.id.as_str()));
        ids
    }

    pub fn find(&self, id: &str) -> Option<&Element> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// First element with `tag` in pre-order, including `self`
    pub fn find_tag(&self, tag: &str) -> Option<&Element> {
        if self.tag == tag {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find_tag(tag))
    }

    pub fn child(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.tag == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_shape() {
        let doc = Element::empty_document();
        assert_eq!(doc.ids(), vec!["html", "head", "title", "body"]);
        assert_eq!(doc.child("head").unwrap().children[0].tag, "title");
        assert!(doc.child("body").unwrap().children.is_empty());
    }

    #[test]
    fn test_with_text_drops_empty() {
        let el = Element::new("p", "p1").with_text("");
        assert_eq!(el.text, None);
    }

    #[test]
    fn test_tag_name_grammar() {
        for tag in ["div", "x-widget", "svg:rect", "_private", "h1", "a.b"] {
            assert!(is_valid_tag_name(tag), "{}", tag);
        }
        for tag in ["", "1st", "a/b", "x>y", "-x", "a b", "caf\u{e9}"] {
            assert!(!is_valid_tag_name(tag), "{}", tag);
        }
    }

    #[test]
    fn test_find_nested() {
        let doc = Element::empty_document();
        assert_eq!(doc.find("title").map(|e| e.tag.as_str()), Some("title"));
        assert!(doc.find("missing").is_none());
    }
}
