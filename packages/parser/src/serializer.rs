use crate::ast::{is_skeleton_tag, is_void_tag, Element};
use crate::entities::{escape_attribute, escape_text};

/// Serializer converts an element tree back to markup
///
/// Output is one element per line, children indented one level deeper than
/// their parent. Only tag, id, text and child order are written, so
/// `parse(serialize(e)) == e` for any tree the parser can produce.
pub struct Serializer {
    indent_level: usize,
    indent_string: String,
}

impl Serializer {
    pub fn new() -> Self {
        Self::with_indent(2)
    }

    pub fn with_indent(width: usize) -> Self {
        Self {
            indent_level: 0,
            indent_string: " ".repeat(width),
        }
    }

    pub fn serialize(&mut self, element: &Element) -> String {
        let mut output = String::new();
        self.serialize_element(element, &mut output);
        output
    }

    fn serialize_element(&mut self, element: &Element, output: &mut String) {
        self.write_indent(output);
        self.write_open_tag(element, output);

        if is_void_tag(&element.tag) && element.text.is_none() && element.children.is_empty() {
            output.push('\n');
            return;
        }

        if let Some(text) = &element.text {
            output.push_str(&escape_text(text));
        }

        if !element.children.is_empty() {
            output.push('\n');
            self.indent_level += 1;
            for child in &element.children {
                self.serialize_element(child, output);
            }
            self.indent_level -= 1;
            self.write_indent(output);
        }

        output.push_str("</");
        output.push_str(&element.tag);
        output.push_str(">\n");
    }

    fn write_open_tag(&self, element: &Element, output: &mut String) {
        output.push('<');
        output.push_str(&element.tag);
        // Skeleton elements default to their tag as id when loaded.
        if !(is_skeleton_tag(&element.tag) && element.id == element.tag) {
            output.push_str(" id=\"");
            output.push_str(&escape_attribute(&element.id));
            output.push('"');
        }
        output.push('>');
    }

    fn write_indent(&self, output: &mut String) {
        for _ in 0..self.indent_level {
            output.push_str(&self.indent_string);
        }
    }
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialize with the default two-space indent
pub fn serialize(element: &Element) -> String {
    Serializer::new().serialize(element)
}

pub fn serialize_with_indent(element: &Element, width: usize) -> String {
    Serializer::with_indent(width).serialize(element)
}
