//! HTML serialization for [`Document`].
//!
//! Walks the tree and emits HTML without any reformatting: no indentation is
//! inserted and no whitespace is collapsed, so `<pre>` blocks survive a
//! round trip. Text inside `<script>` and `<style>` is emitted raw.

use std::fmt::Write;

use super::{Document, NodeData, NodeId};

/// Void elements are serialized without a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose text content is emitted without escaping.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

impl Document {
    /// Serialize the whole document to an HTML string.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for child in self.children(self.document()) {
            self.write_node(child, false, &mut out);
        }
        out
    }

    /// Serialize a single subtree to an HTML string.
    pub fn node_to_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, false, &mut out);
        out
    }

    fn write_node(&self, id: NodeId, raw_text: bool, out: &mut String) {
        let Some(node) = self.get(id) else {
            return;
        };

        match &node.data {
            NodeData::Document => {
                for child in self.children(id) {
                    self.write_node(child, false, out);
                }
            }
            NodeData::Doctype { name } => {
                let _ = writeln!(out, "<!DOCTYPE {name}>");
            }
            NodeData::Comment(text) => {
                let _ = write!(out, "<!--{text}-->");
            }
            NodeData::Text(text) => {
                if raw_text {
                    out.push_str(text);
                } else {
                    out.push_str(&escape_text(text));
                }
            }
            NodeData::Element { name, attrs, .. } => {
                out.push('<');
                out.push_str(name);
                for attr in attrs {
                    let _ = write!(out, " {}=\"{}\"", attr.name, escape_attr(&attr.value));
                }
                out.push('>');

                if VOID_ELEMENTS.contains(&name.as_str()) {
                    return;
                }

                let raw = RAW_TEXT_ELEMENTS.contains(&name.as_str());
                for child in self.children(id) {
                    self.write_node(child, raw, out);
                }

                let _ = write!(out, "</{name}>");
            }
        }
    }
}

/// Escape special characters in text content.
pub fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape special characters in an attribute value.
pub fn escape_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}
