//! HTML serialization of the element tree.

use std::fmt::Write as _;

use super::document::Document;
use super::node::{is_valid_name, NodeId, NodeKind};

/// Escape text content.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape a double-quoted attribute value.
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

impl Document {
    /// Serialize `node` including its own tag.
    ///
    /// For the document root this is the same as [`inner_html`](Self::inner_html).
    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_node(node, &mut out);
        out
    }

    /// Serialize the children of `node`.
    pub fn inner_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        for &child in self.children(node) {
            self.write_node(child, &mut out);
        }
        out
    }

    /// Serialize the whole document.
    pub fn to_html(&self) -> String {
        format!("<!DOCTYPE html>{}", self.inner_html(self.root()))
    }

    fn write_node(&self, node: NodeId, out: &mut String) {
        match self.kind(node) {
            Some(NodeKind::Document) => {
                for &child in self.children(node) {
                    self.write_node(child, out);
                }
            }
            Some(NodeKind::Text(text)) => out.push_str(&escape_text(text)),
            Some(NodeKind::Element(element)) if !is_valid_name(element.tag()) => {
                // No tag can be written safely; keep the content.
                for &child in self.children(node) {
                    self.write_node(child, out);
                }
            }
            Some(NodeKind::Element(element)) => {
                out.push('<');
                out.push_str(element.tag());
                for (name, value) in element.attributes() {
                    if is_valid_name(name) {
                        let _ = write!(out, " {}=\"{}\"", name, escape_attr(value));
                    }
                }
                out.push('>');
                if element.is_void() {
                    return;
                }
                for &child in self.children(node) {
                    self.write_node(child, out);
                }
                let _ = write!(out, "</{}>", element.tag());
            }
            None => {}
        }
    }
}
