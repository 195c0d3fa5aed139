//! Node storage for the element tree.

use slotmap::new_key_type;

new_key_type! {
    /// Handle to a node of a [`Document`](super::Document).
    ///
    /// Handles are cheap to copy and stay valid for the lifetime of the
    /// document, whether or not the node is currently attached to the tree.
    pub struct NodeId;
}

/// Elements that never have content or an end tag.
pub(crate) const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Whether `tag` is a void element.
pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.iter().any(|void| void.eq_ignore_ascii_case(tag))
}

/// Whether `name` can be written out as a tag or attribute name.
///
/// Names must be non-empty and free of whitespace, control characters,
/// quotes and the characters `<`, `>`, `/` and `=`.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && !name.chars().any(|ch| {
            ch.is_whitespace()
                || ch.is_control()
                || matches!(ch, '"' | '\'' | '<' | '>' | '/' | '=')
        })
}

/// The payload of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// The document root. Exactly one per document.
    Document,
    /// An element with a tag name, attributes and a form value.
    Element(ElementData),
    /// A run of text.
    Text(String),
}

/// Element payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementData {
    tag: String,
    attributes: Vec<(String, String)>,
    value: String,
}

impl ElementData {
    pub(crate) fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attributes: Vec::new(),
            value: String::new(),
        }
    }

    /// The lowercase tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Attributes in insertion order.
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Look up an attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, keeping its original position when it already exists.
    ///
    /// Setting `value` also resets the current form value, the way a fresh
    /// control picks up its default.
    pub(crate) fn set_attr(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        if name == "value" {
            self.value = value.to_string();
        }
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.attributes.push((name, value.to_string())),
        }
    }

    pub(crate) fn remove_attr(&mut self, name: &str) -> bool {
        let before = self.attributes.len();
        self.attributes
            .retain(|(key, _)| !key.eq_ignore_ascii_case(name));
        before != self.attributes.len()
    }

    /// Whether the space-separated `class` attribute contains `class_name`.
    pub fn has_class(&self, class_name: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == class_name))
    }

    /// The current form value (for `input` and friends).
    pub fn value(&self) -> &str {
        &self.value
    }

    pub(crate) fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Whether this element is a void element.
    pub fn is_void(&self) -> bool {
        is_void_element(&self.tag)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) kind: NodeKind,
}

impl Node {
    pub(crate) fn new(kind: NodeKind) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            kind,
        }
    }

    pub(crate) fn can_have_children(&self) -> bool {
        match &self.kind {
            NodeKind::Document => true,
            NodeKind::Element(element) => !element.is_void(),
            NodeKind::Text(_) => false,
        }
    }

    pub(crate) fn describe(&self) -> String {
        match &self.kind {
            NodeKind::Document => "#document".to_string(),
            NodeKind::Element(element) => element.tag().to_string(),
            NodeKind::Text(_) => "#text".to_string(),
        }
    }
}
