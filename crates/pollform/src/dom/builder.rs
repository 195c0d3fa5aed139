//! Structured element construction.
//!
//! `ElementBuilder` describes a detached element subtree as typed data. The
//! subtree is materialized with [`Document::build`](super::Document::build).
//! Text and attribute values are stored verbatim and only escaped when the
//! tree is serialized, so user-supplied strings can never inject markup.
//! Tag and attribute names are code, not data: they must pass
//! [`is_valid_name`].
//!
//! # Example
//!
//! ```
//! use pollform::dom::{Document, ElementBuilder};
//!
//! let group = ElementBuilder::new("div")
//!     .class("poll-option")
//!     .child(ElementBuilder::new("label").text("Option: "))
//!     .child(
//!         ElementBuilder::new("input")
//!             .attr("type", "text")
//!             .attr("name", "option"),
//!     );
//!
//! let mut doc = Document::new();
//! let node = doc.build(&group);
//! assert_eq!(doc.child_count(node), 2);
//! ```

use super::node::is_valid_name;

/// A child of an [`ElementBuilder`].
#[derive(Debug, Clone, PartialEq)]
pub enum BuilderChild {
    /// A nested element.
    Element(ElementBuilder),
    /// A text run.
    Text(String),
}

/// Typed description of an element and its subtree.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementBuilder {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<BuilderChild>,
}

impl ElementBuilder {
    /// Start describing an element with the given tag.
    ///
    /// Debug builds panic on a tag that [`is_valid_name`] rejects.
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        debug_assert!(is_valid_name(&tag), "invalid tag name {tag:?}");
        Self {
            tag,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute. A later call with the same name overrides it.
    ///
    /// Debug builds panic on a name that [`is_valid_name`] rejects. Release
    /// builds keep it here and [`Document::build`](super::Document::build)
    /// drops it.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        debug_assert!(is_valid_name(&name), "invalid attribute name {name:?}");
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name, value)),
        }
        self
    }

    /// Set the `id` attribute.
    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    /// Set the `class` attribute.
    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    /// Append a text child.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(BuilderChild::Text(text.into()));
        self
    }

    /// Append an element child.
    pub fn child(mut self, child: ElementBuilder) -> Self {
        self.children.push(BuilderChild::Element(child));
        self
    }

    /// Append several element children.
    pub fn children(mut self, children: impl IntoIterator<Item = ElementBuilder>) -> Self {
        self.children
            .extend(children.into_iter().map(BuilderChild::Element));
        self
    }

    /// The tag name as given.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Look up an attribute set on this builder.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Attributes in insertion order.
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Children in insertion order.
    pub fn child_nodes(&self) -> &[BuilderChild] {
        &self.children
    }
}
