//! Typed element tree.
//!
//! This module models the page that option lists live in:
//!
//! - [`Document`]: arena-backed tree of element and text nodes with an id index
//! - [`ElementBuilder`]: structured, injection-free element construction
//! - [`DocumentTreeDebug`]: human-readable tree dumps for diagnostics
//!
//! Serialization to HTML is provided by [`Document::outer_html`],
//! [`Document::inner_html`] and [`Document::to_html`].

mod builder;
mod debug;
mod document;
mod html;
mod node;

pub use builder::{BuilderChild, ElementBuilder};
pub use debug::DocumentTreeDebug;
pub use document::Document;
pub use html::{escape_attr, escape_text};
pub use node::{is_valid_name, is_void_element, ElementData, NodeId, NodeKind};
