//! Debug visualization of element trees.

use std::fmt::Write as _;

use pollform_core::TreeFormatOptions;

use super::document::Document;
use super::node::{NodeId, NodeKind};

/// Debug utility for visualizing a document's element tree.
///
/// ```
/// use pollform::dom::{Document, DocumentTreeDebug, ElementBuilder};
///
/// let mut doc = Document::new();
/// let form = doc.build(&ElementBuilder::new("form").id("poll-form"));
/// doc.append_child(doc.root(), form).unwrap();
///
/// let dump = DocumentTreeDebug::new().format(&doc, doc.root());
/// assert!(dump.contains("form#poll-form"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DocumentTreeDebug {
    options: TreeFormatOptions,
}

impl DocumentTreeDebug {
    /// Create a visualizer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a visualizer with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Format the subtree rooted at `node`.
    pub fn format(&self, doc: &Document, node: NodeId) -> String {
        let mut output = String::new();
        self.format_into(doc, node, 0, true, &mut output);
        output
    }

    fn format_into(&self, doc: &Document, node: NodeId, depth: usize, is_last: bool, out: &mut String) {
        if self.options.max_depth.is_some_and(|max| depth > max) {
            return;
        }

        out.push_str(&self.options.style.prefix(depth, is_last, self.options.indent_size));
        match doc.kind(node) {
            Some(NodeKind::Document) => out.push_str("#document"),
            Some(NodeKind::Text(text)) => {
                let _ = write!(out, "{text:?}");
            }
            Some(NodeKind::Element(element)) => {
                out.push_str(element.tag());
                if let Some(id) = element.attr("id") {
                    let _ = write!(out, "#{id}");
                }
                if self.options.show_attributes {
                    for (name, value) in element.attributes() {
                        if name != "id" {
                            let _ = write!(out, " {name}={value:?}");
                        }
                    }
                }
            }
            None => out.push_str("(invalid)"),
        }
        if self.options.show_ids {
            let _ = write!(out, " [{node:?}]");
        }
        out.push('\n');

        let children = doc.children(node);
        for (i, &child) in children.iter().enumerate() {
            self.format_into(doc, child, depth + 1, i + 1 == children.len(), out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ElementBuilder;
    use pollform_core::TreeStyle;

    fn sample() -> (Document, NodeId) {
        let mut doc = Document::new();
        let list = doc.build(
            &ElementBuilder::new("fieldset")
                .id("poll-form-fieldset")
                .child(ElementBuilder::new("legend").text("New poll"))
                .child(ElementBuilder::new("input").attr("name", "option")),
        );
        doc.append_child(doc.root(), list).unwrap();
        (doc, list)
    }

    #[test]
    fn test_format_ascii() {
        let (doc, list) = sample();
        let options = TreeFormatOptions {
            style: TreeStyle::Ascii,
            ..TreeFormatOptions::default()
        };
        let dump = DocumentTreeDebug::with_options(options).format(&doc, list);
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(
            lines,
            vec![
                "fieldset#poll-form-fieldset",
                "+-- legend",
                "|  `-- \"New poll\"",
                "`-- input name=\"option\"",
            ]
        );
    }

    #[test]
    fn test_format_minimal_hides_attributes() {
        let (doc, list) = sample();
        let dump = DocumentTreeDebug::with_options(TreeFormatOptions::minimal()).format(&doc, list);
        assert!(!dump.contains("name="));
        assert!(dump.contains("input"));
    }

    #[test]
    fn test_max_depth() {
        let (doc, _) = sample();
        let options = TreeFormatOptions {
            max_depth: Some(1),
            ..TreeFormatOptions::default()
        };
        let dump = DocumentTreeDebug::with_options(options).format(&doc, doc.root());
        assert!(dump.contains("fieldset"));
        assert!(!dump.contains("legend"));
    }
}
