//! The element tree.

use std::collections::HashMap;

use pollform_core::logging::targets;
use slotmap::SlotMap;

use super::builder::{BuilderChild, ElementBuilder};
use super::node::{is_valid_name, ElementData, Node, NodeId, NodeKind};
use crate::error::{Error, Result};

/// An in-memory element tree.
///
/// The document owns every node it ever created. Nodes are attached to the
/// tree (reachable from [`root`](Self::root)) or detached. Only attached
/// elements take part in id lookups and serialization of the root.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: SlotMap<NodeId, Node>,
    root: NodeId,
    id_index: HashMap<String, NodeId>,
}

impl Document {
    /// Create an empty document holding only the root node.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::new(NodeKind::Document));
        Self {
            nodes,
            root,
            id_index: HashMap::new(),
        }
    }

    /// The document root.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Total number of nodes owned by the document, attached or not.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether `node` is a live handle for this document.
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    // ========================================================================
    // Construction
    // ========================================================================

    /// Create a detached element.
    ///
    /// Debug builds panic on a tag that [`is_valid_name`] rejects.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        debug_assert!(is_valid_name(tag), "invalid tag name {tag:?}");
        self.nodes
            .insert(Node::new(NodeKind::Element(ElementData::new(tag))))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.nodes.insert(Node::new(NodeKind::Text(text.to_string())))
    }

    /// Create a document whose root holds the subtree described by `builder`.
    pub fn from_builder(builder: &ElementBuilder) -> Self {
        let mut doc = Self::new();
        let node = doc.build(builder);
        doc.link(doc.root, node, usize::MAX);
        doc.rebuild_id_index();
        doc
    }

    /// Materialize a builder into a detached subtree and return its root.
    pub fn build(&mut self, builder: &ElementBuilder) -> NodeId {
        let mut element = ElementData::new(builder.tag());
        for (name, value) in builder.attributes() {
            if is_valid_name(name) {
                element.set_attr(name, value);
            } else {
                tracing::warn!(target: targets::DOM, name = %name, "dropping attribute with invalid name");
            }
        }
        let node = self.nodes.insert(Node::new(NodeKind::Element(element)));

        for child in builder.child_nodes() {
            let child_id = match child {
                BuilderChild::Element(nested) => self.build(nested),
                BuilderChild::Text(text) => self.create_text(text),
            };
            self.link(node, child_id, usize::MAX);
        }
        node
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// The node payload.
    pub fn kind(&self, node: NodeId) -> Option<&NodeKind> {
        self.nodes.get(node).map(|n| &n.kind)
    }

    /// The element payload, if `node` is an element.
    pub fn element(&self, node: NodeId) -> Option<&ElementData> {
        match self.kind(node)? {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    fn element_mut(&mut self, node: NodeId) -> Result<&mut ElementData> {
        match &mut self.nodes.get_mut(node).ok_or(Error::InvalidNode)?.kind {
            NodeKind::Element(element) => Ok(element),
            _ => Err(Error::NotAnElement),
        }
    }

    /// The lowercase tag name, if `node` is an element.
    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(ElementData::tag)
    }

    /// The parent of `node`, if attached to one.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(|n| n.parent)
    }

    /// The children of `node`, in order. Empty for invalid handles.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Number of direct children of `node`.
    pub fn child_count(&self, node: NodeId) -> usize {
        self.children(node).len()
    }

    /// Position of `node` among its parent's children.
    pub fn index_in_parent(&self, node: NodeId) -> Option<usize> {
        let parent = self.parent(node)?;
        self.children(parent).iter().position(|&c| c == node)
    }

    /// Whether `node` is reachable from the root.
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.is_inclusive_ancestor(self.root, node)
    }

    /// Whether `ancestor` is `node` or one of its ancestors.
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    /// All descendants of `node` in document (pre-)order, excluding `node`.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    /// The attached element whose `id` attribute equals `id`.
    ///
    /// When several attached elements share an id, the first in document
    /// order wins.
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.id_index.get(id).copied()
    }

    /// Elements under `scope` whose `name` attribute equals `name`, in
    /// document order.
    pub fn elements_by_name(&self, scope: NodeId, name: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&node| {
                self.element(node)
                    .is_some_and(|element| element.attr("name") == Some(name))
            })
            .collect()
    }

    /// Direct children of `parent` that carry the class `class_name`.
    pub fn children_with_class(&self, parent: NodeId, class_name: &str) -> Vec<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .filter(|&node| {
                self.element(node)
                    .is_some_and(|element| element.has_class(class_name))
            })
            .collect()
    }

    // ========================================================================
    // Attributes and content
    // ========================================================================

    /// Read an attribute.
    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?.attr(name)
    }

    /// Set an attribute on an element.
    ///
    /// Fails with [`Error::InvalidName`] if [`is_valid_name`] rejects `name`.
    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) -> Result<()> {
        if !is_valid_name(name) {
            return Err(Error::InvalidName {
                name: name.to_string(),
            });
        }
        self.element_mut(node)?.set_attr(name, value);
        if name.eq_ignore_ascii_case("id") && self.is_connected(node) {
            self.rebuild_id_index();
        }
        Ok(())
    }

    /// Remove an attribute. Returns whether it was present.
    pub fn remove_attr(&mut self, node: NodeId, name: &str) -> Result<bool> {
        let removed = self.element_mut(node)?.remove_attr(name);
        if removed && name.eq_ignore_ascii_case("id") && self.is_connected(node) {
            self.rebuild_id_index();
        }
        Ok(removed)
    }

    /// The current form value of an element.
    pub fn value(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(ElementData::value)
    }

    /// Set the current form value of an element, as user input would.
    pub fn set_value(&mut self, node: NodeId, value: &str) -> Result<()> {
        self.element_mut(node)?.set_value(value);
        Ok(())
    }

    /// Concatenated text of `node` and all its descendants.
    pub fn text_content(&self, node: NodeId) -> String {
        match self.kind(node) {
            Some(NodeKind::Text(text)) => text.clone(),
            Some(_) => self
                .descendants(node)
                .into_iter()
                .filter_map(|n| match self.kind(n) {
                    Some(NodeKind::Text(text)) => Some(text.as_str()),
                    _ => None,
                })
                .collect(),
            None => String::new(),
        }
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Append `child` as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.insert_child_at(parent, usize::MAX, child).map(|_| ())
    }

    /// Insert `child` at position `index` among the children of `parent`.
    ///
    /// Indices past the end append. If `child` is attached elsewhere it is
    /// moved. Returns the index the child ended up at.
    pub fn insert_child_at(&mut self, parent: NodeId, index: usize, child: NodeId) -> Result<usize> {
        self.check_insertion(parent, child)?;
        let at = self.link(parent, child, index);
        self.rebuild_id_index();
        tracing::trace!(target: targets::DOM, index = at, "inserted child");
        Ok(at)
    }

    /// Insert `child` before `reference`, or append when `reference` is `None`.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<()> {
        let index = match reference {
            Some(reference) => {
                if !self.contains(reference) {
                    return Err(Error::InvalidNode);
                }
                if self.parent(reference) != Some(parent) {
                    return Err(Error::NotAChild);
                }
                if reference == child {
                    return Ok(());
                }
                self.check_insertion(parent, child)?;
                self.unlink(child);
                self.children(parent)
                    .iter()
                    .position(|&c| c == reference)
                    .ok_or(Error::NotAChild)?
            }
            None => usize::MAX,
        };
        self.insert_child_at(parent, index, child).map(|_| ())
    }

    /// Detach `child` from `parent`. The node stays owned by the document.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if !self.contains(parent) || !self.contains(child) {
            return Err(Error::InvalidNode);
        }
        if self.parent(child) != Some(parent) {
            return Err(Error::NotAChild);
        }
        self.unlink(child);
        self.rebuild_id_index();
        Ok(())
    }

    /// Check that `node` exists and may hold children.
    ///
    /// Callers that build a subtree before inserting it use this to fail
    /// before anything is allocated.
    pub fn ensure_container(&self, node: NodeId) -> Result<()> {
        let data = self.nodes.get(node).ok_or(Error::InvalidNode)?;
        if data.can_have_children() {
            Ok(())
        } else {
            Err(Error::NotAContainer {
                tag: data.describe(),
            })
        }
    }

    fn check_insertion(&self, parent: NodeId, child: NodeId) -> Result<()> {
        self.ensure_container(parent)?;
        if !self.contains(child) || child == self.root {
            return Err(Error::InvalidNode);
        }
        if self.is_inclusive_ancestor(child, parent) {
            return Err(Error::HierarchyCycle);
        }
        Ok(())
    }

    /// Detach `child` from its parent, if any.
    fn unlink(&mut self, child: NodeId) {
        let Some(old_parent) = self.parent(child) else {
            return;
        };
        if let Some(node) = self.nodes.get_mut(old_parent) {
            node.children.retain(|&c| c != child);
        }
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = None;
        }
    }

    /// Attach an already validated `child` under `parent` at `index`.
    fn link(&mut self, parent: NodeId, child: NodeId, index: usize) -> usize {
        self.unlink(child);
        let Some(parent_node) = self.nodes.get_mut(parent) else {
            return 0;
        };
        let at = index.min(parent_node.children.len());
        parent_node.children.insert(at, child);
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Some(parent);
        }
        at
    }

    fn rebuild_id_index(&mut self) {
        let mut index = HashMap::new();
        for node in self.descendants(self.root) {
            if let Some(id) = self.attr(node, "id") {
                if !id.is_empty() {
                    index.entry(id.to_string()).or_insert(node);
                }
            }
        }
        self.id_index = index;
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_list() -> (Document, NodeId) {
        let mut doc = Document::new();
        let list = doc.build(&ElementBuilder::new("ul").id("list"));
        doc.append_child(doc.root(), list).unwrap();
        (doc, list)
    }

    #[test]
    fn test_new_document_is_empty() {
        let doc = Document::new();
        assert_eq!(doc.node_count(), 1);
        assert_eq!(doc.child_count(doc.root()), 0);
        assert!(doc.is_connected(doc.root()));
    }

    #[test]
    fn test_from_builder_attaches_tree() {
        let doc = Document::from_builder(
            &ElementBuilder::new("main").child(ElementBuilder::new("p").id("intro")),
        );
        let main = doc.children(doc.root())[0];
        assert_eq!(doc.tag_name(main), Some("main"));
        let intro = doc.element_by_id("intro").unwrap();
        assert_eq!(doc.parent(intro), Some(main));
    }

    #[test]
    fn test_element_by_id_tracks_attachment() {
        let mut doc = Document::new();
        let div = doc.build(&ElementBuilder::new("div").id("box"));
        assert_eq!(doc.element_by_id("box"), None);

        doc.append_child(doc.root(), div).unwrap();
        assert_eq!(doc.element_by_id("box"), Some(div));

        doc.remove_child(doc.root(), div).unwrap();
        assert_eq!(doc.element_by_id("box"), None);
        assert!(doc.contains(div));
    }

    #[test]
    fn test_set_attr_id_reindexes() {
        let (mut doc, list) = doc_with_list();
        doc.set_attr(list, "id", "renamed").unwrap();
        assert_eq!(doc.element_by_id("list"), None);
        assert_eq!(doc.element_by_id("renamed"), Some(list));

        assert!(doc.remove_attr(list, "id").unwrap());
        assert_eq!(doc.element_by_id("renamed"), None);
    }

    #[test]
    fn test_first_duplicate_id_wins() {
        let (mut doc, list) = doc_with_list();
        let a = doc.build(&ElementBuilder::new("li").id("dup"));
        let b = doc.build(&ElementBuilder::new("li").id("dup"));
        doc.append_child(list, a).unwrap();
        doc.insert_child_at(list, 0, b).unwrap();
        assert_eq!(doc.element_by_id("dup"), Some(b));
    }

    #[test]
    fn test_insert_child_at_positions() {
        let (mut doc, list) = doc_with_list();
        let items: Vec<NodeId> = (0..3).map(|_| doc.create_element("li")).collect();

        assert_eq!(doc.insert_child_at(list, 0, items[0]).unwrap(), 0);
        assert_eq!(doc.insert_child_at(list, 99, items[1]).unwrap(), 1);
        assert_eq!(doc.insert_child_at(list, 1, items[2]).unwrap(), 1);

        assert_eq!(doc.children(list), &[items[0], items[2], items[1]]);
        assert_eq!(doc.index_in_parent(items[1]), Some(2));
    }

    #[test]
    fn test_insert_moves_existing_child() {
        let (mut doc, list) = doc_with_list();
        let a = doc.create_element("li");
        let b = doc.create_element("li");
        doc.append_child(list, a).unwrap();
        doc.append_child(list, b).unwrap();

        doc.append_child(list, a).unwrap();
        assert_eq!(doc.children(list), &[b, a]);
    }

    #[test]
    fn test_insert_before() {
        let (mut doc, list) = doc_with_list();
        let a = doc.create_element("li");
        let b = doc.create_element("li");
        let c = doc.create_element("li");
        doc.append_child(list, a).unwrap();
        doc.append_child(list, c).unwrap();

        doc.insert_before(list, b, Some(c)).unwrap();
        assert_eq!(doc.children(list), &[a, b, c]);

        let other = doc.create_element("li");
        assert!(matches!(
            doc.insert_before(list, b, Some(other)),
            Err(Error::NotAChild)
        ));
    }

    #[test]
    fn test_cycle_is_rejected() {
        let (mut doc, list) = doc_with_list();
        let item = doc.create_element("li");
        doc.append_child(list, item).unwrap();

        assert!(matches!(
            doc.append_child(item, list),
            Err(Error::HierarchyCycle)
        ));
        assert!(matches!(
            doc.append_child(list, list),
            Err(Error::HierarchyCycle)
        ));
    }

    #[test]
    fn test_text_and_void_cannot_have_children() {
        let mut doc = Document::new();
        let text = doc.create_text("hello");
        let input = doc.create_element("input");
        let span = doc.create_element("span");

        assert!(matches!(
            doc.append_child(text, span),
            Err(Error::NotAContainer { .. })
        ));
        assert!(matches!(
            doc.append_child(input, span),
            Err(Error::NotAContainer { tag }) if tag == "input"
        ));
    }

    #[test]
    fn test_ensure_container() {
        let mut doc = Document::new();
        let input = doc.create_element("input");
        let text = doc.create_text("x");
        let div = doc.create_element("div");

        assert!(doc.ensure_container(div).is_ok());
        assert!(doc.ensure_container(doc.root()).is_ok());
        assert!(matches!(
            doc.ensure_container(input),
            Err(Error::NotAContainer { tag }) if tag == "input"
        ));
        assert!(matches!(
            doc.ensure_container(text),
            Err(Error::NotAContainer { .. })
        ));
        assert_eq!(doc.node_count(), 4);
    }

    #[test]
    fn test_set_attr_rejects_invalid_name() {
        let (mut doc, list) = doc_with_list();
        assert!(matches!(
            doc.set_attr(list, "x onclick", "alert(1)"),
            Err(Error::InvalidName { name }) if name == "x onclick"
        ));
        assert!(matches!(doc.set_attr(list, "", "x"), Err(Error::InvalidName { .. })));
        assert_eq!(doc.element(list).unwrap().attributes().len(), 1);
        assert!(doc.set_attr(list, "data-kind", "options").is_ok());
    }

    #[test]
    fn test_invalid_tag_serializes_only_content() {
        let mut doc = Document::new();
        let bad = doc
            .nodes
            .insert(Node::new(NodeKind::Element(ElementData::new("p onclick=x"))));
        let text = doc.create_text("hi");
        doc.append_child(doc.root(), bad).unwrap();
        doc.append_child(bad, text).unwrap();

        assert_eq!(doc.outer_html(bad), "hi");
        assert_eq!(doc.to_html(), "<!DOCTYPE html>hi");
    }

    #[test]
    fn test_root_cannot_be_inserted() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        assert!(matches!(
            doc.append_child(div, doc.root()),
            Err(Error::InvalidNode)
        ));
    }

    #[test]
    fn test_text_content_and_value() {
        let mut doc = Document::new();
        let label = doc.build(
            &ElementBuilder::new("label")
                .text("Option ")
                .child(ElementBuilder::new("b").text("1")),
        );
        assert_eq!(doc.text_content(label), "Option 1");

        let input = doc.build(&ElementBuilder::new("input").attr("value", "Oslo"));
        assert_eq!(doc.value(input), Some("Oslo"));
        doc.set_value(input, "Bergen").unwrap();
        assert_eq!(doc.value(input), Some("Bergen"));
        assert_eq!(doc.attr(input, "value"), Some("Oslo"));

        let text = doc.create_text("x");
        assert!(matches!(doc.set_value(text, "y"), Err(Error::NotAnElement)));
    }

    #[test]
    fn test_elements_by_name_in_document_order() {
        let mut doc = Document::new();
        let form = doc.build(
            &ElementBuilder::new("form")
                .child(ElementBuilder::new("input").attr("name", "option").id("a"))
                .child(
                    ElementBuilder::new("div")
                        .child(ElementBuilder::new("input").attr("name", "option").id("b")),
                )
                .child(ElementBuilder::new("input").attr("name", "question")),
        );
        doc.append_child(doc.root(), form).unwrap();

        let found: Vec<&str> = doc
            .elements_by_name(form, "option")
            .into_iter()
            .filter_map(|node| doc.attr(node, "id"))
            .collect();
        assert_eq!(found, vec!["a", "b"]);
    }
}
