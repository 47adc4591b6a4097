//! Arena-based DOM for HTML parsing and rewriting.
//!
//! This module provides an arena-allocated DOM tree that html5ever can parse
//! into, plus the small set of query and mutation operations the rewriting
//! passes need: find-by-id, find-by-tag, get/set text, get/set attribute,
//! child splicing, and serialization. Tag and attribute names are stored as
//! plain strings, so nothing outside [`sink`] depends on parser types.

mod serialize;
mod sink;

use std::collections::HashMap;

/// Unique identifier for a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value for no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this is a valid node ID.
    pub fn is_some(&self) -> bool {
        self.0 != u32::MAX
    }

    /// Check if this is the sentinel value.
    pub fn is_none(&self) -> bool {
        self.0 == u32::MAX
    }
}

/// Node type in the arena DOM.
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Document root.
    Document,
    /// Element with name and attributes.
    Element {
        name: String,
        attrs: Vec<Attr>,
        /// Pre-extracted id for fast lookup.
        id: Option<String>,
        /// Pre-extracted classes for fast matching.
        classes: Vec<String>,
    },
    /// Text content.
    Text(String),
    /// Comment (preserved through serialization).
    Comment(String),
    /// Document type declaration.
    Doctype { name: String },
}

/// HTML attribute.
#[derive(Debug, Clone)]
pub struct Attr {
    pub name: String,
    pub value: String,
}

/// A node in the arena DOM.
#[derive(Debug)]
pub struct Node {
    pub data: NodeData,
    pub parent: NodeId,
    pub first_child: NodeId,
    pub last_child: NodeId,
    pub prev_sibling: NodeId,
    pub next_sibling: NodeId,
}

impl Node {
    fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
        }
    }
}

/// Arena-based DOM tree.
///
/// All nodes are stored in a contiguous vector for cache-friendly traversal.
/// Parent/child/sibling links use indices into this vector. Detached nodes
/// stay in the arena but are unreachable from the document root.
pub struct Document {
    nodes: Vec<Node>,
    document: NodeId,
    /// Map from id attribute to node ID for fast lookup.
    id_map: HashMap<String, NodeId>,
}

impl Document {
    /// Create a new empty DOM with a document root.
    pub fn new() -> Self {
        let mut dom = Self {
            nodes: Vec::new(),
            document: NodeId::NONE,
            id_map: HashMap::new(),
        };
        dom.document = dom.alloc(Node::new(NodeData::Document));
        dom
    }

    /// Parse an HTML document.
    pub fn parse(html: &str) -> Self {
        sink::parse(html)
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the document root ID.
    pub fn document(&self) -> NodeId {
        self.document
    }

    /// Get a node by ID.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if id.is_none() {
            return None;
        }
        self.nodes.get(id.0 as usize)
    }

    /// Get a mutable node by ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if id.is_none() {
            return None;
        }
        self.nodes.get_mut(id.0 as usize)
    }

    /// Create a new element node.
    pub fn create_element(&mut self, name: &str, attrs: Vec<Attr>) -> NodeId {
        let mut id = None;
        let mut classes = Vec::new();

        for attr in &attrs {
            if attr.name == "id" {
                id = Some(attr.value.clone());
            } else if attr.name == "class" {
                classes = attr
                    .value
                    .split_whitespace()
                    .map(|s| s.to_string())
                    .collect();
            }
        }

        let node_id = self.alloc(Node::new(NodeData::Element {
            name: name.to_string(),
            attrs,
            id: id.clone(),
            classes,
        }));

        if let Some(id_str) = id {
            self.id_map.insert(id_str, node_id);
        }

        node_id
    }

    /// Create a new text node.
    pub fn create_text(&mut self, text: String) -> NodeId {
        self.alloc(Node::new(NodeData::Text(text)))
    }

    /// Create a new comment node.
    pub fn create_comment(&mut self, text: String) -> NodeId {
        self.alloc(Node::new(NodeData::Comment(text)))
    }

    /// Create a doctype node.
    pub fn create_doctype(&mut self, name: String) -> NodeId {
        self.alloc(Node::new(NodeData::Doctype { name }))
    }

    /// Append a child to a parent node.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        let last_child = self
            .get(parent)
            .map(|n| n.last_child)
            .unwrap_or(NodeId::NONE);

        if let Some(child_node) = self.get_mut(child) {
            child_node.parent = parent;
            child_node.prev_sibling = last_child;
        }

        if last_child.is_some() {
            if let Some(last_node) = self.get_mut(last_child) {
                last_node.next_sibling = child;
            }
        }

        if let Some(parent_node) = self.get_mut(parent) {
            if parent_node.first_child.is_none() {
                parent_node.first_child = child;
            }
            parent_node.last_child = child;
        }
    }

    /// Insert a node before a sibling.
    pub fn insert_before(&mut self, sibling: NodeId, new_node: NodeId) {
        let parent = self.get(sibling).map(|n| n.parent).unwrap_or(NodeId::NONE);
        let prev = self
            .get(sibling)
            .map(|n| n.prev_sibling)
            .unwrap_or(NodeId::NONE);

        if let Some(new) = self.get_mut(new_node) {
            new.parent = parent;
            new.prev_sibling = prev;
            new.next_sibling = sibling;
        }

        if let Some(sib) = self.get_mut(sibling) {
            sib.prev_sibling = new_node;
        }

        if prev.is_some() {
            if let Some(p) = self.get_mut(prev) {
                p.next_sibling = new_node;
            }
        } else if let Some(par) = self.get_mut(parent) {
            par.first_child = new_node;
        }
    }

    /// Insert a node as the first child of a parent.
    pub fn insert_first(&mut self, parent: NodeId, new_node: NodeId) {
        let first = self
            .get(parent)
            .map(|n| n.first_child)
            .unwrap_or(NodeId::NONE);
        if first.is_some() {
            self.insert_before(first, new_node);
        } else {
            self.append(parent, new_node);
        }
    }

    /// Detach a node from its parent. The node stays allocated but becomes
    /// unreachable from the document root.
    pub fn detach(&mut self, target: NodeId) {
        let (parent, prev, next) = match self.get(target) {
            Some(n) => (n.parent, n.prev_sibling, n.next_sibling),
            None => return,
        };

        if prev.is_some() {
            if let Some(p) = self.get_mut(prev) {
                p.next_sibling = next;
            }
        } else if parent.is_some() {
            if let Some(p) = self.get_mut(parent) {
                p.first_child = next;
            }
        }

        if next.is_some() {
            if let Some(n) = self.get_mut(next) {
                n.prev_sibling = prev;
            }
        } else if parent.is_some() {
            if let Some(p) = self.get_mut(parent) {
                p.last_child = prev;
            }
        }

        if let Some(target_node) = self.get_mut(target) {
            target_node.parent = NodeId::NONE;
            target_node.prev_sibling = NodeId::NONE;
            target_node.next_sibling = NodeId::NONE;
        }
    }

    /// Append text to an existing text node, or create new if last child isn't text.
    pub fn append_text(&mut self, parent: NodeId, text: &str) {
        let last_child = self
            .get(parent)
            .map(|n| n.last_child)
            .unwrap_or(NodeId::NONE);

        if let Some(last) = self.get_mut(last_child) {
            if let NodeData::Text(ref mut existing) = last.data {
                existing.push_str(text);
                return;
            }
        }

        let text_node = self.create_text(text.to_string());
        self.append(parent, text_node);
    }

    /// Get node by id attribute.
    pub fn get_by_id(&self, id: &str) -> Option<NodeId> {
        self.id_map.get(id).copied()
    }

    /// Check whether any element in the document carries this id.
    pub fn has_id(&self, id: &str) -> bool {
        self.id_map.contains_key(id)
    }

    /// Get the number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the DOM is empty (only has document root).
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Iterate over children of a node.
    pub fn children(&self, parent: NodeId) -> Children<'_> {
        let first = self
            .get(parent)
            .map(|n| n.first_child)
            .unwrap_or(NodeId::NONE);
        Children {
            dom: self,
            current: first,
        }
    }

    /// Iterate over all descendants of a node in document order (the node
    /// itself excluded).
    pub fn descendants(&self, root: NodeId) -> Descendants<'_> {
        let mut stack: Vec<_> = self.children(root).collect();
        stack.reverse();
        Descendants { dom: self, stack }
    }

    /// Find the first element under `root` matching a predicate, in document
    /// order.
    pub fn find<F>(&self, root: NodeId, predicate: F) -> Option<NodeId>
    where
        F: Fn(&Node) -> bool,
    {
        self.descendants(root)
            .find(|&id| self.get(id).is_some_and(&predicate))
    }

    /// Find the first element with the given tag name.
    pub fn find_by_tag(&self, tag: &str) -> Option<NodeId> {
        self.find(self.document, |node| {
            matches!(&node.data, NodeData::Element { name, .. } if name == tag)
        })
    }

    /// Collect all elements with the given tag name under `root`, in document
    /// order.
    pub fn find_all_by_tag(&self, root: NodeId, tag: &str) -> Vec<NodeId> {
        self.descendants(root)
            .filter(|&id| self.element_name(id) == Some(tag))
            .collect()
    }

    /// Deep-copy a subtree from another document, returning the copy's root.
    ///
    /// The copy is created detached; splice it in with [`append`],
    /// [`insert_first`], or [`insert_before`]. Ids on copied elements are
    /// registered in this document's id map.
    pub fn import(&mut self, src: &Document, src_root: NodeId) -> NodeId {
        let Some(node) = src.get(src_root) else {
            return NodeId::NONE;
        };
        let copy = match &node.data {
            NodeData::Element { name, attrs, .. } => {
                let name = name.clone();
                let attrs = attrs.clone();
                self.create_element(&name, attrs)
            }
            NodeData::Text(t) => self.create_text(t.clone()),
            NodeData::Comment(c) => self.create_comment(c.clone()),
            NodeData::Doctype { name } => self.create_doctype(name.clone()),
            NodeData::Document => self.create_comment(String::new()),
        };
        let children: Vec<_> = src.children(src_root).collect();
        for child in children {
            let child_copy = self.import(src, child);
            self.append(copy, child_copy);
        }
        copy
    }

    /// Root element of a parsed fragment.
    ///
    /// html5ever always wraps parsed input in `<html><head>…<body>…`, so a
    /// fragment file like `<div class="banner">…</div>` comes back as the
    /// body's first element child. Head-only fragments (a bare `<script>`)
    /// end up as the head's first element child instead.
    pub fn fragment_root(&self) -> Option<NodeId> {
        let from_body = self
            .find_by_tag("body")
            .and_then(|body| self.children(body).find(|&c| self.is_element(c)));
        from_body.or_else(|| {
            let head = self.find_by_tag("head")?;
            self.children(head).find(|&c| self.is_element(c))
        })
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over children of a node.
pub struct Children<'a> {
    dom: &'a Document,
    current: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_none() {
            return None;
        }
        let id = self.current;
        self.current = self
            .dom
            .get(id)
            .map(|n| n.next_sibling)
            .unwrap_or(NodeId::NONE);
        Some(id)
    }
}

/// Depth-first iterator over a subtree.
pub struct Descendants<'a> {
    dom: &'a Document,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let mut children: Vec<_> = self.dom.children(id).collect();
        children.reverse();
        self.stack.extend(children);
        Some(id)
    }
}

/// Convenience methods for element nodes.
impl Document {
    /// Get element's tag name.
    pub fn element_name(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Element { name, .. } => Some(name.as_str()),
            _ => None,
        })
    }

    /// Get an attribute value.
    pub fn attr(&self, id: NodeId, attr_name: &str) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Element { attrs, .. } => attrs
                .iter()
                .find(|a| a.name == attr_name)
                .map(|a| a.value.as_str()),
            _ => None,
        })
    }

    /// Set an attribute, replacing any existing value.
    pub fn set_attr(&mut self, id: NodeId, attr_name: &str, value: &str) {
        if let Some(node) = self.get_mut(id)
            && let NodeData::Element { attrs, .. } = &mut node.data
        {
            if let Some(attr) = attrs.iter_mut().find(|a| a.name == attr_name) {
                attr.value = value.to_string();
            } else {
                attrs.push(Attr {
                    name: attr_name.to_string(),
                    value: value.to_string(),
                });
            }
        }
    }

    /// Get element's id attribute.
    pub fn element_id(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Element { id, .. } => id.as_deref(),
            _ => None,
        })
    }

    /// Get element's classes.
    pub fn element_classes(&self, id: NodeId) -> &[String] {
        static EMPTY: &[String] = &[];
        self.get(id)
            .and_then(|n| match &n.data {
                NodeData::Element { classes, .. } => Some(classes.as_slice()),
                _ => None,
            })
            .unwrap_or(EMPTY)
    }

    /// Check if node is an element.
    pub fn is_element(&self, id: NodeId) -> bool {
        self.get(id)
            .is_some_and(|n| matches!(n.data, NodeData::Element { .. }))
    }

    /// Concatenated text of the node and all its descendants.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        if let Some(node) = self.get(id)
            && let NodeData::Text(t) = &node.data
        {
            out.push_str(t);
        }
        for desc in self.descendants(id) {
            if let Some(node) = self.get(desc)
                && let NodeData::Text(t) = &node.data
            {
                out.push_str(t);
            }
        }
        out
    }

    /// Replace the node's entire content with a single text node.
    pub fn set_text(&mut self, id: NodeId, text: &str) {
        let children: Vec<_> = self.children(id).collect();
        for child in children {
            self.detach(child);
        }
        let text_node = self.create_text(text.to_string());
        self.append(id, text_node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_elements() {
        let mut dom = Document::new();

        let div = dom.create_element(
            "div",
            vec![Attr {
                name: "id".to_string(),
                value: "main".to_string(),
            }],
        );

        dom.append(dom.document(), div);

        assert_eq!(dom.element_name(div), Some("div"));
        assert_eq!(dom.element_id(div), Some("main"));
        assert_eq!(dom.get_by_id("main"), Some(div));
    }

    #[test]
    fn test_append_children() {
        let mut dom = Document::new();

        let parent = dom.create_element("div", vec![]);
        let child1 = dom.create_element("p", vec![]);
        let child2 = dom.create_element("p", vec![]);

        dom.append(dom.document(), parent);
        dom.append(parent, child1);
        dom.append(parent, child2);

        let children: Vec<_> = dom.children(parent).collect();
        assert_eq!(children, vec![child1, child2]);
    }

    #[test]
    fn test_insert_first() {
        let mut dom = Document::new();

        let parent = dom.create_element("body", vec![]);
        let old = dom.create_element("p", vec![]);
        dom.append(dom.document(), parent);
        dom.append(parent, old);

        let banner = dom.create_element("div", vec![]);
        dom.insert_first(parent, banner);

        let children: Vec<_> = dom.children(parent).collect();
        assert_eq!(children, vec![banner, old]);
    }

    #[test]
    fn test_detach() {
        let mut dom = Document::new();

        let parent = dom.create_element("div", vec![]);
        let a = dom.create_element("span", vec![]);
        let b = dom.create_element("span", vec![]);
        let c = dom.create_element("span", vec![]);
        dom.append(dom.document(), parent);
        dom.append(parent, a);
        dom.append(parent, b);
        dom.append(parent, c);

        dom.detach(b);

        let children: Vec<_> = dom.children(parent).collect();
        assert_eq!(children, vec![a, c]);
    }

    #[test]
    fn test_text_content_and_set_text() {
        let mut dom = Document::new();

        let h2 = dom.create_element("h2", vec![]);
        dom.append(dom.document(), h2);
        dom.append_text(h2, "Error ");
        let span = dom.create_element("span", vec![]);
        dom.append(h2, span);
        dom.append_text(span, "Handling");

        assert_eq!(dom.text_content(h2), "Error Handling");

        dom.set_text(h2, "3: Error Handling");
        assert_eq!(dom.text_content(h2), "3: Error Handling");
        assert_eq!(dom.children(h2).count(), 1);
    }

    #[test]
    fn test_import_subtree() {
        let mut src = Document::new();
        let div = src.create_element(
            "div",
            vec![Attr {
                name: "id".to_string(),
                value: "toc".to_string(),
            }],
        );
        src.append(src.document(), div);
        let a = src.create_element("a", vec![]);
        src.append(div, a);
        src.append_text(a, "Chapter 1");

        let mut dst = Document::new();
        let header = dst.create_element("div", vec![]);
        dst.append(dst.document(), header);
        let copy = dst.import(&src, div);
        dst.append(header, copy);

        assert_eq!(dst.get_by_id("toc"), Some(copy));
        assert_eq!(dst.text_content(header), "Chapter 1");
    }

    #[test]
    fn test_text_merging() {
        let mut dom = Document::new();

        let p = dom.create_element("p", vec![]);
        dom.append(dom.document(), p);

        dom.append_text(p, "Hello, ");
        dom.append_text(p, "World!");

        let children: Vec<_> = dom.children(p).collect();
        assert_eq!(children.len(), 1);
        assert_eq!(dom.text_content(children[0]), "Hello, World!");
    }
}
