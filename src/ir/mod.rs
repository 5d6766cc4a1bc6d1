//! Document tree for word-processor content.
//!
//! A [`DocTree`] holds one section of a document (header, body or footer):
//! - Nodes with structural kinds (paragraphs, list items, tables, ...)
//! - Sparse kind-specific attributes (headings, glyphs, runs, images)
//! - A shared text buffer with range references
//!
//! # Example
//!
//! ```
//! use mdmaker::ir::{DocTree, NodeKind};
//!
//! let mut body = DocTree::new(NodeKind::BodySection);
//! let para = body.add_paragraph(body.root(), 1);
//! body.add_text(para, "Introduction");
//! assert_eq!(body.child_count(body.root()), 1);
//! ```

mod attributes;
mod node;

pub use attributes::{AttributeRun, Attributes, ImageBlob, ListInfo, RunStyle};
pub use node::{GlyphType, Node, NodeId, NodeKind, TextRange};

/// One section of a document as a tree.
///
/// The tree uses a parent-pointer / first-child / next-sibling representation.
/// Parents are plain ids, so there are no ownership cycles.
#[derive(Debug, Clone)]
pub struct DocTree {
    /// All nodes in the tree (index 0 is always the root).
    nodes: Vec<Node>,
    /// Sparse kind-specific attributes.
    pub attributes: Attributes,
    /// Text buffer (nodes reference ranges into this).
    text: String,
}

impl Default for DocTree {
    fn default() -> Self {
        Self::new(NodeKind::BodySection)
    }
}

impl DocTree {
    /// Create a new tree whose root has the given kind.
    pub fn new(root: NodeKind) -> Self {
        Self {
            nodes: vec![Node::new(root)],
            attributes: Attributes::new(),
            text: String::new(),
        }
    }

    /// Get the root node ID.
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    /// Get the number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the root has no children.
    pub fn is_empty(&self) -> bool {
        self.nodes[0].first_child.is_none()
    }

    /// Allocate a new node and return its ID.
    pub fn alloc_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Append text to the buffer and return the range.
    pub fn append_text(&mut self, text: &str) -> TextRange {
        let start = self.text.len() as u32;
        self.text.push_str(text);
        TextRange::new(start, text.len() as u32)
    }

    /// Get text from a range.
    pub fn text(&self, range: TextRange) -> &str {
        let start = range.start as usize;
        &self.text[start..range.end() as usize]
    }

    /// Text of a node, empty for anything but text nodes.
    pub fn node_text(&self, id: NodeId) -> &str {
        self.node(id).map(|n| self.text(n.text)).unwrap_or("")
    }

    /// Append a child node to a parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(child_node) = self.nodes.get_mut(child.0 as usize) {
            child_node.parent = Some(parent);
        }

        let Some(last) = self.nodes.get(parent.0 as usize).map(|n| n.last_child) else {
            return;
        };
        match last {
            Some(last) => self.nodes[last.0 as usize].next_sibling = Some(child),
            None => self.nodes[parent.0 as usize].first_child = Some(child),
        }
        self.nodes[parent.0 as usize].last_child = Some(child);
    }

    /// Allocate a node of `kind` and append it to `parent`.
    pub fn add(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = self.alloc_node(Node::new(kind));
        self.append_child(parent, id);
        id
    }

    /// Add a paragraph; `heading` 0 is body text, 1-6 a heading.
    pub fn add_paragraph(&mut self, parent: NodeId, heading: u8) -> NodeId {
        let id = self.add(parent, NodeKind::Paragraph);
        self.attributes.set_heading(id, heading);
        id
    }

    /// Add an unformatted text run.
    pub fn add_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.add_styled_text(parent, text, Vec::new())
    }

    /// Add a text run with attribute change indices.
    pub fn add_styled_text(
        &mut self,
        parent: NodeId,
        text: &str,
        runs: Vec<AttributeRun>,
    ) -> NodeId {
        let range = self.append_text(text);
        let id = self.alloc_node(Node::text(range));
        self.append_child(parent, id);
        self.attributes.set_runs(id, runs);
        id
    }

    pub fn add_list_item(&mut self, parent: NodeId, nesting: u32, glyph: GlyphType) -> NodeId {
        let id = self.add(parent, NodeKind::ListItem);
        self.attributes.set_list(id, ListInfo { nesting, glyph });
        id
    }

    pub fn add_image(&mut self, parent: NodeId, content_type: &str, bytes: Vec<u8>) -> NodeId {
        let id = self.add(parent, NodeKind::InlineImage);
        self.attributes.set_image(
            id,
            ImageBlob {
                content_type: content_type.to_string(),
                bytes,
            },
        );
        id
    }

    /// Add an equation function (`\frac`, `\sqrt`, ...) or symbol node.
    pub fn add_equation_part(&mut self, parent: NodeId, kind: NodeKind, code: &str) -> NodeId {
        let id = self.add(parent, kind);
        self.attributes.set_code(id, code);
        id
    }

    /// Iterate over children of a node.
    pub fn children(&self, parent: NodeId) -> ChildIter<'_> {
        let first_child = self
            .nodes
            .get(parent.0 as usize)
            .and_then(|n| n.first_child);
        ChildIter {
            tree: self,
            current: first_child,
        }
    }

    /// Number of direct children of a node.
    pub fn child_count(&self, parent: NodeId) -> usize {
        self.children(parent).count()
    }

    /// Iterate from a node up to the root, starting with the node itself.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            current: self.node(id).map(|_| id),
        }
    }
}

/// Iterator over children of a node.
pub struct ChildIter<'a> {
    tree: &'a DocTree,
    current: Option<NodeId>,
}

impl<'a> Iterator for ChildIter<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        self.current = self
            .tree
            .nodes
            .get(current.0 as usize)
            .and_then(|n| n.next_sibling);
        Some(current)
    }
}

/// Iterator over a node and its ancestors.
pub struct Ancestors<'a> {
    tree: &'a DocTree,
    current: Option<NodeId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        self.current = self.tree.node(current).and_then(|n| n.parent);
        Some(current)
    }
}
