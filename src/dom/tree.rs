//! Element-only tag tree.

use core::fmt;
use scraper::{ElementRef, Html};
use std::collections::VecDeque;

/// A single element in a [`TagTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagNode {
    /// Index of this node in the tree's arena.
    pub id: usize,
    /// Lowercased tag name.
    pub tag: String,
    /// Depth in tree (0 = root).
    pub depth: usize,
    /// Child node IDs, in document order.
    pub children: Vec<usize>,
}

impl TagNode {
    fn new(id: usize, tag: String, depth: usize) -> Self {
        Self {
            id,
            tag,
            depth,
            children: Vec::new(),
        }
    }
}

/// Rooted tree of element tags, stored as an arena in breadth-first order.
///
/// Only element nodes are kept. Text, comments, doctypes and processing
/// instructions are dropped, and attributes are ignored.
///
/// Parsing never fails: malformed markup is repaired the way browsers repair
/// it (implied `<html>`, `<head>`, `<body>` and `<tbody>`, auto-closed
/// elements, stray end tags ignored). An empty string still yields
/// `html > (head, body)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagTree {
    nodes: Vec<TagNode>,
}

impl TagTree {
    /// Parse a full HTML document.
    pub fn parse(html: &str) -> Self {
        let doc = Html::parse_document(html);
        Self::from_element(doc.root_element())
    }

    /// Build a tree rooted at an already-parsed element.
    pub fn from_element(root: ElementRef<'_>) -> Self {
        let mut nodes = vec![TagNode::new(0, tag_name(&root), 0)];
        let mut queue = VecDeque::from([(root, 0usize)]);

        while let Some((element, id)) = queue.pop_front() {
            let depth = nodes[id].depth + 1;
            for child in element.children().filter_map(ElementRef::wrap) {
                let child_id = nodes.len();
                nodes.push(TagNode::new(child_id, tag_name(&child), depth));
                nodes[id].children.push(child_id);
                queue.push_back((child, child_id));
            }
        }

        Self { nodes }
    }

    /// The root element (usually `html`).
    pub fn root(&self) -> &TagNode {
        &self.nodes[0]
    }

    /// Get a node by ID.
    pub fn get(&self, id: usize) -> Option<&TagNode> {
        self.nodes.get(id)
    }

    /// Iterate over children of a node.
    pub fn children(&self, id: usize) -> impl Iterator<Item = &TagNode> {
        self.nodes
            .get(id)
            .into_iter()
            .flat_map(move |node| node.children.iter().map(move |&c| &self.nodes[c]))
    }

    /// Iterate over all nodes in breadth-first order.
    pub fn iter(&self) -> impl Iterator<Item = &TagNode> {
        self.nodes.iter()
    }

    /// Number of layers (deepest depth + 1).
    pub fn n_layers(&self) -> usize {
        // BFS order: the last node is among the deepest.
        self.nodes.last().map_or(0, |node| node.depth + 1)
    }
}

impl fmt::Display for TagTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![0usize];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            writeln!(f, "{:indent$}{}", "", node.tag, indent = node.depth * 2)?;
            stack.extend(node.children.iter().rev());
        }
        Ok(())
    }
}

fn tag_name(element: &ElementRef<'_>) -> String {
    // html5ever lowercases HTML tags but keeps SVG/MathML camelCase names.
    element.value().name().to_ascii_lowercase()
}
