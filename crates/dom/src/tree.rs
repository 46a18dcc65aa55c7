//! Node arena and tree structure.

use crate::element::ElementData;
use crate::node::{Node, NodeId};
use slotmap::SlotMap;

/// Arena-backed node tree rooted at a document node.
///
/// Nodes are created detached and stay in the arena until [`DomTree::remove`]
/// drops them together with their subtree.
pub struct DomTree {
    nodes: SlotMap<NodeId, Node>,
    root: NodeId,
}

impl DomTree {
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::document());
        Self { nodes, root }
    }

    /// The document node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn get_element(&self, id: NodeId) -> Option<&ElementData> {
        self.nodes.get(id).and_then(Node::as_element)
    }

    pub fn get_element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.nodes.get_mut(id).and_then(Node::as_element_mut)
    }

    pub fn create_element(&mut self, data: ElementData) -> NodeId {
        self.nodes.insert(Node::element(data))
    }

    /// Make `child` the last child of `parent`, detaching it from wherever
    /// it was. Unknown nodes and moves that would create a cycle are ignored.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) {
            return;
        }
        if parent == child || self.ancestors(parent).any(|a| a == child) {
            return;
        }

        self.detach(child);
        self.nodes[parent].children.push(child);
        self.nodes[child].parent = Some(parent);
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node].parent.take() {
            self.nodes[parent].children.retain(|c| *c != node);
        }
    }

    /// Drop `node` and its subtree. Returns every dropped id, `node` first.
    pub fn remove(&mut self, node: NodeId) -> Vec<NodeId> {
        if node == self.root || !self.nodes.contains_key(node) {
            return Vec::new();
        }
        self.detach(node);

        let mut removed = vec![node];
        removed.extend(self.descendants(node));
        for &id in &removed {
            self.nodes.remove(id);
        }
        removed
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(|n| n.parent)
    }

    pub fn children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .get(node)
            .into_iter()
            .flat_map(|n| n.children.iter().copied())
    }

    pub fn last_child(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(|n| n.children.last().copied())
    }

    /// Ancestors of `node`, nearest first, ending at the root.
    pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(node), move |&n| self.parent(n))
    }

    /// Descendants of `node` in document order (pre-order), excluding `node`.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).collect();
        stack.reverse();
        while let Some(current) = stack.pop() {
            out.push(current);
            let start = stack.len();
            stack.extend(self.children(current));
            stack[start..].reverse();
        }
        out
    }

    /// First connected element whose `id` attribute is `id`.
    pub fn find_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|&n| self.get_element(n).and_then(|e| e.id()) == Some(id))
    }

    /// Connected elements carrying every class in `class_names`.
    pub fn find_elements_by_class_name(&self, class_names: &str) -> Vec<NodeId> {
        let wanted: Vec<&str> = class_names.split_whitespace().collect();
        if wanted.is_empty() {
            return Vec::new();
        }
        self.descendants(self.root)
            .into_iter()
            .filter(|&n| {
                self.get_element(n)
                    .is_some_and(|e| wanted.iter().all(|c| e.has_class(c)))
            })
            .collect()
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}
