//! Tree nodes.

use crate::element::ElementData;
use slotmap::new_key_type;
use smallvec::SmallVec;

new_key_type! {
    /// Handle to a node in a [`DomTree`](crate::DomTree).
    pub struct NodeId;
}

/// What a node holds.
#[derive(Clone, Debug)]
pub enum NodeData {
    /// The document root; holds `<html>`.
    Document,
    Element(ElementData),
}

/// One node: its payload plus its place in the tree.
#[derive(Clone, Debug)]
pub struct Node {
    pub data: NodeData,
    pub parent: Option<NodeId>,
    /// Children in document order.
    pub children: SmallVec<[NodeId; 4]>,
}

impl Node {
    pub(crate) fn document() -> Self {
        Self::with_data(NodeData::Document)
    }

    pub(crate) fn element(data: ElementData) -> Self {
        Self::with_data(NodeData::Element(data))
    }

    fn with_data(data: NodeData) -> Self {
        Self {
            data,
            parent: None,
            children: SmallVec::new(),
        }
    }

    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(elem) => Some(elem),
            NodeData::Document => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(elem) => Some(elem),
            NodeData::Document => None,
        }
    }
}
