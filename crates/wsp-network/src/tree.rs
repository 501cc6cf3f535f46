//! Arena-backed rooted tree.

use std::collections::HashMap;
use std::ops::{Index, IndexMut};
use wsp_core::NodeId;

use crate::node::NetworkNode;

/// A validated, single-rooted pipe network.
///
/// Nodes live in one vector indexed by [`NodeId`]; children are kept in the
/// order their records were added, which fixes the depth-first order used
/// for tie-breaks and report rows.
#[derive(Debug, Clone)]
pub struct NetworkTree {
    pub(crate) nodes: Vec<NetworkNode>,
    pub(crate) root: NodeId,
    pub(crate) by_key: HashMap<String, NodeId>,
}

impl NetworkTree {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[NetworkNode] {
        &self.nodes
    }

    /// Get a node by ID (returns None if ID out of bounds).
    pub fn node(&self, id: NodeId) -> Option<&NetworkNode> {
        self.nodes.get(id.slot())
    }

    /// Look up a node by its caller-facing string id.
    pub fn find(&self, key: &str) -> Option<NodeId> {
        self.by_key.get(key).copied()
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Pre-order depth-first listing of `from` and its descendants.
    pub fn depth_first(&self, from: NodeId) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            order.push(id);
            // reversed so the first child is visited first
            stack.extend(self.children(id).iter().rev().copied());
        }
        order
    }

    /// Leaves under `from` (including `from` itself if it has no children),
    /// in depth-first order.
    pub fn terminals(&self, from: NodeId) -> Vec<NodeId> {
        self.depth_first(from)
            .into_iter()
            .filter(|&id| self[id].is_terminal())
            .collect()
    }

    /// Node ids from the root down to `id`, inclusive.
    pub fn path_from_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(cur) = current {
            path.push(cur);
            current = self.node(cur).and_then(|n| n.parent);
        }
        path.reverse();
        path
    }
}

/// Panics if the id did not come from this tree.
impl Index<NodeId> for NetworkTree {
    type Output = NetworkNode;

    fn index(&self, id: NodeId) -> &NetworkNode {
        &self.nodes[id.slot()]
    }
}

impl IndexMut<NodeId> for NetworkTree {
    fn index_mut(&mut self, id: NodeId) -> &mut NetworkNode {
        &mut self.nodes[id.slot()]
    }
}
