//! Build a tree from flat parent-referencing records.

use std::collections::HashMap;
use wsp_core::NodeId;

use crate::error::NetworkResult;
use crate::node::{NetworkNode, NodeInput, NodeKind, NodeResult};
use crate::tree::NetworkTree;
use crate::validate;

/// A record waiting to be linked.
#[derive(Debug, Clone)]
pub(crate) struct PendingNode {
    pub key: String,
    pub name: String,
    pub kind: NodeKind,
    pub parent: Option<String>,
    pub input: NodeInput,
}

/// Builder for constructing a tree from records in any order.
///
/// Use `add` for each record, then call `build()` to validate and link
/// them. Children keep the order in which they were added.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    pending: Vec<PendingNode>,
}

impl TreeBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record and return the ID it will have in the built tree.
    pub fn add(
        &mut self,
        key: impl Into<String>,
        name: impl Into<String>,
        kind: NodeKind,
        parent: Option<&str>,
        input: NodeInput,
    ) -> NodeId {
        let id = NodeId::from_index(self.pending.len() as u32);
        self.pending.push(PendingNode {
            key: key.into(),
            name: name.into(),
            kind,
            parent: parent.map(str::to_string),
            input,
        });
        id
    }

    /// Validate and link the records into a [`NetworkTree`].
    ///
    /// An id -> slot map is built once and children are linked in a single
    /// pass over the records.
    pub fn build(self) -> NetworkResult<NetworkTree> {
        let root_slot = validate::validate_records(&self.pending)?;

        let by_key: HashMap<String, NodeId> = self
            .pending
            .iter()
            .enumerate()
            .map(|(i, p)| (p.key.clone(), NodeId::from_index(i as u32)))
            .collect();

        let mut nodes: Vec<NetworkNode> = self
            .pending
            .into_iter()
            .enumerate()
            .map(|(i, p)| NetworkNode {
                id: NodeId::from_index(i as u32),
                parent: p.parent.as_deref().and_then(|k| by_key.get(k).copied()),
                key: p.key,
                name: p.name,
                kind: p.kind,
                parent_name: String::new(),
                children: Vec::new(),
                input: p.input,
                result: NodeResult::default(),
            })
            .collect();

        for i in 0..nodes.len() {
            if let Some(parent) = nodes[i].parent {
                let child = nodes[i].id;
                let parent_name = nodes[parent.slot()].name.clone();
                nodes[parent.slot()].children.push(child);
                nodes[i].parent_name = parent_name;
            }
        }

        let root = NodeId::from_index(root_slot as u32);
        validate::validate_reachability(&nodes, root)?;

        for node in &nodes {
            if node.kind == NodeKind::Fixture && !node.children.is_empty() {
                tracing::warn!(node = %node.key, "fixture node has children; treated as a branch point");
            }
        }

        Ok(NetworkTree {
            nodes,
            root,
            by_key,
        })
    }
}
