//! Structural validation of records and linked nodes.

use std::collections::HashSet;
use wsp_core::NodeId;

use crate::builder::PendingNode;
use crate::error::{NetworkError, NetworkResult};
use crate::node::NetworkNode;

/// Check ids, parent references and root count. Returns the root's slot.
pub(crate) fn validate_records(pending: &[PendingNode]) -> NetworkResult<usize> {
    if pending.is_empty() {
        return Err(NetworkError::Empty);
    }

    let mut keys = HashSet::new();
    for p in pending {
        if !keys.insert(p.key.as_str()) {
            return Err(NetworkError::DuplicateId { id: p.key.clone() });
        }
    }

    for p in pending {
        if let Some(parent) = &p.parent {
            if !keys.contains(parent.as_str()) {
                return Err(NetworkError::DanglingParent {
                    id: p.key.clone(),
                    parent: parent.clone(),
                });
            }
        }
    }

    let roots: Vec<usize> = pending
        .iter()
        .enumerate()
        .filter(|(_, p)| p.parent.is_none())
        .map(|(i, _)| i)
        .collect();

    match roots.as_slice() {
        [] => Err(NetworkError::NoRoot),
        [root] => Ok(*root),
        many => Err(NetworkError::MultipleRoots {
            ids: many.iter().map(|&i| pending[i].key.clone()).collect(),
        }),
    }
}

/// Every node must be reachable from the root; anything else sits on a cycle.
pub(crate) fn validate_reachability(nodes: &[NetworkNode], root: NodeId) -> NetworkResult<()> {
    let mut seen = vec![false; nodes.len()];
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        if std::mem::replace(&mut seen[id.slot()], true) {
            continue;
        }
        stack.extend(nodes[id.slot()].children.iter().copied());
    }

    let unreachable: Vec<String> = nodes
        .iter()
        .filter(|n| !seen[n.id.slot()])
        .map(|n| n.key.clone())
        .collect();

    if unreachable.is_empty() {
        Ok(())
    } else {
        Err(NetworkError::Unreachable { ids: unreachable })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{NodeInput, NodeKind};

    fn pending(key: &str, parent: Option<&str>) -> PendingNode {
        PendingNode {
            key: key.into(),
            name: key.to_uppercase(),
            kind: NodeKind::Branch,
            parent: parent.map(str::to_string),
            input: NodeInput::default(),
        }
    }

    #[test]
    fn validate_empty() {
        assert_eq!(validate_records(&[]), Err(NetworkError::Empty));
    }

    #[test]
    fn validate_duplicate_id() {
        let records = [pending("root", None), pending("a", Some("root")), pending("a", Some("root"))];
        assert_eq!(
            validate_records(&records),
            Err(NetworkError::DuplicateId { id: "a".into() })
        );
    }

    #[test]
    fn validate_dangling_parent() {
        let records = [pending("root", None), pending("a", Some("ghost"))];
        assert!(matches!(
            validate_records(&records),
            Err(NetworkError::DanglingParent { .. })
        ));
    }

    #[test]
    fn validate_root_count() {
        let records = [pending("a", Some("b")), pending("b", Some("a"))];
        assert_eq!(validate_records(&records), Err(NetworkError::NoRoot));

        let records = [pending("r1", None), pending("r2", None)];
        assert_eq!(
            validate_records(&records),
            Err(NetworkError::MultipleRoots {
                ids: vec!["r1".into(), "r2".into()]
            })
        );

        let records = [pending("a", Some("root")), pending("root", None)];
        assert_eq!(validate_records(&records), Ok(1));
    }
}
