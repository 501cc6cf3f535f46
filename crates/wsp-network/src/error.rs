//! Tree construction errors.

use wsp_core::WspError;

pub type NetworkResult<T> = Result<T, NetworkError>;

/// Structural problems found while linking records into a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// No records were given.
    Empty,

    /// Two records share an id.
    DuplicateId { id: String },

    /// No record is parentless.
    NoRoot,

    /// More than one record is parentless.
    MultipleRoots { ids: Vec<String> },

    /// A record names a parent that does not exist.
    DanglingParent { id: String, parent: String },

    /// Records that cannot be reached from the root (they form a cycle).
    Unreachable { ids: Vec<String> },
}

impl std::fmt::Display for NetworkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkError::Empty => write!(f, "Network has no nodes"),
            NetworkError::DuplicateId { id } => write!(f, "Duplicate node id '{}'", id),
            NetworkError::NoRoot => write!(f, "Network has no root (every node has a parent)"),
            NetworkError::MultipleRoots { ids } => {
                write!(f, "Network has {} roots: {}", ids.len(), ids.join(", "))
            }
            NetworkError::DanglingParent { id, parent } => {
                write!(f, "Node '{}' refers to non-existent parent '{}'", id, parent)
            }
            NetworkError::Unreachable { ids } => {
                write!(
                    f,
                    "Nodes not reachable from the root (cycle): {}",
                    ids.join(", ")
                )
            }
        }
    }
}

impl std::error::Error for NetworkError {}

impl From<NetworkError> for WspError {
    fn from(err: NetworkError) -> Self {
        WspError::Invariant {
            what: err.to_string(),
        }
    }
}
