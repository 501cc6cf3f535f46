//! wsp-network: the pipe-network tree.
//!
//! Provides:
//! - Node kinds, per-node design inputs and calculated results
//! - Arena-backed rooted tree with traversal helpers
//! - A builder that links flat parent-referencing records in one pass and
//!   rejects structural problems (duplicate ids, dangling parents, zero or
//!   several roots, cycles)
//!
//! # Example
//!
//! ```
//! use wsp_network::{NodeInput, NodeKind, TreeBuilder};
//!
//! let mut builder = TreeBuilder::new();
//! builder.add("root", "Pump", NodeKind::Branch, None, NodeInput::default());
//! builder.add("s1", "Unit 101", NodeKind::System, Some("root"), NodeInput::default());
//! let tree = builder.build().unwrap();
//!
//! assert_eq!(tree.len(), 2);
//! assert_eq!(tree.terminals(tree.root()).len(), 1);
//! ```

pub mod builder;
pub mod error;
pub mod node;
pub mod tree;
pub(crate) mod validate;

pub use builder::TreeBuilder;
pub use error::{NetworkError, NetworkResult};
pub use node::{NetworkNode, NodeInput, NodeKind, NodeResult, SizeLabel, Totals};
pub use tree::NetworkTree;
