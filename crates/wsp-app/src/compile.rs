//! Compile flat project records into a calculation tree.

use wsp_network::{NetworkResult, NetworkTree, TreeBuilder};
use wsp_project::Project;

/// Build the tree for a project. Structural problems (dangling parents,
/// root count, cycles) surface here as errors.
pub fn compile_tree(project: &Project) -> NetworkResult<NetworkTree> {
    let mut builder = TreeBuilder::new();
    for record in &project.pipes {
        builder.add(
            record.id.as_str(),
            record.name.as_str(),
            record.kind,
            record.parent.as_deref(),
            record.to_input(),
        );
    }
    let tree = builder.build()?;
    tracing::debug!(nodes = tree.len(), "compiled tree");
    Ok(tree)
}
