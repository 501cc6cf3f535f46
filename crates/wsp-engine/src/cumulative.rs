//! Top-down accumulation of head loss and length.

use wsp_core::NodeId;
use wsp_network::NetworkTree;

/// Fill `cum_head_loss_m` and `cum_length_m` for `from` and its subtree.
///
/// Each node takes its parent's cumulative values plus its own; the root
/// starts from zero, so its cumulative values equal its own.
pub fn calculate_cumulative_loss(tree: &mut NetworkTree, from: NodeId) {
    for id in tree.depth_first(from) {
        let (loss_in, length_in) = match tree[id].parent {
            Some(parent) => {
                let p = &tree[parent].result;
                (p.cum_head_loss_m, p.cum_length_m)
            }
            None => (0.0, 0.0),
        };
        let node = &mut tree[id];
        node.result.cum_head_loss_m = loss_in + node.result.head_loss_m;
        node.result.cum_length_m = length_in + node.input.length_m;
    }
}
