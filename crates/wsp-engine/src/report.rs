//! Flattened per-section rows for tabular output.

use serde::Serialize;
use wsp_core::{NodeId, round_to};
use wsp_network::{NetworkNode, NetworkTree, NodeKind, SizeLabel};

use crate::critical::critical_path;
use crate::settings::DesignSettings;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    /// `"<parent> → <name>"`
    pub section: String,
    pub from: String,
    pub to: String,
    pub kind: NodeKind,
    pub flow_lpm: f64,
    pub material: String,
    pub size: SizeLabel,
    pub velocity_mps: f64,
    pub length_m: f64,
    pub head_loss_m: f64,
    pub cum_head_loss_m: f64,
    /// Zero for anything but system nodes.
    pub connector_loss_m: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriticalPathRow {
    pub section: String,
    pub flow_lpm: f64,
    pub material: String,
    pub size: SizeLabel,
    pub velocity_mps: f64,
    pub hazen_williams_c: f64,
    pub fitting_ratio: f64,
    pub length_m: f64,
    pub equivalent_length_m: f64,
    pub head_loss_m: f64,
    pub cum_head_loss_m: f64,
    pub connector_loss_m: f64,
}

fn section(node: &NetworkNode) -> String {
    format!("{} → {}", node.parent_name, node.name)
}

fn connector_loss(node: &NetworkNode) -> f64 {
    match node.kind {
        NodeKind::System => round_to(node.result.critical_inner_loss_m, 3),
        _ => 0.0,
    }
}

/// One row per non-root node, depth-first.
pub fn report_rows(tree: &NetworkTree) -> Vec<ReportRow> {
    let root = tree.root();
    tree.depth_first(root)
        .into_iter()
        .filter(|&id| id != root)
        .map(|id| {
            let node = &tree[id];
            let r = &node.result;
            ReportRow {
                section: section(node),
                from: node.parent_name.clone(),
                to: node.name.clone(),
                kind: node.kind,
                flow_lpm: round_to(r.flow_lpm, 1),
                material: r.material.clone(),
                size: r.size.clone(),
                velocity_mps: r.velocity_mps,
                length_m: node.input.length_m,
                head_loss_m: r.head_loss_m,
                cum_head_loss_m: round_to(r.cum_head_loss_m, 3),
                connector_loss_m: connector_loss(node),
            }
        })
        .collect()
}

/// Rows for the segments on the path from the root to `critical`.
pub fn critical_path_rows(
    tree: &NetworkTree,
    critical: NodeId,
    settings: &DesignSettings,
) -> Vec<CriticalPathRow> {
    let root = tree.root();
    critical_path(tree, critical)
        .into_iter()
        .filter(|&id| id != root)
        .map(|id| {
            let node = &tree[id];
            let r = &node.result;
            CriticalPathRow {
                section: section(node),
                flow_lpm: round_to(r.flow_lpm, 1),
                material: r.material.clone(),
                size: r.size.clone(),
                velocity_mps: r.velocity_mps,
                hazen_williams_c: settings.loss.hazen_williams_c,
                fitting_ratio: settings.loss.fitting_ratio,
                length_m: node.input.length_m,
                equivalent_length_m: node.input.equivalent_length_m,
                head_loss_m: r.head_loss_m,
                cum_head_loss_m: round_to(r.cum_head_loss_m, 3),
                connector_loss_m: connector_loss(node),
            }
        })
        .collect()
}
