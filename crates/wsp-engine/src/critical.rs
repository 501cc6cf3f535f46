//! Critical terminal selection and pump sizing summary.

use serde::Serialize;
use wsp_core::NodeId;
use wsp_network::{NetworkNode, NetworkTree};

use crate::settings::{DesignSettings, PressureUnit};

/// Total head a terminal needs: cumulative friction, static lift, required
/// residual pressure and its worst connector loss.
pub fn effective_head(node: &NetworkNode, unit: PressureUnit) -> f64 {
    let r = &node.result;
    r.cum_head_loss_m
        + node.input.static_head_m
        + unit.to_head_m(node.input.required_pressure)
        + r.critical_inner_loss_m
}

/// The terminal under `from` with the greatest effective head.
///
/// If any terminal is flagged manual-critical only flagged terminals compete.
/// Ties go to the first in depth-first order. A childless `from` is its own
/// answer.
pub fn find_critical_node(tree: &NetworkTree, from: NodeId, settings: &DesignSettings) -> NodeId {
    let terminals = tree.terminals(from);
    let flagged: Vec<NodeId> = terminals
        .iter()
        .copied()
        .filter(|&id| tree[id].input.is_manual_critical)
        .collect();
    let candidates = if flagged.is_empty() { terminals } else { flagged };

    let mut best: Option<(NodeId, f64)> = None;
    for id in candidates {
        let head = effective_head(&tree[id], settings.pressure_unit);
        match best {
            Some((_, best_head)) if !(head > best_head) => {}
            _ => best = Some((id, head)),
        }
    }
    best.map_or(from, |(id, _)| id)
}

/// Node ids from the root down to `node`.
pub fn critical_path(tree: &NetworkTree, node: NodeId) -> Vec<NodeId> {
    tree.path_from_root(node)
}

/// Pump duty implied by a critical terminal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PumpSummary {
    pub terminal: String,
    pub terminal_name: String,
    pub is_manual_critical: bool,
    pub friction_loss_m: f64,
    pub static_head_m: f64,
    pub required_pressure_head_m: f64,
    pub connector_loss_m: f64,
    pub total_head_m: f64,
    /// Design flow at the root.
    pub flow_lpm: f64,
    /// Sum of segment lengths on the critical path, root excluded.
    pub main_route_length_m: f64,
    /// Estimated shaft power; `None` when there is no flow.
    pub shaft_power_kw: Option<f64>,
}

impl PumpSummary {
    pub fn new(tree: &NetworkTree, critical: NodeId, settings: &DesignSettings) -> Self {
        let node = &tree[critical];
        let root = tree.root();
        let friction_loss_m = node.result.cum_head_loss_m;
        let static_head_m = node.input.static_head_m;
        let required_pressure_head_m = settings.pressure_unit.to_head_m(node.input.required_pressure);
        let connector_loss_m = node.result.critical_inner_loss_m;
        let total_head_m = friction_loss_m + static_head_m + required_pressure_head_m + connector_loss_m;
        let flow_lpm = tree[root].result.flow_lpm;

        let main_route_length_m = critical_path(tree, critical)
            .into_iter()
            .filter(|&id| id != root)
            .map(|id| tree[id].input.length_m)
            .sum();

        let shaft_power_kw = (flow_lpm > 0.0).then(|| {
            let q_m3_per_min = flow_lpm / 1000.0;
            0.163 * q_m3_per_min * total_head_m * settings.pump.margin / settings.pump.efficiency
        });

        Self {
            terminal: node.key.clone(),
            terminal_name: node.name.clone(),
            is_manual_critical: node.input.is_manual_critical,
            friction_loss_m,
            static_head_m,
            required_pressure_head_m,
            connector_loss_m,
            total_head_m,
            flow_lpm,
            main_route_length_m,
            shaft_power_kw,
        }
    }
}
