//! The bottom-up calculation pass.

use wsp_catalog::{FixtureCatalog, PipeCatalog, PipeMaterial, display_size, interpolate_flow};
use wsp_core::units::{lpm, m, mm};
use wsp_core::{NodeId, round_to};
use wsp_network::{NetworkNode, NetworkTree, NodeKind, NodeResult, Totals};

use crate::demand::{Demand, auto_flow, own_totals};
use crate::error::EngineResult;
use crate::hydraulics::hazen_williams;
use crate::settings::DesignSettings;
use crate::sizing::select_size;

/// Bore assumed for a fixture connector whose size is not in the material's
/// table.
const FALLBACK_CONNECTOR_MM: f64 = 16.0;

/// Runs the per-node calculation against fixed catalogs and settings.
#[derive(Debug, Clone, Copy)]
pub struct Calculator<'a> {
    pipes: &'a PipeCatalog,
    fixtures: &'a FixtureCatalog,
    settings: &'a DesignSettings,
}

impl<'a> Calculator<'a> {
    /// Settings are validated here so a pass itself cannot fail.
    pub fn new(
        pipes: &'a PipeCatalog,
        fixtures: &'a FixtureCatalog,
        settings: &'a DesignSettings,
    ) -> EngineResult<Self> {
        settings.validate()?;
        Ok(Self {
            pipes,
            fixtures,
            settings,
        })
    }

    pub fn settings(&self) -> &DesignSettings {
        self.settings
    }

    /// Calculate `from` and its whole subtree, returning `from`'s totals.
    ///
    /// Children are finished before their parent: nodes are visited in
    /// reverse pre-order, so each parent sums already-final child totals.
    /// Cumulative fields are reset and must be refilled with
    /// [`calculate_cumulative_loss`](crate::calculate_cumulative_loss).
    pub fn calculate(&self, tree: &mut NetworkTree, from: NodeId) -> Totals {
        let order = tree.depth_first(from);
        tracing::debug!(nodes = order.len(), model = self.settings.demand_model.label(), "calculate");

        for &id in order.iter().rev() {
            let below: Totals = tree
                .children(id)
                .iter()
                .map(|&child| tree[child].result.total)
                .sum();
            let result = self.calculate_node(&tree[id], below);
            tree[id].result = result;
        }
        tree[from].result.total
    }

    fn calculate_node(&self, node: &NetworkNode, below: Totals) -> NodeResult {
        let settings = self.settings;
        let own = own_totals(node, &settings.demand_model, self.fixtures);
        let total = own + below;

        let mut demand = match node.input.fixed_flow_lpm {
            Some(flow) => Demand::fixed(flow),
            None => auto_flow(&total, &settings.demand_model, settings.flow_curve),
        };

        let material_code = node
            .input
            .material
            .clone()
            .unwrap_or_else(|| settings.default_material.clone());
        let material = self.pipes.material(&material_code);
        if material.is_none() {
            tracing::warn!(node = %node.key, material = %material_code, "unknown pipe material");
        }

        let manual = node.input.manual_size.as_deref();
        let sizing = select_size(material, manual, demand.flow_lpm, settings.max_velocity_mps);
        if let Some(label) = manual {
            demand.rationale.push_str(&format!(" [fixed size: {label}]"));
        }
        if sizing.size.is_out_of_range() {
            tracing::warn!(node = %node.key, flow_lpm = demand.flow_lpm, size = %sizing.size, "no size fits");
        }

        let head_loss_m = match sizing.inner_diameter_mm {
            Some(d) if demand.flow_lpm > 0.0 => {
                let length = node.input.length_m * settings.loss.fitting_ratio
                    + node.input.equivalent_length_m;
                let h = hazen_williams(
                    lpm(demand.flow_lpm),
                    mm(d),
                    settings.loss.hazen_williams_c,
                    m(length),
                );
                round_to(h.value, 3)
            }
            _ => 0.0,
        };

        let critical_inner_loss_m = if node.kind == NodeKind::System {
            self.connector_loss(node, material)
        } else {
            0.0
        };

        tracing::debug!(
            node = %node.key,
            flow_lpm = demand.flow_lpm,
            size = %sizing.size,
            head_loss_m,
            "node calculated"
        );

        NodeResult {
            own,
            total,
            flow_lpm: demand.flow_lpm,
            size: sizing.size,
            material: material.map_or(material_code, |m| m.code.clone()),
            inner_diameter_mm: sizing.inner_diameter_mm,
            velocity_mps: sizing.velocity_mps,
            head_loss_m,
            cum_head_loss_m: 0.0,
            cum_length_m: 0.0,
            is_manual_size: manual.is_some(),
            rationale: demand.rationale,
            critical_inner_loss_m,
        }
    }

    /// Worst single-fixture connector loss below a system node.
    ///
    /// Each attached fixture type is checked on its own: its own load units
    /// through the flow curve, its standard connection size in the node's
    /// material, over `inner_pipe_length · fitting_ratio`. The maximum is
    /// kept, not the sum.
    pub fn connector_loss(&self, node: &NetworkNode, material: Option<&PipeMaterial>) -> f64 {
        let loss = self.settings.loss;
        let length = m(node.input.inner_pipe_length_m * loss.fitting_ratio);

        node.input
            .fixtures
            .iter()
            .filter(|&(_, &qty)| qty > 0)
            .filter_map(|(key, _)| self.fixtures.get(key))
            .map(|spec| {
                let d = material
                    .and_then(|mat| {
                        mat.inner_diameter_mm(&display_size(spec.standard_size, mat.family))
                    })
                    .unwrap_or(FALLBACK_CONNECTOR_MM);
                let flow = interpolate_flow(spec.load_units, self.settings.flow_curve);
                hazen_williams(lpm(flow), mm(d), loss.hazen_williams_c, length).value
            })
            .fold(0.0, f64::max)
    }
}
