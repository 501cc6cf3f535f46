//! Node data: kind, design inputs, calculated results.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Add;
use wsp_catalog::FixtureKey;
use wsp_core::NodeId;

/// Role of a node in the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Pass-through branch point.
    Branch,
    /// Aggregated terminal: a dwelling unit or a group of fixtures.
    System,
    /// Single terminal fixture.
    Fixture,
}

impl NodeKind {
    pub fn label(self) -> &'static str {
        match self {
            NodeKind::Branch => "branch",
            NodeKind::System => "system",
            NodeKind::Fixture => "fixture",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Design inputs for one node and the pipe segment feeding it.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeInput {
    /// Fixture quantities (system nodes).
    pub fixtures: BTreeMap<FixtureKey, u32>,
    /// Single fixture type (fixture nodes).
    pub fixture_type: Option<FixtureKey>,
    pub dwelling_count: u32,
    pub person_count: u32,
    /// Fixed design flow overriding every demand model.
    pub fixed_flow_lpm: Option<f64>,
    pub length_m: f64,
    /// Extra length standing in for fitting losses.
    pub equivalent_length_m: f64,
    /// Pipe size override; `None` means automatic selection.
    pub manual_size: Option<String>,
    /// Material override; `None` means the run's default material.
    pub material: Option<String>,
    /// Elevation rise to this terminal.
    pub static_head_m: f64,
    /// Residual pressure required at this terminal, in the run's unit.
    pub required_pressure: f64,
    pub is_manual_critical: bool,
    /// Connector length from a system node to each of its fixtures.
    pub inner_pipe_length_m: f64,
}

impl Default for NodeInput {
    fn default() -> Self {
        Self {
            fixtures: BTreeMap::new(),
            fixture_type: None,
            dwelling_count: 0,
            person_count: 0,
            fixed_flow_lpm: None,
            length_m: 2.0,
            equivalent_length_m: 0.0,
            manual_size: None,
            material: None,
            static_head_m: 0.0,
            required_pressure: 0.0,
            is_manual_critical: false,
            inner_pipe_length_m: 2.0,
        }
    }
}

/// Load and occupancy counts, either for one node or summed over a subtree.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Totals {
    pub load_units: f64,
    pub dwellings: u32,
    pub persons: u32,
    pub fixtures: u32,
}

/// Counts saturate at `u32::MAX`.
impl Add for Totals {
    type Output = Totals;

    fn add(self, rhs: Totals) -> Totals {
        Totals {
            load_units: self.load_units + rhs.load_units,
            dwellings: self.dwellings.saturating_add(rhs.dwellings),
            persons: self.persons.saturating_add(rhs.persons),
            fixtures: self.fixtures.saturating_add(rhs.fixtures),
        }
    }
}

impl std::iter::Sum for Totals {
    fn sum<I: Iterator<Item = Totals>>(iter: I) -> Totals {
        iter.fold(Totals::default(), Add::add)
    }
}

/// Resolved pipe size for a segment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SizeLabel {
    /// Not calculated yet.
    #[default]
    Unsized,
    Catalog(String),
    /// No catalog size keeps velocity under the limit.
    OutOfRange,
    /// Flow exceeds every tabulated capacity.
    Oversized,
}

impl SizeLabel {
    pub fn catalog_label(&self) -> Option<&str> {
        match self {
            SizeLabel::Catalog(label) => Some(label),
            _ => None,
        }
    }

    pub fn is_out_of_range(&self) -> bool {
        matches!(self, SizeLabel::OutOfRange | SizeLabel::Oversized)
    }
}

impl fmt::Display for SizeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeLabel::Unsized => f.write_str("-"),
            SizeLabel::Catalog(label) => f.write_str(label),
            SizeLabel::OutOfRange => f.write_str("out-of-range"),
            SizeLabel::Oversized => f.write_str("out-of-range (oversized)"),
        }
    }
}

impl Serialize for SizeLabel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Values filled in by a calculation pass. Read-only to callers.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct NodeResult {
    /// This node's own contribution.
    pub own: Totals,
    /// Own contribution plus every descendant's.
    pub total: Totals,
    pub flow_lpm: f64,
    pub size: SizeLabel,
    /// Material code actually used.
    pub material: String,
    pub inner_diameter_mm: Option<f64>,
    pub velocity_mps: f64,
    pub head_loss_m: f64,
    pub cum_head_loss_m: f64,
    pub cum_length_m: f64,
    pub is_manual_size: bool,
    /// Human-readable account of how the flow was derived.
    pub rationale: String,
    /// Worst fixture-connector loss below a system node.
    pub critical_inner_loss_m: f64,
}

/// One node of the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkNode {
    pub id: NodeId,
    /// Caller-facing string id.
    pub key: String,
    pub name: String,
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub parent_name: String,
    pub children: Vec<NodeId>,
    pub input: NodeInput,
    pub result: NodeResult,
}

impl NetworkNode {
    pub fn is_terminal(&self) -> bool {
        self.children.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_add_and_sum() {
        let a = Totals {
            load_units: 1.5,
            dwellings: 1,
            persons: 2,
            fixtures: 3,
        };
        let b = Totals {
            load_units: 2.0,
            dwellings: 0,
            persons: 1,
            fixtures: 1,
        };
        let sum: Totals = [a, b].into_iter().sum();
        assert_eq!(sum, a + b);
        assert_eq!(sum.load_units, 3.5);
        assert_eq!(sum.fixtures, 4);
    }

    #[test]
    fn totals_counts_saturate() {
        let big = Totals {
            load_units: 1.0,
            dwellings: u32::MAX,
            persons: u32::MAX - 1,
            fixtures: u32::MAX,
        };
        let sum: Totals = [big, big, Totals::default()].into_iter().sum();
        assert_eq!(sum.dwellings, u32::MAX);
        assert_eq!(sum.persons, u32::MAX);
        assert_eq!(sum.fixtures, u32::MAX);
        assert_eq!(sum.load_units, 2.0);
    }

    #[test]
    fn size_label_display() {
        assert_eq!(SizeLabel::Unsized.to_string(), "-");
        assert_eq!(SizeLabel::Catalog("20A".into()).to_string(), "20A");
        assert_eq!(SizeLabel::OutOfRange.to_string(), "out-of-range");
        assert_eq!(
            SizeLabel::Oversized.to_string(),
            "out-of-range (oversized)"
        );
        assert!(SizeLabel::Oversized.is_out_of_range());
        assert_eq!(SizeLabel::Catalog("13Su".into()).catalog_label(), Some("13Su"));
    }

    #[test]
    fn default_input_matches_new_record_defaults() {
        let input = NodeInput::default();
        assert_eq!(input.length_m, 2.0);
        assert_eq!(input.inner_pipe_length_m, 2.0);
        assert!(input.fixed_flow_lpm.is_none());
    }
}
