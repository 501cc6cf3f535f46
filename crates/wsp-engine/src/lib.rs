//! wsp-engine: flow derivation, pipe sizing and head-loss calculation over a
//! pipe-network tree.
//!
//! One pass is `Calculator::calculate` (bottom-up totals, flow, size, loss),
//! then `calculate_cumulative_loss` (top-down), then `find_critical_node`.
//!
//! # Example
//!
//! ```
//! use wsp_catalog::{FixtureCatalog, FixtureKey, FlowCurve, PipeCatalog, interpolate_flow};
//! use wsp_engine::{Calculator, DesignSettings, calculate_cumulative_loss, find_critical_node};
//! use wsp_network::{NodeInput, NodeKind, TreeBuilder};
//!
//! let mut unit = NodeInput::default();
//! unit.fixtures.insert(FixtureKey::private("大便器 (タンク)"), 1);
//!
//! let mut builder = TreeBuilder::new();
//! builder.add("root", "Pump", NodeKind::Branch, None, NodeInput::default());
//! builder.add("s1", "Unit 101", NodeKind::System, Some("root"), unit);
//! let mut tree = builder.build().unwrap();
//!
//! let pipes = PipeCatalog::builtin();
//! let fixtures = FixtureCatalog::builtin();
//! let settings = DesignSettings::default();
//! let calc = Calculator::new(&pipes, &fixtures, &settings).unwrap();
//!
//! let root = tree.root();
//! calc.calculate(&mut tree, root);
//! calculate_cumulative_loss(&mut tree, root);
//! let critical = find_critical_node(&tree, root, &settings);
//!
//! assert_eq!(tree[critical].key, "s1");
//! assert_eq!(tree[root].result.flow_lpm, interpolate_flow(3.0, FlowCurve::Tank));
//! ```

pub mod calculate;
pub mod critical;
pub mod cumulative;
pub mod demand;
pub mod error;
pub mod hydraulics;
pub mod report;
pub mod settings;
pub mod sizing;

pub use calculate::Calculator;
pub use critical::{PumpSummary, critical_path, effective_head, find_critical_node};
pub use cumulative::calculate_cumulative_loss;
pub use demand::{Demand, auto_flow, own_totals};
pub use error::{EngineError, EngineResult};
pub use report::{CriticalPathRow, ReportRow, critical_path_rows, report_rows};
pub use settings::{
    DemandModel, DesignSettings, DwellingParams, FixtureCountParams, LossParams, PersonParams,
    PressureUnit, PumpParams,
};
pub use sizing::{Sizing, select_size};
