//! One full calculation pass over a project.

use serde::Serialize;
use wsp_catalog::{PipeCatalog, material_code};
use wsp_core::NodeId;
use wsp_engine::{
    Calculator, CriticalPathRow, DemandModel, DesignSettings, PumpSummary, ReportRow,
    calculate_cumulative_loss, critical_path, critical_path_rows, find_critical_node, report_rows,
};
use wsp_network::NetworkTree;
use wsp_project::Project;

use crate::compile::compile_tree;
use crate::error::AppResult;
use crate::project_service::validate_project;

/// Per-run overrides applied on top of the project's settings.
#[derive(Debug, Clone, Default)]
pub struct CalcOptions {
    pub demand_model: Option<DemandModel>,
    pub default_material: Option<String>,
    pub max_velocity_mps: Option<f64>,
}

impl CalcOptions {
    pub fn apply(&self, settings: &DesignSettings) -> DesignSettings {
        let mut settings = settings.clone();
        if let Some(model) = self.demand_model {
            settings.demand_model = model;
        }
        if let Some(material) = &self.default_material {
            settings.default_material = material_code(material).to_string();
        }
        if let Some(v) = self.max_velocity_mps {
            settings.max_velocity_mps = v;
        }
        settings
    }
}

/// Everything a front end renders after a pass.
#[derive(Debug, Clone)]
pub struct CalculationOutcome {
    pub settings: DesignSettings,
    pub tree: NetworkTree,
    pub critical: NodeId,
    pub critical_path: Vec<NodeId>,
    pub pump: PumpSummary,
    pub rows: Vec<ReportRow>,
    pub critical_rows: Vec<CriticalPathRow>,
}

/// Serializable view of an outcome for JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct OutcomeReport<'a> {
    pub pump: &'a PumpSummary,
    pub rows: &'a [ReportRow],
    pub critical_rows: &'a [CriticalPathRow],
}

impl CalculationOutcome {
    pub fn report(&self) -> OutcomeReport<'_> {
        OutcomeReport {
            pump: &self.pump,
            rows: &self.rows,
            critical_rows: &self.critical_rows,
        }
    }

    /// Write the section rows as CSV with a header line.
    pub fn write_rows_csv<W: std::io::Write>(&self, out: W) -> AppResult<()> {
        let mut writer = csv::Writer::from_writer(out);
        for row in &self.rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Keys of the nodes on the critical path, root first.
    pub fn critical_keys(&self) -> Vec<&str> {
        self.critical_path
            .iter()
            .map(|&id| self.tree[id].key.as_str())
            .collect()
    }
}

/// Validate, compile, calculate, accumulate and select the critical
/// terminal.
pub fn run_calculation(project: &Project, options: &CalcOptions) -> AppResult<CalculationOutcome> {
    validate_project(project)?;
    let settings = options.apply(&project.settings);
    let pipes = PipeCatalog::builtin();
    let fixtures = project.fixture_catalog();
    let calc = Calculator::new(&pipes, &fixtures, &settings)?;

    let mut tree = compile_tree(project)?;
    let root = tree.root();
    calc.calculate(&mut tree, root);
    calculate_cumulative_loss(&mut tree, root);
    let critical = find_critical_node(&tree, root, &settings);

    let pump = PumpSummary::new(&tree, critical, &settings);
    let rows = report_rows(&tree);
    let critical_rows = critical_path_rows(&tree, critical, &settings);
    let critical_path = critical_path(&tree, critical);
    tracing::info!(
        critical = %tree[critical].key,
        total_head_m = pump.total_head_m,
        flow_lpm = pump.flow_lpm,
        "calculation finished"
    );

    Ok(CalculationOutcome {
        settings,
        tree,
        critical,
        critical_path,
        pump,
        rows,
        critical_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_override_settings() {
        let base = DesignSettings::default();
        let options = CalcOptions {
            demand_model: Some(DemandModel::dwelling()),
            default_material: Some("SU (一般配管用ステンレス鋼管)".into()),
            max_velocity_mps: None,
        };
        let settings = options.apply(&base);
        assert_eq!(settings.demand_model, DemandModel::dwelling());
        assert_eq!(settings.default_material, "SU");
        assert_eq!(settings.max_velocity_mps, base.max_velocity_mps);
    }
}
