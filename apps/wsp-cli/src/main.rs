use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use wsp_app::{AppResult, CalcOptions, CalculationOutcome, project_service, run_calculation};
use wsp_catalog::{FixtureCatalog, FlowCurve, PipeCatalog, builtin_presets, sample_curve};
use wsp_engine::{CriticalPathRow, DemandModel, ReportRow};

#[derive(Parser)]
#[command(name = "wsp-cli")]
#[command(about = "Water-supply pipe sizing: demand, pipe size, head loss and pump head", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate project file syntax and structure
    Validate {
        /// Path to the project file (.json, .yaml or .yml)
        project_path: PathBuf,
    },
    /// Run a full calculation and print every section
    Calc {
        /// Path to the project file
        project_path: PathBuf,
        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
        /// Override the project's demand model
        #[arg(long, value_enum)]
        model: Option<Model>,
        /// Override the default pipe material (e.g. SGP-VB, SU, VP)
        #[arg(long)]
        material: Option<String>,
        /// Override the maximum velocity in m/s
        #[arg(long)]
        max_velocity: Option<f64>,
    },
    /// Show the critical terminal, its path and the pump head
    Critical {
        /// Path to the project file
        project_path: PathBuf,
    },
    /// Print the simultaneous-flow curve
    Curve {
        /// Use the flush-valve curve instead of the tank curve
        #[arg(long)]
        flush_valve: bool,
    },
    /// List built-in pipe materials
    Materials,
    /// List built-in fixtures
    Fixtures,
    /// List built-in system presets
    Presets,
    /// Rewrite a project in the current format
    Migrate {
        /// Input project file (any supported version)
        input: PathBuf,
        /// Output project file; format follows the extension
        output: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Table,
    Json,
    Csv,
}

#[derive(Clone, Copy, ValueEnum)]
enum Model {
    LoadUnit,
    Dwelling,
    Person,
    FixtureCount,
}

impl From<Model> for DemandModel {
    fn from(model: Model) -> Self {
        match model {
            Model::LoadUnit => DemandModel::LoadUnit,
            Model::Dwelling => DemandModel::dwelling(),
            Model::Person => DemandModel::person(),
            Model::FixtureCount => DemandModel::fixture_count(),
        }
    }
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Calc {
            project_path,
            format,
            model,
            material,
            max_velocity,
        } => {
            let options = CalcOptions {
                demand_model: model.map(Into::into),
                default_material: material,
                max_velocity_mps: max_velocity,
            };
            cmd_calc(&project_path, format, &options)
        }
        Commands::Critical { project_path } => cmd_critical(&project_path),
        Commands::Curve { flush_valve } => {
            cmd_curve(if flush_valve {
                FlowCurve::FlushValve
            } else {
                FlowCurve::Tank
            });
            Ok(())
        }
        Commands::Materials => {
            cmd_materials();
            Ok(())
        }
        Commands::Fixtures => {
            cmd_fixtures();
            Ok(())
        }
        Commands::Presets => {
            cmd_presets();
            Ok(())
        }
        Commands::Migrate { input, output } => cmd_migrate(&input, &output),
    }
}

fn cmd_validate(project_path: &Path) -> AppResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = project_service::load_project(project_path)?;
    project_service::validate_project(&project)?;
    wsp_app::compile_tree(&project)?;
    let summary = project_service::summarize(&project);
    println!("✓ Project is valid");
    println!(
        "  {} (v{}): {} branches, {} systems, {} fixtures, {} fixture specs",
        summary.name,
        summary.version,
        summary.branch_count,
        summary.system_count,
        summary.fixture_count,
        summary.fixture_specs
    );
    Ok(())
}

fn cmd_calc(project_path: &Path, format: Format, options: &CalcOptions) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let outcome = run_calculation(&project, options)?;
    tracing::debug!(rows = outcome.rows.len(), "rendering report");

    match format {
        Format::Table => {
            println!(
                "Model: {}, curve: {}, default material: {}, max velocity: {} m/s",
                outcome.settings.demand_model.label(),
                outcome.settings.flow_curve.label(),
                outcome.settings.default_material,
                outcome.settings.max_velocity_mps
            );
            print_rows(&outcome.rows);
            println!();
            print_pump(&outcome);
        }
        Format::Json => {
            println!("{}", serde_json::to_string_pretty(&outcome.report())?);
        }
        Format::Csv => outcome.write_rows_csv(std::io::stdout().lock())?,
    }
    Ok(())
}

fn cmd_critical(project_path: &Path) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let outcome = run_calculation(&project, &CalcOptions::default())?;

    println!("Critical path: {}", outcome.critical_keys().join(" -> "));
    print_critical_rows(&outcome.critical_rows);
    println!();
    print_pump(&outcome);
    Ok(())
}

fn cmd_curve(curve: FlowCurve) {
    println!("Flow curve: {}", curve.label());
    println!("{:>10}  {:>10}", "LU", "L/min");
    for point in sample_curve(curve, 1.0, 342.0, 1.25) {
        println!("{:>10.1}  {:>10.1}", point.load_units, point.flow_lpm);
    }
}

fn cmd_materials() {
    let catalog = PipeCatalog::builtin();
    for material in catalog.materials() {
        let sizing = if material.is_capacity_sized() {
            "capacity"
        } else {
            "velocity"
        };
        println!(
            "{} - {} ({:?}, sized by {})",
            material.code, material.description, material.family, sizing
        );
        let sizes: Vec<String> = material
            .sizes
            .iter()
            .map(|s| format!("{} {}mm", s.label, s.inner_diameter_mm))
            .collect();
        println!("  {}", sizes.join(", "));
    }
}

fn cmd_fixtures() {
    let catalog = FixtureCatalog::builtin();
    println!("{:<24} {:>6} {:>6}", "Fixture", "LU", "Size");
    for (key, spec) in catalog.iter() {
        println!(
            "{:<24} {:>6} {:>6}",
            key.to_string(),
            spec.load_units,
            spec.standard_size
        );
    }
}

fn cmd_presets() {
    for preset in builtin_presets() {
        println!(
            "{} ({} persons, {} dwellings)",
            preset.name, preset.persons, preset.dwellings
        );
        for (key, qty) in preset.fixture_map() {
            println!("  {key} x{qty}");
        }
    }
}

fn cmd_migrate(input: &Path, output: &Path) -> AppResult<()> {
    let project = project_service::load_project(input)?;
    project_service::validate_project(&project)?;
    project_service::save_project(output, &project)?;
    println!(
        "✓ Wrote {} (version {})",
        output.display(),
        project.version
    );
    Ok(())
}

fn print_rows(rows: &[ReportRow]) {
    println!(
        "{:<32} {:<8} {:>9} {:<8} {:<18} {:>6} {:>7} {:>8} {:>8} {:>8}",
        "Section", "Kind", "L/min", "Material", "Size", "m/s", "L (m)", "Loss", "Cum", "Conn"
    );
    for row in rows {
        println!(
            "{:<32} {:<8} {:>9.1} {:<8} {:<18} {:>6.2} {:>7.2} {:>8.3} {:>8.3} {:>8.3}",
            row.section,
            row.kind.label(),
            row.flow_lpm,
            row.material,
            row.size.to_string(),
            row.velocity_mps,
            row.length_m,
            row.head_loss_m,
            row.cum_head_loss_m,
            row.connector_loss_m
        );
    }
}

fn print_critical_rows(rows: &[CriticalPathRow]) {
    println!(
        "{:<32} {:>9} {:<8} {:<18} {:>6} {:>5} {:>5} {:>7} {:>7} {:>8} {:>8} {:>8}",
        "Section", "L/min", "Material", "Size", "m/s", "C", "k", "L (m)", "Leq (m)", "Loss",
        "Cum", "Conn"
    );
    for row in rows {
        println!(
            "{:<32} {:>9.1} {:<8} {:<18} {:>6.2} {:>5} {:>5} {:>7.2} {:>7.2} {:>8.3} {:>8.3} {:>8.3}",
            row.section,
            row.flow_lpm,
            row.material,
            row.size.to_string(),
            row.velocity_mps,
            row.hazen_williams_c,
            row.fitting_ratio,
            row.length_m,
            row.equivalent_length_m,
            row.head_loss_m,
            row.cum_head_loss_m,
            row.connector_loss_m
        );
    }
}

fn print_pump(outcome: &CalculationOutcome) {
    let pump = &outcome.pump;
    let flag = if pump.is_manual_critical {
        " (manual)"
    } else {
        ""
    };
    println!("Critical terminal: {}{}", pump.terminal_name, flag);
    println!("  Friction loss:      {:>8.3} m", pump.friction_loss_m);
    println!("  Static head:        {:>8.3} m", pump.static_head_m);
    println!("  Required pressure:  {:>8.3} m", pump.required_pressure_head_m);
    println!("  Connector loss:     {:>8.3} m", pump.connector_loss_m);
    println!("  Total head:         {:>8.3} m", pump.total_head_m);
    println!("  Design flow:        {:>8.1} L/min", pump.flow_lpm);
    println!("  Main route length:  {:>8.2} m", pump.main_route_length_m);
    match pump.shaft_power_kw {
        Some(kw) => println!("  Shaft power:        {kw:>8.3} kW"),
        None => println!("  Shaft power:             - (no flow)"),
    }
}
