use wsp_app::{CalcOptions, load_project, run_calculation, save_project};
use wsp_catalog::find_preset;
use wsp_engine::DemandModel;
use wsp_network::NodeKind;
use wsp_project::{ROOT_ID, add_node, new_project, set_manual_critical};

fn apartment() -> wsp_project::Project {
    let mut project = new_project("Apartment");
    let preset = find_preset("ファミリー (3LDK)").unwrap();
    let riser = add_node(&mut project, NodeKind::Branch, ROOT_ID, None).unwrap();
    for floor in 1..=3 {
        let unit = add_node(&mut project, NodeKind::System, &riser, Some(preset)).unwrap();
        let record = project.record_mut(&unit).unwrap();
        record.static_head = 3.0 * f64::from(floor);
        record.length = 3.0;
    }
    project
}

#[test]
fn full_pass_on_apartment() {
    let project = apartment();
    let outcome = run_calculation(&project, &CalcOptions::default()).unwrap();

    // 3 units x (3 + 1 + 2 + 3 + 2 + 1) LU
    let root = outcome.tree.root();
    assert_eq!(outcome.tree[root].result.total.load_units, 36.0);
    assert_eq!(outcome.rows.len(), 4);

    // highest floor has the largest static head
    assert_eq!(outcome.tree[outcome.critical].key, "node_system_3");
    assert_eq!(outcome.critical_keys(), ["root", "node_branch_1", "node_system_3"]);
    assert_eq!(outcome.critical_rows.len(), 2);
    assert!(outcome.pump.total_head_m > 9.0);
    assert!(outcome.pump.shaft_power_kw.unwrap() > 0.0);

    let json = serde_json::to_value(outcome.report()).unwrap();
    assert_eq!(json["rows"].as_array().unwrap().len(), 4);
}

#[test]
fn manual_critical_and_model_override() {
    let mut project = apartment();
    set_manual_critical(&mut project, "node_system_1", true).unwrap();
    let options = CalcOptions {
        demand_model: Some(DemandModel::dwelling()),
        ..CalcOptions::default()
    };
    let outcome = run_calculation(&project, &options).unwrap();

    assert_eq!(outcome.tree[outcome.critical].key, "node_system_1");
    assert!(outcome.pump.is_manual_critical);
    let root = outcome.tree.root();
    assert_eq!(outcome.tree[root].result.total.dwellings, 3);
    assert_eq!(outcome.tree[root].result.flow_lpm, 42.0 * 3f64.powf(0.33));
}

#[test]
fn save_then_load_then_calculate() {
    let project = apartment();
    let path = std::env::temp_dir().join("wsp_app_smoke.yaml");
    save_project(&path, &project).unwrap();
    let loaded = load_project(&path).unwrap();
    let a = run_calculation(&project, &CalcOptions::default()).unwrap();
    let b = run_calculation(&loaded, &CalcOptions::default()).unwrap();
    assert_eq!(a.rows, b.rows);
}

#[test]
fn invalid_override_is_rejected() {
    let options = CalcOptions {
        max_velocity_mps: Some(-1.0),
        ..CalcOptions::default()
    };
    assert!(run_calculation(&apartment(), &options).is_err());
}

#[test]
fn legacy_material_override_still_has_friction() {
    let v2 = r#"{
  "version": 2,
  "pipes": [
    {"id": "root", "name": "ポンプ(始点)", "type": "branch", "parent": null, "length": 0.0},
    {"id": "node_system_1", "name": "系統-1", "type": "system", "parent": "root",
     "fixtures": {"浴槽 (私)": 2, "台所流し (私)": 1},
     "specific_pipe_type": "VP (硬質ポリ塩化ビニル管)", "length": 10.0}
  ],
  "fixture_specs": {}
}"#;
    let path = std::env::temp_dir().join("wsp_app_legacy_material.json");
    std::fs::write(&path, v2).unwrap();

    let project = load_project(&path).unwrap();
    let outcome = run_calculation(&project, &CalcOptions::default()).unwrap();
    let row = outcome.rows.iter().find(|r| r.to == "系統-1").unwrap();
    assert_eq!(row.material, "VP");
    assert!(row.size.catalog_label().is_some());
    assert!(row.velocity_mps > 0.0);
    assert!(row.head_loss_m > 0.0);
    assert!(outcome.pump.friction_loss_m > 0.0);
}

#[test]
fn csv_rows_quote_free_text_names() {
    let mut project = apartment();
    project.record_mut("node_system_1").unwrap().name = "Unit 101, \"east\"".to_string();
    let outcome = run_calculation(&project, &CalcOptions::default()).unwrap();

    let mut out = Vec::new();
    outcome.write_rows_csv(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next().unwrap(),
        "section,from,to,kind,flow_lpm,material,size,velocity_mps,length_m,head_loss_m,cum_head_loss_m,connector_loss_m"
    );
    assert_eq!(text.lines().count(), 1 + outcome.rows.len());
    assert!(text.contains(",\"Unit 101, \"\"east\"\"\",system,"));
}
