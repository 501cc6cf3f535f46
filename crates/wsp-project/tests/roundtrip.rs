use wsp_catalog::find_preset;
use wsp_engine::DemandModel;
use wsp_network::NodeKind;
use wsp_project::*;

fn sample_project() -> Project {
    let mut project = new_project("Roundtrip");
    let riser = add_node(&mut project, NodeKind::Branch, ROOT_ID, None).unwrap();
    let preset = find_preset("単身住戸 (1R)").unwrap();
    let unit = add_node(&mut project, NodeKind::System, &riser, Some(preset)).unwrap();
    add_node(&mut project, NodeKind::Fixture, &riser, None).unwrap();
    set_manual_critical(&mut project, &unit, true).unwrap();
    project.settings.demand_model = DemandModel::person();
    project.settings.default_material = "VP".to_string();
    project
}

#[test]
fn roundtrip_json() {
    let project = sample_project();
    let path = std::env::temp_dir().join("wsp_project_roundtrip.json");

    save(&path, &project).unwrap();
    let loaded = load(&path).unwrap();

    assert_eq!(project, loaded);
}

#[test]
fn roundtrip_yaml() {
    let project = sample_project();
    let path = std::env::temp_dir().join("wsp_project_roundtrip.yaml");

    save_yaml(&path, &project).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(project, loaded);
}

#[test]
fn unknown_extension_is_rejected() {
    let path = std::env::temp_dir().join("wsp_project_roundtrip.toml");
    assert!(matches!(
        save(&path, &sample_project()),
        Err(ProjectError::UnsupportedFormat { .. })
    ));
}

#[test]
fn legacy_array_file_loads() {
    let legacy = r#"[
  {"id": "root", "name": "ポンプ(始点)", "type": "branch", "parent": null, "fixtures": {},
   "manual_size": null, "dwelling_count": 0, "person_count": 0, "specific_pipe_type": null,
   "length": 0.0, "is_fixed_flow": false, "fixed_flow_val": 0.0, "is_manual_critical": false,
   "static_head": 0.0, "required_pressure": 0.0, "equivalent_length": 0.0,
   "inner_pipe_length": 2.0, "fixture_type": null},
  {"id": "node_system_1", "name": "系統-1", "type": "system", "parent": "root",
   "fixtures": {"大便器 (タンク) (私)": 1, "洗面器 (私)": 1}, "manual_size": "自動計算",
   "dwelling_count": 1, "person_count": 1, "specific_pipe_type": "SU",
   "length": 5.5, "is_fixed_flow": false, "fixed_flow_val": 0.0, "is_manual_critical": false,
   "static_head": 3.0, "required_pressure": 0.1, "equivalent_length": 1.0,
   "inner_pipe_length": 2.0, "fixture_type": null}
]"#;
    let path = std::env::temp_dir().join("wsp_project_legacy.json");
    std::fs::write(&path, legacy).unwrap();

    let project = load(&path).unwrap();
    assert_eq!(project.version, LATEST_VERSION);
    assert_eq!(project.pipes.len(), 2);
    let unit = project.record("node_system_1").unwrap();
    assert_eq!(unit.manual_size, None);
    assert_eq!(unit.specific_pipe_type.as_deref(), Some("SU"));
    assert_eq!(unit.fixtures.values().sum::<u32>(), 2);
    assert!(!project.fixture_specs.is_empty());
}

#[test]
fn v2_file_with_legacy_material_and_other_fixture_loads() {
    let v2 = r#"{
  "version": 2,
  "pipes": [
    {"id": "root", "name": "ポンプ(始点)", "type": "branch", "parent": null, "length": 0.0,
     "specific_pipe_type": "(基本)"},
    {"id": "node_system_1", "name": "系統-1", "type": "system", "parent": "root",
     "fixtures": {"浴槽 (私)": 2, "台所流し (私)": 1, "散水栓": 1},
     "specific_pipe_type": "VP (硬質ポリ塩化ビニル管)", "length": 10.0}
  ],
  "fixture_specs": {
    "浴槽 (私)": {"lu": 2.0, "size_a": 20},
    "台所流し (私)": {"lu": 3.0, "size_a": 20},
    "散水栓": {"lu": 2.0, "size_a": 20}
  }
}"#;
    let path = std::env::temp_dir().join("wsp_project_legacy_v2.json");
    std::fs::write(&path, v2).unwrap();

    let project = load(&path).unwrap();
    assert_eq!(project.version, LATEST_VERSION);
    assert_eq!(project.record(ROOT_ID).unwrap().specific_pipe_type, None);
    let unit = project.record("node_system_1").unwrap();
    assert_eq!(unit.specific_pipe_type.as_deref(), Some("VP"));

    let hose = wsp_catalog::FixtureKey::other("散水栓");
    assert_eq!(unit.fixtures.get(&hose), Some(&1));
    assert_eq!(project.fixture_specs.get(&hose).unwrap().load_units, 2.0);

    // saved form keeps the bare key
    let out = std::env::temp_dir().join("wsp_project_legacy_v2_out.json");
    save(&out, &project).unwrap();
    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.contains("\"散水栓\""));
    assert_eq!(load(&out).unwrap(), project);
}

#[test]
fn malformed_file_reports_the_parse_error() {
    let bad = r#"{"version": 2, "pipes": [{"id": "root", "name": "P", "type": "branch", "length": "long"}]}"#;
    let path = std::env::temp_dir().join("wsp_project_malformed.json");
    std::fs::write(&path, bad).unwrap();

    let err = load(&path).unwrap_err().to_string();
    assert!(err.contains("invalid type"), "{err}");
    assert!(!err.contains("untagged"), "{err}");
}

#[test]
fn invalid_project_is_not_saved() {
    let mut project = sample_project();
    project.pipes[1].parent = Some("nowhere".into());
    let path = std::env::temp_dir().join("wsp_project_invalid.json");
    assert!(matches!(
        save_json(&path, &project),
        Err(ProjectError::Validation(_))
    ));
}
