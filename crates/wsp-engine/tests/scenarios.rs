//! End-to-end passes over small networks.

use wsp_catalog::{FixtureCatalog, FixtureKey, FlowCurve, PipeCatalog, interpolate_flow};
use wsp_core::{Tolerances, nearly_equal};
use wsp_engine::{
    Calculator, DemandModel, DesignSettings, PumpSummary, calculate_cumulative_loss,
    find_critical_node, report_rows,
};
use wsp_network::{NetworkTree, NodeInput, NodeKind, TreeBuilder};

fn run(tree: &mut NetworkTree, settings: &DesignSettings) -> wsp_core::NodeId {
    let pipes = PipeCatalog::builtin();
    let fixtures = FixtureCatalog::builtin();
    let calc = Calculator::new(&pipes, &fixtures, settings).unwrap();
    let root = tree.root();
    calc.calculate(tree, root);
    calculate_cumulative_loss(tree, root);
    find_critical_node(tree, root, settings)
}

fn root_only() -> TreeBuilder {
    let mut b = TreeBuilder::new();
    b.add(
        "root",
        "Pump",
        NodeKind::Branch,
        None,
        NodeInput {
            length_m: 0.0,
            ..NodeInput::default()
        },
    );
    b
}

#[test]
fn single_tank_closet_unit() {
    let mut unit = NodeInput::default();
    unit.fixtures.insert(FixtureKey::private("大便器 (タンク)"), 1);
    let mut b = root_only();
    b.add("s1", "Unit", NodeKind::System, Some("root"), unit);
    let mut tree = b.build().unwrap();

    let settings = DesignSettings::default();
    let critical = run(&mut tree, &settings);

    let expected = interpolate_flow(3.0, FlowCurve::Tank);
    let s1 = tree.find("s1").unwrap();
    assert_eq!(tree[s1].result.flow_lpm, expected);
    assert_eq!(tree[tree.root()].result.flow_lpm, expected);
    assert!(tree[s1].result.size.catalog_label().is_some());
    assert!(tree[s1].result.velocity_mps <= settings.max_velocity_mps);
    assert_eq!(critical, s1);
}

#[test]
fn five_dwellings() {
    let mut b = root_only();
    b.add(
        "s1",
        "Block",
        NodeKind::System,
        Some("root"),
        NodeInput {
            dwelling_count: 5,
            ..NodeInput::default()
        },
    );
    let mut tree = b.build().unwrap();

    let settings = DesignSettings {
        demand_model: DemandModel::dwelling(),
        ..DesignSettings::default()
    };
    run(&mut tree, &settings);

    let s1 = tree.find("s1").unwrap();
    assert_eq!(tree[s1].result.flow_lpm, 42.0 * 5f64.powf(0.33));
    assert_eq!(tree[s1].result.rationale, "dwelling method (N<10) 5 dwellings");
}

#[test]
fn fixed_flow_ignores_fixture_list() {
    let mut input = NodeInput {
        fixed_flow_lpm: Some(50.0),
        ..NodeInput::default()
    };
    input.fixtures.insert(FixtureKey::public("大便器 (洗浄弁)"), 8);
    let mut b = root_only();
    b.add("s1", "Kitchen", NodeKind::System, Some("root"), input);
    let mut tree = b.build().unwrap();

    for model in [
        DemandModel::LoadUnit,
        DemandModel::dwelling(),
        DemandModel::person(),
        DemandModel::fixture_count(),
    ] {
        let settings = DesignSettings {
            demand_model: model,
            ..DesignSettings::default()
        };
        run(&mut tree, &settings);
        let s1 = tree.find("s1").unwrap();
        assert_eq!(tree[s1].result.flow_lpm, 50.0);
        assert!(tree[s1].result.rationale.contains("50"));
    }
}

#[test]
fn longer_sibling_is_critical() {
    let mut b = root_only();
    b.add("b", "Riser", NodeKind::Branch, Some("root"), NodeInput::default());
    for (key, length) in [("near", 2.0), ("far", 10.0)] {
        let mut input = NodeInput {
            length_m: length,
            ..NodeInput::default()
        };
        input.fixtures.insert(FixtureKey::private("洗面器"), 2);
        b.add(key, key, NodeKind::System, Some("b"), input);
    }
    let mut tree = b.build().unwrap();

    let critical = run(&mut tree, &DesignSettings::default());
    let near = tree.find("near").unwrap();
    let far = tree.find("far").unwrap();
    assert_eq!(tree[near].result.size, tree[far].result.size);
    assert!(tree[far].result.head_loss_m > tree[near].result.head_loss_m);
    assert_eq!(critical, far);
}

#[test]
fn manual_flag_beats_natural_critical() {
    let mut b = root_only();
    for (key, length) in [("a", 30.0), ("b", 2.0)] {
        let mut input = NodeInput {
            length_m: length,
            ..NodeInput::default()
        };
        input.fixtures.insert(FixtureKey::private("浴槽"), 3);
        b.add(key, key, NodeKind::System, Some("root"), input);
    }
    let mut tree = b.build().unwrap();
    let settings = DesignSettings::default();
    let a = tree.find("a").unwrap();
    let bb = tree.find("b").unwrap();
    assert_eq!(run(&mut tree, &settings), a);

    tree[bb].input.is_manual_critical = true;
    tree[bb].input.static_head_m = 1000.0;
    assert_eq!(run(&mut tree, &settings), bb);

    // flagged terminal still wins without the huge static head
    tree[bb].input.static_head_m = 0.0;
    assert_eq!(run(&mut tree, &settings), bb);
}

#[test]
fn sub_breakpoint_load_clamps_to_first_flow() {
    let mut b = root_only();
    b.add(
        "f1",
        "Hand basin",
        NodeKind::Fixture,
        Some("root"),
        NodeInput {
            fixture_type: Some(FixtureKey::public("手洗器")),
            ..NodeInput::default()
        },
    );
    let mut tree = b.build().unwrap();
    run(&mut tree, &DesignSettings::default());

    let f1 = tree.find("f1").unwrap();
    assert_eq!(tree[f1].result.total.load_units, 0.5);
    assert_eq!(tree[f1].result.flow_lpm, 16.8);
}

#[test]
fn pump_summary_and_rows_agree() {
    let mut b = root_only();
    b.add("b", "Riser", NodeKind::Branch, Some("root"), NodeInput::default());
    let mut top = NodeInput {
        length_m: 6.0,
        static_head_m: 9.0,
        required_pressure: 3.0,
        ..NodeInput::default()
    };
    top.fixtures.insert(FixtureKey::private("台所流し"), 1);
    top.fixtures.insert(FixtureKey::private("浴槽"), 1);
    b.add("top", "Top floor", NodeKind::System, Some("b"), top);
    let mut tree = b.build().unwrap();

    let settings = DesignSettings::default();
    let critical = run(&mut tree, &settings);
    let pump = PumpSummary::new(&tree, critical, &settings);

    let node = &tree[critical];
    let tol = Tolerances::default();
    assert!(nearly_equal(
        pump.total_head_m,
        node.result.cum_head_loss_m + 9.0 + 3.0 + node.result.critical_inner_loss_m,
        tol
    ));
    assert_eq!(pump.main_route_length_m, 2.0 + 6.0);
    assert!(pump.shaft_power_kw.is_some());

    let rows = report_rows(&tree);
    assert_eq!(rows.len(), 2);
    let last = rows.last().unwrap();
    assert_eq!(last.section, "Riser → Top floor");
    assert!(nearly_equal(last.cum_head_loss_m, pump.friction_loss_m, Tolerances { abs: 5e-4, rel: 0.0 }));
}
