//! Per-node demand: own statistics and flow derivation.

use wsp_catalog::{FixtureCatalog, FlowCurve, interpolate_flow};
use wsp_network::{NetworkNode, NodeKind, Totals};

use crate::settings::DemandModel;

/// Flow chosen for a node plus how it was derived.
#[derive(Debug, Clone, PartialEq)]
pub struct Demand {
    pub flow_lpm: f64,
    pub rationale: String,
}

impl Demand {
    fn zero(rationale: &str) -> Self {
        Self {
            flow_lpm: 0.0,
            rationale: rationale.to_string(),
        }
    }

    pub fn fixed(flow_lpm: f64) -> Self {
        Self {
            flow_lpm,
            rationale: format!("fixed {flow_lpm} L/min"),
        }
    }
}

/// A node's own contribution, excluding descendants.
///
/// Fixture count includes keys missing from the catalog; load only counts
/// catalogued keys. A fixture node with a catalogued `fixture_type` counts
/// as exactly that one fixture. Dwellings and persons come from system nodes
/// and only under the model that uses them.
pub fn own_totals(node: &NetworkNode, model: &DemandModel, catalog: &FixtureCatalog) -> Totals {
    let mut load_units = 0.0;
    let mut fixtures: u32 = 0;
    for (key, &qty) in &node.input.fixtures {
        if qty == 0 {
            continue;
        }
        fixtures = fixtures.saturating_add(qty);
        match catalog.get(key) {
            Some(spec) => load_units += f64::from(qty) * spec.load_units,
            None => tracing::warn!(node = %node.key, fixture = %key, "fixture not in catalog"),
        }
    }

    if node.kind == NodeKind::Fixture {
        if let Some(spec) = node.input.fixture_type.as_ref().and_then(|k| catalog.get(k)) {
            load_units = spec.load_units;
            fixtures = 1;
        }
    }

    let is_system = node.kind == NodeKind::System;
    let dwellings = match model {
        DemandModel::DwellingCount { .. } if is_system => node.input.dwelling_count,
        _ => 0,
    };
    let persons = match model {
        DemandModel::PersonCount { .. } if is_system => node.input.person_count,
        _ => 0,
    };

    Totals {
        load_units,
        dwellings,
        persons,
        fixtures,
    }
}

/// Flow from subtree totals under the active model.
pub fn auto_flow(total: &Totals, model: &DemandModel, curve: FlowCurve) -> Demand {
    match model {
        DemandModel::LoadUnit => {
            let lu = total.load_units;
            if lu > 0.0 {
                Demand {
                    flow_lpm: interpolate_flow(lu, curve),
                    rationale: format!("load-unit method {lu} LU"),
                }
            } else {
                Demand::zero("0 LU")
            }
        }
        DemandModel::DwellingCount { params } => {
            let n = total.dwellings;
            if n == 0 {
                return Demand::zero("0 units");
            }
            let nf = f64::from(n);
            if n < params.threshold {
                Demand {
                    flow_lpm: params.low_coeff * nf.powf(params.low_exp),
                    rationale: format!("dwelling method (N<{}) {n} dwellings", params.threshold),
                }
            } else {
                Demand {
                    flow_lpm: params.high_coeff * nf.powf(params.high_exp),
                    rationale: format!("dwelling method (N>={}) {n} dwellings", params.threshold),
                }
            }
        }
        DemandModel::PersonCount { params } => {
            let p = total.persons;
            if p == 0 {
                return Demand::zero("0 units");
            }
            let (c, k) = if p <= params.threshold {
                (params.c1, params.k1)
            } else {
                (params.c2, params.k2)
            };
            Demand {
                flow_lpm: c * f64::from(p).powf(k),
                rationale: format!("person method {p} persons"),
            }
        }
        DemandModel::FixtureCount { params } => {
            let n = total.fixtures;
            if n == 0 {
                return Demand::zero("0 units");
            }
            Demand {
                flow_lpm: params.coeff * f64::from(n).powf(params.exponent),
                rationale: format!("fixture-count method {n} fixtures"),
            }
        }
    }
}
