//! Run-level design settings.
//!
//! Persisted as the `settings` section of a project; every field has a
//! default so a partial section deserializes.

use serde::{Deserialize, Serialize};
use wsp_catalog::FlowCurve;
use wsp_core::{WspResult, constants::HEAD_M_PER_MPA, ensure_finite, ensure_positive};

use crate::error::EngineResult;

/// Dwelling-count model: `low_coeff·N^low_exp` below `threshold`,
/// `high_coeff·N^high_exp` at or above it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DwellingParams {
    pub threshold: u32,
    pub low_coeff: f64,
    pub low_exp: f64,
    pub high_coeff: f64,
    pub high_exp: f64,
}

impl Default for DwellingParams {
    fn default() -> Self {
        Self {
            threshold: 10,
            low_coeff: 42.0,
            low_exp: 0.33,
            high_coeff: 19.0,
            high_exp: 0.67,
        }
    }
}

/// Person-count model: `c1·P^k1` up to `threshold` persons, `c2·P^k2` above.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonParams {
    pub threshold: u32,
    pub c1: f64,
    pub k1: f64,
    pub c2: f64,
    pub k2: f64,
}

impl Default for PersonParams {
    fn default() -> Self {
        Self {
            threshold: 30,
            c1: 26.0,
            k1: 0.36,
            c2: 13.0,
            k2: 0.56,
        }
    }
}

/// Fixture-count model for single-family houses: `coeff·N^exponent`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureCountParams {
    pub coeff: f64,
    pub exponent: f64,
}

impl Default for FixtureCountParams {
    fn default() -> Self {
        Self {
            coeff: 17.0,
            exponent: 0.475,
        }
    }
}

/// Which demand model derives flow. Exactly one is active per run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DemandModel {
    /// General buildings: total load units through a flow curve.
    #[default]
    LoadUnit,
    /// Apartment buildings sized by dwelling count.
    DwellingCount {
        #[serde(default)]
        params: DwellingParams,
    },
    /// Apartment buildings sized by occupant count.
    PersonCount {
        #[serde(default)]
        params: PersonParams,
    },
    /// Single-family houses sized by fixture count.
    FixtureCount {
        #[serde(default)]
        params: FixtureCountParams,
    },
}

impl DemandModel {
    pub fn dwelling() -> Self {
        DemandModel::DwellingCount {
            params: DwellingParams::default(),
        }
    }

    pub fn person() -> Self {
        DemandModel::PersonCount {
            params: PersonParams::default(),
        }
    }

    pub fn fixture_count() -> Self {
        DemandModel::FixtureCount {
            params: FixtureCountParams::default(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DemandModel::LoadUnit => "load_unit",
            DemandModel::DwellingCount { .. } => "dwelling_count",
            DemandModel::PersonCount { .. } => "person_count",
            DemandModel::FixtureCount { .. } => "fixture_count",
        }
    }

    fn validate(&self) -> WspResult<()> {
        match self {
            DemandModel::LoadUnit => {}
            DemandModel::DwellingCount { params } => {
                ensure_positive(params.low_coeff, "dwelling low coefficient")?;
                ensure_finite(params.low_exp, "dwelling low exponent")?;
                ensure_positive(params.high_coeff, "dwelling high coefficient")?;
                ensure_finite(params.high_exp, "dwelling high exponent")?;
            }
            DemandModel::PersonCount { params } => {
                ensure_positive(params.c1, "person C1")?;
                ensure_finite(params.k1, "person k1")?;
                ensure_positive(params.c2, "person C2")?;
                ensure_finite(params.k2, "person k2")?;
            }
            DemandModel::FixtureCount { params } => {
                ensure_positive(params.coeff, "fixture-count coefficient")?;
                ensure_finite(params.exponent, "fixture-count exponent")?;
            }
        }
        Ok(())
    }
}

/// Hazen-Williams parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LossParams {
    /// Roughness coefficient C.
    pub hazen_williams_c: f64,
    /// Multiplier on run length standing in for fittings.
    pub fitting_ratio: f64,
}

impl Default for LossParams {
    fn default() -> Self {
        Self {
            hazen_williams_c: 130.0,
            fitting_ratio: 1.2,
        }
    }
}

/// Unit in which terminal required pressure is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PressureUnit {
    #[default]
    MetersHead,
    Mpa,
}

impl PressureUnit {
    /// Required pressure expressed as metres of head.
    pub fn to_head_m(self, value: f64) -> f64 {
        match self {
            PressureUnit::MetersHead => value,
            PressureUnit::Mpa => value * HEAD_M_PER_MPA,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PumpParams {
    pub efficiency: f64,
    pub margin: f64,
}

impl Default for PumpParams {
    fn default() -> Self {
        Self {
            efficiency: 0.55,
            margin: 1.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignSettings {
    pub demand_model: DemandModel,
    pub flow_curve: FlowCurve,
    /// Material used by nodes without their own.
    pub default_material: String,
    pub max_velocity_mps: f64,
    pub loss: LossParams,
    pub pressure_unit: PressureUnit,
    pub pump: PumpParams,
}

impl Default for DesignSettings {
    fn default() -> Self {
        Self {
            demand_model: DemandModel::default(),
            flow_curve: FlowCurve::default(),
            default_material: "SGP-VB".to_string(),
            max_velocity_mps: 2.0,
            loss: LossParams::default(),
            pressure_unit: PressureUnit::default(),
            pump: PumpParams::default(),
        }
    }
}

impl DesignSettings {
    /// Reject values no pass can run with.
    pub fn validate(&self) -> EngineResult<()> {
        ensure_positive(self.max_velocity_mps, "max velocity")?;
        ensure_positive(self.loss.hazen_williams_c, "Hazen-Williams C")?;
        ensure_positive(self.loss.fitting_ratio, "fitting ratio")?;
        ensure_positive(self.pump.efficiency, "pump efficiency")?;
        ensure_positive(self.pump.margin, "pump margin")?;
        self.demand_model.validate()?;
        Ok(())
    }
}
