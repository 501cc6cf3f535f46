//! Pipe catalog: nominal size -> internal diameter per material.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{CatalogError, CatalogResult};

/// Material family, which decides how connection sizes are labelled and how
/// automatic sizing works.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialFamily {
    /// Carbon steel and lined steel (`15A`, `20A`, ...).
    Steel,
    /// Rigid PVC (`13`, `20`, ...).
    Pvc,
    /// Polyethylene (`13`, `20`, ...).
    Polyethylene,
    /// Stainless (`13Su`, `20Su`, ...).
    Stainless,
    Other,
}

impl MaterialFamily {
    /// Infer the family from a material code.
    ///
    /// Checked in order: `SGP`, then `VP`/`PE`, then `SU`.
    pub fn from_code(code: &str) -> Self {
        if code.contains("SGP") {
            MaterialFamily::Steel
        } else if code.contains("VP") {
            MaterialFamily::Pvc
        } else if code.contains("PE") {
            MaterialFamily::Polyethylene
        } else if code.contains("SU") {
            MaterialFamily::Stainless
        } else {
            MaterialFamily::Other
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipeSize {
    pub label: String,
    pub inner_diameter_mm: f64,
}

/// Maximum design flow for one size of a capacity-sized material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeCapacity {
    pub label: String,
    pub capacity_lpm: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipeMaterial {
    pub code: String,
    pub description: String,
    pub family: MaterialFamily,
    pub sizes: Vec<PipeSize>,
    /// Non-empty only for materials sized by tabulated capacity instead of
    /// by velocity.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub capacities: Vec<SizeCapacity>,
}

impl PipeMaterial {
    pub fn is_capacity_sized(&self) -> bool {
        !self.capacities.is_empty()
    }

    pub fn size(&self, label: &str) -> Option<&PipeSize> {
        self.sizes.iter().find(|s| s.label == label)
    }

    pub fn inner_diameter_mm(&self, label: &str) -> Option<f64> {
        self.size(label).map(|s| s.inner_diameter_mm)
    }

    /// Sizes in ascending internal-diameter order.
    pub fn sizes_by_diameter(&self) -> Vec<&PipeSize> {
        let mut sizes: Vec<&PipeSize> = self.sizes.iter().collect();
        sizes.sort_by(|a, b| a.inner_diameter_mm.total_cmp(&b.inner_diameter_mm));
        sizes
    }

    /// Capacity entries in ascending capacity order.
    pub fn capacities_ascending(&self) -> Vec<&SizeCapacity> {
        let mut caps: Vec<&SizeCapacity> = self.capacities.iter().collect();
        caps.sort_by(|a, b| a.capacity_lpm.total_cmp(&b.capacity_lpm));
        caps
    }

    fn validate(&self) -> CatalogResult<()> {
        for size in &self.sizes {
            if !(size.inner_diameter_mm.is_finite() && size.inner_diameter_mm > 0.0) {
                return Err(CatalogError::InvalidSize {
                    code: self.code.clone(),
                    label: size.label.clone(),
                    reason: "internal diameter must be finite and > 0",
                });
            }
        }
        for cap in &self.capacities {
            if !(cap.capacity_lpm.is_finite() && cap.capacity_lpm >= 0.0) {
                return Err(CatalogError::InvalidSize {
                    code: self.code.clone(),
                    label: cap.label.clone(),
                    reason: "capacity must be finite and >= 0",
                });
            }
        }
        Ok(())
    }
}

/// All materials available to a calculation. Read-only at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PipeMaterial>", into = "Vec<PipeMaterial>")]
pub struct PipeCatalog {
    materials: Vec<PipeMaterial>,
}

impl PipeCatalog {
    /// Build a catalog, checking codes are unique and diameters positive.
    pub fn new(materials: Vec<PipeMaterial>) -> CatalogResult<Self> {
        let mut seen = HashSet::new();
        for material in &materials {
            if !seen.insert(material.code.as_str()) {
                return Err(CatalogError::DuplicateMaterial {
                    code: material.code.clone(),
                });
            }
            material.validate()?;
        }
        Ok(Self { materials })
    }

    /// The built-in Japanese building-services catalog.
    pub fn builtin() -> Self {
        let materials = BUILTIN
            .iter()
            .map(|def| PipeMaterial {
                code: def.code.to_string(),
                description: def.description.to_string(),
                family: MaterialFamily::from_code(def.code),
                sizes: def
                    .sizes
                    .iter()
                    .map(|&(label, d)| PipeSize {
                        label: label.to_string(),
                        inner_diameter_mm: d,
                    })
                    .collect(),
                capacities: def
                    .capacities
                    .iter()
                    .map(|&(label, c)| SizeCapacity {
                        label: label.to_string(),
                        capacity_lpm: c,
                    })
                    .collect(),
            })
            .collect();
        Self { materials }
    }

    pub fn materials(&self) -> &[PipeMaterial] {
        &self.materials
    }

    /// Look up a material by code. Legacy `"<code> (<description>)"` names
    /// resolve to the same entry.
    pub fn material(&self, code: &str) -> Option<&PipeMaterial> {
        let code = material_code(code);
        self.materials.iter().find(|m| m.code == code)
    }

    pub fn inner_diameter_mm(&self, material: &str, size: &str) -> Option<f64> {
        self.material(material)?.inner_diameter_mm(size)
    }
}

/// Catalog code of a material name: `"VP (硬質ポリ塩化ビニル管)"` and `"VP"`
/// both give `"VP"`.
pub fn material_code(name: &str) -> &str {
    let name = name.trim();
    name.split_once(" (").map_or(name, |(code, _)| code.trim_end())
}

impl TryFrom<Vec<PipeMaterial>> for PipeCatalog {
    type Error = CatalogError;

    fn try_from(materials: Vec<PipeMaterial>) -> Result<Self, Self::Error> {
        Self::new(materials)
    }
}

impl From<PipeCatalog> for Vec<PipeMaterial> {
    fn from(catalog: PipeCatalog) -> Self {
        catalog.materials
    }
}

impl Default for PipeCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

struct MaterialDef {
    code: &'static str,
    description: &'static str,
    sizes: &'static [(&'static str, f64)],
    capacities: &'static [(&'static str, f64)],
}

const STEEL_SIZES_LINED: &[(&str, f64)] = &[
    ("15A", 14.7),
    ("20A", 20.2),
    ("25A", 26.2),
    ("32A", 34.2),
    ("40A", 39.9),
    ("50A", 51.0),
    ("65A", 65.5),
    ("80A", 78.1),
    ("100A", 103.1),
    ("125A", 127.6),
    ("150A", 151.0),
];

const STEEL_SIZES: &[(&str, f64)] = &[
    ("15A", 16.1),
    ("20A", 21.6),
    ("25A", 27.6),
    ("32A", 35.7),
    ("40A", 41.6),
    ("50A", 52.9),
    ("65A", 67.9),
    ("80A", 80.7),
    ("100A", 106.3),
    ("125A", 130.8),
    ("150A", 155.2),
];

const PVC_SIZES: &[(&str, f64)] = &[
    ("13", 13.0),
    ("16", 16.0),
    ("20", 20.0),
    ("25", 25.0),
    ("30", 31.0),
    ("40", 40.0),
    ("50", 51.0),
    ("65", 67.0),
    ("75", 77.0),
    ("100", 100.0),
    ("125", 125.0),
    ("150", 146.0),
];

const STAINLESS_SIZES: &[(&str, f64)] = &[
    ("13Su", 14.28),
    ("20Su", 20.22),
    ("25Su", 26.58),
    ("30Su", 31.6),
    ("40Su", 40.3),
    ("50Su", 46.2),
    ("60Su", 57.5),
    ("75Su", 73.3),
    ("80Su", 85.1),
    ("100Su", 110.3),
    ("125Su", 134.8),
    ("150Su", 159.2),
];

const STAINLESS_CAPACITIES: &[(&str, f64)] = &[
    ("13Su", 18.0),
    ("20Su", 45.0),
    ("25Su", 85.0),
    ("30Su", 120.0),
    ("40Su", 200.0),
    ("50Su", 320.0),
    ("60Su", 500.0),
    ("75Su", 900.0),
    ("80Su", 1100.0),
    ("100Su", 1900.0),
    ("125Su", 3000.0),
    ("150Su", 4500.0),
];

const PE_SIZES: &[(&str, f64)] = &[
    ("13", 14.5),
    ("20", 19.0),
    ("25", 25.0),
    ("30", 31.0),
    ("40", 36.0),
    ("50", 46.0),
    ("75", 71.8),
    ("100", 94.2),
];

const BUILTIN: &[MaterialDef] = &[
    MaterialDef {
        code: "SGP-VB",
        description: "硬質塩化ビニルライニング鋼管",
        sizes: STEEL_SIZES_LINED,
        capacities: &[],
    },
    MaterialDef {
        code: "SGP",
        description: "配管用炭素鋼鋼管",
        sizes: STEEL_SIZES,
        capacities: &[],
    },
    MaterialDef {
        code: "VP",
        description: "硬質ポリ塩化ビニル管",
        sizes: PVC_SIZES,
        capacities: &[],
    },
    MaterialDef {
        code: "HIVP",
        description: "耐衝撃性硬質塩化ビニル管",
        sizes: PVC_SIZES,
        capacities: &[],
    },
    MaterialDef {
        code: "SU",
        description: "一般配管用ステンレス鋼管",
        sizes: STAINLESS_SIZES,
        capacities: STAINLESS_CAPACITIES,
    },
    MaterialDef {
        code: "PE",
        description: "水道用ポリエチレン二層管1種",
        sizes: PE_SIZES,
        capacities: &[],
    },
];
