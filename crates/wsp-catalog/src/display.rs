//! Nominal connection size -> catalog size label.
//!
//! Fixture specs carry a standard connection size as a steel-style nominal
//! code (15, 20, 25, ...). Each material family labels its sizes
//! differently, so the code is remapped before it is looked up in a
//! material's table.

use crate::pipe::MaterialFamily;

/// Nominal code -> resin/stainless size number.
const RESIN_REMAP: &[(u32, &str)] = &[
    (15, "13"),
    (20, "20"),
    (25, "25"),
    (32, "30"),
    (40, "40"),
    (50, "50"),
];

fn remap(code: u32) -> Option<&'static str> {
    RESIN_REMAP
        .iter()
        .find(|(nominal, _)| *nominal == code)
        .map(|(_, label)| *label)
}

/// Display label for a nominal connection code within a material family.
///
/// Codes missing from the remap table degrade to a literal numeric label.
pub fn display_size(code: u32, family: MaterialFamily) -> String {
    match family {
        MaterialFamily::Steel | MaterialFamily::Other => format!("{code}A"),
        MaterialFamily::Pvc | MaterialFamily::Polyethylene => match remap(code) {
            Some(label) => label.to_string(),
            None => code.to_string(),
        },
        MaterialFamily::Stainless => match remap(code) {
            Some(label) => format!("{label}Su"),
            None => format!("{code}Su"),
        },
    }
}

/// Same as [`display_size`], inferring the family from a material code.
pub fn display_size_for(code: u32, material_code: &str) -> String {
    display_size(code, MaterialFamily::from_code(material_code))
}
