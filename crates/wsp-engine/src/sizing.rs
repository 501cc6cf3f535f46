//! Pipe size selection.

use wsp_catalog::PipeMaterial;
use wsp_core::round_to;
use wsp_core::units::{lpm, mm};
use wsp_network::SizeLabel;

use crate::hydraulics::velocity;

/// Outcome of size selection for one segment.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sizing {
    pub size: SizeLabel,
    /// Catalog bore used for loss, if one was resolved.
    pub inner_diameter_mm: Option<f64>,
    /// Rounded to 2 decimals.
    pub velocity_mps: f64,
}

fn rounded_velocity(flow_lpm: f64, inner_diameter_mm: f64) -> f64 {
    round_to(velocity(lpm(flow_lpm), mm(inner_diameter_mm)).value, 2)
}

/// Choose a size for `flow_lpm`.
///
/// A manual size is adopted as given. Otherwise capacity-sized materials take
/// the first size whose tabulated capacity covers the flow, and every other
/// material takes the smallest bore that keeps velocity within
/// `max_velocity_mps`. An unknown material (`None`) yields no bore.
pub fn select_size(
    material: Option<&PipeMaterial>,
    manual_size: Option<&str>,
    flow_lpm: f64,
    max_velocity_mps: f64,
) -> Sizing {
    match (manual_size, material) {
        (Some(label), _) => select_manual(material, label, flow_lpm),
        (None, Some(mat)) if mat.is_capacity_sized() => select_by_capacity(mat, flow_lpm),
        (None, _) => select_by_velocity(material, flow_lpm, max_velocity_mps),
    }
}

fn select_manual(material: Option<&PipeMaterial>, label: &str, flow_lpm: f64) -> Sizing {
    let inner_diameter_mm = material.and_then(|mat| mat.inner_diameter_mm(label));
    let velocity_mps = match inner_diameter_mm {
        Some(d) if flow_lpm > 0.0 => rounded_velocity(flow_lpm, d),
        _ => 0.0,
    };
    Sizing {
        size: SizeLabel::Catalog(label.to_string()),
        inner_diameter_mm,
        velocity_mps,
    }
}

fn select_by_capacity(material: &PipeMaterial, flow_lpm: f64) -> Sizing {
    let Some(fit) = material
        .capacities_ascending()
        .into_iter()
        .find(|cap| flow_lpm <= cap.capacity_lpm)
    else {
        let size = if flow_lpm > 0.0 {
            SizeLabel::Oversized
        } else {
            SizeLabel::OutOfRange
        };
        return Sizing {
            size,
            ..Sizing::default()
        };
    };

    let inner_diameter_mm = material.inner_diameter_mm(&fit.label);
    Sizing {
        size: SizeLabel::Catalog(fit.label.clone()),
        inner_diameter_mm,
        velocity_mps: inner_diameter_mm.map_or(0.0, |d| rounded_velocity(flow_lpm, d)),
    }
}

fn select_by_velocity(material: Option<&PipeMaterial>, flow_lpm: f64, max_velocity_mps: f64) -> Sizing {
    let Some(material) = material else {
        return Sizing {
            size: SizeLabel::OutOfRange,
            ..Sizing::default()
        };
    };

    for size in material.sizes_by_diameter() {
        let v = velocity(lpm(flow_lpm), mm(size.inner_diameter_mm)).value;
        if v <= max_velocity_mps {
            return Sizing {
                size: SizeLabel::Catalog(size.label.clone()),
                inner_diameter_mm: Some(size.inner_diameter_mm),
                velocity_mps: round_to(v, 2),
            };
        }
    }

    Sizing {
        size: SizeLabel::OutOfRange,
        ..Sizing::default()
    }
}
