//! Velocity and Hazen-Williams friction loss.

use std::f64::consts::PI;
use wsp_core::units::{Area, Length, Velocity, VolumeRate, m};

/// Mean velocity of `flow` through a circular bore.
pub fn velocity(flow: VolumeRate, inner_diameter: Length) -> Velocity {
    let radius = inner_diameter / 2.0;
    let area: Area = radius * radius * PI;
    flow / area
}

/// Hazen-Williams head loss:
/// `h = 10.666 · C^-1.852 · D^-4.87 · Q^1.852 · L`
/// with D in m, Q in m³/s and L the equivalent length in m.
///
/// Returns zero loss for zero flow or a non-positive diameter.
pub fn hazen_williams(
    flow: VolumeRate,
    inner_diameter: Length,
    c: f64,
    equivalent_length: Length,
) -> Length {
    let q = flow.value;
    let d = inner_diameter.value;
    if !(q > 0.0 && d > 0.0) {
        return m(0.0);
    }
    m(10.666 * c.powf(-1.852) * d.powf(-4.87) * q.powf(1.852) * equivalent_length.value)
}
