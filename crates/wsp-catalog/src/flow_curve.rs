//! Simultaneous-use flow curves.
//!
//! Two fixed monotonic tables map a total load-unit value to a design flow
//! rate in L/min: one for networks whose water closets use flush valves and
//! one for tank-type closets.

use serde::{Deserialize, Serialize};

/// Which demand curve applies to a load-unit lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowCurve {
    /// Curve 1: flush-valve closets.
    FlushValve,
    /// Curve 2: tank-type closets.
    #[default]
    Tank,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlowPoint {
    pub load_units: f64,
    pub flow_lpm: f64,
}

const fn fp(load_units: f64, flow_lpm: f64) -> FlowPoint {
    FlowPoint {
        load_units,
        flow_lpm,
    }
}

const FLUSH_VALVE_POINTS: [FlowPoint; 18] = [
    fp(1.0, 93.9),
    fp(2.0, 96.2),
    fp(5.0, 102.9),
    fp(10.0, 113.8),
    fp(15.0, 124.4),
    fp(20.0, 134.5),
    fp(30.0, 153.9),
    fp(40.0, 172.0),
    fp(50.0, 188.9),
    fp(60.0, 204.7),
    fp(80.0, 233.3),
    fp(100.0, 258.3),
    fp(120.0, 280.4),
    fp(150.0, 309.0),
    fp(200.0, 348.0),
    fp(250.0, 380.7),
    fp(300.0, 410.7),
    fp(342.0, 435.7),
];

const TANK_POINTS: [FlowPoint; 18] = [
    fp(1.0, 16.8),
    fp(2.0, 18.8),
    fp(5.0, 24.9),
    fp(10.0, 34.8),
    fp(15.0, 44.3),
    fp(20.0, 53.5),
    fp(30.0, 71.0),
    fp(40.0, 87.3),
    fp(50.0, 102.5),
    fp(60.0, 116.8),
    fp(80.0, 142.8),
    fp(100.0, 165.8),
    fp(120.0, 186.3),
    fp(150.0, 213.6),
    fp(200.0, 252.9),
    fp(250.0, 288.6),
    fp(300.0, 324.0),
    fp(342.0, 354.7),
];

impl FlowCurve {
    /// Breakpoints in ascending load-unit order.
    pub fn points(self) -> &'static [FlowPoint] {
        match self {
            FlowCurve::FlushValve => &FLUSH_VALVE_POINTS,
            FlowCurve::Tank => &TANK_POINTS,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FlowCurve::FlushValve => "flush valve",
            FlowCurve::Tank => "tank",
        }
    }
}

/// Simultaneous flow (L/min) for a total load-unit value.
///
/// - `load_units <= 0` (or NaN) gives 0.
/// - Values below the first breakpoint return the first breakpoint's flow.
/// - Values between breakpoints are interpolated linearly.
/// - Values past the last breakpoint are extrapolated with the slope of the
///   last segment; they are not clamped.
pub fn interpolate_flow(load_units: f64, curve: FlowCurve) -> f64 {
    // Written so NaN also lands here.
    if !(load_units > 0.0) {
        return 0.0;
    }

    let points = curve.points();
    let first = points[0];
    if load_units <= first.load_units {
        return first.flow_lpm;
    }

    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if load_units == b.load_units {
            return b.flow_lpm;
        }
        if load_units < b.load_units {
            return lerp(a, b, load_units);
        }
    }

    let n = points.len();
    lerp(points[n - 2], points[n - 1], load_units)
}

fn lerp(a: FlowPoint, b: FlowPoint, x: f64) -> f64 {
    let slope = (b.flow_lpm - a.flow_lpm) / (b.load_units - a.load_units);
    a.flow_lpm + slope * (x - a.load_units)
}

/// Geometric samples of a curve from `from` to `to` (inclusive of `from`),
/// each step multiplying the load by `ratio`.
///
/// Returns an empty vector for a non-positive start or a ratio that does not
/// grow.
pub fn sample_curve(curve: FlowCurve, from: f64, to: f64, ratio: f64) -> Vec<FlowPoint> {
    let mut samples = Vec::new();
    if !(from > 0.0) || !(ratio > 1.0) {
        return samples;
    }
    let mut lu = from;
    while lu <= to {
        samples.push(FlowPoint {
            load_units: lu,
            flow_lpm: interpolate_flow(lu, curve),
        });
        lu *= ratio;
    }
    samples
}
