//! wsp-core: stable foundation for water-supply pipe sizing.
//!
//! Contains:
//! - units (uom SI types + constructors for L/min, mm, m)
//! - numeric (Real + tolerances + float helpers)
//! - ids (compact IDs for tree nodes)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

pub use error::{WspError, WspResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
