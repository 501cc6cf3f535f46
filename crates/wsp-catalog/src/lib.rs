//! wsp-catalog: static reference data for water-supply pipe sizing.
//!
//! Provides:
//! - Simultaneous-flow curves keyed by load units, with interpolation
//! - Per-material pipe tables (nominal size -> internal diameter) and the
//!   capacity table for capacity-sized materials
//! - Nominal connection size -> display label mapping per material family
//! - Fixture catalog keyed by `(name, population)`
//! - Built-in system presets
//!
//! # Example
//!
//! ```
//! use wsp_catalog::{FlowCurve, PipeCatalog, interpolate_flow};
//!
//! let q = interpolate_flow(10.0, FlowCurve::Tank);
//! assert_eq!(q, 34.8);
//!
//! let catalog = PipeCatalog::builtin();
//! assert_eq!(catalog.inner_diameter_mm("SGP", "20A"), Some(21.6));
//! ```

pub mod display;
pub mod error;
pub mod fixture;
pub mod flow_curve;
pub mod pipe;
pub mod presets;

pub use display::{display_size, display_size_for};
pub use error::{CatalogError, CatalogResult};
pub use fixture::{FixtureCatalog, FixtureKey, FixtureSpec, Population};
pub use flow_curve::{FlowCurve, FlowPoint, interpolate_flow, sample_curve};
pub use pipe::{MaterialFamily, PipeCatalog, PipeMaterial, PipeSize, SizeCapacity, material_code};
pub use presets::{Preset, builtin_presets, find_preset};
