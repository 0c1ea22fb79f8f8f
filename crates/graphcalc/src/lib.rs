//! Computational core behind the graphing calculator and the vector playground.
//!
//! Two independent engines, both pure:
//! - `expr` + `sample`: parse a one-variable formula with a closed grammar,
//!   evaluate it, and sample it over a domain for curve rendering.
//! - `vectors`: vector sums, polar conversion, head-to-tail polygon segments,
//!   and shoelace area.
//!
//! API Policy
//! - The curated surface lives in `api` and `prelude`. Module internals may
//!   move; prefer the re-exports.
//! - No I/O happens here. Hosts own input widgets, rendering and colors.

pub mod api;
pub mod cfg;
pub mod error;
pub mod expr;
pub mod sample;
pub mod vectors;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::Error;
pub use expr::{evaluate, parse, EvalError, Expression, ParseError};
pub use nalgebra::{Vector2 as Vec2, Vector3 as Vec3};
pub use sample::{sample, sample_with, DegeneratePolicy, Domain, SampleCfg, SampleSeries};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::expr::{evaluate, parse, BinOp, Expression, Func, Node, ParseError};
    pub use crate::sample::{
        sample, sample_all, sample_formula, sample_with, DegeneratePolicy, Domain,
        InvalidRangeError, SampleCfg, SamplePoint, SampleSeries,
    };
    pub use crate::vectors::{
        build_polygon, from_polar, polygon_area, signed_polygon_area, to_polar, vector_sum,
        HeadToTail, Polar, PolygonSegment,
    };
    pub use nalgebra::{Vector2 as Vec2, Vector3 as Vec3};
}
