//! Vector geometry: sums, polar form, head-to-tail polygons, shoelace area.
//!
//! Purpose
//! - Back the vector playground: the host passes the full vector list on every
//!   recomputation and gets back the resultant, the polygon edges and the area.
//!   Nothing is retained between calls.
//!
//! Assumptions and conventions
//! - Vectors are bare `Vector3<f64>` triples; names and colors stay with the host.
//! - Area is planar: only `x, y` participate, whatever `z` holds.
//! - Angles cross the API in degrees, in (−180, 180].
//! - Non-finite components are not rejected; they propagate through sums and
//!   areas like any other float.
//!
//! Layout: `types.rs` (segments, polar pair, errors), `polar.rs`,
//! `polygon.rs` (scan, shoelace, `HeadToTail`).

mod polar;
mod polygon;
mod types;

pub use polar::{from_polar, to_polar};
pub use polygon::{build_polygon, polygon_area, signed_polygon_area, vector_sum, HeadToTail};
pub use types::{GeometryError, Polar, PolygonSegment};
