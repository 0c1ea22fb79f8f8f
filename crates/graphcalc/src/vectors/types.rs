//! Value types shared by the vector routines.

use nalgebra::{Unit, Vector3};

/// Polar form of a planar vector: radius and angle in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Polar {
    pub r: f64,
    /// Counter-clockwise from +x, in (−180, 180].
    pub theta_deg: f64,
}

/// One edge of the head-to-tail path.
///
/// Invariant (when produced by `build_polygon`): `from` is the previous
/// segment's `to`, or the origin for the first segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolygonSegment {
    pub from: Vector3<f64>,
    pub to: Vector3<f64>,
}

impl PolygonSegment {
    #[inline]
    pub fn new(from: Vector3<f64>, to: Vector3<f64>) -> Self {
        Self { from, to }
    }

    /// The input vector this edge represents (`to - from`).
    #[inline]
    pub fn vector(&self) -> Vector3<f64> {
        self.to - self.from
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.vector().norm()
    }

    /// Unit direction from tail to head; `None` for a zero-length edge.
    pub fn direction(&self) -> Option<Unit<Vector3<f64>>> {
        Unit::try_new(self.vector(), 0.0)
    }
}

/// Violations of head-to-tail invariants.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("resultant {resultant:?} disagrees with polygon head {head:?}")]
    ResultantMismatch { resultant: [f64; 3], head: [f64; 3] },

    #[error("segment {index} does not start where segment {prev} ends")]
    BrokenChain { index: usize, prev: usize },

    #[error("expected {expected} segments, found {found}")]
    SegmentCount { expected: usize, found: usize },
}
