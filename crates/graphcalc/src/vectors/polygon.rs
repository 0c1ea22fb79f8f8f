//! Head-to-tail construction and shoelace area.
//!
//! Everything is a fold or scan over the input slice; each call builds fresh
//! output and keeps no state.

use nalgebra::Vector3;
use tracing::debug;

use super::types::{GeometryError, PolygonSegment};
use crate::cfg::RESULTANT_EPS;

/// Coordinate-wise sum; the zero vector for empty input.
pub fn vector_sum(vectors: &[Vector3<f64>]) -> Vector3<f64> {
    vectors.iter().fold(Vector3::zeros(), |acc, v| acc + v)
}

/// Segment `i` runs from the prefix sum of `vectors[..i]` to the prefix sum of
/// `vectors[..=i]`; the first starts at the origin.
pub fn build_polygon(vectors: &[Vector3<f64>]) -> Vec<PolygonSegment> {
    vectors
        .iter()
        .scan(Vector3::zeros(), |head, v| {
            let from = *head;
            *head = from + v;
            Some(PolygonSegment::new(from, *head))
        })
        .collect()
}

/// Shoelace sum over `{origin, prefix sums…}` closed back to the origin,
/// halved. Counter-clockwise paths are positive. Fewer than two vectors
/// enclose nothing and give 0.
pub fn signed_polygon_area(vectors: &[Vector3<f64>]) -> f64 {
    if vectors.len() < 2 {
        return 0.0;
    }
    // Each segment contributes cross(from, to); the closing edge (last head →
    // origin) and the opening edge (origin → first head) contribute zero
    // because one endpoint is the origin.
    let twice: f64 = build_polygon(vectors)
        .iter()
        .map(|s| s.from.x * s.to.y - s.to.x * s.from.y)
        .sum();
    twice / 2.0
}

/// Enclosed area of the head-to-tail path (planar, `>= 0`).
pub fn polygon_area(vectors: &[Vector3<f64>]) -> f64 {
    signed_polygon_area(vectors).abs()
}

/// Everything the host draws for one vector list, computed in one pass.
#[derive(Clone, Debug, PartialEq)]
pub struct HeadToTail {
    pub segments: Vec<PolygonSegment>,
    pub resultant: Vector3<f64>,
    /// Unsigned planar area.
    pub area: f64,
}

impl HeadToTail {
    pub fn new(vectors: &[Vector3<f64>]) -> Self {
        let segments = build_polygon(vectors);
        let resultant = vector_sum(vectors);
        let area = polygon_area(vectors);
        let out = Self {
            segments,
            resultant,
            area,
        };
        debug_assert!(out.check().is_ok(), "head-to-tail invariants violated");
        debug!(
            vectors = vectors.len(),
            area = out.area,
            "built head-to-tail polygon"
        );
        out
    }

    /// Head of the last segment, or the origin when there are none.
    pub fn head(&self) -> Vector3<f64> {
        self.segments.last().map_or_else(Vector3::zeros, |s| s.to)
    }

    /// Verify the chain is connected from the origin and that its head agrees
    /// with the resultant.
    pub fn check(&self) -> Result<(), GeometryError> {
        let mut prev_to = Vector3::zeros();
        for (index, seg) in self.segments.iter().enumerate() {
            if (seg.from - prev_to).amax() > RESULTANT_EPS {
                return Err(GeometryError::BrokenChain {
                    index,
                    prev: index.saturating_sub(1),
                });
            }
            prev_to = seg.to;
        }
        let head = self.head();
        let diff = (head - self.resultant).amax();
        // NaN components make `diff` NaN; only a finite excess is a mismatch.
        if diff > RESULTANT_EPS {
            return Err(GeometryError::ResultantMismatch {
                resultant: self.resultant.into(),
                head: head.into(),
            });
        }
        Ok(())
    }

    /// Like `check`, and also that there is one segment per input vector.
    pub fn check_against(&self, vectors: &[Vector3<f64>]) -> Result<(), GeometryError> {
        if self.segments.len() != vectors.len() {
            return Err(GeometryError::SegmentCount {
                expected: vectors.len(),
                found: self.segments.len(),
            });
        }
        self.check()
    }
}
