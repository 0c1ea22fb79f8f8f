//! Curated entry points for host code.
//!
//! One import path for every call a renderer needs: parse/evaluate/sample for
//! curves, sum/polar/polygon/area for the vector view. Signatures here are the
//! ones hosts should code against; the modules behind them may be reshuffled.

// Expression engine
pub use crate::expr::{evaluate, parse, EvalError, Expression, ParseError};
// Sampler
pub use crate::sample::{
    sample, sample_all, sample_formula, sample_with, DegeneratePolicy, Domain, InvalidRangeError,
    SampleCfg, SamplePoint, SampleSeries,
};
// Vector geometry
pub use crate::vectors::{
    build_polygon, from_polar, polygon_area, signed_polygon_area, to_polar, vector_sum,
    GeometryError, HeadToTail, Polar, PolygonSegment,
};

use nalgebra::Vector3;

/// Convenience for hosts holding plain `[x, y, z]` arrays.
pub fn triples_to_vectors(triples: &[[f64; 3]]) -> Vec<Vector3<f64>> {
    triples.iter().map(|t| Vector3::from(*t)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn curve_pipeline_end_to_end() {
        let e = parse("pow(x, 2) - 1").unwrap();
        assert_eq!(evaluate(&e, 3.0), Ok(8.0));
        let s = sample(&e, -1.0, 1.0, 1.0).unwrap();
        let ys: Vec<f64> = s.points().iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![0.0, -1.0, 0.0]);
    }

    #[test]
    fn vector_pipeline_end_to_end() {
        let v = triples_to_vectors(&[[1.0, 2.0, 0.0], [3.0, -1.0, 0.0]]);
        assert_eq!(vector_sum(&v), Vector3::new(4.0, 1.0, 0.0));
        let h = HeadToTail::new(&v);
        assert_eq!(h.segments[1].from, Vector3::new(1.0, 2.0, 0.0));
        // triangle (0,0) (1,2) (4,1): |1*1 - 4*2| / 2 = 3.5
        assert!((h.area - 3.5).abs() < 1e-12);
    }

    #[test]
    fn triangle_area_randomized_seeded() {
        let mut rng = StdRng::seed_from_u64(42);
        let a: Vector3<f64> = Vector3::new(
            rng.gen_range(-2.0..2.0),
            rng.gen_range(-2.0..2.0),
            0.0,
        );
        let b: Vector3<f64> = Vector3::new(
            rng.gen_range(-2.0..2.0),
            rng.gen_range(-2.0..2.0),
            0.0,
        );
        // path 0 -> a -> a+b -> 0 is the triangle spanned by a and b
        let expected = 0.5 * (a.x * b.y - a.y * b.x).abs();
        assert!((polygon_area(&[a, b]) - expected).abs() < 1e-12);
    }
}
