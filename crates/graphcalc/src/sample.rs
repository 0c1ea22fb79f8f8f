//! Curve sampling: evaluate an expression across a closed domain at a fixed step.
//!
//! Model
//! - `n = floor((x_max - x_min) / step + STEP_SLACK) + 1` samples at
//!   `x_i = x_min + i * step` (computed per index, no accumulated drift).
//!   The last sample is clamped to `x_max` so the right boundary is never
//!   dropped.
//! - A sample whose `y` is NaN or ±Infinity is *degenerate*. What happens to it
//!   is `SampleCfg::policy`; the default snaps it to `y = 0`, so one
//!   singularity never aborts or breaks the series.

use nalgebra::Vector3;
use tracing::debug;

use crate::cfg::{DEFAULT_MAX_POINTS, STEP_SLACK};
use crate::error::Error;
use crate::expr::{parse, Expression};

/// Why a domain cannot be sampled.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidRangeError {
    #[error("step must be positive, got {step}")]
    NonPositiveStep { step: f64 },

    #[error("x_min ({x_min}) is greater than x_max ({x_max})")]
    InvertedRange { x_min: f64, x_max: f64 },

    #[error("domain bounds must be finite, got [{x_min}, {x_max}]")]
    NonFiniteBound { x_min: f64, x_max: f64 },

    #[error("domain needs {count} samples, limit is {limit}")]
    TooManyPoints { count: f64, limit: usize },
}

/// What to do with a sample whose value is NaN or ±Infinity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DegeneratePolicy {
    /// Emit the point with `y = 0`.
    #[default]
    ZeroFill,
    /// Omit the point; the series has a gap there.
    Skip,
    /// Emit the raw IEEE value and let the consumer decide.
    Keep,
}

/// Sampler configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleCfg {
    pub policy: DegeneratePolicy,
    /// Upper bound on the series length; larger domains are rejected.
    pub max_points: usize,
}

impl Default for SampleCfg {
    fn default() -> Self {
        Self {
            policy: DegeneratePolicy::ZeroFill,
            max_points: DEFAULT_MAX_POINTS,
        }
    }
}

/// Closed domain `[x_min, x_max]` walked at `step`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domain {
    pub x_min: f64,
    pub x_max: f64,
    pub step: f64,
}

impl Domain {
    #[inline]
    pub fn new(x_min: f64, x_max: f64, step: f64) -> Self {
        Self { x_min, x_max, step }
    }

    /// Number of samples the domain yields, after validation.
    pub fn point_count(&self, limit: usize) -> Result<usize, InvalidRangeError> {
        let Domain { x_min, x_max, step } = *self;
        if !x_min.is_finite() || !x_max.is_finite() {
            return Err(InvalidRangeError::NonFiniteBound { x_min, x_max });
        }
        // `!(step > 0)` also rejects NaN.
        if !(step > 0.0) {
            return Err(InvalidRangeError::NonPositiveStep { step });
        }
        if x_min > x_max {
            return Err(InvalidRangeError::InvertedRange { x_min, x_max });
        }
        let count = ((x_max - x_min) / step + STEP_SLACK).floor() + 1.0;
        if !count.is_finite() || count > limit as f64 {
            return Err(InvalidRangeError::TooManyPoints { count, limit });
        }
        Ok(count as usize)
    }
}

/// The plotting window of the original calculator: `[-10, 10]` at `0.1`.
impl Default for Domain {
    fn default() -> Self {
        Self {
            x_min: -10.0,
            x_max: 10.0,
            step: 0.1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplePoint {
    pub x: f64,
    pub y: f64,
}

/// Ordered samples of one curve. Immutable once produced.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleSeries {
    points: Vec<SamplePoint>,
    degenerate: usize,
}

impl SampleSeries {
    pub fn points(&self) -> &[SamplePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// How many samples evaluated to NaN or ±Infinity (before the policy).
    pub fn degenerate_count(&self) -> usize {
        self.degenerate
    }

    /// Points lifted to 3D on the `z = 0` plane, ready for a polyline.
    pub fn points3(&self) -> impl Iterator<Item = Vector3<f64>> + '_ {
        self.points.iter().map(|p| Vector3::new(p.x, p.y, 0.0))
    }

    pub fn into_points(self) -> Vec<SamplePoint> {
        self.points
    }
}

/// Sample `expr` over `[x_min, x_max]` at `step` with the default policy.
pub fn sample(
    expr: &Expression,
    x_min: f64,
    x_max: f64,
    step: f64,
) -> Result<SampleSeries, InvalidRangeError> {
    sample_with(expr, Domain::new(x_min, x_max, step), &SampleCfg::default())
}

/// Sample `expr` over `domain` following `cfg`.
pub fn sample_with(
    expr: &Expression,
    domain: Domain,
    cfg: &SampleCfg,
) -> Result<SampleSeries, InvalidRangeError> {
    let n = domain.point_count(cfg.max_points)?;
    let mut points = Vec::with_capacity(n);
    let mut degenerate = 0usize;

    for i in 0..n {
        let x = if i + 1 == n {
            domain.x_max
        } else {
            domain.x_min + i as f64 * domain.step
        };
        let y = expr.eval(x);
        if y.is_finite() {
            points.push(SamplePoint { x, y });
            continue;
        }
        degenerate += 1;
        match cfg.policy {
            DegeneratePolicy::ZeroFill => points.push(SamplePoint { x, y: 0.0 }),
            DegeneratePolicy::Skip => {}
            DegeneratePolicy::Keep => points.push(SamplePoint { x, y }),
        }
    }

    debug!(
        samples = n,
        emitted = points.len(),
        degenerate,
        policy = ?cfg.policy,
        "sampled expression"
    );
    Ok(SampleSeries { points, degenerate })
}

/// Parse `text` and sample it in one call.
pub fn sample_formula(text: &str, domain: Domain, cfg: &SampleCfg) -> Result<SampleSeries, Error> {
    let expr = parse(text)?;
    Ok(sample_with(&expr, domain, cfg)?)
}

/// Sample several curves over the same domain, in input order.
pub fn sample_all(
    exprs: &[Expression],
    domain: Domain,
    cfg: &SampleCfg,
) -> Result<Vec<SampleSeries>, InvalidRangeError> {
    exprs.iter().map(|e| sample_with(e, domain, cfg)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::ParseError;

    fn expr(text: &str) -> Expression {
        parse(text).unwrap()
    }

    #[test]
    fn length_matches_floor_formula() {
        let s = sample(&expr("x"), 0.0, 1.0, 0.25).unwrap();
        assert_eq!(s.len(), 5);
        let xs: Vec<f64> = s.points().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn default_domain_keeps_both_boundaries() {
        let s = sample_with(&expr("x"), Domain::default(), &SampleCfg::default()).unwrap();
        assert_eq!(s.len(), 201);
        assert_eq!(s.points()[0].x, -10.0);
        assert_eq!(s.points()[200].x, 10.0);
        assert!((s.points()[100].x).abs() < 1e-12);
    }

    #[test]
    fn last_sample_is_clamped_to_x_max() {
        // span 1.0 / step 0.4 = 2.5 -> floor + 1 = 3 samples, last clamped
        let s = sample(&expr("2*x"), 0.0, 1.0, 0.4).unwrap();
        assert_eq!(s.len(), 3);
        assert_eq!(s.points()[1].x, 0.4);
        assert_eq!(s.points()[2].x, 1.0);
        assert_eq!(s.points()[2].y, 2.0);
    }

    #[test]
    fn single_point_domain() {
        let s = sample(&expr("x^2"), 3.0, 3.0, 1.0).unwrap();
        assert_eq!(s.points(), &[SamplePoint { x: 3.0, y: 9.0 }]);
    }

    #[test]
    fn invalid_ranges_are_rejected() {
        let e = expr("x");
        assert_eq!(
            sample(&e, 0.0, 1.0, 0.0),
            Err(InvalidRangeError::NonPositiveStep { step: 0.0 })
        );
        assert!(matches!(
            sample(&e, 0.0, 1.0, -0.1),
            Err(InvalidRangeError::NonPositiveStep { .. })
        ));
        assert!(matches!(
            sample(&e, 0.0, 1.0, f64::NAN),
            Err(InvalidRangeError::NonPositiveStep { .. })
        ));
        assert_eq!(
            sample(&e, 2.0, 1.0, 0.1),
            Err(InvalidRangeError::InvertedRange {
                x_min: 2.0,
                x_max: 1.0
            })
        );
        assert!(matches!(
            sample(&e, f64::NEG_INFINITY, 1.0, 0.1),
            Err(InvalidRangeError::NonFiniteBound { .. })
        ));
        assert!(matches!(
            sample(&e, 0.0, 1.0, 1e-12),
            Err(InvalidRangeError::TooManyPoints { .. })
        ));
    }

    #[test]
    fn singularity_snaps_to_zero_by_default() {
        let s = sample(&expr("1/x"), -1.0, 1.0, 0.5).unwrap();
        assert_eq!(s.len(), 5);
        assert_eq!(s.points()[2], SamplePoint { x: 0.0, y: 0.0 });
        assert_eq!(s.points()[0].y, -1.0);
        assert_eq!(s.degenerate_count(), 1);
    }

    #[test]
    fn skip_and_keep_policies() {
        let e = expr("sqrt(x)");
        let skip = SampleCfg {
            policy: DegeneratePolicy::Skip,
            ..SampleCfg::default()
        };
        let s = sample_with(&e, Domain::new(-2.0, 2.0, 1.0), &skip).unwrap();
        assert_eq!(s.len(), 3);
        assert_eq!(s.degenerate_count(), 2);
        assert_eq!(s.points()[0].x, 0.0);

        let keep = SampleCfg {
            policy: DegeneratePolicy::Keep,
            ..SampleCfg::default()
        };
        let s = sample_with(&e, Domain::new(-2.0, 2.0, 1.0), &keep).unwrap();
        assert_eq!(s.len(), 5);
        assert!(s.points()[0].y.is_nan());
    }

    #[test]
    fn points3_lie_on_z_plane() {
        let s = sample(&expr("x"), 0.0, 2.0, 1.0).unwrap();
        let p: Vec<_> = s.points3().collect();
        assert_eq!(p.len(), 3);
        assert!(p.iter().all(|v| v.z == 0.0));
        assert_eq!(p[2], Vector3::new(2.0, 2.0, 0.0));
    }

    #[test]
    fn formula_helper_reports_both_error_kinds() {
        let cfg = SampleCfg::default();
        assert!(matches!(
            sample_formula("2x", Domain::default(), &cfg),
            Err(Error::Parse(ParseError::ImplicitMultiplication { .. }))
        ));
        assert!(matches!(
            sample_formula("x", Domain::new(1.0, 0.0, 0.1), &cfg),
            Err(Error::Range(InvalidRangeError::InvertedRange { .. }))
        ));
        assert_eq!(
            sample_formula("sin(x)", Domain::default(), &cfg).unwrap().len(),
            201
        );
    }

    #[test]
    fn several_curves_share_a_domain() {
        let exprs = vec![expr("sin(x)"), expr("cos(x)"), expr("1/x")];
        let all = sample_all(&exprs, Domain::new(-1.0, 1.0, 0.5), &SampleCfg::default()).unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.iter().all(|s| s.len() == 5));
        assert_eq!(all[2].degenerate_count(), 1);
    }
}
