//! JSON shapes the CLI emits. The renderer side reads these.

use graphcalc::prelude::*;
use serde::Serialize;

use crate::input::VectorRecord;

#[derive(Debug, Serialize)]
pub struct DomainOut {
    pub x_min: f64,
    pub x_max: f64,
    pub step: f64,
}

impl From<Domain> for DomainOut {
    fn from(d: Domain) -> Self {
        Self {
            x_min: d.x_min,
            x_max: d.x_max,
            step: d.step,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PointOut {
    pub x: f64,
    /// `None` serializes as `null`; only the `keep` policy can produce it.
    pub y: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct CurveReport {
    pub expr: String,
    pub canonical: String,
    /// The formula does not depend on `x`; the curve is a horizontal line.
    pub constant: bool,
    pub domain: DomainOut,
    pub policy: String,
    pub degenerate: usize,
    pub points: Vec<PointOut>,
}

impl CurveReport {
    pub fn new(
        text: &str,
        expr: &Expression,
        domain: Domain,
        policy: DegeneratePolicy,
        series: SampleSeries,
    ) -> Self {
        Self {
            expr: text.to_string(),
            canonical: expr.to_string(),
            constant: expr.is_constant(),
            domain: domain.into(),
            policy: format!("{policy:?}"),
            degenerate: series.degenerate_count(),
            // JSON has no NaN/Infinity literals.
            points: series
                .into_points()
                .into_iter()
                .map(|p| PointOut {
                    x: p.x,
                    y: p.y.is_finite().then_some(p.y),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PolarOut {
    pub r: f64,
    pub theta_deg: f64,
}

impl From<Polar> for PolarOut {
    fn from(p: Polar) -> Self {
        Self {
            r: p.r,
            theta_deg: p.theta_deg,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SegmentOut {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub from: [f64; 3],
    pub to: [f64; 3],
    pub length: f64,
}

#[derive(Debug, Serialize)]
pub struct VectorReport {
    pub vectors: Vec<VectorRecord>,
    pub resultant: [f64; 3],
    pub resultant_polar: PolarOut,
    pub segments: Vec<SegmentOut>,
    pub area: f64,
    pub signed_area: f64,
}

impl VectorReport {
    pub fn new(records: Vec<VectorRecord>) -> Self {
        let comps: Vec<Vec3<f64>> = records.iter().map(VectorRecord::components).collect();
        let h = HeadToTail::new(&comps);
        let segments = h
            .segments
            .iter()
            .zip(&records)
            .map(|(s, r)| SegmentOut {
                name: r.name.clone(),
                color: r.color.clone(),
                from: s.from.into(),
                to: s.to.into(),
                length: s.length(),
            })
            .collect();
        Self {
            resultant: h.resultant.into(),
            resultant_polar: to_polar(h.resultant.x, h.resultant.y).into(),
            segments,
            area: h.area,
            signed_area: signed_polygon_area(&comps),
            vectors: records,
        }
    }
}
