use std::f64::consts::PI;

use nalgebra::Vector2;

use super::types::Polar;

/// Cartesian → polar. `θ = atan2(y, x)` in degrees, in (−180, 180].
///
/// `atan2` can return exactly −180° (e.g. `(-1, -0.0)`); that direction is
/// reported as +180° to keep the half-open range.
pub fn to_polar(x: f64, y: f64) -> Polar {
    let r = x.hypot(y);
    let t = y.atan2(x);
    let theta_deg = if t.abs() >= PI {
        180.0
    } else {
        match t.to_degrees() {
            d if d <= -180.0 => 180.0,
            d => d,
        }
    };
    Polar { r, theta_deg }
}

/// Polar → Cartesian. Inverse of `to_polar` for `r >= 0`.
///
/// A negative `r` is accepted and lands on the point reflected through the
/// origin, which is what the cos/sin algebra gives.
pub fn from_polar(r: f64, theta_deg: f64) -> Vector2<f64> {
    let (s, c) = theta_deg.to_radians().sin_cos();
    Vector2::new(r * c, r * s)
}

impl Polar {
    #[inline]
    pub fn to_cartesian(self) -> Vector2<f64> {
        from_polar(self.r, self.theta_deg)
    }
}

impl From<Vector2<f64>> for Polar {
    fn from(v: Vector2<f64>) -> Self {
        to_polar(v.x, v.y)
    }
}
