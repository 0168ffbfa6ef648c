//! Closed-form principal axes of a 2×2 second-moment matrix.

use nalgebra::Vector2;

/// Horizontal components this close to zero count as zero when fixing signs.
const SIGN_EPS: f64 = 1e-9;

/// Orthonormal principal axes.
///
/// `first` belongs to the smaller eigenvalue (the shape's short axis) and
/// has a non-negative horizontal component, or points down (+y) when it is
/// vertical. `second` is `first` rotated by +90°: `(-first.y, first.x)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PrincipalAxes {
    pub first: Vector2<f64>,
    pub second: Vector2<f64>,
    /// Eigenvalues for `first` and `second`, ascending.
    pub eigenvalues: [f64; 2],
}

impl PrincipalAxes {
    /// Direction of `first` in degrees, in `(-90, 90]`.
    pub fn first_angle_deg(&self) -> f64 {
        self.first.y.atan2(self.first.x).to_degrees()
    }
}

/// Diagonalize `[[a, b], [b, c]]`.
pub fn principal_axes(a: f64, b: f64, c: f64) -> PrincipalAxes {
    let mean = 0.5 * (a + c);
    let half_diff = 0.5 * (a - c);
    let radius = half_diff.hypot(b);

    // direction of the larger eigenvalue
    let theta = 0.5 * (2.0 * b).atan2(a - c);
    let (sin, cos) = theta.sin_cos();
    let mut first = Vector2::new(-sin, cos);

    if first.x < -SIGN_EPS || (first.x.abs() <= SIGN_EPS && first.y < 0.0) {
        first = -first;
    }
    let second = Vector2::new(-first.y, first.x);

    PrincipalAxes {
        first,
        second,
        eigenvalues: [mean - radius, mean + radius],
    }
}
