//! Spatial moments of a closed polygon (Green's theorem).

use nalgebra::Point2;

/// Raw and central moments up to second order.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PolygonMoments {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
    pub mu20: f64,
    pub mu11: f64,
    pub mu02: f64,
}

impl PolygonMoments {
    /// Enclosed area.
    #[inline]
    pub fn area(&self) -> f64 {
        self.m00
    }

    /// Centroid, or `None` for a zero-area polygon.
    pub fn centroid(&self) -> Option<Point2<f64>> {
        (self.m00.abs() > f64::EPSILON).then(|| Point2::new(self.m10 / self.m00, self.m01 / self.m00))
    }

    /// Scale-normalized central moments `(nu20, nu11, nu02)`.
    pub fn normalized_central(&self) -> Option<[f64; 3]> {
        if self.m00.abs() <= f64::EPSILON {
            return None;
        }
        let s = 1.0 / (self.m00 * self.m00);
        Some([self.mu20 * s, self.mu11 * s, self.mu02 * s])
    }
}

/// Moments of the polygon traced by `points` (implicitly closed).
///
/// Orientation does not matter; the result always has `m00 >= 0`.
pub fn polygon_moments(points: &[Point2<i32>]) -> PolygonMoments {
    let n = points.len();
    if n < 3 {
        return PolygonMoments::default();
    }

    let (mut a00, mut a10, mut a01) = (0.0f64, 0.0f64, 0.0f64);
    let (mut a20, mut a11, mut a02) = (0.0f64, 0.0f64, 0.0f64);

    let mut prev = points[n - 1];
    for &cur in points {
        let (xp, yp) = (prev.x as f64, prev.y as f64);
        let (xc, yc) = (cur.x as f64, cur.y as f64);

        let cross = xp * yc - xc * yp;
        let sx = xp + xc;
        let sy = yp + yc;

        a00 += cross;
        a10 += cross * sx;
        a01 += cross * sy;
        a20 += cross * (xp * sx + xc * xc);
        a11 += cross * (xp * (sy + yp) + xc * (sy + yc));
        a02 += cross * (yp * sy + yc * yc);

        prev = cur;
    }

    let sign = if a00 < 0.0 { -1.0 } else { 1.0 };
    let m00 = sign * a00 / 2.0;
    let m10 = sign * a10 / 6.0;
    let m01 = sign * a01 / 6.0;
    let m20 = sign * a20 / 12.0;
    let m11 = sign * a11 / 24.0;
    let m02 = sign * a02 / 12.0;

    if m00 <= f64::EPSILON {
        return PolygonMoments::default();
    }

    let cx = m10 / m00;
    let cy = m01 / m00;
    PolygonMoments {
        m00,
        m10,
        m01,
        mu20: m20 - m10 * cx,
        mu11: m11 - m10 * cy,
        mu02: m02 - m01 * cy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rect_points(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<Point2<i32>> {
        vec![
            Point2::new(x0, y0),
            Point2::new(x1, y0),
            Point2::new(x1, y1),
            Point2::new(x0, y1),
        ]
    }

    #[test]
    fn axis_aligned_rectangle() {
        // 10 x 4 rectangle centered at (15, 12)
        let m = polygon_moments(&rect_points(10, 10, 20, 14));
        assert_relative_eq!(m.area(), 40.0);
        let c = m.centroid().expect("centroid");
        assert_relative_eq!(c.x, 15.0, epsilon = 1e-9);
        assert_relative_eq!(c.y, 12.0, epsilon = 1e-9);
        // mu20 = w^3 h / 12, mu02 = w h^3 / 12
        assert_relative_eq!(m.mu20, 1000.0 * 4.0 / 12.0, epsilon = 1e-6);
        assert_relative_eq!(m.mu02, 10.0 * 64.0 / 12.0, epsilon = 1e-6);
        assert_relative_eq!(m.mu11, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn orientation_independent() {
        let mut pts = rect_points(0, 0, 7, 3);
        let ccw = polygon_moments(&pts);
        pts.reverse();
        let cw = polygon_moments(&pts);
        assert_relative_eq!(ccw.m00, cw.m00);
        assert_relative_eq!(ccw.mu20, cw.mu20, epsilon = 1e-9);
    }

    #[test]
    fn sheared_shape_has_cross_moment() {
        let pts = vec![
            Point2::new(0, 0),
            Point2::new(10, 10),
            Point2::new(10, 14),
            Point2::new(0, 4),
        ];
        let m = polygon_moments(&pts);
        assert!(m.mu11 > 0.0);
        let [nu20, nu11, nu02] = m.normalized_central().expect("nonzero area");
        assert!(nu20 > 0.0 && nu02 > 0.0 && nu11 > 0.0);
    }

    #[test]
    fn degenerate_polygons_have_zero_area() {
        assert_eq!(polygon_moments(&[]).area(), 0.0);
        assert_eq!(polygon_moments(&[Point2::new(3, 3)]).area(), 0.0);
        let line = vec![Point2::new(0, 0), Point2::new(5, 0), Point2::new(9, 0)];
        let m = polygon_moments(&line);
        assert_eq!(m.area(), 0.0);
        assert!(m.normalized_central().is_none());
        assert!(m.centroid().is_none());
    }
}
