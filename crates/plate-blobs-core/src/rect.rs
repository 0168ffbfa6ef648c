use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Rectangle aligned to its own axes rather than the image axes.
///
/// `width` runs along the heading axis `u = (cos a, sin a)`, `height` along
/// `v = (-sin a, cos a)`. Angles are degrees in `[0, 360)`, measured in image
/// coordinates (x right, y down).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrientedRect {
    pub center: Point2<f32>,
    pub width: f32,
    pub height: f32,
    pub angle_deg: f32,
}

impl OrientedRect {
    pub fn new(center: Point2<f32>, width: f32, height: f32, angle_deg: f32) -> Self {
        Self {
            center,
            width,
            height,
            angle_deg: normalize_angle_deg(angle_deg),
        }
    }

    /// Unit vectors `(u, v)` along width and height.
    #[inline]
    pub fn axes(&self) -> (Vector2<f32>, Vector2<f32>) {
        let (sin, cos) = self.angle_deg.to_radians().sin_cos();
        (Vector2::new(cos, sin), Vector2::new(-sin, cos))
    }

    /// Corners as (−u−v, +u−v, +u+v, −u+v).
    pub fn corners(&self) -> [Point2<f32>; 4] {
        let (u, v) = self.axes();
        let hu = u * (0.5 * self.width);
        let hv = v * (0.5 * self.height);
        let c = self.center;
        [c - hu - hv, c + hu - hv, c + hu + hv, c - hu + hv]
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Long side over short side; infinite for degenerate rectangles.
    pub fn aspect_ratio(&self) -> f32 {
        let long = self.width.max(self.height);
        let short = self.width.min(self.height);
        if short <= 0.0 {
            f32::INFINITY
        } else {
            long / short
        }
    }

    /// Same rectangle with the heading reversed.
    pub fn flipped(&self) -> Self {
        Self {
            angle_deg: normalize_angle_deg(self.angle_deg + 180.0),
            ..*self
        }
    }

    /// Same rectangle scaled about its center.
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
            ..*self
        }
    }

    /// Whether `p` lies inside the rectangle (boundary inclusive).
    pub fn contains(&self, p: Point2<f32>) -> bool {
        let (u, v) = self.axes();
        let d = p - self.center;
        d.dot(&u).abs() <= 0.5 * self.width && d.dot(&v).abs() <= 0.5 * self.height
    }
}

/// Wrap an angle in degrees into `[0, 360)`.
#[inline]
pub fn normalize_angle_deg(angle: f32) -> f32 {
    let a = angle.rem_euclid(360.0);
    if a >= 360.0 {
        0.0
    } else {
        a
    }
}

/// Smallest absolute difference between two headings, in degrees.
pub fn angle_diff_deg(a: f32, b: f32) -> f32 {
    let d = normalize_angle_deg(a - b);
    d.min(360.0 - d)
}
