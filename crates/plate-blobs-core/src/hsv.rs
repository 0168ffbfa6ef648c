//! 8-bit RGB → HSV conversion.
//!
//! Uses the common 8-bit convention: hue is stored in half-degrees
//! (`[0, 180)`), saturation and value are scaled to `[0, 255]`.

use serde::{Deserialize, Serialize};

/// Hue in half-degrees, saturation and value in `[0, 255]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hsv {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

/// Exclusive upper bound of the 8-bit hue scale.
pub const HUE_RANGE: u8 = 180;

#[inline]
pub fn rgb_to_hsv(rgb: [u8; 3]) -> Hsv {
    let [r, g, b] = rgb;
    let v = r.max(g).max(b);
    let min = r.min(g).min(b);
    let diff = (v - min) as f32;

    let s = if v == 0 {
        0
    } else {
        (255.0 * diff / v as f32).round() as u8
    };

    if diff == 0.0 {
        return Hsv { h: 0, s, v };
    }

    let (r, g, b) = (r as f32, g as f32, b as f32);
    let mut deg = if v as f32 == r {
        60.0 * (g - b) / diff
    } else if v as f32 == g {
        120.0 + 60.0 * (b - r) / diff
    } else {
        240.0 + 60.0 * (r - g) / diff
    };
    if deg < 0.0 {
        deg += 360.0;
    }

    let mut h = (deg / 2.0).round() as u16;
    if h >= HUE_RANGE as u16 {
        h -= HUE_RANGE as u16;
    }
    Hsv { h: h as u8, s, v }
}
