use crate::hsv::{rgb_to_hsv, Hsv, HUE_RANGE};
use serde::{Deserialize, Serialize};

/// Inclusive `[min, max]` bound on one 8-bit channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRange {
    pub min: u8,
    pub max: u8,
}

impl ChannelRange {
    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, v: u8) -> bool {
        self.min <= v && v <= self.max
    }
}

/// Color-range validation errors.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorRangeError {
    #[error("{channel} range is inverted (min={min}, max={max})")]
    Inverted {
        channel: &'static str,
        min: u8,
        max: u8,
    },
    #[error("hue bound {value} exceeds 180")]
    HueOutOfScale { value: u8 },
}

/// Three hue slices sharing one saturation and one value band.
///
/// A color matches when its hue lies in any of the slices and both its
/// saturation and value lie in the shared bands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvSlices {
    pub hue: [ChannelRange; 3],
    pub saturation: ChannelRange,
    pub value: ChannelRange,
}

impl Default for HsvSlices {
    fn default() -> Self {
        Self {
            hue: [
                // green
                ChannelRange::new(35, 85),
                // red, upper end of the hue circle
                ChannelRange::new(170, 180),
                // red, lower end of the hue circle
                ChannelRange::new(0, 10),
            ],
            saturation: ChannelRange::new(100, 255),
            value: ChannelRange::new(60, 255),
        }
    }
}

impl HsvSlices {
    pub fn validate(&self) -> Result<(), ColorRangeError> {
        for r in &self.hue {
            check_order("hue", r)?;
            if r.max > HUE_RANGE {
                return Err(ColorRangeError::HueOutOfScale { value: r.max });
            }
        }
        check_order("saturation", &self.saturation)?;
        check_order("value", &self.value)
    }

    #[inline]
    pub fn contains(&self, hsv: Hsv) -> bool {
        self.saturation.contains(hsv.s)
            && self.value.contains(hsv.v)
            && self.hue.iter().any(|r| r.contains(hsv.h))
    }

    #[inline]
    pub fn contains_rgb(&self, rgb: [u8; 3]) -> bool {
        self.contains(rgb_to_hsv(rgb))
    }
}

fn check_order(channel: &'static str, r: &ChannelRange) -> Result<(), ColorRangeError> {
    if r.min > r.max {
        return Err(ColorRangeError::Inverted {
            channel,
            min: r.min,
            max: r.max,
        });
    }
    Ok(())
}
