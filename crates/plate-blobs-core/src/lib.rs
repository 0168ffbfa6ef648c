//! Core types and utilities for color-plate blob detection.
//!
//! This crate is small and purely value-level: frame views, binary masks,
//! HSV color slices and oriented rectangles. It does not depend on any
//! concrete image library.

mod color_range;
mod hsv;
mod image;
mod logger;
mod mask;
mod rect;

pub use color_range::{ChannelRange, ColorRangeError, HsvSlices};
pub use hsv::{rgb_to_hsv, Hsv, HUE_RANGE};
pub use image::{FrameError, FrameView, PixelLayout};
pub use mask::{Mask, MASK_ON};
pub use rect::{angle_diff_deg, normalize_angle_deg, OrientedRect};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
