use plate_blobs_core::{ColorRangeError, HsvSlices};

use crate::morphology::MAX_KERNEL_SIZE;
use serde::{Deserialize, Serialize};

/// Physical plate and camera values.
///
/// Carried through for downstream consumers that convert detections into
/// metric positions; the detector itself never reads them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlateGeometry {
    pub pixels_per_meter: f64,
    /// Plate side length in meters.
    pub plate_width_m: f64,
    /// Height of the plate above the floor in meters.
    pub target_height_m: f64,
    /// Bottom camera angle of view in degrees.
    pub camera_aov_deg: f64,
}

impl Default for PlateGeometry {
    fn default() -> Self {
        Self {
            pixels_per_meter: 100.0,
            plate_width_m: 0.3,
            target_height_m: 0.065,
            camera_aov_deg: 100.0,
        }
    }
}

/// Morphological opening applied to the raw color mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MorphologyParams {
    /// Side of the square structuring element in pixels.
    pub kernel_size: u32,
    /// Number of erosions, then the same number of dilations.
    pub iterations: u32,
}

impl Default for MorphologyParams {
    fn default() -> Self {
        Self {
            kernel_size: 3,
            iterations: 1,
        }
    }
}

/// Accepted blob area band in px², inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AreaBand {
    pub min: f64,
    pub max: f64,
}

impl Default for AreaBand {
    fn default() -> Self {
        Self {
            min: 2000.0,
            max: 15000.0,
        }
    }
}

impl AreaBand {
    #[inline]
    pub fn contains(&self, area: f64) -> bool {
        self.min <= area && area <= self.max
    }
}

/// Which diagnostic images to emit on the sink.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugToggles {
    /// Thresholded and opened mask.
    pub mask: bool,
    /// All raw contours before filtering.
    pub contours: bool,
    /// Final rectangles drawn over the frame.
    pub rects: bool,
}

/// Configuration for [`crate::PlateDetector`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlateDetectorParams {
    pub plate: PlateGeometry,
    /// Marker colors.
    pub color: HsvSlices,
    pub morphology: MorphologyParams,
    pub area: AreaBand,
    /// Largest accepted long-to-short side ratio.
    pub max_aspect_ratio: f32,
    /// Corner sampling window size relative to the rectangle, in `(0, 1)`.
    pub corner_window_scale: f32,
    pub debug: DebugToggles,
}

impl Default for PlateDetectorParams {
    fn default() -> Self {
        Self {
            plate: PlateGeometry::default(),
            color: HsvSlices::default(),
            morphology: MorphologyParams::default(),
            area: AreaBand::default(),
            max_aspect_ratio: 4.0,
            corner_window_scale: 0.2,
            debug: DebugToggles::default(),
        }
    }
}

/// Parameter validation errors.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ParamsError {
    #[error(transparent)]
    Color(#[from] ColorRangeError),
    #[error("morphology kernel_size must be in 1..=511")]
    InvalidKernelSize,
    #[error("area band must satisfy 0 < min <= max (min={min}, max={max})")]
    InvalidAreaBand { min: f64, max: f64 },
    #[error("max_aspect_ratio must be >= 1 (got {0})")]
    InvalidAspectRatio(f32),
    #[error("corner_window_scale must be in (0, 1) (got {0})")]
    InvalidCornerWindowScale(f32),
}

impl PlateDetectorParams {
    /// Check every setting; run once at load time.
    pub fn validate(&self) -> Result<(), ParamsError> {
        self.color.validate()?;
        let k = self.morphology.kernel_size as usize;
        if k == 0 || k > MAX_KERNEL_SIZE {
            return Err(ParamsError::InvalidKernelSize);
        }
        let AreaBand { min, max } = self.area;
        if !min.is_finite() || !max.is_finite() || min <= 0.0 || min > max {
            return Err(ParamsError::InvalidAreaBand { min, max });
        }
        if !self.max_aspect_ratio.is_finite() || self.max_aspect_ratio < 1.0 {
            return Err(ParamsError::InvalidAspectRatio(self.max_aspect_ratio));
        }
        let s = self.corner_window_scale;
        if !s.is_finite() || s <= 0.0 || s >= 1.0 {
            return Err(ParamsError::InvalidCornerWindowScale(s));
        }
        Ok(())
    }
}
