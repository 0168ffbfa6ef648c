//! Color-plate detection on single RGB frames.
//!
//! The pipeline has three stages, each also usable on its own:
//! - [`color_mask`]: HSV slice threshold followed by a morphological opening,
//! - [`extract_blobs`]: outer contours, principal-axis rectangles, area and
//!   aspect filtering,
//! - [`resolve_orientations`]: corner-color test that settles the heading.
//!
//! [`PlateDetector`] validates its parameters once and runs all three.
//! Intermediate images go to an optional [`DiagnosticSink`].
//!
//! ```no_run
//! use plate_blobs_core::FrameView;
//! use plate_blobs_detector::{PlateDetector, PlateDetectorParams};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let (width, height) = (640, 480);
//! let data = vec![0u8; width * height * 3];
//! let frame = FrameView::rgb8(width, height, &data)?;
//! let detector = PlateDetector::new(PlateDetectorParams::default())?;
//! for plate in detector.detect(&frame)? {
//!     println!("{:?} heading {:.1}°", plate.center, plate.angle_deg);
//! }
//! # Ok(())
//! # }
//! ```

mod blobs;
mod color_mask;
mod contours;
mod detector;
mod diagnostics;
mod error;
mod moments;
mod morphology;
mod orientation;
mod params;
mod principal_axes;

pub use blobs::{evaluate_contour, extract_blobs, fit_oriented_rect, Rejection};
pub use color_mask::{color_mask, threshold_frame};
pub use contours::{outer_contours, Contour};
pub use detector::PlateDetector;
pub use diagnostics::{render_contours, render_rects, CollectingSink, DiagnosticSink, NoopSink};
pub use error::DetectError;
pub use moments::{polygon_moments, PolygonMoments};
pub use morphology::{dilate, erode, open, MAX_KERNEL_SIZE};
pub use orientation::{corner_windows, resolve_orientation, resolve_orientations, FRONT, REAR};
pub use params::{
    AreaBand, DebugToggles, MorphologyParams, ParamsError, PlateDetectorParams, PlateGeometry,
};
pub use principal_axes::{principal_axes, PrincipalAxes};
