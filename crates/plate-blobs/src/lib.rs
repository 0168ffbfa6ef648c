//! Colored target plate detection for single RGB frames.
//!
//! A plate is a colored rectangle whose corners carry marker color. The
//! detector thresholds the frame against three hue slices, fits a rectangle
//! to every region along its principal axes, keeps those with a plausible
//! area and aspect ratio, and reads the corner colors to tell front from
//! back.
//!
//! ## Quickstart
//!
//! ```no_run
//! use plate_blobs::detect;
//! use plate_blobs::PlateDetectorParams;
//! use image::ImageReader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = ImageReader::open("frame.png")?.decode()?.to_rgb8();
//! let plates = detect::detect_plates(&img, PlateDetectorParams::default())?;
//! for p in &plates {
//!     println!("({:.1}, {:.1}) heading {:.1}°", p.center.x, p.center.y, p.angle_deg);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `plate_blobs::core`: frame views, masks, HSV slices, oriented rectangles, logging.
//! - `plate_blobs::detector`: the pipeline stages, parameters and diagnostic sinks.
//! - `plate_blobs::detect` (feature `image`): helpers over `image` buffers.

pub use plate_blobs_core as core;
pub use plate_blobs_detector as detector;

pub use plate_blobs_core::{FrameView, HsvSlices, Mask, OrientedRect, PixelLayout};
pub use plate_blobs_detector::{DiagnosticSink, PlateDetector, PlateDetectorParams};

#[cfg(feature = "image")]
pub mod detect;
