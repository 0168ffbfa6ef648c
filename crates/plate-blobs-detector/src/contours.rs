//! Outer boundaries of connected mask regions.

use image::GrayImage;
use imageproc::contours::{find_contours, BorderType};
use nalgebra::Point2;
use plate_blobs_core::Mask;

use crate::DetectError;

/// Closed outer boundary of one 8-connected region, in pixel coordinates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contour {
    pub points: Vec<Point2<i32>>,
}

impl Contour {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Trace the outer boundary of every top-level region.
///
/// Holes and regions nested inside holes are skipped. The order follows the
/// raster order of each region's first pixel.
pub fn outer_contours(mask: &Mask) -> Result<Vec<Contour>, DetectError> {
    let expected = mask.width * mask.height;
    if mask.data.len() != expected {
        return Err(DetectError::MalformedMask {
            expected,
            got: mask.data.len(),
        });
    }
    if mask.is_empty() {
        return Ok(Vec::new());
    }

    let image = GrayImage::from_raw(mask.width as u32, mask.height as u32, mask.data.clone())
        .ok_or(DetectError::MalformedMask {
            expected,
            got: mask.data.len(),
        })?;

    Ok(find_contours::<i32>(&image)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .map(|c| Contour {
            points: c.points.iter().map(|p| Point2::new(p.x, p.y)).collect(),
        })
        .collect())
}
