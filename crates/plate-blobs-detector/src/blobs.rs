//! Mask → oriented rectangles.
//!
//! Each outer contour is fitted with a rectangle aligned to the principal
//! axes of its second moments, then filtered by area and aspect ratio.

use log::debug;
use nalgebra::{Point2, Vector2};
use plate_blobs_core::{normalize_angle_deg, Mask, OrientedRect};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::contours::{outer_contours, Contour};
use crate::diagnostics::{render_contours, DiagnosticSink};
use crate::moments::{polygon_moments, PolygonMoments};
use crate::principal_axes::principal_axes;
use crate::{DetectError, PlateDetectorParams};

/// Why a region was dropped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Rejection {
    Area(f64),
    Degenerate,
    Aspect(f32),
}

/// Fit a principal-axis rectangle to a contour.
///
/// `moments` must come from the same contour and have a positive area.
/// Returns `None` when the moments are degenerate.
pub fn fit_oriented_rect(contour: &Contour, moments: &PolygonMoments) -> Option<OrientedRect> {
    if contour.is_empty() {
        return None;
    }
    let [nu20, nu11, nu02] = moments.normalized_central()?;
    let axes = principal_axes(nu20, nu11, nu02);

    let mut lo = Vector2::repeat(f64::INFINITY);
    let mut hi = Vector2::repeat(f64::NEG_INFINITY);
    for p in &contour.points {
        let p = Vector2::new(p.x as f64, p.y as f64);
        let proj = Vector2::new(axes.first.dot(&p), axes.second.dot(&p));
        lo = lo.inf(&proj);
        hi = hi.sup(&proj);
    }

    let mid = (lo + hi) * 0.5;
    let center = axes.first * mid.x + axes.second * mid.y;
    let size = hi - lo;

    Some(OrientedRect {
        center: Point2::new(center.x as f32, center.y as f32),
        width: size.x as f32,
        height: size.y as f32,
        angle_deg: normalize_angle_deg(axes.first_angle_deg() as f32),
    })
}

/// Check one contour against the area band and aspect limit.
pub fn evaluate_contour(
    contour: &Contour,
    params: &PlateDetectorParams,
) -> Result<OrientedRect, Rejection> {
    let moments = polygon_moments(&contour.points);
    let area = moments.area();
    if !params.area.contains(area) {
        return Err(Rejection::Area(area));
    }

    let rect = fit_oriented_rect(contour, &moments).ok_or(Rejection::Degenerate)?;
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return Err(Rejection::Degenerate);
    }
    let aspect = rect.aspect_ratio();
    if aspect > params.max_aspect_ratio {
        return Err(Rejection::Aspect(aspect));
    }
    Ok(rect)
}

/// Extract, fit and filter every top-level region of `mask`.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(mask, params, sink), fields(width = mask.width, height = mask.height))
)]
pub fn extract_blobs(
    mask: &Mask,
    params: &PlateDetectorParams,
    sink: &mut dyn DiagnosticSink,
) -> Result<Vec<OrientedRect>, DetectError> {
    let contours = outer_contours(mask)?;

    if params.debug.contours {
        sink.contours(&render_contours(mask.width, mask.height, &contours));
    }

    let mut rects = Vec::new();
    for (region, contour) in contours.iter().enumerate() {
        if contour.is_empty() {
            return Err(DetectError::EmptyContour { region });
        }
        match evaluate_contour(contour, params) {
            Ok(rect) => rects.push(rect),
            Err(reason) => debug!("region {region} rejected: {reason:?}"),
        }
    }

    debug!("{} of {} regions kept", rects.len(), contours.len());
    Ok(rects)
}
