//! Heading disambiguation from corner colors.
//!
//! A principal-axis fit only knows the heading axis up to sign. The plate
//! carries marker color in its corners; when both corners on the `-u` side
//! have lost the marker color while both `+u` corners keep it, the plate
//! faces the other way and the heading is turned by 180°.
//!
//! Pixel `(x, y)` is sampled at the point `(x, y)`, the same convention the
//! contour tracer uses.

use log::trace;
use nalgebra::Point2;
use plate_blobs_core::{FrameView, HsvSlices, OrientedRect};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{DetectError, PlateDetectorParams};

/// Index of the `-u` (rear) side in corner arrays.
pub const REAR: usize = 0;
/// Index of the `+u` (front) side in corner arrays.
pub const FRONT: usize = 1;

/// Sampling windows in each corner of `rect`, indexed `[u side][v side]`
/// with `0` for the negative side and `1` for the positive side.
///
/// Each window is `scale` times the rectangle, shares its angle and touches
/// the two rectangle edges meeting at that corner.
pub fn corner_windows(rect: &OrientedRect, scale: f32) -> [[OrientedRect; 2]; 2] {
    let (u, v) = rect.axes();
    let du = u * (0.5 * (1.0 - scale) * rect.width);
    let dv = v * (0.5 * (1.0 - scale) * rect.height);
    let window = |su: f32, sv: f32| OrientedRect {
        center: rect.center + du * su + dv * sv,
        width: rect.width * scale,
        height: rect.height * scale,
        angle_deg: rect.angle_deg,
    };
    [
        [window(-1.0, -1.0), window(-1.0, 1.0)],
        [window(1.0, -1.0), window(1.0, 1.0)],
    ]
}

/// Mean color of the frame pixels inside `window`.
///
/// The window is clipped to the frame; `None` when nothing is left.
/// `frame` must be a valid RGB8 view.
pub(crate) fn mean_color_in_window(
    frame: &FrameView<'_>,
    window: &OrientedRect,
) -> Option<[u8; 3]> {
    if frame.is_empty() {
        return None;
    }
    let corners = window.corners();
    let (mut lo, mut hi) = (corners[0], corners[0]);
    for c in &corners[1..] {
        lo = lo.inf(c);
        hi = hi.sup(c);
    }

    let max_x = (frame.width - 1) as f32;
    let max_y = (frame.height - 1) as f32;
    if hi.x < 0.0 || hi.y < 0.0 || lo.x > max_x || lo.y > max_y {
        return None;
    }
    let x0 = lo.x.ceil().max(0.0) as usize;
    let y0 = lo.y.ceil().max(0.0) as usize;
    let x1 = hi.x.floor().min(max_x) as usize;
    let y1 = hi.y.floor().min(max_y) as usize;

    let mut sum = [0u64; 3];
    let mut n = 0u64;
    for y in y0..=y1 {
        for x in x0..=x1 {
            if !window.contains(Point2::new(x as f32, y as f32)) {
                continue;
            }
            let px = frame.rgb(x, y);
            for (s, c) in sum.iter_mut().zip(px) {
                *s += c as u64;
            }
            n += 1;
        }
    }
    if n == 0 {
        return None;
    }
    Some(sum.map(|s| ((s as f64 / n as f64).round()).min(255.0) as u8))
}

/// Whether each corner window still shows marker color, indexed like
/// [`corner_windows`]. Windows that fall off the frame count as non-marker.
/// `frame` must be a valid RGB8 view.
pub(crate) fn corner_marker_flags(
    frame: &FrameView<'_>,
    rect: &OrientedRect,
    scale: f32,
    slices: &HsvSlices,
) -> [[bool; 2]; 2] {
    corner_windows(rect, scale).map(|side| {
        side.map(|w| {
            mean_color_in_window(frame, &w).is_some_and(|rgb| slices.contains_rgb(rgb))
        })
    })
}

/// Turn `rect` around when the rear corners are bare and the front corners
/// are marked. Width, height and center never change.
pub fn resolve_orientation(
    frame: &FrameView<'_>,
    rect: OrientedRect,
    params: &PlateDetectorParams,
) -> Result<OrientedRect, DetectError> {
    frame.ensure_rgb8()?;
    Ok(resolve_checked(frame, rect, params))
}

fn resolve_checked(
    frame: &FrameView<'_>,
    rect: OrientedRect,
    params: &PlateDetectorParams,
) -> OrientedRect {
    let flags = corner_marker_flags(frame, &rect, params.corner_window_scale, &params.color);
    let rear_bare = !flags[REAR][0] && !flags[REAR][1];
    let front_marked = flags[FRONT][0] && flags[FRONT][1];
    trace!(
        "corners at ({:.1}, {:.1}): rear {:?} front {:?}",
        rect.center.x,
        rect.center.y,
        flags[REAR],
        flags[FRONT]
    );
    if rear_bare && front_marked {
        rect.flipped()
    } else {
        rect
    }
}

/// Resolve the heading of every rectangle, preserving order.
///
/// Fails only when `frame` is not a well-formed RGB8 view.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(frame, rects, params), fields(count = rects.len()))
)]
pub fn resolve_orientations(
    frame: &FrameView<'_>,
    rects: Vec<OrientedRect>,
    params: &PlateDetectorParams,
) -> Result<Vec<OrientedRect>, DetectError> {
    frame.ensure_rgb8()?;
    Ok(rects
        .into_iter()
        .map(|r| resolve_checked(frame, r, params))
        .collect())
}
