//! Diagnostic side channel.
//!
//! The detector never holds publishers; callers hand a sink to each
//! invocation. Sink methods can't fail and their output is never read back
//! by the pipeline.

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;
use plate_blobs_core::{FrameView, Mask, OrientedRect};

use crate::contours::Contour;

const CONTOUR_COLOR: Rgb<u8> = Rgb([255, 255, 255]);
const RECT_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const FRONT_EDGE_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// Receiver for intermediate images. Every method defaults to a no-op.
pub trait DiagnosticSink {
    /// Thresholded, opened mask.
    fn mask(&mut self, _mask: &Mask) {}
    /// All raw contours, white on black, before filtering.
    fn contours(&mut self, _overlay: &RgbImage) {}
    /// Final rectangles drawn over the input frame.
    fn rects(&mut self, _overlay: &RgbImage) {}
}

/// Sink that drops everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {}

/// Sink that keeps copies of everything it receives.
#[derive(Clone, Debug, Default)]
pub struct CollectingSink {
    pub masks: Vec<Mask>,
    pub contour_overlays: Vec<RgbImage>,
    pub rect_overlays: Vec<RgbImage>,
}

impl DiagnosticSink for CollectingSink {
    fn mask(&mut self, mask: &Mask) {
        self.masks.push(mask.clone());
    }

    fn contours(&mut self, overlay: &RgbImage) {
        self.contour_overlays.push(overlay.clone());
    }

    fn rects(&mut self, overlay: &RgbImage) {
        self.rect_overlays.push(overlay.clone());
    }
}

/// Draw contour points on a black canvas of the given size.
pub fn render_contours(width: usize, height: usize, contours: &[Contour]) -> RgbImage {
    let mut img = RgbImage::new(width as u32, height as u32);
    for contour in contours {
        for p in &contour.points {
            if p.x >= 0 && p.y >= 0 && (p.x as usize) < width && (p.y as usize) < height {
                img.put_pixel(p.x as u32, p.y as u32, CONTOUR_COLOR);
            }
        }
    }
    img
}

/// Outline each rectangle over a copy of `frame`; the heading-side edge is red.
///
/// Anything other than a well-formed RGB8 view is drawn over a black canvas
/// of the frame's size.
pub fn render_rects(frame: &FrameView<'_>, rects: &[OrientedRect]) -> RgbImage {
    let (w, h) = (frame.width as u32, frame.height as u32);
    let mut img = frame
        .ensure_rgb8()
        .ok()
        .and_then(|()| RgbImage::from_raw(w, h, frame.data.to_vec()))
        .unwrap_or_else(|| RgbImage::new(w, h));
    for rect in rects {
        let c = rect.corners();
        for k in 0..4 {
            let (a, b) = (c[k], c[(k + 1) % 4]);
            // corners 1 -> 2 span the +u side
            let color = if k == 1 { FRONT_EDGE_COLOR } else { RECT_COLOR };
            draw_line_segment_mut(&mut img, (a.x, a.y), (b.x, b.y), color);
        }
    }
    img
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;
    use plate_blobs_core::PixelLayout;

    #[test]
    fn contour_overlay_marks_points_only() {
        let contour = Contour {
            points: vec![Point2::new(1, 1), Point2::new(2, 1), Point2::new(9, 9)],
        };
        let img = render_contours(4, 3, &[contour]);
        assert_eq!(img.dimensions(), (4, 3));
        assert_eq!(*img.get_pixel(1, 1), CONTOUR_COLOR);
        assert_eq!(*img.get_pixel(2, 1), CONTOUR_COLOR);
        assert_eq!(*img.get_pixel(0, 0), Rgb([0, 0, 0]));
    }

    #[test]
    fn rect_overlay_draws_front_edge() {
        let data = vec![0u8; 40 * 40 * 3];
        let frame = FrameView::rgb8(40, 40, &data).expect("frame");
        let rect = OrientedRect::new(Point2::new(20.0, 20.0), 10.0, 20.0, 0.0);
        let img = render_rects(&frame, &[rect]);
        // +u side is x = 25, -u side is x = 15
        assert_eq!(*img.get_pixel(25, 20), FRONT_EDGE_COLOR);
        assert_eq!(*img.get_pixel(15, 20), RECT_COLOR);
        assert_eq!(*img.get_pixel(20, 20), Rgb([0, 0, 0]));
    }

    #[test]
    fn rect_overlay_ignores_non_rgb_pixels() {
        let data = vec![200u8; 40 * 40 * 4];
        let frame = FrameView {
            width: 40,
            height: 40,
            layout: PixelLayout::Rgba8,
            data: &data,
        };
        let rect = OrientedRect::new(Point2::new(20.0, 20.0), 10.0, 20.0, 0.0);
        let img = render_rects(&frame, &[rect]);
        assert_eq!(img.dimensions(), (40, 40));
        assert_eq!(*img.get_pixel(20, 20), Rgb([0, 0, 0]));
        assert_eq!(*img.get_pixel(25, 20), FRONT_EDGE_COLOR);
    }

    #[test]
    fn collecting_sink_keeps_copies() {
        let mut sink = CollectingSink::default();
        sink.mask(&Mask::new(2, 2));
        sink.rects(&RgbImage::new(1, 1));
        assert_eq!(sink.masks.len(), 1);
        assert_eq!(sink.rect_overlays.len(), 1);
        assert!(sink.contour_overlays.is_empty());
    }
}
