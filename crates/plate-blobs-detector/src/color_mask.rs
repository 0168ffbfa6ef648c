//! Frame → binary marker mask.

use log::debug;
use plate_blobs_core::{FrameView, HsvSlices, Mask, MASK_ON};

#[cfg(feature = "rayon")]
use rayon::prelude::*;
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::diagnostics::DiagnosticSink;
use crate::morphology::open;
use crate::{DetectError, PlateDetectorParams};

fn threshold_row(src: &[u8], dst: &mut [u8], slices: &HsvSlices) {
    for (px, out) in src.chunks_exact(3).zip(dst.iter_mut()) {
        *out = if slices.contains_rgb([px[0], px[1], px[2]]) {
            MASK_ON
        } else {
            0
        };
    }
}

/// Per-pixel HSV threshold, no cleanup.
///
/// Fails when `frame` is not a well-formed RGB8 view.
pub fn threshold_frame(frame: &FrameView<'_>, slices: &HsvSlices) -> Result<Mask, DetectError> {
    frame.ensure_rgb8()?;
    let mut mask = Mask::new(frame.width, frame.height);
    if frame.is_empty() {
        return Ok(mask);
    }
    let w = frame.width;

    #[cfg(feature = "rayon")]
    mask.data
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, dst)| threshold_row(frame.row(y), dst, slices));

    #[cfg(not(feature = "rayon"))]
    mask.data
        .chunks_mut(w)
        .enumerate()
        .for_each(|(y, dst)| threshold_row(frame.row(y), dst, slices));

    Ok(mask)
}

/// Threshold `frame` against the configured slices and open the result.
///
/// Fails only when `frame` is not a well-formed RGB8 view. A zero-sized
/// frame gives a zero-sized mask.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(frame, params, sink), fields(width = frame.width, height = frame.height))
)]
pub fn color_mask(
    frame: &FrameView<'_>,
    params: &PlateDetectorParams,
    sink: &mut dyn DiagnosticSink,
) -> Result<Mask, DetectError> {
    let raw = threshold_frame(frame, &params.color)?;
    let morph = params.morphology;
    let mask = open(&raw, morph.kernel_size as usize, morph.iterations as usize);
    debug!(
        "color mask: {} px raw, {} px after opening",
        raw.count(),
        mask.count()
    );

    if params.debug.mask {
        sink.mask(&mask);
    }
    Ok(mask)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{CollectingSink, NoopSink};
    use plate_blobs_core::PixelLayout;

    const RED: [u8; 3] = [220, 20, 20];
    const GREEN: [u8; 3] = [20, 200, 20];
    const BLUE: [u8; 3] = [20, 20, 220];

    fn frame_data(w: usize, h: usize, paint: impl Fn(usize, usize) -> [u8; 3]) -> Vec<u8> {
        let mut data = Vec::with_capacity(w * h * 3);
        for y in 0..h {
            for x in 0..w {
                data.extend_from_slice(&paint(x, y));
            }
        }
        data
    }

    #[test]
    fn threshold_keeps_red_and_green_only() {
        let data = frame_data(3, 1, |x, _| [RED, GREEN, BLUE][x]);
        let frame = FrameView::rgb8(3, 1, &data).expect("frame");
        let mask = threshold_frame(&frame, &HsvSlices::default()).expect("threshold");
        assert_eq!(mask.data, vec![MASK_ON, MASK_ON, 0]);
    }

    #[test]
    fn threshold_rejects_packed_rgba() {
        // 3 x 4 RGBA is 48 bytes, which would also fit a 4 x 4 RGB frame
        let data = vec![255u8; 3 * 4 * 4];
        let frame = FrameView {
            width: 3,
            height: 4,
            layout: PixelLayout::Rgba8,
            data: &data,
        };
        assert!(matches!(
            threshold_frame(&frame, &HsvSlices::default()),
            Err(DetectError::Frame(_))
        ));
    }

    #[test]
    fn opening_removes_speckles_and_keeps_blocks() {
        let data = frame_data(40, 40, |x, y| {
            let block = (10..20).contains(&x) && (10..20).contains(&y);
            let speck = x == 30 && y == 30;
            if block || speck {
                RED
            } else {
                [0, 0, 0]
            }
        });
        let frame = FrameView::rgb8(40, 40, &data).expect("frame");
        let mask = color_mask(&frame, &PlateDetectorParams::default(), &mut NoopSink)
            .expect("mask");
        assert!(!mask.get(30, 30));
        assert_eq!(mask.count(), 100);
        assert!(mask.get(10, 10) && mask.get(19, 19));
    }

    #[test]
    fn mask_is_deterministic() {
        let data = frame_data(32, 24, |x, y| if (x * 7 + y * 3) % 5 < 3 { GREEN } else { BLUE });
        let frame = FrameView::rgb8(32, 24, &data).expect("frame");
        let params = PlateDetectorParams::default();
        let a = color_mask(&frame, &params, &mut NoopSink).expect("mask");
        let b = color_mask(&frame, &params, &mut NoopSink).expect("mask");
        assert_eq!(a, b);
    }

    #[test]
    fn zero_sized_frame_gives_zero_sized_mask() {
        let frame = FrameView::rgb8(0, 0, &[]).expect("frame");
        let mask = color_mask(&frame, &PlateDetectorParams::default(), &mut NoopSink)
            .expect("mask");
        assert!(mask.is_empty());
        assert!(mask.data.is_empty());
    }

    #[test]
    fn rejects_non_rgb_layout() {
        let data = vec![0u8; 16];
        let frame = FrameView {
            width: 4,
            height: 4,
            layout: PixelLayout::Gray8,
            data: &data,
        };
        let err = color_mask(&frame, &PlateDetectorParams::default(), &mut NoopSink).unwrap_err();
        assert!(matches!(err, DetectError::Frame(_)));
    }

    #[test]
    fn emits_mask_when_enabled() {
        let data = frame_data(8, 8, |_, _| RED);
        let frame = FrameView::rgb8(8, 8, &data).expect("frame");
        let mut params = PlateDetectorParams::default();
        params.debug.mask = true;
        let mut sink = CollectingSink::default();
        let mask = color_mask(&frame, &params, &mut sink).expect("mask");
        assert_eq!(sink.masks, vec![mask]);
    }
}
