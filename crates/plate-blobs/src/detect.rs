use crate::{core, detector};
use image::{ColorType, DynamicImage, GrayImage, RgbImage};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced by the `image` helpers.
#[derive(thiserror::Error, Debug)]
pub enum DetectError {
    #[error("unsupported image color type {0:?}")]
    UnsupportedColor(ColorType),

    #[error(transparent)]
    Params(#[from] detector::ParamsError),

    #[error(transparent)]
    Detect(#[from] detector::DetectError),
}

/// Borrow an 8-bit image as a frame view.
///
/// Only 8-bit gray, RGB and RGBA images map directly; the detector itself
/// accepts RGB only.
pub fn frame_view(img: &DynamicImage) -> Result<core::FrameView<'_>, DetectError> {
    let (layout, data) = match img {
        DynamicImage::ImageLuma8(buf) => (core::PixelLayout::Gray8, buf.as_raw()),
        DynamicImage::ImageRgb8(buf) => (core::PixelLayout::Rgb8, buf.as_raw()),
        DynamicImage::ImageRgba8(buf) => (core::PixelLayout::Rgba8, buf.as_raw()),
        other => return Err(DetectError::UnsupportedColor(other.color())),
    };
    Ok(core::FrameView {
        width: img.width() as usize,
        height: img.height() as usize,
        layout,
        data,
    })
}

/// Borrow an `image::RgbImage` as an RGB8 frame view.
pub fn rgb_view(img: &RgbImage) -> core::FrameView<'_> {
    core::FrameView {
        width: img.width() as usize,
        height: img.height() as usize,
        layout: core::PixelLayout::Rgb8,
        data: img.as_raw(),
    }
}

/// Copy a binary mask into a grayscale image.
pub fn mask_image(mask: &core::Mask) -> GrayImage {
    GrayImage::from_raw(mask.width as u32, mask.height as u32, mask.data.clone())
        .unwrap_or_else(|| GrayImage::new(mask.width as u32, mask.height as u32))
}

/// Run the plate detector end-to-end on an RGB image.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(img, params), fields(width = img.width(), height = img.height()))
)]
pub fn detect_plates(
    img: &RgbImage,
    params: detector::PlateDetectorParams,
) -> Result<Vec<core::OrientedRect>, DetectError> {
    detect_plates_with_sink(img, params, &mut detector::NoopSink)
}

/// Same as [`detect_plates`], emitting enabled diagnostics on `sink`.
pub fn detect_plates_with_sink(
    img: &RgbImage,
    params: detector::PlateDetectorParams,
    sink: &mut dyn detector::DiagnosticSink,
) -> Result<Vec<core::OrientedRect>, DetectError> {
    let detector = detector::PlateDetector::new(params)?;
    Ok(detector.detect_with_sink(&rgb_view(img), sink)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgb};

    #[test]
    fn frame_view_maps_color_types() {
        let rgb = DynamicImage::ImageRgb8(RgbImage::new(4, 3));
        let view = frame_view(&rgb).expect("rgb");
        assert_eq!(view.layout, core::PixelLayout::Rgb8);
        assert_eq!((view.width, view.height, view.data.len()), (4, 3, 36));

        let gray = DynamicImage::ImageLuma8(GrayImage::from_pixel(2, 2, Luma([7])));
        assert_eq!(frame_view(&gray).expect("gray").layout, core::PixelLayout::Gray8);

        let wide = DynamicImage::ImageRgb16(image::ImageBuffer::new(2, 2));
        assert!(matches!(
            frame_view(&wide),
            Err(DetectError::UnsupportedColor(ColorType::Rgb16))
        ));
    }

    #[test]
    fn gray_frame_is_rejected_by_detector() {
        let gray = DynamicImage::ImageLuma8(GrayImage::new(8, 8));
        let view = frame_view(&gray).expect("gray");
        let detector =
            detector::PlateDetector::new(detector::PlateDetectorParams::default()).expect("params");
        assert!(matches!(
            detector.detect(&view),
            Err(detector::DetectError::Frame(_))
        ));
    }

    #[test]
    fn detects_plate_in_rgb_image() {
        let mut img = RgbImage::from_pixel(200, 160, Rgb([30, 30, 30]));
        for y in 30..=130 {
            for x in 80..=120 {
                img.put_pixel(x, y, Rgb([220, 20, 20]));
            }
        }
        let plates = detect_plates(&img, detector::PlateDetectorParams::default()).expect("detect");
        assert_eq!(plates.len(), 1);
        assert!((plates[0].center.x - 100.0).abs() < 0.5);
        assert!((plates[0].center.y - 80.0).abs() < 0.5);
    }

    #[test]
    fn invalid_params_surface_as_params_error() {
        let mut params = detector::PlateDetectorParams::default();
        params.max_aspect_ratio = 0.5;
        let img = RgbImage::new(4, 4);
        assert!(matches!(
            detect_plates(&img, params),
            Err(DetectError::Params(_))
        ));
    }

    #[test]
    fn mask_image_copies_pixels() {
        let mut mask = core::Mask::new(3, 2);
        mask.set(1, 1, true);
        let img = mask_image(&mask);
        assert_eq!(img.get_pixel(1, 1).0, [core::MASK_ON]);
        assert_eq!(img.get_pixel(0, 0).0, [0]);
    }
}
