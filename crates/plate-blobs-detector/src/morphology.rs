//! Binary erosion / dilation with a square structuring element.
//!
//! The element of side `k` is anchored at `k / 2`, so an even-sized element
//! reaches one pixel further towards the top-left than towards the
//! bottom-right. Pixels outside the mask are ignored: they neither erode a
//! border pixel nor dilate into the mask.

use image::{GrayImage, Luma};
use imageproc::morphology::{grayscale_dilate, grayscale_erode, Mask as Element};
use plate_blobs_core::{Mask, MASK_ON};

/// Largest supported element side. Larger sizes are clamped.
pub const MAX_KERNEL_SIZE: usize = 511;

fn square_element(kernel_size: usize) -> Element {
    let k = kernel_size.min(MAX_KERNEL_SIZE);
    let anchor = (k / 2) as u8;
    let square = GrayImage::from_pixel(k as u32, k as u32, Luma([MASK_ON]));
    Element::from_image(&square, anchor, anchor)
}

/// Run `f` on the mask as a gray image. Masks whose buffer does not match
/// their size are returned unchanged.
fn with_gray(mask: &Mask, f: impl FnOnce(GrayImage) -> GrayImage) -> Mask {
    let Some(img) = GrayImage::from_raw(mask.width as u32, mask.height as u32, mask.data.clone())
    else {
        return mask.clone();
    };
    Mask {
        width: mask.width,
        height: mask.height,
        data: f(img).into_raw(),
    }
}

pub fn erode(mask: &Mask, kernel_size: usize) -> Mask {
    open_with(mask, kernel_size, 1, 0)
}

pub fn dilate(mask: &Mask, kernel_size: usize) -> Mask {
    open_with(mask, kernel_size, 0, 1)
}

/// `iterations` erosions followed by `iterations` dilations.
pub fn open(mask: &Mask, kernel_size: usize, iterations: usize) -> Mask {
    open_with(mask, kernel_size, iterations, iterations)
}

fn open_with(mask: &Mask, kernel_size: usize, erosions: usize, dilations: usize) -> Mask {
    if kernel_size <= 1 || erosions + dilations == 0 || mask.is_empty() {
        return mask.clone();
    }
    let element = square_element(kernel_size);
    with_gray(mask, |mut img| {
        for _ in 0..erosions {
            img = grayscale_erode(&img, &element);
        }
        for _ in 0..dilations {
            img = grayscale_dilate(&img, &element);
        }
        img
    })
}
