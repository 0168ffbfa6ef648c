use serde::{Deserialize, Serialize};

/// Memory layout of an interleaved 8-bit frame buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixelLayout {
    Gray8,
    Rgb8,
    Rgba8,
}

impl PixelLayout {
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            PixelLayout::Gray8 => 1,
            PixelLayout::Rgb8 => 3,
            PixelLayout::Rgba8 => 4,
        }
    }
}

/// Frame contract violations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("unsupported pixel layout {layout:?} (expected {expected:?})")]
    UnsupportedLayout {
        layout: PixelLayout,
        expected: PixelLayout,
    },
    #[error("invalid frame buffer length (expected {expected} bytes, got {got})")]
    BufferLength { expected: usize, got: usize },
    #[error("frame dimensions overflow (width={width}, height={height})")]
    DimensionOverflow { width: usize, height: usize },
}

/// Borrowed, row-major interleaved frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameView<'a> {
    pub width: usize,
    pub height: usize,
    pub layout: PixelLayout,
    pub data: &'a [u8],
}

impl<'a> FrameView<'a> {
    /// Wrap an RGB8 buffer, checking its length.
    pub fn rgb8(width: usize, height: usize, data: &'a [u8]) -> Result<Self, FrameError> {
        let view = Self {
            width,
            height,
            layout: PixelLayout::Rgb8,
            data,
        };
        view.ensure_rgb8()?;
        Ok(view)
    }

    /// Check that this view is a well-formed RGB8 frame.
    pub fn ensure_rgb8(&self) -> Result<(), FrameError> {
        if self.layout != PixelLayout::Rgb8 {
            return Err(FrameError::UnsupportedLayout {
                layout: self.layout,
                expected: PixelLayout::Rgb8,
            });
        }
        let expected = self
            .width
            .checked_mul(self.height)
            .and_then(|n| n.checked_mul(self.layout.channels()))
            .ok_or(FrameError::DimensionOverflow {
                width: self.width,
                height: self.height,
            })?;
        if self.data.len() != expected {
            return Err(FrameError::BufferLength {
                expected,
                got: self.data.len(),
            });
        }
        Ok(())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Row `y` as a byte slice. Assumes an RGB8 view that passed [`Self::ensure_rgb8`].
    #[inline]
    pub fn row(&self, y: usize) -> &'a [u8] {
        let stride = self.width * 3;
        &self.data[y * stride..(y + 1) * stride]
    }

    /// RGB triple at `(x, y)`. Assumes an RGB8 view and in-bounds coordinates.
    #[inline]
    pub fn rgb(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.width + x) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }
}
