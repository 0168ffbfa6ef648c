use log::debug;
use plate_blobs_core::{FrameView, OrientedRect};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::blobs::extract_blobs;
use crate::color_mask::color_mask;
use crate::diagnostics::{render_rects, DiagnosticSink, NoopSink};
use crate::orientation::resolve_orientations;
use crate::{DetectError, ParamsError, PlateDetectorParams};

/// Single-frame color-plate detector.
///
/// Immutable after construction; one instance can serve any number of
/// frames, from any number of threads.
#[derive(Clone, Debug)]
pub struct PlateDetector {
    params: PlateDetectorParams,
}

impl PlateDetector {
    /// Validate `params` and build a detector.
    pub fn new(params: PlateDetectorParams) -> Result<Self, ParamsError> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Detector parameters.
    #[inline]
    pub fn params(&self) -> &PlateDetectorParams {
        &self.params
    }

    /// Detect plates in one RGB8 frame.
    pub fn detect(&self, frame: &FrameView<'_>) -> Result<Vec<OrientedRect>, DetectError> {
        self.detect_with_sink(frame, &mut NoopSink)
    }

    /// Same as [`Self::detect`], emitting enabled diagnostics on `sink`.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, frame, sink), fields(width = frame.width, height = frame.height))
    )]
    pub fn detect_with_sink(
        &self,
        frame: &FrameView<'_>,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Vec<OrientedRect>, DetectError> {
        let mask = color_mask(frame, &self.params, sink)?;
        let blobs = extract_blobs(&mask, &self.params, sink)?;
        let rects = resolve_orientations(frame, blobs, &self.params)?;

        if self.params.debug.rects {
            sink.rects(&render_rects(frame, &rects));
        }
        debug!("{} plates detected", rects.len());
        Ok(rects)
    }
}
