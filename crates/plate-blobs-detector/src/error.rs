use plate_blobs_core::FrameError;

/// Errors returned while processing a frame.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DetectError {
    #[error(transparent)]
    Frame(#[from] FrameError),
    #[error("mask buffer does not match its dimensions (expected {expected} bytes, got {got})")]
    MalformedMask { expected: usize, got: usize },
    #[error("region {region} produced an empty contour")]
    EmptyContour { region: usize },
}
