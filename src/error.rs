use alloc::string::String;
use enough::StopReason;

/// Errors from packed/planar conversion and codec orchestration.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PlanarError {
    #[error("empty input buffer")]
    EmptyInput,

    #[error("codec decode failed: {0}")]
    DecodeFailed(String),

    #[error("codec encode failed: {0}")]
    EncodeFailed(String),

    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("allocation of {bytes} bytes failed")]
    AllocationFailed { bytes: usize },

    #[error("invalid surface: {0}")]
    InvalidSurface(String),

    #[error("dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("stride {stride} too small: need at least {min}")]
    StrideTooSmall { stride: u32, min: u32 },

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("no constructor named {0:?} registered with the host")]
    UnresolvedConstructor(String),

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("short write: {written} of {expected} bytes delivered")]
    ShortWrite { written: usize, expected: usize },

    #[error("write failed: {0}")]
    WriteFailed(String),

    #[error("i/o error: {0}")]
    Io(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for PlanarError {
    fn from(r: StopReason) -> Self {
        PlanarError::Cancelled(r)
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for PlanarError {
    fn from(e: std::io::Error) -> Self {
        use std::io::ErrorKind;
        match e.kind() {
            ErrorKind::NotFound => PlanarError::NotFound(e.to_string()),
            ErrorKind::PermissionDenied => PlanarError::PermissionDenied(e.to_string()),
            _ => PlanarError::Io(e.to_string()),
        }
    }
}
