use enough::StopReason;

/// Errors from PNM encoding.
///
/// The plain [`encode`](crate::encode) entry point can only produce
/// [`InvalidFormat`](PnmError::InvalidFormat) and [`Io`](PnmError::Io).
/// The remaining variants need a caller opt-in (limits, a stoppable
/// [`Stop`](enough::Stop)) or come from [`RawImage`](crate::RawImage)
/// construction.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PnmError {
    #[error("invalid PNM format: {0}")]
    InvalidFormat(String),

    /// The output stream failed. The error is passed through untouched.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for PnmError {
    fn from(r: StopReason) -> Self {
        PnmError::Cancelled(r)
    }
}
