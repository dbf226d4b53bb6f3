use thiserror::Error;

/// Errors raised by readers, sources and validators.
///
/// End-of-stream is never an error: readers return `Ok(None)` instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReaderError {
    /// Malformed configuration, detected when a component is built.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The window duration covers less than one sample at this rate.
    #[error(
        "too small block duration ({block_dur:.6}) for sampling rate ({sampling_rate}): \
         block duration should cover at least one sample (i.e. 1/{sampling_rate})"
    )]
    BlockDurationTooSmall { block_dur: f64, sampling_rate: u32 },

    #[error("illegal state: {0}")]
    IllegalState(String),

    #[error("audio source is not rewindable")]
    NotRewindable,

    /// The underlying device, file or stream is not open or failed.
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("unknown time format directive '{0}'")]
    TimeFormat(String),
}

impl ReaderError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub(crate) fn illegal_state(msg: impl Into<String>) -> Self {
        Self::IllegalState(msg.into())
    }
}
