use thiserror::Error;

/// Errors raised while configuring a detector or reading its window.
///
/// Tick processing itself never fails; every variant here belongs to construction
/// or to out-of-range access on a [`RingBuffer`](crate::RingBuffer).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtremaError {
    /// The half-window radius must be at least one
    #[error("threshold must be a positive integer")]
    InvalidThreshold,

    /// A ring buffer needs room for at least one tick
    #[error("ring buffer capacity can not be zero")]
    ZeroCapacity,

    /// A logical index at or past the number of buffered ticks
    #[error("index {index} out of bounds for window of {len} ticks")]
    IndexOutOfBounds {
        /// The requested logical index
        index: usize,
        /// Number of ticks currently buffered
        len: usize,
    },
}

/// Result alias used throughout the crate
pub type Result<T> = core::result::Result<T, ExtremaError>;
