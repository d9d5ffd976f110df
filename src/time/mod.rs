//! Module for caption timing: millisecond time codes and the time scale factor.
mod scale;
mod time_code;

pub use scale::ScaleFactor;
pub use time_code::{Clock, Seconds, TimeCode};

use thiserror::Error;

/// Error for time values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimeError {
    /// A negative millisecond count was given where a `TimeCode` is required.
    #[error("Invalid duration: {value} ms is negative")]
    InvalidDuration {
        /// The rejected millisecond value.
        value: i64,
    },

    /// The scale factor is negative, infinite or not a number.
    #[error("Invalid scale factor '{factor}'")]
    InvalidScaleFactor {
        /// The rejected factor.
        factor: f64,
    },

    /// A decimal seconds value could not be read.
    #[error("Invalid seconds value '{value}'")]
    InvalidSeconds {
        /// The text which failed to parse.
        value: String,
    },

    /// The result of a scaling does not fit in a `TimeCode`.
    #[error("Scaled time overflow: {0:?}")]
    ScaleOverflow(cast::Error),
}
