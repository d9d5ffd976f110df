//! Custom error types.

use thiserror::Error;

/// A type representing errors that are specific to `subtrack`, wrapping the
/// errors of each module.
#[derive(Debug, Error)]
pub enum SubtrackError {
    /// Error with a time value
    #[error("Invalid time")]
    Time(#[from] crate::time::TimeError),

    /// Error with caption files
    #[error("Caption file error")]
    Txa(#[from] crate::txa::TxaError),

    /// The document has no file to be saved in.
    #[error("No file name given to save the captions")]
    NoPath,
}
