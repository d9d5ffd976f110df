//! This module reads and writes captions in the tab separated text format of
//! the Warzone 2100 video sequences. A video has up to two caption files
//! sharing its base name: `*.txa` for the top track, `*.txt` for the bottom
//! track.
//!
//! ## Format
//!
//! Each non-blank line which does not start with `//` describes one caption:
//!
//! ```text
//! 20	432		1.5	4.2	_("Commander, the base is under attack")
//! ```
//!
//! The fields are the `x` and `y` position, the begin and end time in
//! seconds, then the quoted text. Any run of spaces or tabs separates fields
//! on read. Lines not matching this grammar are skipped.
//!
//! Captions are written with one decimal of seconds. Captions sharing a
//! begin time are written as a block; blocks are separated by a blank line.
//!
//! ## Limitations
//!
//! Times are saved with a decisecond precision, so milliseconds are lost on
//! save. The text ends at the last `"` of the line, with no escaping: a text
//! containing `")` does not read back as written. Line breaks in a caption
//! text are written as is, and split the caption in two lines on read.
//!
//! ## Example code
//!
//! ```
//! use subtrack::txa;
//!
//! let track = txa::parse_track("// intro\n20\t432\t\t1.5\t4.2\t_(\"Hello\")\n");
//! assert_eq!(track.len(), 1);
//! assert_eq!(txa::TxaTrack(&track).to_string(), "20\t432\t\t1.5\t4.2\t_(\"Hello\")\n");
//! ```

mod files;
mod parser;
pub mod paths;
mod writer;

pub use self::files::{load_track_set, open_track, save_track, save_track_set};
pub use self::parser::{parse_line, parse_track, read_track};
pub use self::paths::SessionPaths;
pub use self::writer::{write_track, TxaTrack};

use nom::{IResult, Needed};
use std::{fmt, io, path::PathBuf};
use thiserror::Error;

/// Error for caption files handling.
#[derive(Debug, Error)]
pub enum TxaError {
    /// A line does not match the caption grammar.
    #[error("Malformed caption at line {line_num}")]
    MalformedLine {
        /// Line number, starting at 1.
        line_num: usize,
        /// Parsing error
        #[source]
        source: NomError,
    },

    /// A line is not valid UTF-8.
    #[error("Caption at line {line_num} is not valid UTF-8")]
    InvalidText {
        /// Line number, starting at 1.
        line_num: usize,
        /// Decoding error
        #[source]
        source: std::str::Utf8Error,
    },

    /// We could not read a caption file.
    #[error("Could not read '{}'", path.display())]
    FileUnreadable {
        /// Source error
        source: io::Error,
        /// Path of the file we tried to read
        path: PathBuf,
    },

    /// We could not write a caption file.
    #[error("Could not write '{}'", path.display())]
    FileUnwritable {
        /// Source error
        source: io::Error,
        /// Path of the file we tried to write
        path: PathBuf,
    },

    /// The file asked to be opened does not exist.
    #[error("No such file '{}'", path.display())]
    MissingSource {
        /// Path of the missing file
        path: PathBuf,
    },
}

/// Error from `nom` handling
#[derive(Debug, Error)]
pub enum NomError {
    /// We have leftover input that we didn't expect.
    #[error("Unexpected extra input")]
    UnexpectedInput,

    /// Our input data ended sooner than we expected.
    #[error("Incomplete input: '{0:?}' needed.")]
    IncompleteInput(Needed),

    /// An error happend during parsing
    #[error("Error from nom : {0}")]
    Error(String),

    /// And Failure happend during parsing
    #[error("Failure from nom : {0}")]
    Failure(String),
}

/// Extend `IResult` management, and convert to [`Result`] with [`NomError`]
pub trait IResultExt<I, O, E> {
    /// Convert an `IResult` to Result<_, `NomError`> and check than the buffer is empty after parsing.
    /// # Errors
    /// Forward `Error` and `Failure` from nom, and return `UnexpectedInput` if the buffer is not empty after parsing.
    fn to_result_no_rest(self) -> Result<O, NomError>;
}

impl<I: Default + Eq, O, E: fmt::Debug> IResultExt<I, O, E> for IResult<I, O, E> {
    fn to_result_no_rest(self) -> Result<O, NomError> {
        match self {
            Ok((rest, val)) => {
                if rest == I::default() {
                    Ok(val)
                } else {
                    Err(NomError::UnexpectedInput)
                }
            }
            Err(err) => match err {
                nom::Err::Incomplete(needed) => Err(NomError::IncompleteInput(needed)),
                nom::Err::Error(err) => Err(NomError::Error(format!("{err:?}"))),
                nom::Err::Failure(err) => Err(NomError::Failure(format!("{err:?}"))),
            },
        }
    }
}
