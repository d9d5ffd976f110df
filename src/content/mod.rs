//! Module for caption content: the cue itself and where it is drawn.
mod caption;
mod position;

pub use caption::{Caption, CaptionFields};
pub use position::Position;
