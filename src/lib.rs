//! This crate provides the model of a two-track caption editor: captions
//! timed against a video, the cursor an editor moves through them, the
//! text displayed at a playback instant, and the `.txa`/`.txt` caption
//! files of the Warzone 2100 video sequences.
//!
//! Playback, rendering and widgets are left to the host application: it
//! feeds the current playback position to a [`document::Document`] and
//! draws the returned [`track::Overlay`].
//!
//! ```
//! use subtrack::{content::CaptionFields, document::Document, time::TimeCode};
//!
//! let mut doc = Document::new();
//! doc.update_caption(&CaptionFields {
//!     text: "Incoming transmission".into(),
//!     begin: TimeCode::from_msecs(1000),
//!     length: TimeCode::from_msecs(2000),
//!     ..CaptionFields::default()
//! });
//! let overlay = doc.tick(TimeCode::from_msecs(1500), TimeCode::from_msecs(60_000));
//! assert_eq!(overlay.bottom_text, "Incoming transmission");
//! assert!(doc.is_modified());
//! ```

pub mod content;
pub mod document;
mod errors;
pub mod time;
pub mod track;
pub mod txa;

pub use errors::SubtrackError;
