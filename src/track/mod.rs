//! In-memory caption tracks: the ordered captions of each track, the
//! selection cursor used to edit them, and the query of what is displayed
//! at a playback instant.
//!
//! A [`TrackSet`] always holds two tracks. Captions are matched against an
//! instant with an open interval: a caption is displayed strictly after its
//! begin and strictly before its end.
//!
//! ```
//! use subtrack::{
//!     content::{Caption, Position},
//!     time::TimeCode,
//!     track::{TrackId, TrackSet},
//! };
//!
//! let mut tracks = TrackSet::new();
//! tracks.track_mut(TrackId::Bottom).push(Caption::new(
//!     "Hello",
//!     TimeCode::from_msecs(1000),
//!     TimeCode::from_msecs(3000),
//!     Position::DEFAULT,
//! ));
//! let overlay = tracks.sample(TimeCode::from_msecs(1500));
//! assert_eq!(overlay.bottom_text, "Hello");
//! assert!(overlay.top_text.is_empty());
//! ```
mod caption_track;
mod track_set;
mod visibility;

pub use caption_track::{CaptionTrack, LINE_BREAK};
pub use track_set::{TrackId, TrackSet};
pub use visibility::{sample, Overlay};
