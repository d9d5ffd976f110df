use super::{TrackId, TrackSet};
use crate::time::TimeCode;

/// Texts to draw over the video at one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overlay {
    /// Text of the top track.
    pub top_text: String,
    /// Text of the bottom track.
    pub bottom_text: String,
}

impl Overlay {
    /// Text of a track.
    #[must_use]
    pub fn text(&self, id: TrackId) -> &str {
        match id {
            TrackId::Top => &self.top_text,
            TrackId::Bottom => &self.bottom_text,
        }
    }
}

/// Texts displayed at `instant` on each track of `tracks`.
///
/// For a track, the texts of all captions with `begin < instant < end` are
/// joined with a line break, in file order. A track with no visible caption
/// gives an empty string.
#[must_use]
pub fn sample(tracks: &TrackSet, instant: TimeCode) -> Overlay {
    Overlay {
        top_text: tracks.track(TrackId::Top).visible_text(instant),
        bottom_text: tracks.track(TrackId::Bottom).visible_text(instant),
    }
}
