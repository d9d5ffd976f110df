use core::fmt;

use log::debug;

use super::{sample, CaptionTrack, Overlay};
use crate::time::{ScaleFactor, TimeCode, TimeError};

/// Identify one of the two caption tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum TrackId {
    /// Secondary track, drawn at the top of the video, stored in `.txa` files.
    #[default]
    Top = 0,
    /// Primary track, drawn at the bottom of the video, stored in `.txt` files.
    Bottom = 1,
}

impl TrackId {
    /// Both tracks, in index order.
    pub const ALL: [Self; 2] = [Self::Top, Self::Bottom];

    /// Track for an index. Any index other than `1` resolves to the top track.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        match index {
            1 => Self::Bottom,
            _ => Self::Top,
        }
    }

    /// Index of the track in a `TrackSet`.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl From<usize> for TrackId {
    fn from(index: usize) -> Self {
        Self::from_index(index)
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Top => f.write_str("top"),
            Self::Bottom => f.write_str("bottom"),
        }
    }
}

/// The two caption tracks of a video.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackSet {
    tracks: [CaptionTrack; 2],
}

impl TrackSet {
    /// Create a set of two empty tracks.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tracks: [CaptionTrack::new(), CaptionTrack::new()],
        }
    }

    /// Create a set from its top and bottom tracks.
    #[must_use]
    pub const fn from_tracks(top: CaptionTrack, bottom: CaptionTrack) -> Self {
        Self {
            tracks: [top, bottom],
        }
    }

    /// Access a track.
    #[must_use]
    pub const fn track(&self, id: TrackId) -> &CaptionTrack {
        &self.tracks[id.index()]
    }

    /// Access a track mutably.
    pub fn track_mut(&mut self, id: TrackId) -> &mut CaptionTrack {
        &mut self.tracks[id.index()]
    }

    /// Access a track from its index, clamped as in [`TrackId::from_index`].
    #[must_use]
    pub const fn track_at(&self, index: usize) -> &CaptionTrack {
        self.track(TrackId::from_index(index))
    }

    /// Empty both tracks.
    pub fn clear_all(&mut self) {
        self.tracks.iter_mut().for_each(CaptionTrack::clear);
    }

    /// Are both tracks empty ?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.iter().all(CaptionTrack::is_empty)
    }

    /// Multiply every caption time of both tracks by `factor`.
    /// Nothing is changed on error.
    ///
    /// # Errors
    ///
    /// Will return `TimeError::ScaleOverflow` if a scaled time does not fit in a `TimeCode`.
    pub fn rescale_all(&mut self, factor: ScaleFactor) -> Result<(), TimeError> {
        let top = self.tracks[0].rescaled_times(factor)?;
        let bottom = self.tracks[1].rescaled_times(factor)?;
        self.tracks[0].apply_times(top);
        self.tracks[1].apply_times(bottom);
        debug!("captions rescaled by {}", factor.value());
        Ok(())
    }

    /// Texts displayed at `instant`. See [`sample`].
    #[must_use]
    pub fn sample(&self, instant: TimeCode) -> Overlay {
        sample(self, instant)
    }

    /// Select, on track `id`, the last caption displayed at `instant`.
    /// See [`CaptionTrack::sync_cursor_to_playback`].
    pub fn sync_cursor_to_playback(&mut self, id: TrackId, instant: TimeCode) -> Option<usize> {
        self.track_mut(id).sync_cursor_to_playback(instant)
    }
}
