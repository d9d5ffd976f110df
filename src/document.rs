//! An editing session on the captions of one video.
//!
//! [`Document`] ties a [`TrackSet`] to the files it was read from and to an
//! editor: the track being edited, its selected caption, and whether there
//! are unsaved changes. A host drives it with the playback clock through
//! [`Document::tick`], and is told of changes either by polling
//! ([`Document::overlay`], [`Document::is_modified`]) or by registering a
//! listener with [`Document::subscribe`].

use core::fmt;
use log::{debug, trace};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{
    content::{Caption, CaptionFields, Position},
    time::{Clock, ScaleFactor, TimeCode},
    track::{sample, CaptionTrack, Overlay, TrackId, TrackSet},
    txa::{self, SessionPaths},
    SubtrackError,
};

/// Which track follows the playback when the cursor is synchronized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncTrack {
    /// The track selected in the editor.
    #[default]
    Selected,
    /// Always the given track.
    Fixed(TrackId),
    /// The cursor is never moved by playback.
    Disabled,
}

/// Settings of a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentConfig {
    /// Position given to captions created with [`Document::add_caption`].
    pub default_position: Position,
    /// Interval at which the host is expected to call [`Document::tick`].
    pub tick_interval: Duration,
    /// Track whose cursor follows the playback.
    pub sync_track: SyncTrack,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            default_position: Position::DEFAULT,
            tick_interval: Duration::from_millis(100),
            sync_track: SyncTrack::Selected,
        }
    }
}

/// Notification sent to listeners of a [`Document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentEvent {
    /// The overlay text of a track changed.
    TextChanged {
        /// The track
        track: TrackId,
        /// New text to draw
        text: String,
    },
    /// The playback time label changed, as `MM:SS.F / MM:SS.F`.
    TimeChanged(String),
    /// The document got, or lost, unsaved changes.
    ModifiedChanged(bool),
    /// The document now refers to another session; its title.
    FileChanged(String),
}

/// Callback receiving [`DocumentEvent`]s.
pub type DocumentListener = Box<dyn FnMut(&DocumentEvent)>;

/// Which editor actions currently make sense, to enable or disable them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Actions {
    /// Save and save as.
    pub save: bool,
    /// Select the previous caption.
    pub previous: bool,
    /// Select the next caption.
    pub next: bool,
    /// Remove the selected caption.
    pub remove: bool,
    /// Rescale all captions.
    pub rescale: bool,
}

/// An editing session.
pub struct Document {
    config: DocumentConfig,
    tracks: TrackSet,
    selected: TrackId,
    paths: Option<SessionPaths>,
    media: Option<PathBuf>,
    modified: bool,
    overlay: Overlay,
    listeners: Vec<DocumentListener>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("config", &self.config)
            .field("tracks", &self.tracks)
            .field("selected", &self.selected)
            .field("paths", &self.paths)
            .field("media", &self.media)
            .field("modified", &self.modified)
            .field("overlay", &self.overlay)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Document {
    /// Create an empty, unnamed document, editing the bottom track.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DocumentConfig::default())
    }

    /// Create an empty, unnamed document with the given settings.
    #[must_use]
    pub fn with_config(config: DocumentConfig) -> Self {
        Self {
            config,
            tracks: TrackSet::new(),
            selected: TrackId::Bottom,
            paths: None,
            media: None,
            modified: false,
            overlay: Overlay::default(),
            listeners: Vec::new(),
        }
    }

    /// Register a listener, called on every [`DocumentEvent`].
    pub fn subscribe(&mut self, listener: DocumentListener) {
        self.listeners.push(listener);
    }

    /// Settings of the document.
    #[must_use]
    pub const fn config(&self) -> &DocumentConfig {
        &self.config
    }

    /// Both caption tracks.
    #[must_use]
    pub const fn tracks(&self) -> &TrackSet {
        &self.tracks
    }

    /// Track being edited.
    #[must_use]
    pub const fn selected_track(&self) -> TrackId {
        self.selected
    }

    /// The edited track.
    #[must_use]
    pub const fn track(&self) -> &CaptionTrack {
        self.tracks.track(self.selected)
    }

    /// The selected caption of the edited track.
    #[must_use]
    pub fn current(&self) -> Option<&Caption> {
        self.track().current()
    }

    /// Editor fields of the selected caption, blank when there is none.
    #[must_use]
    pub fn current_fields(&self) -> CaptionFields {
        self.current().map_or_else(
            || CaptionFields {
                position: Position::new(0, 0),
                ..CaptionFields::default()
            },
            CaptionFields::from_caption,
        )
    }

    /// Session files, `None` until opened or saved.
    #[must_use]
    pub const fn paths(&self) -> Option<&SessionPaths> {
        self.paths.as_ref()
    }

    /// Companion video found when the session was opened.
    #[must_use]
    pub fn media(&self) -> Option<&Path> {
        self.media.as_deref()
    }

    /// Name of the session, `None` if unnamed.
    #[must_use]
    pub fn title(&self) -> Option<String> {
        self.paths.as_ref().map(SessionPaths::title)
    }

    /// Are there unsaved changes ?
    #[must_use]
    pub const fn is_modified(&self) -> bool {
        self.modified
    }

    /// Overlay computed by the last [`Document::tick`].
    #[must_use]
    pub const fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    /// Open the session of `path`, any of its caption or video files.
    ///
    /// Current captions and overlay are dropped, even if the new session can't be read.
    ///
    /// # Errors
    ///
    /// Will return `TxaError::MissingSource` if `path` does not exist, or
    /// `TxaError::FileUnreadable` if a caption file can't be read.
    pub fn open<P: AsRef<Path>>(&mut self, path: P) -> Result<(), SubtrackError> {
        let path = path.as_ref();
        self.tracks.clear_all();
        self.overlay = Overlay::default();
        self.tracks = txa::load_track_set(path)?;

        let paths = SessionPaths::from_path(path);
        self.media = paths.find_media();
        debug!("session {} opened", paths.base().display());
        self.emit(&DocumentEvent::FileChanged(paths.title()));
        self.paths = Some(paths);
        self.select_track(TrackId::Bottom);
        self.set_modified(false);
        Ok(())
    }

    /// Save the captions in the files of the current session.
    ///
    /// # Errors
    ///
    /// Will return `SubtrackError::NoPath` if the document was never opened
    /// or saved, or `TxaError::FileUnwritable` if a file can't be written.
    pub fn save(&mut self) -> Result<(), SubtrackError> {
        let paths = self.paths.clone().ok_or(SubtrackError::NoPath)?;
        self.save_to(paths)
    }

    /// Save the captions under a new name, which becomes the current session.
    ///
    /// # Errors
    ///
    /// Will return `TxaError::FileUnwritable` if a file can't be written.
    pub fn save_as<P: AsRef<Path>>(&mut self, path: P) -> Result<(), SubtrackError> {
        self.save_to(SessionPaths::for_save(path))
    }

    fn save_to(&mut self, paths: SessionPaths) -> Result<(), SubtrackError> {
        txa::save_track_set(&paths, &self.tracks)?;
        debug!("session {} saved", paths.base().display());
        self.emit(&DocumentEvent::FileChanged(paths.title()));
        self.paths = Some(paths);
        self.set_modified(false);
        Ok(())
    }

    /// Edit another track, from its first caption.
    pub fn select_track(&mut self, id: impl Into<TrackId>) {
        self.selected = id.into();
        self.tracks.track_mut(self.selected).set_cursor(0);
        trace!("{} track selected", self.selected);
    }

    /// Insert a new caption before the selected one, then select the next caption.
    pub fn add_caption(&mut self) {
        let caption = Caption {
            position: self.config.default_position,
            ..Caption::default()
        };
        let track = self.tracks.track_mut(self.selected);
        track.insert_at(track.cursor(), caption);
        track.navigate(1);
        self.set_modified(true);
    }

    /// Remove the selected caption.
    pub fn remove_caption(&mut self) -> Option<Caption> {
        let track = self.tracks.track_mut(self.selected);
        let removed = track.remove_at(track.cursor());
        self.set_modified(true);
        removed
    }

    /// Select the previous caption, the last one from the first.
    pub fn previous_caption(&mut self) {
        self.tracks.track_mut(self.selected).navigate(-1);
    }

    /// Select the next caption, the first one from the last.
    pub fn next_caption(&mut self) {
        self.tracks.track_mut(self.selected).navigate(1);
    }

    /// Overwrite the selected caption, creating it if the track is empty.
    pub fn update_caption(&mut self, fields: &CaptionFields) {
        self.tracks
            .track_mut(self.selected)
            .upsert_at_cursor(fields);
        self.set_modified(true);
    }

    /// Multiply every caption time of both tracks by `factor`.
    ///
    /// # Errors
    ///
    /// Will return `TimeError::InvalidScaleFactor` if `factor` is negative or
    /// not finite, or `TimeError::ScaleOverflow` if a time overflows. Captions
    /// are left unchanged on error.
    pub fn rescale(&mut self, factor: f64) -> Result<(), SubtrackError> {
        let factor = ScaleFactor::new(factor)?;
        self.tracks.rescale_all(factor)?;
        self.set_modified(true);
        Ok(())
    }

    /// Update the overlay for the playback `position`, in milliseconds of a
    /// video lasting `duration`, and move the cursor to the caption being played.
    pub fn tick(&mut self, position: TimeCode, duration: TimeCode) -> &Overlay {
        self.emit(&DocumentEvent::TimeChanged(time_label(position, duration)));

        let overlay = sample(&self.tracks, position);
        for id in TrackId::ALL {
            if overlay.text(id) != self.overlay.text(id) {
                self.emit(&DocumentEvent::TextChanged {
                    track: id,
                    text: overlay.text(id).to_owned(),
                });
            }
        }
        self.overlay = overlay;

        let synced = match self.config.sync_track {
            SyncTrack::Selected => Some(self.selected),
            SyncTrack::Fixed(id) => Some(id),
            SyncTrack::Disabled => None,
        };
        if let Some(id) = synced {
            self.tracks.sync_cursor_to_playback(id, position);
        }
        &self.overlay
    }

    /// Clear the overlay, when the playback stops.
    pub fn stop(&mut self, duration: TimeCode) {
        self.emit(&DocumentEvent::TimeChanged(time_label(
            TimeCode::ZERO,
            duration,
        )));
        for id in TrackId::ALL {
            if !self.overlay.text(id).is_empty() {
                self.emit(&DocumentEvent::TextChanged {
                    track: id,
                    text: String::new(),
                });
            }
        }
        self.overlay = Overlay::default();
    }

    /// Which editor actions are available.
    #[must_use]
    pub fn actions(&self) -> Actions {
        let available = !self.tracks.is_empty();
        let browsable = available && self.track().len() > 1;
        Actions {
            save: available || self.modified,
            previous: browsable,
            next: browsable,
            remove: available,
            rescale: available,
        }
    }

    fn set_modified(&mut self, modified: bool) {
        if self.modified != modified {
            self.modified = modified;
            self.emit(&DocumentEvent::ModifiedChanged(modified));
        }
    }

    fn emit(&mut self, event: &DocumentEvent) {
        trace!("{event:?}");
        self.listeners
            .iter_mut()
            .for_each(|listener| listener(event));
    }
}

/// Playback time label: `MM:SS.F / MM:SS.F`.
#[must_use]
pub fn time_label(position: TimeCode, duration: TimeCode) -> String {
    format!("{} / {}", Clock(position), Clock(duration))
}
