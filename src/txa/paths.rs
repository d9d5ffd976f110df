//! Paths of the files making a caption session: the two caption files and
//! the companion video, all sharing a base name.

use log::trace;
use regex::Regex;
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use crate::track::TrackId;

/// Extension of the top track caption file.
pub const TOP_EXTENSION: &str = "txa";
/// Extension of the bottom track caption file.
pub const BOTTOM_EXTENSION: &str = "txt";
/// Extensions of the companion video, in lookup order.
pub const MEDIA_EXTENSIONS: [&str; 3] = ["ogg", "ogm", "ogv"];

/// Extension of the caption file of a track.
#[must_use]
pub const fn track_extension(id: TrackId) -> &'static str {
    match id {
        TrackId::Top => TOP_EXTENSION,
        TrackId::Bottom => BOTTOM_EXTENSION,
    }
}

/// Base path shared by the files of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPaths {
    base: PathBuf,
}

impl SessionPaths {
    /// Session of any of its files: the last extension of `path` is dropped.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            base: path.as_ref().with_extension(""),
        }
    }

    /// Session to save under a name typed by the user: the extension is
    /// dropped only if it is a caption or video one (`song.v2` stays `song.v2`).
    pub fn for_save<P: AsRef<Path>>(path: P) -> Self {
        static SESSION_EXTENSION: LazyLock<Regex> =
            LazyLock::new(|| Regex::new("(?i)^(txt|txa|ogg|ogm|ogv)$").unwrap());

        let path = path.as_ref();
        let known = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| SESSION_EXTENSION.is_match(ext));
        if known {
            Self::from_path(path)
        } else {
            Self {
                base: path.to_path_buf(),
            }
        }
    }

    /// Base path, without extension.
    #[must_use]
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Path of the caption file of a track.
    #[must_use]
    pub fn track_path(&self, id: TrackId) -> PathBuf {
        self.with_extension(track_extension(id))
    }

    /// Path of the top track caption file.
    #[must_use]
    pub fn txa(&self) -> PathBuf {
        self.track_path(TrackId::Top)
    }

    /// Path of the bottom track caption file.
    #[must_use]
    pub fn txt(&self) -> PathBuf {
        self.track_path(TrackId::Bottom)
    }

    /// Possible paths of the companion video.
    pub fn media_candidates(&self) -> impl Iterator<Item = PathBuf> + '_ {
        MEDIA_EXTENSIONS
            .into_iter()
            .map(|ext| self.with_extension(ext))
    }

    /// The companion video, if present on disk. When several exist, the last
    /// one in [`MEDIA_EXTENSIONS`] order is used.
    #[must_use]
    pub fn find_media(&self) -> Option<PathBuf> {
        let media = self.media_candidates().filter(|path| path.is_file()).last();
        trace!("companion media of {}: {media:?}", self.base.display());
        media
    }

    /// Name of the session shown to the user: the file name up to its first dot.
    #[must_use]
    pub fn title(&self) -> String {
        self.base
            .file_name()
            .map(|name| name.to_string_lossy())
            .map(|name| name.split('.').next().unwrap_or_default().to_owned())
            .unwrap_or_default()
    }

    // Append rather than replace: the base may contain a dot.
    fn with_extension(&self, ext: &str) -> PathBuf {
        let mut path = OsString::from(self.base.as_os_str());
        path.push(".");
        path.push(ext);
        PathBuf::from(path)
    }
}
