//! Load and save the caption files of a session.

use log::debug;
use std::{
    fs,
    io::{self, BufReader, BufWriter, Write as _},
    path::Path,
};

use super::{read_track, write_track, SessionPaths, TxaError};
use crate::track::{CaptionTrack, TrackId, TrackSet};

/// Open a caption file.
///
/// # Errors
///
/// Will return `TxaError::FileUnreadable` if the file can't be opened or read.
#[profiling::function]
pub fn open_track<P: AsRef<Path>>(path: P) -> Result<CaptionTrack, TxaError> {
    let path = path.as_ref();
    let mkerr = |source| TxaError::FileUnreadable {
        source,
        path: path.into(),
    };

    let f = fs::File::open(path).map_err(mkerr)?;
    let track = read_track(BufReader::new(f), &mkerr)?;
    debug!("{} captions read from {}", track.len(), path.display());
    Ok(track)
}

/// Write a caption file, replacing any previous content.
///
/// # Errors
///
/// Will return `TxaError::FileUnwritable` if the file can't be created or written.
#[profiling::function]
pub fn save_track<P: AsRef<Path>>(path: P, track: &CaptionTrack) -> Result<(), TxaError> {
    let path = path.as_ref();
    let mkerr = |source: io::Error| TxaError::FileUnwritable {
        source,
        path: path.into(),
    };

    let f = fs::File::create(path).map_err(mkerr)?;
    let mut writer = BufWriter::new(f);
    write_track(track, &mut writer).map_err(mkerr)?;
    writer.flush().map_err(mkerr)?;
    debug!("{} captions written to {}", track.len(), path.display());
    Ok(())
}

/// Load the caption files of a session, `source` being any of its files.
/// A missing caption file gives an empty track.
///
/// # Errors
///
/// Will return `TxaError::MissingSource` if `source` does not exist, and
/// `TxaError::FileUnreadable` if an existing caption file can't be read.
#[profiling::function]
pub fn load_track_set<P: AsRef<Path>>(source: P) -> Result<TrackSet, TxaError> {
    let source = source.as_ref();
    if !source.exists() {
        return Err(TxaError::MissingSource {
            path: source.into(),
        });
    }

    let paths = SessionPaths::from_path(source);
    let mut tracks = TrackSet::new();
    for id in TrackId::ALL {
        let path = paths.track_path(id);
        if path.is_file() {
            *tracks.track_mut(id) = open_track(path)?;
        }
    }
    Ok(tracks)
}

/// Save the non-empty tracks of `tracks` in the caption files of a session.
/// The file of an empty track is left untouched.
///
/// The bottom track is written first. Saving stops at the first failure.
///
/// # Errors
///
/// Will return `TxaError::FileUnwritable` if a caption file can't be written.
#[profiling::function]
pub fn save_track_set(paths: &SessionPaths, tracks: &TrackSet) -> Result<(), TxaError> {
    [TrackId::Bottom, TrackId::Top]
        .into_iter()
        .filter(|&id| !tracks.track(id).is_empty())
        .try_for_each(|id| save_track(paths.track_path(id), tracks.track(id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        content::{Caption, Position},
        time::TimeCode,
        txa::TxaTrack,
    };

    fn caption(text: &str, begin: u64, end: u64) -> Caption {
        Caption::new(
            text,
            TimeCode::from_msecs(begin),
            TimeCode::from_msecs(end),
            Position::DEFAULT,
        )
    }

    #[test]
    fn open_fixtures() {
        let _ = env_logger::builder().is_test(true).try_init();

        let mut count = 0;
        for entry in glob::glob("./fixtures/*.tx[at]").unwrap() {
            let path = entry.unwrap();
            let track = open_track(&path).unwrap();
            assert!(!track.is_empty(), "no caption in {}", path.display());
            count += 1;
        }
        assert_eq!(count, 3);
    }

    #[test]
    fn fixture_written_back_identically() {
        let content = fs::read_to_string("./fixtures/briefing.txt").unwrap();
        let (_comment, captions) = content.split_once('\n').unwrap();

        let track = open_track("./fixtures/briefing.txt").unwrap();
        assert_eq!(track.len(), 4);
        assert_eq!(TxaTrack(&track).to_string(), captions);
    }

    #[test]
    fn damaged_fixture_keeps_valid_lines() {
        let track = open_track("./fixtures/damaged.txt").unwrap();
        assert_eq!(
            track.captions(),
            [caption("first", 1000, 2000), caption("second", 3000, 4000)]
        );
    }

    #[test]
    fn load_fixture_session() {
        let tracks = load_track_set("./fixtures/briefing.txa").unwrap();
        assert_eq!(tracks.track(TrackId::Top).len(), 1);
        assert_eq!(tracks.track(TrackId::Bottom).len(), 4);
        assert_eq!(
            tracks.sample(TimeCode::from_msecs(5000)).bottom_text,
            "The enemy has taken the northern outpost.\nOur scouts report heavy armour."
        );
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let paths = SessionPaths::for_save(dir.path().join("intro"));
        let tracks = TrackSet::from_tracks(
            [caption("top", 500, 1500)].into_iter().collect(),
            [caption("A", 1000, 3000), caption("B", 1000, 2000)]
                .into_iter()
                .collect(),
        );

        save_track_set(&paths, &tracks).unwrap();
        let loaded = load_track_set(paths.txt()).unwrap();
        assert_eq!(loaded, tracks);
    }

    #[test]
    fn empty_track_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let paths = SessionPaths::for_save(dir.path().join("outro.txt"));
        fs::write(paths.txa(), "previous content").unwrap();

        let tracks = TrackSet::from_tracks(
            CaptionTrack::new(),
            [caption("A", 1000, 3000)].into_iter().collect(),
        );
        save_track_set(&paths, &tracks).unwrap();

        assert_eq!(fs::read_to_string(paths.txa()).unwrap(), "previous content");
        assert!(paths.txt().is_file());
    }

    #[test]
    fn missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_track_set(dir.path().join("nothing.ogg")).unwrap_err();
        assert!(matches!(err, TxaError::MissingSource { .. }));
    }

    #[test]
    fn missing_caption_file_gives_empty_track() {
        let dir = tempfile::tempdir().unwrap();
        let video = dir.path().join("cam.ogv");
        fs::write(&video, b"").unwrap();
        fs::write(dir.path().join("cam.txt"), "1 2 0.5 1.0 _(\"x\")\n").unwrap();

        let tracks = load_track_set(&video).unwrap();
        assert!(tracks.track(TrackId::Top).is_empty());
        assert_eq!(tracks.track(TrackId::Bottom).len(), 1);
    }

    #[test]
    fn unwritable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("a.txt");
        let err = save_track(&path, &[caption("A", 0, 1)].into_iter().collect()).unwrap_err();
        assert!(matches!(err, TxaError::FileUnwritable { .. }));
    }
}
