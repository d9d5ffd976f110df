use log::trace;

use crate::{
    content::{Caption, CaptionFields},
    time::{ScaleFactor, TimeCode, TimeError},
};

/// Separator between the texts of captions visible at the same time.
pub const LINE_BREAK: &str = "\n";

/// An ordered list of captions with a cursor on the selected one.
///
/// The order is the file order. It is not sorted on insertion: captions
/// sharing a begin time are kept grouped by the caller.
///
/// The cursor is always in `[0, len)`, or `0` when the track is empty: the
/// slot of the first caption to be created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptionTrack {
    captions: Vec<Caption>,
    cursor: usize,
}

impl CaptionTrack {
    /// Create an empty track.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            captions: Vec::new(),
            cursor: 0,
        }
    }

    /// Number of captions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.captions.len()
    }

    /// Does the track hold no caption ?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.captions.is_empty()
    }

    /// Captions, in file order.
    #[must_use]
    pub fn captions(&self) -> &[Caption] {
        &self.captions
    }

    /// Iterate on captions in file order.
    pub fn iter(&self) -> std::slice::Iter<'_, Caption> {
        self.captions.iter()
    }

    /// Caption at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Caption> {
        self.captions.get(index)
    }

    /// Append a caption at the end of the track.
    pub fn push(&mut self, caption: Caption) {
        self.captions.push(caption);
    }

    /// Remove every caption.
    pub fn clear(&mut self) {
        self.captions.clear();
        self.cursor = 0;
    }

    /// Index of the selected caption.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Select the caption at `index`. An index past the end selects the first caption.
    pub fn set_cursor(&mut self, index: usize) {
        self.cursor = index;
        self.normalize_cursor();
    }

    /// The selected caption, `None` if the track is empty.
    #[must_use]
    pub fn current(&self) -> Option<&Caption> {
        self.captions.get(self.cursor)
    }

    /// Insert `caption` before `index`, or at the end if `index` is past it.
    /// The cursor is not moved.
    ///
    /// Return the index of the inserted caption.
    pub fn insert_at(&mut self, index: usize, caption: Caption) -> usize {
        let index = index.min(self.captions.len());
        self.captions.insert(index, caption);
        index
    }

    /// Remove the caption at `index`, doing nothing if there is none.
    pub fn remove_at(&mut self, index: usize) -> Option<Caption> {
        if index >= self.captions.len() {
            trace!("no caption to remove at {index}");
            return None;
        }
        let removed = self.captions.remove(index);
        self.normalize_cursor();
        Some(removed)
    }

    /// Move the cursor by `delta`, wrapping around both ends: previous of the
    /// first caption is the last one, next of the last one is the first.
    pub fn navigate(&mut self, delta: isize) {
        let len = self.captions.len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = match self.cursor.checked_add_signed(delta) {
            None => len - 1,
            Some(moved) if moved >= len => 0,
            Some(moved) => moved,
        };
        trace!("cursor moved to {}", self.cursor);
    }

    /// Overwrite the selected caption with `fields`.
    ///
    /// On an empty track, the first caption is created on the fly.
    pub fn upsert_at_cursor(&mut self, fields: &CaptionFields) {
        if self.captions.is_empty() && self.cursor == 0 {
            self.captions.push(Caption::default());
        }
        if let Some(caption) = self.captions.get_mut(self.cursor) {
            fields.apply_to(caption);
        }
    }

    /// Captions displayed at `instant`, in file order.
    pub fn find_visible_at(&self, instant: TimeCode) -> impl Iterator<Item = &Caption> + '_ {
        self.captions
            .iter()
            .filter(move |caption| caption.is_visible_at(instant))
    }

    /// Texts of the captions displayed at `instant`, one per line.
    #[must_use]
    pub fn visible_text(&self, instant: TimeCode) -> String {
        self.find_visible_at(instant)
            .map(|caption| caption.text.as_str())
            .collect::<Vec<_>>()
            .join(LINE_BREAK)
    }

    /// Select the last caption, in file order, displayed at `instant`.
    /// The cursor is left untouched if none is displayed.
    ///
    /// Return the selected index if it was updated.
    pub fn sync_cursor_to_playback(&mut self, instant: TimeCode) -> Option<usize> {
        let last = self
            .captions
            .iter()
            .rposition(|caption| caption.is_visible_at(instant))?;
        self.cursor = last;
        Some(last)
    }

    /// Multiply begin and end of every caption by `factor`.
    /// Order and cursor are kept. Nothing is changed on error.
    ///
    /// # Errors
    ///
    /// Will return `TimeError::ScaleOverflow` if a scaled time does not fit in a `TimeCode`.
    pub fn rescale(&mut self, factor: ScaleFactor) -> Result<(), TimeError> {
        let times = self.rescaled_times(factor)?;
        self.apply_times(times);
        Ok(())
    }

    pub(super) fn rescaled_times(
        &self,
        factor: ScaleFactor,
    ) -> Result<Vec<(TimeCode, TimeCode)>, TimeError> {
        self.captions
            .iter()
            .map(|caption| Ok((caption.begin.scale(factor)?, caption.end.scale(factor)?)))
            .collect()
    }

    pub(super) fn apply_times(&mut self, times: Vec<(TimeCode, TimeCode)>) {
        self.captions
            .iter_mut()
            .zip(times)
            .for_each(|(caption, (begin, end))| {
                caption.begin = begin;
                caption.end = end;
            });
    }

    fn normalize_cursor(&mut self) {
        if self.cursor >= self.captions.len() {
            self.cursor = 0;
        }
    }
}

impl From<Vec<Caption>> for CaptionTrack {
    fn from(captions: Vec<Caption>) -> Self {
        Self {
            captions,
            cursor: 0,
        }
    }
}

impl FromIterator<Caption> for CaptionTrack {
    fn from_iter<T: IntoIterator<Item = Caption>>(iter: T) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<'a> IntoIterator for &'a CaptionTrack {
    type Item = &'a Caption;
    type IntoIter = std::slice::Iter<'a, Caption>;

    fn into_iter(self) -> Self::IntoIter {
        self.captions.iter()
    }
}
