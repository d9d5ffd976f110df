use compact_str::CompactString;

use super::Position;
use crate::time::TimeCode;

/// One timed caption cue.
///
/// `begin <= end` is expected but not enforced: an editor may go through
/// such states, and a cue with `begin >= end` is simply never visible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Caption {
    /// Text of the caption, may contain line breaks.
    pub text: CompactString,
    /// Start of display.
    pub begin: TimeCode,
    /// End of display.
    pub end: TimeCode,
    /// Where to draw the caption.
    pub position: Position,
}

impl Caption {
    /// Create a caption.
    pub fn new(
        text: impl Into<CompactString>,
        begin: TimeCode,
        end: TimeCode,
        position: Position,
    ) -> Self {
        Self {
            text: text.into(),
            begin,
            end,
            position,
        }
    }

    /// Display length of the caption, zero for a malformed cue.
    #[must_use]
    pub const fn length(&self) -> TimeCode {
        self.end.saturating_sub(self.begin)
    }

    /// Is the caption displayed at `instant` ? Both bounds are excluded.
    #[must_use]
    pub fn is_visible_at(&self, instant: TimeCode) -> bool {
        self.begin < instant && instant < self.end
    }
}

/// Values of a caption as shown by an editor, which edits a begin time and
/// a display length rather than an end time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptionFields {
    /// Text of the caption.
    pub text: CompactString,
    /// Where to draw the caption.
    pub position: Position,
    /// Start of display.
    pub begin: TimeCode,
    /// Display length.
    pub length: TimeCode,
}

impl CaptionFields {
    /// Fields describing an existing caption.
    #[must_use]
    pub fn from_caption(caption: &Caption) -> Self {
        Self {
            text: caption.text.clone(),
            position: caption.position,
            begin: caption.begin,
            length: caption.length(),
        }
    }

    /// End of display computed from `begin` and `length`.
    #[must_use]
    pub fn end(&self) -> TimeCode {
        self.begin + self.length
    }

    /// Overwrite every field of `caption`.
    pub fn apply_to(&self, caption: &mut Caption) {
        caption.text.clone_from(&self.text);
        caption.position = self.position;
        caption.begin = self.begin;
        caption.end = self.end();
    }
}

impl From<&Caption> for CaptionFields {
    fn from(caption: &Caption) -> Self {
        Self::from_caption(caption)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caption(begin: u64, end: u64) -> Caption {
        Caption::new(
            "text",
            TimeCode::from_msecs(begin),
            TimeCode::from_msecs(end),
            Position::DEFAULT,
        )
    }

    #[test]
    fn default_position() {
        assert_eq!(Caption::default().position, Position::new(20, 432));
    }

    #[test]
    fn visibility_bounds_are_strict() {
        let cap = caption(1000, 2000);
        assert!(!cap.is_visible_at(TimeCode::from_msecs(1000)));
        assert!(cap.is_visible_at(TimeCode::from_msecs(1001)));
        assert!(cap.is_visible_at(TimeCode::from_msecs(1999)));
        assert!(!cap.is_visible_at(TimeCode::from_msecs(2000)));
    }

    #[test]
    fn malformed_cue_never_visible() {
        let cap = caption(2000, 1000);
        assert!(!cap.is_visible_at(TimeCode::from_msecs(1500)));
        assert_eq!(cap.length(), TimeCode::ZERO);
    }

    #[test]
    fn fields_round_trip() {
        let cap = caption(1500, 4000);
        let fields = CaptionFields::from_caption(&cap);
        assert_eq!(fields.length, TimeCode::from_msecs(2500));

        let mut other = Caption::default();
        fields.apply_to(&mut other);
        assert_eq!(other, cap);
    }
}
