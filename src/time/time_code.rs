use core::fmt;
use std::ops::Add;

use super::{ScaleFactor, TimeError};

/// Define a time in milliseconds, never negative.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeCode(u64);

impl TimeCode {
    /// The start of the video.
    pub const ZERO: Self = Self(0);

    /// Create a `TimeCode` from an unsigned count of milliseconds.
    #[must_use]
    pub const fn from_msecs(time: u64) -> Self {
        Self(time)
    }

    /// Create a `TimeCode` from a signed count of milliseconds, as reported by
    /// a playback clock.
    ///
    /// # Errors
    ///
    /// Will return `TimeError::InvalidDuration` if `time` is negative.
    pub fn from_millis(time: i64) -> Result<Self, TimeError> {
        u64::try_from(time)
            .ok()
            .map(Self)
            .ok_or(TimeError::InvalidDuration { value: time })
    }

    /// Read a decimal count of seconds, as found in caption files.
    /// The value is rounded to the nearest millisecond.
    ///
    /// # Errors
    ///
    /// Will return `TimeError::InvalidSeconds` if `value` is not a non-negative number.
    pub fn parse_seconds(value: &str) -> Result<Self, TimeError> {
        let invalid = || TimeError::InvalidSeconds {
            value: value.to_owned(),
        };
        value
            .parse::<f64>()
            .ok()
            .and_then(|secs| cast::u64((secs * 1000.).round()).ok())
            .map(Self)
            .ok_or_else(invalid)
    }

    /// Number of milliseconds.
    #[must_use]
    pub const fn msecs(self) -> u64 {
        self.0
    }

    /// Convert to seconds
    #[must_use]
    pub fn to_secs(self) -> f64 {
        cast::f64(self.0) / 1000.
    }

    /// Difference with an earlier time, or zero if `earlier` is in fact later.
    #[must_use]
    pub const fn saturating_sub(self, earlier: Self) -> Self {
        Self(self.0.saturating_sub(earlier.0))
    }

    /// Multiply the time by `factor`, rounded to the nearest millisecond.
    ///
    /// # Errors
    ///
    /// Will return `TimeError::ScaleOverflow` if the result does not fit in a `TimeCode`.
    pub fn scale(self, factor: ScaleFactor) -> Result<Self, TimeError> {
        let scaled = (cast::f64(self.0) * factor.value()).round();
        cast::u64(scaled).map(Self).map_err(TimeError::ScaleOverflow)
    }

    /// Format as `SS.F`, or `MM:SS.F` when `include_minutes` is set.
    ///
    /// The last digit is deciseconds, lower precision is truncated.
    #[must_use]
    pub fn format(self, include_minutes: bool) -> String {
        if include_minutes {
            Clock(self).to_string()
        } else {
            format!("{:02}.{}", self.secs_comp(), self.decis_comp())
        }
    }

    const fn decis(self) -> u64 {
        self.0 / 100
    }

    const fn secs(self) -> u64 {
        self.0 / 1000
    }

    const fn mins(self) -> u64 {
        self.0 / (60 * 1000)
    }

    const fn secs_comp(self) -> u64 {
        self.secs() % 60
    }

    const fn decis_comp(self) -> u64 {
        self.decis() % 10
    }
}

impl Add for TimeCode {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl From<u64> for TimeCode {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl TryFrom<i64> for TimeCode {
    type Error = TimeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_millis(value)
    }
}

/// Display a `TimeCode` as a `MM:SS.F` clock, used for the playback time label.
#[repr(transparent)]
pub struct Clock(pub TimeCode);

impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = self.0;
        write!(f, "{:02}:{:02}.{}", t.mins(), t.secs_comp(), t.decis_comp())
    }
}

/// Display a `TimeCode` as a plain count of seconds with one decimal, as
/// written in caption files (`65.4`, `0.5`).
#[repr(transparent)]
pub struct Seconds(pub TimeCode);

impl fmt::Display for Seconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = self.0;
        write!(f, "{}.{}", t.secs(), t.decis_comp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches_shape(text: &str, with_minutes: bool) -> bool {
        let bytes = text.as_bytes();
        let digit = |i: usize| bytes.get(i).is_some_and(u8::is_ascii_digit);
        if with_minutes {
            bytes.len() == 7
                && digit(0)
                && digit(1)
                && bytes[2] == b':'
                && digit(3)
                && digit(4)
                && bytes[5] == b'.'
                && digit(6)
        } else {
            bytes.len() == 4 && digit(0) && digit(1) && bytes[2] == b'.' && digit(3)
        }
    }

    #[test]
    fn format_clock() {
        assert_eq!(TimeCode::ZERO.format(true), "00:00.0");
        assert_eq!(TimeCode::from_msecs(65_432).format(true), "01:05.4");
        assert_eq!(TimeCode::from_msecs(65_432).format(false), "05.4");
        assert_eq!(TimeCode::from_msecs(599).format(false), "00.5");
    }

    #[test]
    fn format_shapes() {
        for ms in [0, 99, 100, 999, 59_999, 60_000, 61_234, 3_599_999] {
            let t = TimeCode::from_msecs(ms);
            assert!(matches_shape(&t.format(true), true), "{}", t.format(true));
            assert!(matches_shape(&t.format(false), false), "{}", t.format(false));
        }
    }

    #[test]
    fn seconds_display_truncates() {
        assert_eq!(Seconds(TimeCode::from_msecs(65_432)).to_string(), "65.4");
        assert_eq!(Seconds(TimeCode::from_msecs(1_999)).to_string(), "1.9");
        assert_eq!(Seconds(TimeCode::ZERO).to_string(), "0.0");
    }

    #[test]
    fn negative_millis_rejected() {
        assert_eq!(
            TimeCode::from_millis(-1),
            Err(TimeError::InvalidDuration { value: -1 })
        );
        assert_eq!(TimeCode::from_millis(1500), Ok(TimeCode::from_msecs(1500)));
    }

    #[test]
    fn parse_seconds() {
        assert_eq!(TimeCode::parse_seconds("1.5"), Ok(TimeCode::from_msecs(1500)));
        assert_eq!(TimeCode::parse_seconds("2.3"), Ok(TimeCode::from_msecs(2300)));
        assert_eq!(TimeCode::parse_seconds("12"), Ok(TimeCode::from_msecs(12_000)));
        assert!(TimeCode::parse_seconds("1.2.3").is_err());
        assert!(TimeCode::parse_seconds(".").is_err());
        assert_eq!(
            TimeCode::parse_seconds("-1.0"),
            Err(TimeError::InvalidSeconds {
                value: "-1.0".into()
            })
        );
    }

    #[test]
    fn scale_rounds() {
        let t = TimeCode::from_msecs(1000);
        let half = ScaleFactor::new(0.5).unwrap();
        assert_eq!(t.scale(half), Ok(TimeCode::from_msecs(500)));
        let third = ScaleFactor::new(1. / 3.).unwrap();
        assert_eq!(t.scale(third), Ok(TimeCode::from_msecs(333)));
        assert_eq!(t.scale(ScaleFactor::new(0.).unwrap()), Ok(TimeCode::ZERO));
    }

    #[test]
    fn arithmetic_never_negative() {
        let a = TimeCode::from_msecs(1000);
        let b = TimeCode::from_msecs(3000);
        assert_eq!(a.saturating_sub(b), TimeCode::ZERO);
        assert_eq!(b.saturating_sub(a), TimeCode::from_msecs(2000));
        assert_eq!(a + b, TimeCode::from_msecs(4000));
    }
}
