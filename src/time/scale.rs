use super::TimeError;

/// A multiplier applied to caption times, checked to be finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ScaleFactor(f64);

impl ScaleFactor {
    /// The factor which leaves times unchanged.
    pub const IDENTITY: Self = Self(1.);

    /// Create a scale factor.
    ///
    /// # Errors
    ///
    /// Will return `TimeError::InvalidScaleFactor` if `factor` is negative,
    /// infinite or `NaN`.
    pub fn new(factor: f64) -> Result<Self, TimeError> {
        if factor.is_finite() && factor >= 0. {
            Ok(Self(factor))
        } else {
            Err(TimeError::InvalidScaleFactor { factor })
        }
    }

    /// The factor value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// The factor undoing this one, if any.
    #[must_use]
    pub fn inverse(self) -> Option<Self> {
        (self.0 > 0.).then(|| Self(1. / self.0))
    }
}

impl TryFrom<f64> for ScaleFactor {
    type Error = TimeError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
