//! Numeric range with an optional step.

/// A numeric range `[minimum, maximum]` sampled every `step`.
///
/// A step of `0.0` means the range is continuous. The ordering of
/// `minimum` and `maximum` is not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Range {
    minimum: f64,
    maximum: f64,
    step: f64,
}

impl Range {
    /// Create a continuous range.
    pub fn new(minimum: f64, maximum: f64) -> Self {
        Self::with_step(minimum, maximum, 0.0)
    }

    /// Create a range with an explicit step.
    pub fn with_step(minimum: f64, maximum: f64, step: f64) -> Self {
        Self {
            minimum,
            maximum,
            step,
        }
    }

    #[inline]
    pub fn minimum(&self) -> f64 {
        self.minimum
    }

    #[inline]
    pub fn maximum(&self) -> f64 {
        self.maximum
    }

    #[inline]
    pub fn step(&self) -> f64 {
        self.step
    }
}

/// Ordered list of ranges, e.g. the tunable frequency bands of a device.
pub type RangeList = Vec<Range>;
