//! Leap second records.

/// A leap second correction: from `utc_time` on, `correction` seconds have
/// been inserted (or, if negative, removed) in total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LeapCorrection {
    utc_time: i64,
    correction: i32,
}

impl LeapCorrection {
    #[inline]
    #[must_use]
    pub const fn new(utc_time: i64, correction: i32) -> Self {
        Self {
            utc_time,
            correction,
        }
    }

    #[inline]
    #[must_use]
    pub const fn utc_time(&self) -> i64 {
        self.utc_time
    }

    #[inline]
    #[must_use]
    pub const fn correction(&self) -> i32 {
        self.correction
    }
}
