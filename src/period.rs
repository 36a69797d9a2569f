//! The interval over which one local time type is in effect.

use core::fmt;

use crate::LocalTimeDescriptor;

/// A descriptor and the half-open UTC interval `[start, end)` during which
/// it is in effect. A `None` bound is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalTimePeriod {
    descriptor: LocalTimeDescriptor,
    utc_start_time: Option<i64>,
    utc_end_time: Option<i64>,
}

impl LocalTimePeriod {
    /// Creates a period. Returns `None` unless `start < end` when both bounds
    /// are given.
    #[must_use]
    pub fn try_new(
        descriptor: LocalTimeDescriptor,
        utc_start_time: Option<i64>,
        utc_end_time: Option<i64>,
    ) -> Option<Self> {
        Self::is_valid_utc_start_and_end_time(utc_start_time, utc_end_time).then_some(Self {
            descriptor,
            utc_start_time,
            utc_end_time,
        })
    }

    pub(crate) const fn new_unchecked(
        descriptor: LocalTimeDescriptor,
        utc_start_time: Option<i64>,
        utc_end_time: Option<i64>,
    ) -> Self {
        Self {
            descriptor,
            utc_start_time,
            utc_end_time,
        }
    }

    /// Returns whether the bounds describe a non-empty interval.
    #[must_use]
    pub fn is_valid_utc_start_and_end_time(start: Option<i64>, end: Option<i64>) -> bool {
        match (start, end) {
            (Some(start), Some(end)) => start < end,
            _ => true,
        }
    }

    #[inline]
    #[must_use]
    pub const fn descriptor(&self) -> &LocalTimeDescriptor {
        &self.descriptor
    }

    #[inline]
    #[must_use]
    pub const fn utc_start_time(&self) -> Option<i64> {
        self.utc_start_time
    }

    #[inline]
    #[must_use]
    pub const fn utc_end_time(&self) -> Option<i64> {
        self.utc_end_time
    }

    /// Returns whether `utc_time` lies within `[start, end)`.
    #[must_use]
    pub fn contains(&self, utc_time: i64) -> bool {
        self.utc_start_time.is_none_or(|start| start <= utc_time)
            && self.utc_end_time.is_none_or(|end| utc_time < end)
    }
}

impl fmt::Display for LocalTimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [", self.descriptor)?;
        match self.utc_start_time {
            Some(start) => write!(f, "{start}")?,
            None => f.write_str("-inf")?,
        }
        f.write_str(", ")?;
        match self.utc_end_time {
            Some(end) => write!(f, "{end}")?,
            None => f.write_str("+inf")?,
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn bounds() {
        let est = LocalTimeDescriptor::try_new(-18_000, false, "EST").unwrap();
        assert!(LocalTimePeriod::try_new(est, Some(10), Some(10)).is_none());
        assert!(LocalTimePeriod::try_new(est, Some(11), Some(10)).is_none());

        let period = LocalTimePeriod::try_new(est, Some(10), Some(20)).unwrap();
        assert!(!period.contains(9));
        assert!(period.contains(10));
        assert!(period.contains(19));
        assert!(!period.contains(20));
        assert_eq!(period.to_string(), "[ -05:00 false EST ] [10, 20)");

        let open = LocalTimePeriod::try_new(est, None, Some(20)).unwrap();
        assert!(open.contains(i64::MIN));
        assert!(!open.contains(20));
        let open = LocalTimePeriod::try_new(est, Some(10), None).unwrap();
        assert!(open.contains(i64::MAX));
    }
}
