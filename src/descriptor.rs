//! The local-time type record of a zone.

use core::fmt;

use tinystr::TinyAsciiStr;

use crate::{iso::write_offset, ZoneinfoError, ZoneinfoResult};

/// A time zone abbreviation such as `EST` or `+0530`.
pub type Abbreviation = TinyAsciiStr<16>;

/// One distinct local time type of a zone: a UTC offset, whether it is
/// daylight-saving time, and its abbreviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocalTimeDescriptor {
    utc_offset_in_seconds: i32,
    dst_in_effect: bool,
    abbreviation: Abbreviation,
}

impl LocalTimeDescriptor {
    /// The largest magnitude accepted for a UTC offset, one second short of
    /// a day.
    pub const MAX_UTC_OFFSET_IN_SECONDS: i32 = 86_399;

    /// Creates a descriptor, validating the offset and abbreviation.
    pub fn try_new(
        utc_offset_in_seconds: i32,
        dst_in_effect: bool,
        abbreviation: &str,
    ) -> ZoneinfoResult<Self> {
        if !Self::is_valid_utc_offset_in_seconds(utc_offset_in_seconds) {
            return Err(ZoneinfoError::malformed_data()
                .with_message("local time type offset is out of range."));
        }
        let abbreviation = Abbreviation::try_from_str(abbreviation).map_err(|_| {
            ZoneinfoError::malformed_data()
                .with_message("abbreviation must be ASCII and at most 16 bytes.")
        })?;
        if abbreviation.is_empty() {
            return Err(ZoneinfoError::malformed_data().with_message("abbreviation is empty."));
        }
        Ok(Self {
            utc_offset_in_seconds,
            dst_in_effect,
            abbreviation,
        })
    }

    /// Returns whether `value` lies in `-86399..=86399`.
    #[inline]
    #[must_use]
    pub const fn is_valid_utc_offset_in_seconds(value: i32) -> bool {
        value >= -Self::MAX_UTC_OFFSET_IN_SECONDS && value <= Self::MAX_UTC_OFFSET_IN_SECONDS
    }

    #[inline]
    #[must_use]
    pub const fn utc_offset_in_seconds(&self) -> i32 {
        self.utc_offset_in_seconds
    }

    #[inline]
    #[must_use]
    pub const fn dst_in_effect(&self) -> bool {
        self.dst_in_effect
    }

    #[inline]
    #[must_use]
    pub fn abbreviation(&self) -> &str {
        self.abbreviation.as_str()
    }

    #[inline]
    pub(crate) const fn offset(&self) -> i64 {
        self.utc_offset_in_seconds as i64
    }
}

impl fmt::Display for LocalTimeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[ ")?;
        write_offset(self.utc_offset_in_seconds, f)?;
        write!(f, " {} {} ]", self.dst_in_effect, self.abbreviation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn validates_fields() {
        let est = LocalTimeDescriptor::try_new(-18_000, false, "EST").unwrap();
        assert_eq!(est.utc_offset_in_seconds(), -18_000);
        assert!(!est.dst_in_effect());
        assert_eq!(est.abbreviation(), "EST");

        assert!(LocalTimeDescriptor::try_new(86_399, false, "X").is_ok());
        assert!(LocalTimeDescriptor::try_new(-86_400, false, "X").is_err());
        assert!(LocalTimeDescriptor::try_new(0, false, "").is_err());
        assert!(LocalTimeDescriptor::try_new(0, false, "ABCDEFGHIJKLMNOPQ").is_err());
        assert!(LocalTimeDescriptor::try_new(0, false, "Ñ").is_err());
    }

    #[test]
    fn display() {
        let edt = LocalTimeDescriptor::try_new(-14_400, true, "EDT").unwrap();
        assert_eq!(edt.to_string(), "[ -04:00 true EDT ]");
    }
}
