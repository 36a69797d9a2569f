//! Civil datetime values used at the edges of the zone queries.
//!
//! - `LocalDateTime`: a wall-clock date and time with no offset.
//! - `OffsetDateTime`: a `LocalDateTime` paired with its UTC offset.
//! - `ZonedLocalTime`: an `OffsetDateTime` tagged with the identifier of the
//!   zone that produced it.
//!
//! All three are limited to years 1 through 9999 at second precision.

use alloc::string::String;
use core::{fmt, str::FromStr};

use ixdtf::parsers::IxdtfParser;
use writeable::{impl_display_with_writeable, LengthHint, Writeable};

use crate::{
    utils::{self, SECONDS_PER_HOUR, SECONDS_PER_MINUTE},
    ZoneinfoError, ZoneinfoResult,
};

/// Epoch seconds of 0001-01-01T00:00:00Z.
pub const MIN_EPOCH_SECONDS: i64 = -62_135_596_800;
/// Epoch seconds of 9999-12-31T23:59:59Z.
pub const MAX_EPOCH_SECONDS: i64 = 253_402_300_799;

/// A civil date and time with no associated offset or zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalDateTime {
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
}

impl Default for LocalDateTime {
    /// 0001-01-01T00:00:00
    fn default() -> Self {
        Self::new_unchecked(1, 1, 1, 0, 0, 0)
    }
}

impl LocalDateTime {
    #[inline]
    pub(crate) const fn new_unchecked(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Creates a new `LocalDateTime`, rejecting any field out of range.
    pub fn try_new(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> ZoneinfoResult<Self> {
        if !(1..=9999).contains(&year) {
            return Err(ZoneinfoError::invalid_datetime().with_message("year is out of range."));
        }
        if !(1..=12).contains(&month) || day == 0 || day > utils::iso_days_in_month(year, month) {
            return Err(ZoneinfoError::invalid_datetime().with_message("date is not valid."));
        }
        if hour > 23 || minute > 59 || second > 59 {
            return Err(ZoneinfoError::invalid_datetime().with_message("time is not valid."));
        }
        Ok(Self::new_unchecked(year, month, day, hour, minute, second))
    }

    /// Creates the `LocalDateTime` that is `seconds` after 1970-01-01T00:00:00.
    pub fn from_epoch_seconds(seconds: i64) -> ZoneinfoResult<Self> {
        if !(MIN_EPOCH_SECONDS..=MAX_EPOCH_SECONDS).contains(&seconds) {
            return Err(ZoneinfoError::invalid_datetime()
                .with_message("epoch seconds are outside the supported range."));
        }
        let (days, secs) = utils::epoch_seconds_to_days_and_seconds(seconds);
        let (year, month, day) = utils::ymd_from_epoch_days(days);
        Ok(Self::new_unchecked(
            year,
            month,
            day,
            (secs / SECONDS_PER_HOUR) as u8,
            (secs % SECONDS_PER_HOUR / SECONDS_PER_MINUTE) as u8,
            (secs % SECONDS_PER_MINUTE) as u8,
        ))
    }

    /// Returns the seconds from 1970-01-01T00:00:00 to this datetime, as if
    /// it were a UTC datetime.
    #[must_use]
    pub const fn to_epoch_seconds(&self) -> i64 {
        let days = utils::epoch_days_from_gregorian_date(self.year, self.month, self.day);
        days * utils::SECONDS_PER_DAY
            + self.hour as i64 * SECONDS_PER_HOUR
            + self.minute as i64 * SECONDS_PER_MINUTE
            + self.second as i64
    }

    /// Returns this datetime moved by `seconds`.
    pub fn checked_add_seconds(&self, seconds: i64) -> ZoneinfoResult<Self> {
        self.to_epoch_seconds()
            .checked_add(seconds)
            .ok_or(ZoneinfoError::invalid_datetime())
            .and_then(Self::from_epoch_seconds)
    }

    #[inline]
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    #[inline]
    #[must_use]
    pub const fn month(&self) -> u8 {
        self.month
    }

    #[inline]
    #[must_use]
    pub const fn day(&self) -> u8 {
        self.day
    }

    #[inline]
    #[must_use]
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    #[inline]
    #[must_use]
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    #[inline]
    #[must_use]
    pub const fn second(&self) -> u8 {
        self.second
    }
}

impl Writeable for LocalDateTime {
    fn write_to<W: fmt::Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        write_four_digit_year(self.year, sink)?;
        sink.write_char('-')?;
        write_padded_u8(self.month, sink)?;
        sink.write_char('-')?;
        write_padded_u8(self.day, sink)?;
        sink.write_char('T')?;
        write_padded_u8(self.hour, sink)?;
        sink.write_char(':')?;
        write_padded_u8(self.minute, sink)?;
        sink.write_char(':')?;
        write_padded_u8(self.second, sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        LengthHint::exact(19)
    }
}

impl FromStr for LocalDateTime {
    type Err = ZoneinfoError;

    /// Parses an offset-less ISO 8601 date or datetime. A leap second is
    /// read as second 59.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let record = IxdtfParser::from_str(s).parse()?;
        if record.offset.is_some() {
            return Err(ZoneinfoError::invalid_datetime()
                .with_message("a local datetime may not carry a UTC offset."));
        }
        let date = record.date.ok_or(
            ZoneinfoError::invalid_datetime().with_message("a local datetime requires a date."),
        )?;
        let (hour, minute, second) = record
            .time
            .map_or((0, 0, 0), |t| (t.hour, t.minute, t.second.min(59)));
        Self::try_new(date.year, date.month, date.day, hour, minute, second)
    }
}

/// A `LocalDateTime` with the UTC offset in effect for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OffsetDateTime {
    local: LocalDateTime,
    offset_seconds: i32,
}

impl OffsetDateTime {
    #[inline]
    #[must_use]
    pub const fn new(local: LocalDateTime, offset_seconds: i32) -> Self {
        Self {
            local,
            offset_seconds,
        }
    }

    /// Returns the local datetime that the UTC instant `utc` displays as at
    /// `offset_seconds`.
    pub fn from_utc(utc: i64, offset_seconds: i32) -> ZoneinfoResult<Self> {
        let local = utc
            .checked_add(i64::from(offset_seconds))
            .ok_or(ZoneinfoError::invalid_datetime())
            .and_then(LocalDateTime::from_epoch_seconds)?;
        Ok(Self::new(local, offset_seconds))
    }

    #[inline]
    #[must_use]
    pub const fn local(&self) -> LocalDateTime {
        self.local
    }

    #[inline]
    #[must_use]
    pub const fn offset_seconds(&self) -> i32 {
        self.offset_seconds
    }

    /// Returns the UTC instant in epoch seconds.
    #[must_use]
    pub const fn to_utc_epoch_seconds(&self) -> i64 {
        self.local.to_epoch_seconds() - self.offset_seconds as i64
    }
}

impl Writeable for OffsetDateTime {
    fn write_to<W: fmt::Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        self.local.write_to(sink)?;
        write_offset(self.offset_seconds, sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        let offset_length = if self.offset_seconds % 60 == 0 { 6 } else { 9 };
        self.local.writeable_length_hint() + offset_length
    }
}

/// An `OffsetDateTime` together with the identifier of its zone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZonedLocalTime {
    datetime: OffsetDateTime,
    time_zone_id: String,
}

impl ZonedLocalTime {
    #[must_use]
    pub fn new(datetime: OffsetDateTime, time_zone_id: impl Into<String>) -> Self {
        Self {
            datetime,
            time_zone_id: time_zone_id.into(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn datetime(&self) -> OffsetDateTime {
        self.datetime
    }

    #[inline]
    #[must_use]
    pub fn time_zone_id(&self) -> &str {
        &self.time_zone_id
    }
}

impl Writeable for ZonedLocalTime {
    fn write_to<W: fmt::Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        self.datetime.write_to(sink)?;
        sink.write_char('[')?;
        sink.write_str(&self.time_zone_id)?;
        sink.write_char(']')
    }

    fn writeable_length_hint(&self) -> LengthHint {
        self.datetime.writeable_length_hint() + self.time_zone_id.len() + 2
    }
}

impl_display_with_writeable!(LocalDateTime);
impl_display_with_writeable!(OffsetDateTime);
impl_display_with_writeable!(ZonedLocalTime);

/// Writes `+HH:MM`, or `+HH:MM:SS` when the offset has a seconds part.
pub(crate) fn write_offset<W: fmt::Write + ?Sized>(offset: i32, sink: &mut W) -> fmt::Result {
    sink.write_char(if offset < 0 { '-' } else { '+' })?;
    let abs = offset.unsigned_abs();
    write_padded_u8((abs / 3600) as u8, sink)?;
    sink.write_char(':')?;
    write_padded_u8((abs % 3600 / 60) as u8, sink)?;
    if abs % 60 != 0 {
        sink.write_char(':')?;
        write_padded_u8((abs % 60) as u8, sink)?;
    }
    Ok(())
}

fn write_padded_u8<W: fmt::Write + ?Sized>(num: u8, sink: &mut W) -> fmt::Result {
    if num < 10 {
        sink.write_char('0')?;
    }
    num.write_to(sink)
}

fn write_four_digit_year<W: fmt::Write + ?Sized>(mut y: i32, sink: &mut W) -> fmt::Result {
    (y / 1_000).write_to(sink)?;
    y %= 1_000;
    (y / 100).write_to(sink)?;
    y %= 100;
    (y / 10).write_to(sink)?;
    y %= 10;
    y.write_to(sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::string::ToString;
    use writeable::assert_writeable_eq;

    #[test]
    fn epoch_second_bounds() {
        let min = LocalDateTime::try_new(1, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(min.to_epoch_seconds(), MIN_EPOCH_SECONDS);
        let max = LocalDateTime::try_new(9999, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(max.to_epoch_seconds(), MAX_EPOCH_SECONDS);
        assert_eq!(LocalDateTime::from_epoch_seconds(MIN_EPOCH_SECONDS).unwrap(), min);
        assert_eq!(LocalDateTime::from_epoch_seconds(MAX_EPOCH_SECONDS).unwrap(), max);
        assert!(LocalDateTime::from_epoch_seconds(MIN_EPOCH_SECONDS - 1).is_err());
        assert!(LocalDateTime::from_epoch_seconds(MAX_EPOCH_SECONDS + 1).is_err());
    }

    #[test]
    fn rejects_invalid_fields() {
        assert!(LocalDateTime::try_new(0, 1, 1, 0, 0, 0).is_err());
        assert!(LocalDateTime::try_new(10_000, 1, 1, 0, 0, 0).is_err());
        assert!(LocalDateTime::try_new(2023, 2, 29, 0, 0, 0).is_err());
        assert!(LocalDateTime::try_new(2024, 2, 29, 0, 0, 0).is_ok());
        assert!(LocalDateTime::try_new(2024, 13, 1, 0, 0, 0).is_err());
        assert!(LocalDateTime::try_new(2024, 1, 1, 24, 0, 0).is_err());
        assert!(LocalDateTime::try_new(2024, 1, 1, 0, 0, 60).is_err());
    }

    #[test]
    fn epoch_seconds_round_trip() {
        let dt = LocalDateTime::try_new(2006, 4, 2, 2, 30, 0).unwrap();
        assert_eq!(dt.to_epoch_seconds(), 1_143_945_000);
        assert_eq!(LocalDateTime::from_epoch_seconds(1_143_945_000).unwrap(), dt);
        let before_epoch = LocalDateTime::try_new(1969, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(before_epoch.to_epoch_seconds(), -1);
        assert_eq!(
            dt.checked_add_seconds(3600).unwrap(),
            LocalDateTime::try_new(2006, 4, 2, 3, 30, 0).unwrap()
        );
    }

    #[test]
    fn format_and_parse() {
        let dt = LocalDateTime::try_new(987, 6, 5, 4, 3, 2).unwrap();
        assert_writeable_eq!(dt, "0987-06-05T04:03:02");
        assert_eq!("0987-06-05T04:03:02".parse::<LocalDateTime>().unwrap(), dt);
        assert_eq!(
            "2020-01-01".parse::<LocalDateTime>().unwrap(),
            LocalDateTime::try_new(2020, 1, 1, 0, 0, 0).unwrap()
        );
        assert!("2020-01-01T00:00:00Z".parse::<LocalDateTime>().is_err());
        assert!("2020-01-01T00:00:00+01:00".parse::<LocalDateTime>().is_err());
        assert!("not a date".parse::<LocalDateTime>().is_err());
    }

    #[test]
    fn offset_and_zoned_format() {
        let local = LocalDateTime::try_new(2006, 10, 29, 1, 30, 0).unwrap();
        let offset_dt = OffsetDateTime::new(local, -14_400);
        assert_writeable_eq!(offset_dt, "2006-10-29T01:30:00-04:00");
        assert_eq!(offset_dt.to_utc_epoch_seconds(), 1_162_099_800);

        let lmt = OffsetDateTime::new(local, -17_762);
        assert_writeable_eq!(lmt, "2006-10-29T01:30:00-04:56:02");

        let zoned = ZonedLocalTime::new(OffsetDateTime::new(local, 0), "Etc/UTC");
        assert_eq!(zoned.to_string(), "2006-10-29T01:30:00+00:00[Etc/UTC]");
        assert_eq!(zoned.time_zone_id(), "Etc/UTC");
    }

    #[test]
    fn from_utc_applies_offset() {
        let dt = OffsetDateTime::from_utc(1_162_099_800, -14_400).unwrap();
        assert_eq!(dt.local(), LocalDateTime::try_new(2006, 10, 29, 1, 30, 0).unwrap());
        assert_eq!(dt.to_utc_epoch_seconds(), 1_162_099_800);
    }

    #[test]
    fn from_utc_rejects_overflowing_instants() {
        assert!(OffsetDateTime::from_utc(i64::MAX, 19_800).is_err());
        assert!(OffsetDateTime::from_utc(i64::MIN, -18_000).is_err());
        assert!(OffsetDateTime::from_utc(MAX_EPOCH_SECONDS, 1).is_err());
        assert!(OffsetDateTime::from_utc(MAX_EPOCH_SECONDS - 1, 1).is_ok());
    }
}
