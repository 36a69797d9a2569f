//! POSIX TZ strings, the rule a TZif footer gives for instants after the
//! last transition of a zone.
//!
//! A string such as `EST5EDT,M3.2.0,M11.1.0` names a standard variant, an
//! optional daylight-saving variant and the rule dates between them. POSIX
//! offsets count hours west of Greenwich, the opposite sign of a UTC offset.

use crate::{
    utils::{self, SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE},
    LocalTimeDescriptor, ZoneinfoError, ZoneinfoResult,
};

/// A POSIX TZ string, decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PosixTimeZone {
    std: LocalTimeDescriptor,
    dst: Option<DstRule>,
}

/// The daylight-saving variant of a `PosixTimeZone` and when it applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DstRule {
    descriptor: LocalTimeDescriptor,
    start: RuleDateTime,
    end: RuleDateTime,
}

/// A rule date with the local time of day the transition happens at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RuleDateTime {
    date: RuleDate,
    /// Seconds after local midnight; may be negative or exceed a day.
    time: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleDate {
    /// `Jn`: day 1 to 365, February 29 is never counted.
    JulianNoLeap(u16),
    /// `n`: zero-based day 0 to 365, February 29 is counted.
    Julian(u16),
    /// `Mm.w.d`: day `d` (0 is Sunday) of week `w` of month `m`, where
    /// week 5 is the last such day of the month.
    MonthWeekDay(u8, u8, u8),
}

/// A transition generated from the rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RuleTransition {
    pub(crate) utc_time: i64,
    pub(crate) is_dst: bool,
}

impl PosixTimeZone {
    /// Decodes a POSIX TZ string.
    pub(crate) fn parse(text: &str) -> ZoneinfoResult<Self> {
        let mut parser = Parser::new(text.as_bytes());
        let std_name = parser.name()?;
        let std_offset = -parser.offset()?;
        let std = variant(std_name, std_offset, false)?;
        if parser.is_done() {
            return Ok(Self { std, dst: None });
        }

        let dst_name = parser.name()?;
        let dst_offset = match parser.peek() {
            Some(b',') | None => std_offset + SECONDS_PER_HOUR,
            _ => -parser.offset()?,
        };
        let descriptor = variant(dst_name, dst_offset, true)?;
        // zic always writes the rule; a bare `EST5EDT` relies on the
        // system's default dates, which vary.
        if !parser.eat(b',') {
            return Err(malformed("daylight-saving variant has no rule dates."));
        }
        let start = parser.rule_date_time()?;
        if !parser.eat(b',') {
            return Err(malformed("rule has no end date."));
        }
        let end = parser.rule_date_time()?;
        if !parser.is_done() {
            return Err(malformed("trailing characters after the rule."));
        }
        Ok(Self {
            std,
            dst: Some(DstRule {
                descriptor,
                start,
                end,
            }),
        })
    }

    #[inline]
    pub(crate) fn std_descriptor(&self) -> LocalTimeDescriptor {
        self.std
    }

    /// The daylight-saving descriptor, when the rule has transitions.
    pub(crate) fn dst_descriptor(&self) -> Option<LocalTimeDescriptor> {
        self.dst.map(|rule| rule.descriptor)
    }

    /// Returns whether daylight-saving time lasts the whole year, as zic
    /// writes it with `J1/0` or `0/0` starts and a `J365` end at 24:00 plus
    /// the savings.
    pub(crate) fn is_permanent_dst(&self) -> bool {
        let Some(rule) = self.dst else {
            return false;
        };
        let savings = rule.descriptor.offset() - self.std.offset();
        matches!(
            rule.start,
            RuleDateTime {
                date: RuleDate::JulianNoLeap(1) | RuleDate::Julian(0),
                time: 0
            }
        ) && rule.end.date == RuleDate::JulianNoLeap(365)
            && rule.end.time == SECONDS_PER_DAY + savings
    }

    /// Returns the two transitions of `year` in UTC order, or `None` when
    /// the rule has no daylight-saving variant.
    pub(crate) fn transitions_in_year(&self, year: i32) -> Option<[RuleTransition; 2]> {
        let rule = self.dst?;
        // Each rule time is read on the clock in effect before it.
        let start = RuleTransition {
            utc_time: rule.start.local_seconds(year) - self.std.offset(),
            is_dst: true,
        };
        let end = RuleTransition {
            utc_time: rule.end.local_seconds(year) - rule.descriptor.offset(),
            is_dst: false,
        };
        Some(if end.utc_time < start.utc_time {
            [end, start]
        } else {
            [start, end]
        })
    }
}

impl RuleDateTime {
    fn local_seconds(&self, year: i32) -> i64 {
        self.date.epoch_days(year) * SECONDS_PER_DAY + self.time
    }
}

impl RuleDate {
    fn epoch_days(&self, year: i32) -> i64 {
        let january_first = utils::epoch_days_from_gregorian_date(year, 1, 1);
        match *self {
            Self::JulianNoLeap(day) => {
                let day = i64::from(day);
                // Day 60 is March 1st in every year.
                january_first + day - 1 + i64::from(utils::is_leap(year) && day >= 60)
            }
            Self::Julian(day) => january_first + i64::from(day),
            Self::MonthWeekDay(month, week, weekday) => {
                let first = utils::epoch_days_from_gregorian_date(year, month, 1);
                let last = first + i64::from(utils::iso_days_in_month(year, month)) - 1;
                let first_weekday = utils::epoch_days_to_weekday(first);
                let mut day = first
                    + (i64::from(weekday) - first_weekday).rem_euclid(7)
                    + 7 * (i64::from(week) - 1);
                while day > last {
                    day -= 7;
                }
                day
            }
        }
    }
}

fn variant(name: &str, utc_offset: i64, is_dst: bool) -> ZoneinfoResult<LocalTimeDescriptor> {
    let utc_offset = i32::try_from(utc_offset)
        .map_err(|_| malformed("variant offset is out of range."))?;
    LocalTimeDescriptor::try_new(utc_offset, is_dst, name)
}

fn malformed(message: &'static str) -> ZoneinfoError {
    ZoneinfoError::malformed_data().with_message(message)
}

struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn is_done(&self) -> bool {
        self.pos == self.bytes.len()
    }

    fn eat(&mut self, byte: u8) -> bool {
        let matched = self.peek() == Some(byte);
        if matched {
            self.pos += 1;
        }
        matched
    }

    fn take_while(&mut self, predicate: impl Fn(u8) -> bool) -> &'a [u8] {
        let start = self.pos;
        while self.peek().is_some_and(&predicate) {
            self.pos += 1;
        }
        &self.bytes[start..self.pos]
    }

    /// A variant name: three or more letters, or anything alphanumeric,
    /// `+` or `-` in angle brackets.
    fn name(&mut self) -> ZoneinfoResult<&'a str> {
        let name = if self.eat(b'<') {
            let name = self.take_while(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'-');
            if !self.eat(b'>') {
                return Err(malformed("quoted variant name is not closed."));
            }
            name
        } else {
            self.take_while(|b| b.is_ascii_alphabetic())
        };
        if name.len() < 3 {
            return Err(malformed("variant name is shorter than three characters."));
        }
        core::str::from_utf8(name).map_err(|_| malformed("variant name is not ASCII."))
    }

    fn number(&mut self) -> ZoneinfoResult<i64> {
        let digits = self.take_while(|b| b.is_ascii_digit());
        if digits.is_empty() || digits.len() > 3 {
            return Err(malformed("expected a number of one to three digits."));
        }
        Ok(digits
            .iter()
            .fold(0, |value, &digit| value * 10 + i64::from(digit - b'0')))
    }

    /// `[+-]hh[:mm[:ss]]` in seconds, with hours at most `max_hours`.
    fn signed_duration(&mut self, max_hours: i64) -> ZoneinfoResult<i64> {
        let sign = if self.eat(b'-') {
            -1
        } else {
            self.eat(b'+');
            1
        };
        let hours = self.number()?;
        let mut seconds = hours * SECONDS_PER_HOUR;
        for unit in [SECONDS_PER_MINUTE, 1] {
            if !self.eat(b':') {
                break;
            }
            let value = self.number()?;
            if value > 59 {
                return Err(malformed("minutes or seconds exceed 59."));
            }
            seconds += value * unit;
        }
        if hours > max_hours {
            return Err(malformed("hours are out of range."));
        }
        Ok(sign * seconds)
    }

    fn offset(&mut self) -> ZoneinfoResult<i64> {
        self.signed_duration(24)
    }

    fn rule_date_time(&mut self) -> ZoneinfoResult<RuleDateTime> {
        let date = self.rule_date()?;
        // Transitions default to 02:00 local time.
        let time = if self.eat(b'/') {
            self.signed_duration(167)?
        } else {
            2 * SECONDS_PER_HOUR
        };
        Ok(RuleDateTime { date, time })
    }

    fn rule_date(&mut self) -> ZoneinfoResult<RuleDate> {
        let in_range = |value: i64, range: core::ops::RangeInclusive<i64>| {
            range
                .contains(&value)
                .then_some(value)
                .ok_or(malformed("rule date field is out of range."))
        };
        if self.eat(b'J') {
            let day = in_range(self.number()?, 1..=365)?;
            return Ok(RuleDate::JulianNoLeap(day as u16));
        }
        if self.eat(b'M') {
            let month = in_range(self.number()?, 1..=12)?;
            let mut field = || {
                if self.eat(b'.') {
                    self.number()
                } else {
                    Err(malformed("month-week-day rule is missing a field."))
                }
            };
            let week = in_range(field()?, 1..=5)?;
            let weekday = in_range(field()?, 0..=6)?;
            return Ok(RuleDate::MonthWeekDay(month as u8, week as u8, weekday as u8));
        }
        let day = in_range(self.number()?, 0..=365)?;
        Ok(RuleDate::Julian(day as u16))
    }
}
