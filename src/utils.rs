//! Utility date and time equations for converting between proleptic
//! Gregorian civil dates and epoch values.
//!
//! The epoch day equations are the "days from civil" and "civil from
//! days" algorithms described by Howard Hinnant in
//! [chrono-compatible low-level date algorithms][date-algorithms].
//!
//! [date-algorithms]: https://howardhinnant.github.io/date_algorithms.html

pub(crate) const SECONDS_PER_MINUTE: i64 = 60;
pub(crate) const SECONDS_PER_HOUR: i64 = 3_600;
pub(crate) const SECONDS_PER_DAY: i64 = 86_400;

const DAYS_IN_A_400Y_CYCLE: i64 = 146_097;
// Days from 0000-03-01 to 1970-01-01.
const EPOCH_SHIFT: i64 = 719_468;

/// Returns whether `year` is a leap year in the proleptic Gregorian calendar.
pub(crate) const fn is_leap(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Returns the number of days in `month` of `year`.
pub(crate) const fn iso_days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Returns the number of days since 1970-01-01 for a Gregorian date.
pub(crate) const fn epoch_days_from_gregorian_date(year: i32, month: u8, day: u8) -> i64 {
    // Shift the year so that it begins on March 1st, moving the leap day
    // to the end of the computational year.
    let year = year as i64 - (month <= 2) as i64;
    let era = if year >= 0 { year } else { year - 399 } / 400;
    let year_of_era = year - era * 400;
    let month = month as i64;
    let shifted_month = if month > 2 { month - 3 } else { month + 9 };
    let day_of_year = (153 * shifted_month + 2) / 5 + day as i64 - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * DAYS_IN_A_400Y_CYCLE + day_of_era - EPOCH_SHIFT
}

/// Returns the Gregorian (year, month, day) for a count of days since 1970-01-01.
pub(crate) const fn ymd_from_epoch_days(epoch_days: i64) -> (i32, u8, u8) {
    let days = epoch_days + EPOCH_SHIFT;
    let era = if days >= 0 {
        days
    } else {
        days - (DAYS_IN_A_400Y_CYCLE - 1)
    } / DAYS_IN_A_400Y_CYCLE;
    let day_of_era = days - era * DAYS_IN_A_400Y_CYCLE;
    let year_of_era =
        (day_of_era - day_of_era / 1460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let shifted_month = (5 * day_of_year + 2) / 153;
    let day = day_of_year - (153 * shifted_month + 2) / 5 + 1;
    let month = if shifted_month < 10 {
        shifted_month + 3
    } else {
        shifted_month - 9
    };
    let year = year_of_era + era * 400 + (month <= 2) as i64;
    (year as i32, month as u8, day as u8)
}

/// Splits epoch seconds into epoch days and the seconds elapsed in that day.
pub(crate) const fn epoch_seconds_to_days_and_seconds(seconds: i64) -> (i64, i64) {
    (
        seconds.div_euclid(SECONDS_PER_DAY),
        seconds.rem_euclid(SECONDS_PER_DAY),
    )
}

/// Returns the day of the week of an epoch day, 0 being Sunday.
pub(crate) const fn epoch_days_to_weekday(epoch_days: i64) -> i64 {
    // 1970-01-01 was a Thursday.
    (epoch_days + 4).rem_euclid(7)
}

/// Returns the Gregorian year containing the epoch seconds `seconds`.
pub(crate) const fn epoch_seconds_to_year(seconds: i64) -> i32 {
    ymd_from_epoch_days(seconds.div_euclid(SECONDS_PER_DAY)).0
}
