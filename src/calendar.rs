//! Calendar decoding — epoch milliseconds to Gregorian date and time
//!
//! Pure integer arithmetic, no tables beyond month lengths, no allocation.
//! The year is found by a forward search over the cumulative
//! Gregorian day count `365y + y/4 - y/100 + y/400`.
//!
//! Author: Moroya Sakamoto

use core::fmt;

use crate::clock::Clock;

/// Milliseconds per day
const MS_PER_DAY: i64 = 86_400_000;

/// Days from 0001-01-01 to 1970-01-01 (proleptic Gregorian)
const DAYS_TO_UNIX_EPOCH: i64 = 719_162;

/// Month lengths for common and leap years
const DAYS_IN_MONTH: [[u8; 12]; 2] = [
    [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31],
    [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31],
];

/// Decoded calendar date and time of day (UTC)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarFields {
    /// Year (proleptic Gregorian, 0 and below before 1 AD)
    pub year: i32,
    /// Month, 1–12
    pub month: u8,
    /// Day of month, 1–31
    pub day: u8,
    /// Hour, 0–23
    pub hour: u8,
    /// Minute, 0–59
    pub minute: u8,
    /// Second, 0–59
    pub second: u8,
    /// Millisecond, 0–999
    pub millisecond: u16,
}

impl CalendarFields {
    /// Decode the clock's current epoch reading
    pub fn now<C: Clock + ?Sized>(clock: &C) -> Self {
        decode(clock.epoch_ms())
    }
}

impl fmt::Display for CalendarFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}.{:03}",
            self.year, self.month, self.day, self.hour, self.minute, self.second, self.millisecond
        )
    }
}

/// Decode milliseconds since 1970-01-01T00:00:00 into calendar fields
///
/// Total for every `i64`; negative values decode to instants before the epoch.
pub fn decode(elapsed_ms: i64) -> CalendarFields {
    // 1-based day number counted from 0001-01-01
    let total_days = elapsed_ms.div_euclid(MS_PER_DAY) + DAYS_TO_UNIX_EPOCH + 1;

    // Largest y whose cumulative day count is still short of total_days.
    let mut y = total_days.div_euclid(365);
    while days_before(y) >= total_days {
        y -= 1;
    }
    while days_before(y + 1) < total_days {
        y += 1;
    }

    let year = y + 1;
    let mut day = total_days - days_before(y);
    let mut month = 1u8;
    for &len in &DAYS_IN_MONTH[is_leap_year(year) as usize] {
        if day <= len as i64 {
            break;
        }
        day -= len as i64;
        month += 1;
    }

    let ms_of_day = elapsed_ms.rem_euclid(MS_PER_DAY);
    let secs_of_day = ms_of_day / 1000;

    CalendarFields {
        year: year as i32,
        month,
        day: day as u8,
        hour: (secs_of_day / 3600) as u8,
        minute: (secs_of_day % 3600 / 60) as u8,
        second: (secs_of_day % 60) as u8,
        millisecond: (ms_of_day % 1000) as u16,
    }
}

/// Gregorian leap-year rule
pub fn is_leap_year(year: i64) -> bool {
    (year.rem_euclid(4) == 0 && year.rem_euclid(100) != 0) || year.rem_euclid(400) == 0
}

/// Length of `month` (1–12) in `year`
pub fn days_in_month(year: i64, month: u8) -> Option<u8> {
    let idx = usize::from(month).checked_sub(1)?;
    DAYS_IN_MONTH[is_leap_year(year) as usize].get(idx).copied()
}

/// Days in years 1..=y (floored for y < 1)
fn days_before(y: i64) -> i64 {
    365 * y + y.div_euclid(4) - y.div_euclid(100) + y.div_euclid(400)
}
