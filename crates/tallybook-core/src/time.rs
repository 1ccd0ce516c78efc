//! Calendar arithmetic on `YYYY-MM-DD` / `HH:MM` strings
//!
//! Dates stay strings in [`Transaction`]; these helpers validate them and
//! derive the numeric keys used for ordering and filtering.

use tallybook_parser::Transaction;

/// Key of an unparseable date in [`chronological_key`]
pub const INVALID_DATE_KEY: (i32, u32, u32) = (9999, 99, 99);
/// Key of an unparseable time in [`chronological_key`]
pub const INVALID_TIME_KEY: (u32, u32) = (99, 99);

const DAYS_PER_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Gregorian leap year rule. Non-positive years are never leap years.
pub fn is_leap_year(year: i32) -> bool {
    if year < 1 {
        return false;
    }
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Days in `month` of `year`, or 0 when `month` is outside 1..=12
pub fn days_in_month(year: i32, month: u32) -> u32 {
    if !(1..=12).contains(&month) {
        return 0;
    }
    if month == 2 && is_leap_year(year) {
        return 29;
    }
    DAYS_PER_MONTH[(month - 1) as usize]
}

/// Parse a strict `YYYY-MM-DD` date into `(year, month, day)`.
///
/// The string must be exactly 10 bytes with hyphens at offsets 4 and 7, the
/// year must lie in 1000..=9999 and the day must exist in that month.
pub fn parse_date(s: &str) -> Option<(i32, u32, u32)> {
    let bytes = s.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }

    let year: i32 = s.get(0..4)?.parse().ok()?;
    let month: u32 = s.get(5..7)?.parse().ok()?;
    let day: u32 = s.get(8..10)?.parse().ok()?;

    if !(1000..=9999).contains(&year) {
        return None;
    }
    if !(1..=12).contains(&month) {
        return None;
    }
    if day < 1 || day > days_in_month(year, month) {
        return None;
    }

    Some((year, month, day))
}

pub fn format_date(year: i32, month: u32, day: u32) -> String {
    format!("{:04}-{:02}-{:02}", year, month, day)
}

/// Move `date` back by `days` calendar days.
///
/// Walks one day at a time, borrowing from the previous month (and year)
/// whenever the day drops below 1. Returns `None` for an invalid date.
pub fn subtract_days(date: &str, days: u32) -> Option<String> {
    let (mut year, mut month, mut day) = parse_date(date)?;

    for _ in 0..days {
        if day > 1 {
            day -= 1;
            continue;
        }
        if month > 1 {
            month -= 1;
        } else {
            month = 12;
            year -= 1;
        }
        day = days_in_month(year, month);
    }

    Some(format_date(year, month, day))
}

/// The latest structurally valid date among `transactions`.
///
/// Plain string comparison is chronological for zero-padded `YYYY-MM-DD`.
pub fn latest_valid_date(transactions: &[Transaction]) -> Option<String> {
    transactions
        .iter()
        .map(|t| t.date.as_str())
        .filter(|date| parse_date(date).is_some())
        .max()
        .map(str::to_string)
}

/// Parse `H:M` / `HH:MM` into `(hour, minute)` with hour 0..=23 and
/// minute 0..=59
pub fn parse_time(s: &str) -> Option<(u32, u32)> {
    let (hour, minute) = split_clock(s)?;
    if !(0..=23).contains(&hour) || !(0..=59).contains(&minute) {
        return None;
    }
    Some((hour as u32, minute as u32))
}

/// Minutes since midnight for an `H:M` string. No range check.
pub fn clock_minutes(s: &str) -> Option<i64> {
    let (hour, minute) = split_clock(s)?;
    Some(hour * 60 + minute)
}

fn split_clock(s: &str) -> Option<(i64, i64)> {
    let (hour, minute) = s.split_once(':')?;
    Some((hour.trim().parse().ok()?, minute.trim().parse().ok()?))
}

/// `(hour, minute)` from the first two `:`-separated parts, so `12:30:45`
/// reads as `(12, 30)`. Range-checked like [`parse_time`].
fn leading_clock(s: &str) -> Option<(u32, u32)> {
    let mut parts = s.split(':');
    let hour: u32 = parts.next()?.trim().parse().ok()?;
    let minute: u32 = parts.next()?.trim().parse().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some((hour, minute))
}

/// `(year, month, day, hour, minute)` used to keep the backing file in
/// chronological order. Unparseable parts take the sentinel keys so those
/// records sort last.
pub fn chronological_key(transaction: &Transaction) -> (i32, u32, u32, u32, u32) {
    let (year, month, day) = parse_date(&transaction.date).unwrap_or(INVALID_DATE_KEY);
    let (hour, minute) = leading_clock(&transaction.time).unwrap_or(INVALID_TIME_KEY);
    (year, month, day, hour, minute)
}

// ==================== Tests ====================
