use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

/// Get the first day of a given month, or `None` if the month is out of range.
pub fn first_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Get the last day of a given month, or `None` if the month is out of range.
pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    if !(1..=12).contains(&month) {
        return None;
    }
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next.map(|d| d - Duration::days(1))
}

/// Year and month of the month preceding `(year, month)`.
pub fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month <= 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// The UTC calendar day a timestamp falls on. Days run `[00:00:00, 24:00:00)`.
pub fn utc_day(ts: &DateTime<Utc>) -> NaiveDate {
    ts.date_naive()
}

/// Number of days in the closed interval `[start, end]`, or 0 if `start > end`.
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> u64 {
    if start > end {
        0
    } else {
        (end - start).num_days() as u64 + 1
    }
}

/// Round to one decimal place, half away from zero.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Clamp a day-of-month onto the given month, e.g. Mar 31 -> Feb 28.
pub fn clamp_day(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let last = last_day_of_month(year, month)?;
    NaiveDate::from_ymd_opt(year, month, day.min(last.day()))
}
