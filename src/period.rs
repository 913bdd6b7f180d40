use std::sync::LazyLock;

use chrono::{Datelike, Duration, NaiveDate};
use regex::Regex;

use crate::date_util::{
    clamp_day, days_inclusive, first_day_of_month, last_day_of_month, previous_month,
};
use crate::error::{Error, Result};

static RE_ROLLING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d{1,4})[dD]$").unwrap());
static RE_MONTH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})$").unwrap());
static RE_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4}-\d{2}-\d{2})\.\.(\d{4}-\d{2}-\d{2})$").unwrap()
});

/// Inverted, so it contains no dates.
const EMPTY_RANGE: (NaiveDate, NaiveDate) = (NaiveDate::MAX, NaiveDate::MIN);

/// A reporting window for trends and period-over-period comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Period {
    /// The last N days ending on (and including) the given date.
    Rolling(u32, NaiveDate),
    Month(i32, u32),
    /// From the first of the month through the given date.
    MonthToDate(NaiveDate),
    /// Explicit inclusive range. May be inverted, in which case it is empty.
    Range(NaiveDate, NaiveDate),
}

impl Period {
    /// Parse a period string relative to `today`.
    ///
    /// Supported formats:
    /// - `30d`: rolling last N days
    /// - `mtd`: month to date
    /// - `2025-01`: calendar month
    /// - `2025-01-01..2025-01-31`: explicit range
    pub fn parse(s: &str, today: NaiveDate) -> Result<Self> {
        let s = s.trim();

        if s.eq_ignore_ascii_case("mtd") {
            return Ok(Period::MonthToDate(today));
        }

        if let Some(caps) = RE_ROLLING.captures(s) {
            let days: u32 = caps[1]
                .parse()
                .map_err(|_| Error::PeriodParse(format!("invalid day count: {s}")))?;
            if days == 0 {
                return Err(Error::PeriodParse(format!(
                    "rolling window must be at least 1 day: {s}"
                )));
            }
            return Ok(Period::Rolling(days, today));
        }

        if let Some(caps) = RE_MONTH.captures(s) {
            let year: i32 = caps[1]
                .parse()
                .map_err(|_| Error::PeriodParse(format!("invalid year: {s}")))?;
            let month: u32 = caps[2]
                .parse()
                .map_err(|_| Error::PeriodParse(format!("invalid month: {s}")))?;
            if (1..=12).contains(&month) {
                return Ok(Period::Month(year, month));
            }
        }

        if let Some(caps) = RE_RANGE.captures(s) {
            let start = NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d")
                .map_err(|e| Error::PeriodParse(format!("{s}: {e}")))?;
            let end = NaiveDate::parse_from_str(&caps[2], "%Y-%m-%d")
                .map_err(|e| Error::PeriodParse(format!("{s}: {e}")))?;
            return Ok(Period::Range(start, end));
        }

        Err(Error::PeriodParse(format!("unrecognized period: {s}")))
    }

    /// The calendar month containing `date`.
    pub fn month_of(date: NaiveDate) -> Self {
        Period::Month(date.year(), date.month())
    }

    /// Convert to a canonical key string.
    pub fn to_key(&self) -> String {
        match self {
            Period::Rolling(n, _) => format!("{n}d"),
            Period::Month(y, m) => format!("{y}-{m:02}"),
            Period::MonthToDate(d) => format!("{}-{:02}-td", d.year(), d.month()),
            Period::Range(s, e) => format!("{}..{}", s.format("%Y-%m-%d"), e.format("%Y-%m-%d")),
        }
    }

    /// Get the date range (inclusive start, inclusive end) for this period.
    ///
    /// A `Month` with an out-of-range month, or a window reaching past the
    /// representable calendar, yields an inverted (empty) range.
    pub fn date_range(&self) -> (NaiveDate, NaiveDate) {
        match self {
            Period::Rolling(n, as_of) => {
                match as_of.checked_sub_signed(Duration::days(*n as i64 - 1)) {
                    Some(start) => (start, *as_of),
                    None => EMPTY_RANGE,
                }
            }
            Period::Month(y, m) => match (first_day_of_month(*y, *m), last_day_of_month(*y, *m)) {
                (Some(start), Some(end)) => (start, end),
                _ => EMPTY_RANGE,
            },
            Period::MonthToDate(as_of) => (as_of.with_day(1).unwrap_or(*as_of), *as_of),
            Period::Range(s, e) => (*s, *e),
        }
    }

    /// Get the immediately preceding period of the same shape.
    pub fn previous(&self) -> Self {
        match self {
            Period::Rolling(n, as_of) => match as_of.checked_sub_signed(Duration::days(*n as i64)) {
                Some(end) => Period::Rolling(*n, end),
                None => Period::Range(EMPTY_RANGE.0, EMPTY_RANGE.1),
            },
            Period::Month(y, m) => {
                let (py, pm) = previous_month(*y, *m);
                Period::Month(py, pm)
            }
            Period::MonthToDate(as_of) => {
                // Same day offset in the prior month, clamped to its last day.
                let (py, pm) = previous_month(as_of.year(), as_of.month());
                match (first_day_of_month(py, pm), clamp_day(py, pm, as_of.day())) {
                    (Some(start), Some(end)) => Period::Range(start, end),
                    _ => Period::Range(EMPTY_RANGE.0, EMPTY_RANGE.1),
                }
            }
            Period::Range(s, e) => {
                let shift = Duration::days(days_inclusive(*s, *e) as i64);
                match (s.checked_sub_signed(shift), e.checked_sub_signed(shift)) {
                    (Some(start), Some(end)) => Period::Range(start, end),
                    _ => Period::Range(EMPTY_RANGE.0, EMPTY_RANGE.1),
                }
            }
        }
    }

    /// Returns true if `date` falls inside this period.
    pub fn contains(&self, date: NaiveDate) -> bool {
        let (start, end) = self.date_range();
        date >= start && date <= end
    }

    /// Number of days covered by this period.
    pub fn num_days(&self) -> u64 {
        let (start, end) = self.date_range();
        days_inclusive(start, end)
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_key())
    }
}
