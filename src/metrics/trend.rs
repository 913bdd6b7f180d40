use chrono::{DateTime, Duration, NaiveDate, Utc};

use super::types::TimeSeriesPoint;
use crate::date_util::{days_inclusive, utc_day};
use crate::period::Period;

/// Count records per UTC calendar day over `[start, end]`.
///
/// Every day in the range gets a point, including days with no records.
/// An inverted range yields no points.
pub fn bucket_by_day<T, F>(
    start: NaiveDate,
    end: NaiveDate,
    records: &[T],
    timestamp: F,
) -> Vec<TimeSeriesPoint>
where
    F: Fn(&T) -> DateTime<Utc>,
{
    bucket_by_width(start, end, 1, records, timestamp)
}

/// Count records in consecutive `width_days`-wide buckets over `[start, end]`.
///
/// Each point is dated at its bucket's first day; the last bucket is clipped
/// to `end`. A zero width yields no points.
pub fn bucket_by_width<T, F>(
    start: NaiveDate,
    end: NaiveDate,
    width_days: u32,
    records: &[T],
    timestamp: F,
) -> Vec<TimeSeriesPoint>
where
    F: Fn(&T) -> DateTime<Utc>,
{
    if start > end {
        log::warn!("Ignoring inverted bucket range {start}..{end}");
        return Vec::new();
    }
    if width_days == 0 {
        log::warn!("Ignoring zero-width buckets for {start}..{end}");
        return Vec::new();
    }

    let width = width_days as u64;
    let days = days_inclusive(start, end);
    let bucket_count = days.div_ceil(width) as usize;

    let mut counts = vec![0u64; bucket_count];
    for record in records {
        let day = utc_day(&timestamp(record));
        if day < start || day > end {
            continue;
        }
        let offset = (day - start).num_days() as u64;
        counts[(offset / width) as usize] += 1;
    }

    let points: Vec<TimeSeriesPoint> = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| TimeSeriesPoint {
            date: start + Duration::days(i as i64 * width as i64),
            count,
        })
        .collect();

    log::debug!(
        "Bucketed {} records into {} buckets over {start}..{end}",
        records.len(),
        points.len()
    );
    points
}

/// Daily trend over a reporting period.
pub fn trend_for<T, F>(period: &Period, records: &[T], timestamp: F) -> Vec<TimeSeriesPoint>
where
    F: Fn(&T) -> DateTime<Utc>,
{
    let (start, end) = period.date_range();
    bucket_by_day(start, end, records, timestamp)
}

/// Number of records whose timestamp falls within the period.
pub fn count_in<T, F>(period: &Period, records: &[T], timestamp: F) -> u64
where
    F: Fn(&T) -> DateTime<Utc>,
{
    records
        .iter()
        .filter(|r| period.contains(utc_day(&timestamp(r))))
        .count() as u64
}

pub fn total(points: &[TimeSeriesPoint]) -> u64 {
    points.iter().map(|p| p.count).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_one_point_per_day_including_empty_days() {
        let records = vec![at(2025, 1, 2, 10), at(2025, 1, 2, 23), at(2025, 1, 4, 0)];
        let points = bucket_by_day(date(2025, 1, 1), date(2025, 1, 5), &records, |t| *t);

        assert_eq!(points.len(), 5);
        let counts: Vec<u64> = points.iter().map(|p| p.count).collect();
        assert_eq!(counts, vec![0, 2, 0, 1, 0]);
        assert_eq!(points[0].date, date(2025, 1, 1));
        assert_eq!(points[4].date, date(2025, 1, 5));
    }

    #[test]
    fn test_dates_strictly_ascending() {
        let none: Vec<DateTime<Utc>> = Vec::new();
        let points = bucket_by_day(date(2024, 2, 27), date(2024, 3, 2), &none, |t| *t);
        assert_eq!(points.len(), 5);
        for pair in points.windows(2) {
            assert_eq!(pair[1].date - pair[0].date, Duration::days(1));
        }
    }

    #[test]
    fn test_records_outside_range_are_ignored() {
        let records = vec![
            at(2024, 12, 31, 23),
            at(2025, 1, 1, 0),
            at(2025, 1, 3, 12),
            at(2025, 1, 4, 0),
        ];
        let points = bucket_by_day(date(2025, 1, 1), date(2025, 1, 3), &records, |t| *t);
        assert_eq!(total(&points), 2);
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let records = vec![at(2025, 1, 2, 0)];
        let points = bucket_by_day(date(2025, 1, 5), date(2025, 1, 1), &records, |t| *t);
        assert!(points.is_empty());
    }

    #[test]
    fn test_single_day_range() {
        let records = vec![at(2025, 1, 1, 0), at(2025, 1, 1, 23)];
        let points = bucket_by_day(date(2025, 1, 1), date(2025, 1, 1), &records, |t| *t);
        assert_eq!(points, vec![TimeSeriesPoint { date: date(2025, 1, 1), count: 2 }]);
    }

    #[test]
    fn test_custom_width_clips_last_bucket() {
        let records = vec![
            at(2025, 1, 1, 0),
            at(2025, 1, 7, 0),
            at(2025, 1, 8, 0),
            at(2025, 1, 10, 0),
        ];
        let points = bucket_by_width(date(2025, 1, 1), date(2025, 1, 10), 7, &records, |t| *t);

        assert_eq!(points.len(), 2);
        assert_eq!(points[0], TimeSeriesPoint { date: date(2025, 1, 1), count: 2 });
        assert_eq!(points[1], TimeSeriesPoint { date: date(2025, 1, 8), count: 2 });
    }

    #[test]
    fn test_zero_width_is_empty() {
        let records = vec![at(2025, 1, 1, 0)];
        let points = bucket_by_width(date(2025, 1, 1), date(2025, 1, 3), 0, &records, |t| *t);
        assert!(points.is_empty());
    }

    #[test]
    fn test_trailing_window_via_period() {
        let today = date(2025, 3, 15);
        let records = vec![at(2025, 3, 9, 8), at(2025, 3, 8, 8), at(2025, 3, 15, 8)];
        let points = trend_for(&Period::Rolling(7, today), &records, |t| *t);
        assert_eq!(points.len(), 7);
        assert_eq!(points[0].date, date(2025, 3, 9));
        assert_eq!(total(&points), 2);
    }

    #[test]
    fn test_count_in() {
        let records = vec![at(2025, 1, 31, 23), at(2025, 2, 1, 0), at(2025, 2, 28, 12)];
        assert_eq!(count_in(&Period::Month(2025, 2), &records, |t| *t), 2);
        assert_eq!(count_in(&Period::Month(2025, 1), &records, |t| *t), 1);
    }
}
