use super::types::GrowthMetric;

/// Percentage change from `previous` to `current`, rounded half away from zero.
///
/// With no baseline (`previous == 0`) any activity counts as 100% growth and
/// no activity as 0%.
pub fn growth_rate(current: u64, previous: u64) -> i64 {
    if previous == 0 {
        return if current > 0 { 100 } else { 0 };
    }
    ((current as f64 - previous as f64) / previous as f64 * 100.0).round() as i64
}

/// `numerator / denominator` as a rounded percentage. A zero denominator means
/// there is no rate to report, so it yields 0.
pub fn ratio_percent(numerator: u64, denominator: u64) -> u64 {
    if denominator == 0 {
        return 0;
    }
    (numerator as f64 / denominator as f64 * 100.0).round() as u64
}

pub fn growth(current: u64, previous: u64) -> GrowthMetric {
    GrowthMetric {
        current,
        previous,
        rate_percent: growth_rate(current, previous),
    }
}
