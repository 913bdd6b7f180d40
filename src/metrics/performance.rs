use super::rates::ratio_percent;
use super::types::{JobPerformance, JobPerformanceRecord};
use crate::date_util::round_one_decimal;

const CONVERSION_WEIGHT: f64 = 0.3;
const SUCCESS_WEIGHT: f64 = 0.4;
const VELOCITY_WEIGHT: f64 = 0.3;
/// Applications-per-day are scaled by 10 and capped here before weighting.
const VELOCITY_CAP: f64 = 30.0;

/// Derive conversion, success, velocity and the composite quality score.
pub fn score_job(record: &JobPerformanceRecord) -> JobPerformance {
    let conversion_rate = ratio_percent(record.applications, record.views);
    let success_rate = ratio_percent(record.accepted_applications, record.applications);
    let avg_applications_per_day = if record.days_active > 0 {
        round_one_decimal(record.applications as f64 / record.days_active as f64)
    } else {
        0.0
    };

    let velocity = (avg_applications_per_day * 10.0).min(VELOCITY_CAP);
    let raw = conversion_rate as f64 * CONVERSION_WEIGHT
        + success_rate as f64 * SUCCESS_WEIGHT
        + velocity * VELOCITY_WEIGHT;
    let quality_score = raw.round().clamp(0.0, 100.0) as u8;

    JobPerformance {
        job_id: record.job_id.clone(),
        title: record.title.clone(),
        views: record.views,
        applications: record.applications,
        accepted_applications: record.accepted_applications,
        days_active: record.days_active,
        conversion_rate,
        success_rate,
        avg_applications_per_day,
        quality_score,
    }
}

pub fn score_jobs(records: &[JobPerformanceRecord]) -> Vec<JobPerformance> {
    records.iter().map(score_job).collect()
}

fn by_quality_desc(jobs: &[JobPerformance]) -> Vec<JobPerformance> {
    let mut sorted = jobs.to_vec();
    sorted.sort_by(|a, b| b.quality_score.cmp(&a.quality_score));
    sorted
}

/// Best `n` jobs, highest quality first.
pub fn top_performing(jobs: &[JobPerformance], n: usize) -> Vec<JobPerformance> {
    let mut sorted = by_quality_desc(jobs);
    sorted.truncate(n);
    sorted
}

/// Worst `n` jobs, lowest quality first.
pub fn underperforming(jobs: &[JobPerformance], n: usize) -> Vec<JobPerformance> {
    let sorted = by_quality_desc(jobs);
    let skip = sorted.len().saturating_sub(n);
    sorted.into_iter().skip(skip).rev().collect()
}

/// Integer mean of conversion rates, 0 when there are no jobs.
pub fn average_conversion_rate(jobs: &[JobPerformance]) -> u64 {
    if jobs.is_empty() {
        return 0;
    }
    let sum: u64 = jobs.iter().map(|j| j.conversion_rate).sum();
    (sum as f64 / jobs.len() as f64).round() as u64
}
