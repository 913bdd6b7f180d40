use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Count of records that fell into one bucket. Dated at the bucket's first day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    pub count: u64,
}

/// Current vs previous value with the derived growth percentage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GrowthMetric {
    pub current: u64,
    pub previous: u64,
    pub rate_percent: i64,
}

/// One named stage of an ordered pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunnelStage {
    pub name: String,
    pub count: u64,
}

impl FunnelStage {
    pub fn new(name: impl Into<String>, count: u64) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

/// A funnel stage with its share of the entry stage and its conversion from
/// the stage before it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunnelStep {
    pub name: String,
    pub count: u64,
    pub percentage_of_total: u64,
    pub conversion_rate: u64,
}

/// Raw engagement counters for one job posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPerformanceRecord {
    pub job_id: String,
    #[serde(default)]
    pub title: String,
    pub views: u64,
    pub applications: u64,
    pub accepted_applications: u64,
    pub days_active: u64,
}

/// Derived performance figures for one job posting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobPerformance {
    pub job_id: String,
    pub title: String,
    pub views: u64,
    pub applications: u64,
    pub accepted_applications: u64,
    pub days_active: u64,
    /// Applications per view, percent.
    pub conversion_rate: u64,
    /// Accepted per application, percent.
    pub success_rate: u64,
    /// One decimal place.
    pub avg_applications_per_day: f64,
    pub quality_score: u8,
}
