use serde::{Deserialize, Serialize};

/// Shown while profile completeness is not tracked.
pub const DEFAULT_PROFILE_COMPLETION_PERCENT: u64 = 75;
/// Shown while employer response times are not tracked.
pub const DEFAULT_RESPONSE_TIME_HOURS: u64 = 24;
/// Shown while hire dates are not tracked.
pub const DEFAULT_AVG_TIME_TO_HIRE_DAYS: u64 = 14;
/// Shown while uptime is not measured.
pub const DEFAULT_PLATFORM_UPTIME_PERCENT: f64 = 99.9;
pub const DEFAULT_TOP_JOBS: usize = 5;
pub const DEFAULT_RECOMMENDED_JOBS: usize = 5;

/// Fallback values substituted for figures the platform does not track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardDefaults {
    pub profile_completion_percent: u64,
    pub response_time_hours: u64,
    pub avg_time_to_hire_days: u64,
    pub platform_uptime_percent: f64,
    /// Length of the top and underperforming job lists.
    pub top_jobs: usize,
    pub recommended_jobs: usize,
}

impl Default for DashboardDefaults {
    fn default() -> Self {
        Self {
            profile_completion_percent: DEFAULT_PROFILE_COMPLETION_PERCENT,
            response_time_hours: DEFAULT_RESPONSE_TIME_HOURS,
            avg_time_to_hire_days: DEFAULT_AVG_TIME_TO_HIRE_DAYS,
            platform_uptime_percent: DEFAULT_PLATFORM_UPTIME_PERCENT,
            top_jobs: DEFAULT_TOP_JOBS,
            recommended_jobs: DEFAULT_RECOMMENDED_JOBS,
        }
    }
}
