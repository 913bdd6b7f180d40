pub mod config;
pub mod dashboard;
pub mod date_util;
pub mod domain;
pub mod error;
pub mod export;
pub mod matching;
pub mod metrics;
pub mod period;
pub mod source;

pub use config::AnalyticsConfig;
pub use dashboard::{
    AdminInputs, AdminStats, DashboardDefaults, EmployerInputs, EmployerStats, GeneralInputs,
    GeneralStats, JobSeekerInputs, JobSeekerStats,
};
pub use domain::{ApplicationStatus, JobStatus, UserRole};
pub use error::{Error, Result};
pub use export::{ExportFile, ExportFormat, ReportRecord, ReportType};
pub use matching::{CandidateProfile, JobListing, JobMatch, JobMatcher, MatchConfig};
pub use metrics::{FunnelStep, GrowthMetric, JobPerformance, JobPerformanceRecord, TimeSeriesPoint};
pub use period::Period;
pub use source::{DashboardSource, Snapshot};

use chrono::NaiveDate;

/// Main entry point for the analytics engine.
///
/// Holds the tunables; every operation is otherwise a pure function of its
/// arguments.
pub struct Analytics {
    config: AnalyticsConfig,
}

impl Analytics {
    pub fn new(config: AnalyticsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Ranked recommendations for a candidate.
    pub fn match_jobs(&self, candidate: &CandidateProfile, jobs: &[JobListing]) -> Vec<JobMatch> {
        JobMatcher::new(self.config.matching.clone()).rank(candidate, jobs)
    }

    /// Scored jobs, best first.
    pub fn job_performance(&self, records: &[JobPerformanceRecord]) -> Vec<JobPerformance> {
        let scored = metrics::score_jobs(records);
        metrics::top_performing(&scored, scored.len())
    }

    pub fn export(
        &self,
        records: &[ReportRecord],
        report_type: ReportType,
        format: ExportFormat,
        generated_on: NaiveDate,
    ) -> Result<ExportFile> {
        export::export(records, report_type, format, generated_on)
    }

    pub fn general_dashboard(&self, inputs: &GeneralInputs, today: NaiveDate) -> GeneralStats {
        dashboard::compose_general(inputs, today)
    }

    pub fn job_seeker_dashboard(
        &self,
        inputs: &JobSeekerInputs,
        today: NaiveDate,
    ) -> JobSeekerStats {
        dashboard::compose_job_seeker(inputs, &self.config, today)
    }

    pub fn employer_dashboard(&self, inputs: &EmployerInputs, today: NaiveDate) -> EmployerStats {
        dashboard::compose_employer(inputs, &self.config, today)
    }

    pub fn admin_dashboard(&self, inputs: &AdminInputs, today: NaiveDate) -> AdminStats {
        dashboard::compose_admin(inputs, &self.config, today)
    }

    /// Fetch everything from `source` concurrently, then compose.
    pub async fn admin_dashboard_from<S: DashboardSource>(
        &self,
        source: &S,
        today: NaiveDate,
    ) -> Result<AdminStats> {
        let inputs = source::load_admin_inputs(source).await?;
        Ok(self.admin_dashboard(&inputs, today))
    }

    pub async fn general_dashboard_from<S: DashboardSource>(
        &self,
        source: &S,
        today: NaiveDate,
    ) -> Result<GeneralStats> {
        let inputs = source::load_general_inputs(source).await?;
        Ok(self.general_dashboard(&inputs, today))
    }
}

impl Default for Analytics {
    fn default() -> Self {
        Self::new(AnalyticsConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
    }

    #[test]
    fn test_match_jobs_uses_configured_threshold() {
        let jobs = vec![JobListing {
            id: "j1".into(),
            title: "Backend".into(),
            skills_required: vec!["rust".into()],
            salary_min: None,
            salary_max: None,
        }];
        let candidate = CandidateProfile {
            skills: vec!["rust".into(), "go".into()],
            ..Default::default()
        };

        // one of two skills: 50 * 0.7 = 35
        assert_eq!(Analytics::default().match_jobs(&candidate, &jobs).len(), 1);

        let mut config = AnalyticsConfig::default();
        config.matching.min_score = 40;
        assert!(Analytics::new(config).match_jobs(&candidate, &jobs).is_empty());
    }

    #[test]
    fn test_job_performance_sorted_best_first() {
        let record = |id: &str, views, applications| JobPerformanceRecord {
            job_id: id.into(),
            title: String::new(),
            views,
            applications,
            accepted_applications: 0,
            days_active: 0,
        };
        let records = [record("low", 100, 1), record("high", 100, 90)];
        let ranked = Analytics::default().job_performance(&records);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].job_id, "high");
    }

    #[tokio::test]
    async fn test_admin_dashboard_from_snapshot() {
        let snapshot = Snapshot::default();
        let stats = Analytics::default()
            .admin_dashboard_from(&snapshot, today())
            .await
            .unwrap();
        assert_eq!(stats.total_users, 0);
        assert_eq!(stats.signup_trend.len(), 30);
        assert_eq!(stats.platform_uptime_percent, 99.9);

        let general = Analytics::default()
            .general_dashboard_from(&snapshot, today())
            .await
            .unwrap();
        assert_eq!(general.total_jobs, 0);
    }
}
