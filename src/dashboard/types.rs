use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{ApplicationStatus, JobStatus, UserRole};
use crate::matching::{CandidateProfile, JobListing, JobMatch};
use crate::metrics::{
    FunnelStep, GrowthMetric, JobPerformance, JobPerformanceRecord, TimeSeriesPoint,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationEvent {
    pub applied_at: DateTime<Utc>,
    pub status: ApplicationStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserEvent {
    pub created_at: DateTime<Utc>,
    pub role: UserRole,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobEvent {
    pub posted_at: DateTime<Utc>,
    pub status: JobStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyEvent {
    pub created_at: DateTime<Utc>,
    pub verified: bool,
}

// ── Inputs ─────────────────────────────────────────────────────

/// Platform-wide figures for the public landing dashboard.
#[derive(Debug, Clone, Default)]
pub struct GeneralInputs {
    pub total_jobs: Option<u64>,
    pub active_jobs: Option<u64>,
    pub total_companies: Option<u64>,
    pub total_candidates: Option<u64>,
    pub total_applications: Option<u64>,
    pub job_postings: Vec<DateTime<Utc>>,
    pub signups: Vec<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default)]
pub struct JobSeekerInputs {
    pub applications: Vec<ApplicationEvent>,
    pub profile_views: Option<u64>,
    pub saved_jobs: Option<u64>,
    /// Without a profile no recommendations are made.
    pub profile: Option<CandidateProfile>,
    pub open_jobs: Vec<JobListing>,
}

#[derive(Debug, Clone, Default)]
pub struct EmployerInputs {
    pub jobs: Vec<JobPerformanceRecord>,
    pub active_jobs: Option<u64>,
    pub applications: Vec<ApplicationEvent>,
}

#[derive(Debug, Clone, Default)]
pub struct AdminInputs {
    pub users: Vec<UserEvent>,
    pub companies: Vec<CompanyEvent>,
    pub jobs: Vec<JobEvent>,
    pub applications: Vec<ApplicationEvent>,
}

// ── Outputs ────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusBreakdown {
    pub pending: u64,
    pub reviewing: u64,
    pub interviewing: u64,
    pub accepted: u64,
    pub rejected: u64,
}

impl StatusBreakdown {
    pub fn from_events(events: &[ApplicationEvent]) -> Self {
        let mut breakdown = Self::default();
        for event in events {
            match event.status {
                ApplicationStatus::Pending => breakdown.pending += 1,
                ApplicationStatus::Reviewing => breakdown.reviewing += 1,
                ApplicationStatus::Interviewing => breakdown.interviewing += 1,
                ApplicationStatus::Accepted => breakdown.accepted += 1,
                ApplicationStatus::Rejected => breakdown.rejected += 1,
            }
        }
        breakdown
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoleBreakdown {
    pub candidates: u64,
    pub employers: u64,
    pub admins: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneralStats {
    pub total_jobs: u64,
    pub active_jobs: u64,
    pub total_companies: u64,
    pub total_candidates: u64,
    pub total_applications: u64,
    /// Jobs posted this month vs last month.
    pub job_growth: GrowthMetric,
    /// Signups this month vs last month.
    pub user_growth: GrowthMetric,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobSeekerStats {
    pub total_applications: u64,
    pub status: StatusBreakdown,
    /// Accepted share of all applications, percent.
    pub success_rate: u64,
    /// Share of applications that got past pending, percent.
    pub response_rate: u64,
    pub profile_views: u64,
    pub saved_jobs: u64,
    pub profile_completion_percent: u64,
    pub avg_response_time_hours: u64,
    pub application_trend: Vec<TimeSeriesPoint>,
    pub recommended_jobs: Vec<JobMatch>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployerStats {
    pub total_jobs: u64,
    pub active_jobs: u64,
    pub total_applications: u64,
    pub total_views: u64,
    /// Applications received in the recent window.
    pub new_applications: u64,
    pub hire_rate: u64,
    pub avg_conversion_rate: u64,
    pub avg_time_to_hire_days: u64,
    pub application_funnel: Vec<FunnelStep>,
    pub application_trend: Vec<TimeSeriesPoint>,
    pub top_performing: Vec<JobPerformance>,
    pub underperforming: Vec<JobPerformance>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminStats {
    pub total_users: u64,
    pub users_by_role: RoleBreakdown,
    pub total_companies: u64,
    pub verified_companies: u64,
    pub verification_rate: u64,
    pub total_jobs: u64,
    pub active_jobs: u64,
    pub filled_jobs: u64,
    pub fill_rate: u64,
    pub total_applications: u64,
    pub user_growth: GrowthMetric,
    pub company_growth: GrowthMetric,
    pub job_growth: GrowthMetric,
    pub application_growth: GrowthMetric,
    pub signup_trend: Vec<TimeSeriesPoint>,
    pub job_trend: Vec<TimeSeriesPoint>,
    pub application_trend: Vec<TimeSeriesPoint>,
    pub application_funnel: Vec<FunnelStep>,
    pub platform_uptime_percent: f64,
}
