//! Assembles role-specific dashboard bundles from already-fetched figures.
//!
//! Nothing here queries anything. Missing counts fall back to 0 and
//! untracked metrics to the placeholders in [`DashboardDefaults`].

pub mod defaults;
pub mod types;

pub use defaults::DashboardDefaults;
pub use types::*;

use chrono::{DateTime, NaiveDate, Utc};

use crate::config::AnalyticsConfig;
use crate::domain::{ApplicationStatus, JobStatus, UserRole};
use crate::matching::JobMatcher;
use crate::metrics::{
    application_funnel, growth, performance, ratio_percent, score_jobs, trend, GrowthMetric,
};
use crate::period::Period;

/// Count in the calendar month containing `today` vs the month before.
pub fn month_over_month<T, F>(records: &[T], today: NaiveDate, timestamp: F) -> GrowthMetric
where
    F: Fn(&T) -> DateTime<Utc>,
{
    let current = Period::month_of(today);
    let previous = current.previous();
    growth(
        trend::count_in(&current, records, &timestamp),
        trend::count_in(&previous, records, &timestamp),
    )
}

fn statuses(events: &[ApplicationEvent]) -> Vec<ApplicationStatus> {
    events.iter().map(|e| e.status).collect()
}

pub fn compose_general(inputs: &GeneralInputs, today: NaiveDate) -> GeneralStats {
    GeneralStats {
        total_jobs: inputs.total_jobs.unwrap_or(0),
        active_jobs: inputs.active_jobs.unwrap_or(0),
        total_companies: inputs.total_companies.unwrap_or(0),
        total_candidates: inputs.total_candidates.unwrap_or(0),
        total_applications: inputs.total_applications.unwrap_or(0),
        job_growth: month_over_month(&inputs.job_postings, today, |t| *t),
        user_growth: month_over_month(&inputs.signups, today, |t| *t),
    }
}

pub fn compose_job_seeker(
    inputs: &JobSeekerInputs,
    config: &AnalyticsConfig,
    today: NaiveDate,
) -> JobSeekerStats {
    let defaults = &config.dashboard;
    let window = Period::Rolling(config.trend_days, today);
    let total = inputs.applications.len() as u64;
    let status = StatusBreakdown::from_events(&inputs.applications);
    let responded = inputs
        .applications
        .iter()
        .filter(|a| a.status.has_response())
        .count() as u64;

    let recommended_jobs = match &inputs.profile {
        Some(profile) => {
            let matcher = JobMatcher::new(config.matching.clone());
            let mut matches = matcher.rank(profile, &inputs.open_jobs);
            matches.truncate(defaults.recommended_jobs);
            matches
        }
        None => Vec::new(),
    };

    JobSeekerStats {
        total_applications: total,
        success_rate: ratio_percent(status.accepted, total),
        response_rate: ratio_percent(responded, total),
        status,
        profile_views: inputs.profile_views.unwrap_or(0),
        saved_jobs: inputs.saved_jobs.unwrap_or(0),
        profile_completion_percent: defaults.profile_completion_percent,
        avg_response_time_hours: defaults.response_time_hours,
        application_trend: trend::trend_for(&window, &inputs.applications, |a| a.applied_at),
        recommended_jobs,
    }
}

pub fn compose_employer(
    inputs: &EmployerInputs,
    config: &AnalyticsConfig,
    today: NaiveDate,
) -> EmployerStats {
    let defaults = &config.dashboard;
    let scored = score_jobs(&inputs.jobs);
    let total_applications = inputs.applications.len() as u64;
    let accepted = inputs
        .applications
        .iter()
        .filter(|a| a.status == ApplicationStatus::Accepted)
        .count() as u64;

    let recent = Period::Rolling(config.recent_days, today);
    let window = Period::Rolling(config.trend_days, today);

    EmployerStats {
        total_jobs: inputs.jobs.len() as u64,
        active_jobs: inputs.active_jobs.unwrap_or(0),
        total_applications,
        total_views: inputs.jobs.iter().map(|j| j.views).sum(),
        new_applications: trend::count_in(&recent, &inputs.applications, |a| a.applied_at),
        hire_rate: ratio_percent(accepted, total_applications),
        avg_conversion_rate: performance::average_conversion_rate(&scored),
        avg_time_to_hire_days: defaults.avg_time_to_hire_days,
        application_funnel: application_funnel(&statuses(&inputs.applications)),
        application_trend: trend::trend_for(&window, &inputs.applications, |a| a.applied_at),
        top_performing: performance::top_performing(&scored, defaults.top_jobs),
        underperforming: performance::underperforming(&scored, defaults.top_jobs),
    }
}

pub fn compose_admin(
    inputs: &AdminInputs,
    config: &AnalyticsConfig,
    today: NaiveDate,
) -> AdminStats {
    let count_role = |role: UserRole| {
        inputs.users.iter().filter(|u| u.role == role).count() as u64
    };
    let count_jobs = |status: JobStatus| {
        inputs.jobs.iter().filter(|j| j.status == status).count() as u64
    };
    let window = Period::Rolling(config.trend_days, today);

    let total_companies = inputs.companies.len() as u64;
    let verified_companies = inputs.companies.iter().filter(|c| c.verified).count() as u64;
    let total_jobs = inputs.jobs.len() as u64;
    let filled_jobs = count_jobs(JobStatus::Filled);

    log::debug!(
        "Composing admin dashboard from {} users, {} companies, {} jobs, {} applications",
        inputs.users.len(),
        total_companies,
        total_jobs,
        inputs.applications.len()
    );

    AdminStats {
        total_users: inputs.users.len() as u64,
        users_by_role: RoleBreakdown {
            candidates: count_role(UserRole::Candidate),
            employers: count_role(UserRole::Employer),
            admins: count_role(UserRole::Admin),
        },
        total_companies,
        verified_companies,
        verification_rate: ratio_percent(verified_companies, total_companies),
        total_jobs,
        active_jobs: count_jobs(JobStatus::Active),
        filled_jobs,
        fill_rate: ratio_percent(filled_jobs, total_jobs),
        total_applications: inputs.applications.len() as u64,
        user_growth: month_over_month(&inputs.users, today, |u| u.created_at),
        company_growth: month_over_month(&inputs.companies, today, |c| c.created_at),
        job_growth: month_over_month(&inputs.jobs, today, |j| j.posted_at),
        application_growth: month_over_month(&inputs.applications, today, |a| a.applied_at),
        signup_trend: trend::trend_for(&window, &inputs.users, |u| u.created_at),
        job_trend: trend::trend_for(&window, &inputs.jobs, |j| j.posted_at),
        application_trend: trend::trend_for(&window, &inputs.applications, |a| a.applied_at),
        application_funnel: application_funnel(&statuses(&inputs.applications)),
        platform_uptime_percent: config.dashboard.platform_uptime_percent,
    }
}
