//! Where dashboard inputs come from.
//!
//! The composer never fetches anything itself. A [`DashboardSource`] hands
//! over raw event lists and the loaders here gather them concurrently.

pub mod snapshot;

pub use snapshot::Snapshot;

use std::future::Future;

use crate::dashboard::{
    AdminInputs, ApplicationEvent, CompanyEvent, GeneralInputs, JobEvent, UserEvent,
};
use crate::domain::{JobStatus, UserRole};
use crate::error::Result;

/// Storage abstraction for the platform-wide event lists.
pub trait DashboardSource: Send + Sync {
    fn users(&self) -> impl Future<Output = Result<Vec<UserEvent>>> + Send;
    fn companies(&self) -> impl Future<Output = Result<Vec<CompanyEvent>>> + Send;
    fn jobs(&self) -> impl Future<Output = Result<Vec<JobEvent>>> + Send;
    fn applications(&self) -> impl Future<Output = Result<Vec<ApplicationEvent>>> + Send;
}

/// Fetch all four lists at once. The first failure aborts the rest.
pub async fn load_admin_inputs<S: DashboardSource>(source: &S) -> Result<AdminInputs> {
    let (users, companies, jobs, applications) = tokio::try_join!(
        source.users(),
        source.companies(),
        source.jobs(),
        source.applications()
    )?;

    log::info!(
        "Loaded {} users, {} companies, {} jobs, {} applications",
        users.len(),
        companies.len(),
        jobs.len(),
        applications.len()
    );

    Ok(AdminInputs {
        users,
        companies,
        jobs,
        applications,
    })
}

/// Landing page figures, derived from the same lists as the admin view.
pub async fn load_general_inputs<S: DashboardSource>(source: &S) -> Result<GeneralInputs> {
    let inputs = load_admin_inputs(source).await?;
    Ok(general_inputs_from(&inputs))
}

fn general_inputs_from(inputs: &AdminInputs) -> GeneralInputs {
    let candidates = inputs
        .users
        .iter()
        .filter(|u| u.role == UserRole::Candidate)
        .count() as u64;
    let active = inputs
        .jobs
        .iter()
        .filter(|j| j.status == JobStatus::Active)
        .count() as u64;

    GeneralInputs {
        total_jobs: Some(inputs.jobs.len() as u64),
        active_jobs: Some(active),
        total_companies: Some(inputs.companies.len() as u64),
        total_candidates: Some(candidates),
        total_applications: Some(inputs.applications.len() as u64),
        job_postings: inputs.jobs.iter().map(|j| j.posted_at).collect(),
        signups: inputs.users.iter().map(|u| u.created_at).collect(),
    }
}
