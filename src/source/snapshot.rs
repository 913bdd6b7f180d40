use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::DashboardSource;
use crate::dashboard::{
    AdminInputs, ApplicationEvent, CompanyEvent, EmployerInputs, JobEvent, JobSeekerInputs,
    UserEvent,
};
use crate::date_util::utc_day;
use crate::domain::{ApplicationStatus, JobStatus, UserRole};
use crate::error::{Error, Result};
use crate::export::{ApplicationRow, CompanyRow, JobRow, ReportRecord, ReportType, UserRow};
use crate::matching::{CandidateProfile, JobListing};
use crate::metrics::JobPerformanceRecord;

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    pub role: UserRole,
    #[serde(default = "default_true")]
    pub active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub experience_level: Option<String>,
    #[serde(default)]
    pub looking_for_job: Option<bool>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub preferred_salary_min: Option<f64>,
    #[serde(default)]
    pub preferred_salary_max: Option<f64>,
    #[serde(default)]
    pub profile_views: Option<u64>,
    #[serde(default)]
    pub saved_jobs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotCompany {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub verified: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotJob {
    pub id: String,
    pub company_id: String,
    pub title: String,
    pub status: JobStatus,
    pub posted_at: DateTime<Utc>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub salary_min: Option<f64>,
    #[serde(default)]
    pub salary_max: Option<f64>,
    #[serde(default)]
    pub experience_level: Option<String>,
    #[serde(default)]
    pub employment_type: Option<String>,
    #[serde(default)]
    pub skills_required: Vec<String>,
    #[serde(default)]
    pub views: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotApplication {
    pub id: String,
    pub job_id: String,
    pub candidate_id: String,
    pub applied_at: DateTime<Utc>,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub cover_letter: Option<String>,
    #[serde(default)]
    pub cv_url: Option<String>,
}

/// A point-in-time export of the job board's tables, read from JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub users: Vec<SnapshotUser>,
    pub companies: Vec<SnapshotCompany>,
    pub jobs: Vec<SnapshotJob>,
    pub applications: Vec<SnapshotApplication>,
}

impl Snapshot {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let snapshot: Self = serde_json::from_str(&raw)?;
        log::info!(
            "Loaded snapshot {} ({} users, {} companies, {} jobs, {} applications)",
            path.display(),
            snapshot.users.len(),
            snapshot.companies.len(),
            snapshot.jobs.len(),
            snapshot.applications.len()
        );
        Ok(snapshot)
    }

    fn user(&self, id: &str) -> Result<&SnapshotUser> {
        self.users
            .iter()
            .find(|u| u.id == id)
            .ok_or_else(|| Error::NotFound(format!("user {id}")))
    }

    fn company_names(&self) -> HashMap<&str, &str> {
        self.companies
            .iter()
            .map(|c| (c.id.as_str(), c.name.as_str()))
            .collect()
    }

    fn applications_per_job(&self) -> HashMap<&str, u64> {
        let mut counts = HashMap::new();
        for app in &self.applications {
            *counts.entry(app.job_id.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Rows for one report, with related names joined in.
    pub fn report_records(&self, report_type: ReportType) -> Vec<ReportRecord> {
        match report_type {
            ReportType::Applications => self.application_records(),
            ReportType::Jobs => self.job_records(),
            ReportType::Companies => self.company_records(),
            ReportType::Users => self.user_records(),
        }
    }

    fn application_records(&self) -> Vec<ReportRecord> {
        let companies = self.company_names();
        let jobs: HashMap<&str, &SnapshotJob> =
            self.jobs.iter().map(|j| (j.id.as_str(), j)).collect();
        let users: HashMap<&str, &SnapshotUser> =
            self.users.iter().map(|u| (u.id.as_str(), u)).collect();

        self.applications
            .iter()
            .map(|app| {
                let job = jobs.get(app.job_id.as_str());
                let candidate = users.get(app.candidate_id.as_str());
                ReportRecord::Application(ApplicationRow {
                    id: app.id.clone(),
                    applied_at: app.applied_at,
                    status: app.status,
                    job_title: job.map(|j| j.title.clone()),
                    company_name: job
                        .and_then(|j| companies.get(j.company_id.as_str()))
                        .map(|name| name.to_string()),
                    candidate_name: candidate.and_then(|u| u.full_name.clone()),
                    candidate_email: candidate.map(|u| u.email.clone()),
                    cover_letter: app.cover_letter.clone(),
                    cv_url: app.cv_url.clone(),
                })
            })
            .collect()
    }

    fn job_records(&self) -> Vec<ReportRecord> {
        let companies = self.company_names();
        let counts = self.applications_per_job();

        self.jobs
            .iter()
            .map(|job| {
                ReportRecord::Job(JobRow {
                    id: job.id.clone(),
                    title: job.title.clone(),
                    status: job.status,
                    posted_at: job.posted_at,
                    company_name: companies.get(job.company_id.as_str()).map(|n| n.to_string()),
                    location: job.location.clone(),
                    industry: job.industry.clone(),
                    salary_min: job.salary_min,
                    salary_max: job.salary_max,
                    experience_level: job.experience_level.clone(),
                    employment_type: job.employment_type.clone(),
                    application_count: Some(counts.get(job.id.as_str()).copied().unwrap_or(0)),
                })
            })
            .collect()
    }

    fn company_records(&self) -> Vec<ReportRecord> {
        let mut job_counts: HashMap<&str, u64> = HashMap::new();
        for job in &self.jobs {
            *job_counts.entry(job.company_id.as_str()).or_insert(0) += 1;
        }

        self.companies
            .iter()
            .map(|c| {
                ReportRecord::Company(CompanyRow {
                    id: c.id.clone(),
                    name: c.name.clone(),
                    website: c.website.clone(),
                    size: c.size.clone(),
                    verified: c.verified,
                    created_at: c.created_at,
                    industry: c.industry.clone(),
                    location: c.location.clone(),
                    job_count: Some(job_counts.get(c.id.as_str()).copied().unwrap_or(0)),
                })
            })
            .collect()
    }

    fn user_records(&self) -> Vec<ReportRecord> {
        self.users
            .iter()
            .map(|u| {
                let companies_owned = match u.role {
                    UserRole::Employer => Some(
                        self.companies
                            .iter()
                            .filter(|c| c.owner_id.as_deref() == Some(u.id.as_str()))
                            .count() as u64,
                    ),
                    _ => None,
                };
                ReportRecord::User(UserRow {
                    id: u.id.clone(),
                    email: u.email.clone(),
                    full_name: u.full_name.clone(),
                    role: u.role,
                    active: u.active,
                    created_at: u.created_at,
                    experience_level: u.experience_level.clone(),
                    looking_for_job: u.looking_for_job,
                    companies_owned,
                })
            })
            .collect()
    }

    /// Active jobs in the shape the matcher wants.
    pub fn job_listings(&self) -> Vec<JobListing> {
        self.jobs
            .iter()
            .filter(|j| j.status == JobStatus::Active)
            .map(|j| JobListing {
                id: j.id.clone(),
                title: j.title.clone(),
                skills_required: j.skills_required.clone(),
                salary_min: j.salary_min,
                salary_max: j.salary_max,
            })
            .collect()
    }

    pub fn candidate_profile(&self, user_id: &str) -> Result<CandidateProfile> {
        let user = self.user(user_id)?;
        Ok(CandidateProfile {
            skills: user.skills.clone(),
            preferred_salary_min: user.preferred_salary_min,
            preferred_salary_max: user.preferred_salary_max,
        })
    }

    pub fn job_seeker_inputs(&self, user_id: &str) -> Result<JobSeekerInputs> {
        let user = self.user(user_id)?;
        let applications = self
            .applications
            .iter()
            .filter(|a| a.candidate_id == user.id)
            .map(to_application_event)
            .collect();

        Ok(JobSeekerInputs {
            applications,
            profile_views: user.profile_views,
            saved_jobs: user.saved_jobs,
            profile: Some(self.candidate_profile(user_id)?),
            open_jobs: self.job_listings(),
        })
    }

    /// Jobs of companies owned by `owner_id`, or every job when `None`.
    fn owned_jobs(&self, owner_id: Option<&str>) -> Result<Vec<&SnapshotJob>> {
        let Some(owner_id) = owner_id else {
            return Ok(self.jobs.iter().collect());
        };
        self.user(owner_id)?;

        let company_ids: Vec<&str> = self
            .companies
            .iter()
            .filter(|c| c.owner_id.as_deref() == Some(owner_id))
            .map(|c| c.id.as_str())
            .collect();

        Ok(self
            .jobs
            .iter()
            .filter(|j| company_ids.contains(&j.company_id.as_str()))
            .collect())
    }

    /// Per-job counts for scoring. A job's age is whole days since it was
    /// posted, as of `today`.
    pub fn performance_records(
        &self,
        owner_id: Option<&str>,
        today: NaiveDate,
    ) -> Result<Vec<JobPerformanceRecord>> {
        let jobs = self.owned_jobs(owner_id)?;
        Ok(jobs
            .into_iter()
            .map(|job| {
                let apps = self.applications.iter().filter(|a| a.job_id == job.id);
                let (applications, accepted) = apps.fold((0u64, 0u64), |(total, accepted), a| {
                    let hit = u64::from(a.status == ApplicationStatus::Accepted);
                    (total + 1, accepted + hit)
                });
                JobPerformanceRecord {
                    job_id: job.id.clone(),
                    title: job.title.clone(),
                    views: job.views,
                    applications,
                    accepted_applications: accepted,
                    days_active: (today - utc_day(&job.posted_at)).num_days().max(0) as u64,
                }
            })
            .collect())
    }

    pub fn employer_inputs(&self, owner_id: &str, today: NaiveDate) -> Result<EmployerInputs> {
        let jobs = self.owned_jobs(Some(owner_id))?;
        let active_jobs = jobs.iter().filter(|j| j.status == JobStatus::Active).count() as u64;
        let job_ids: Vec<&str> = jobs.iter().map(|j| j.id.as_str()).collect();
        let applications = self
            .applications
            .iter()
            .filter(|a| job_ids.contains(&a.job_id.as_str()))
            .map(to_application_event)
            .collect();

        Ok(EmployerInputs {
            jobs: self.performance_records(Some(owner_id), today)?,
            active_jobs: Some(active_jobs),
            applications,
        })
    }

    pub fn admin_inputs(&self) -> AdminInputs {
        AdminInputs {
            users: self.user_events(),
            companies: self.company_events(),
            jobs: self.job_events(),
            applications: self.applications.iter().map(to_application_event).collect(),
        }
    }

    fn user_events(&self) -> Vec<UserEvent> {
        self.users
            .iter()
            .map(|u| UserEvent {
                created_at: u.created_at,
                role: u.role,
            })
            .collect()
    }

    fn company_events(&self) -> Vec<CompanyEvent> {
        self.companies
            .iter()
            .map(|c| CompanyEvent {
                created_at: c.created_at,
                verified: c.verified,
            })
            .collect()
    }

    fn job_events(&self) -> Vec<JobEvent> {
        self.jobs
            .iter()
            .map(|j| JobEvent {
                posted_at: j.posted_at,
                status: j.status,
            })
            .collect()
    }
}

fn to_application_event(app: &SnapshotApplication) -> ApplicationEvent {
    ApplicationEvent {
        applied_at: app.applied_at,
        status: app.status,
    }
}

impl DashboardSource for Snapshot {
    async fn users(&self) -> Result<Vec<UserEvent>> {
        Ok(self.user_events())
    }

    async fn companies(&self) -> Result<Vec<CompanyEvent>> {
        Ok(self.company_events())
    }

    async fn jobs(&self) -> Result<Vec<JobEvent>> {
        Ok(self.job_events())
    }

    async fn applications(&self) -> Result<Vec<ApplicationEvent>> {
        Ok(self.applications.iter().map(to_application_event).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FIXTURE: &str = r#"{
        "users": [
            {"id": "u1", "email": "ana@example.com", "full_name": "Ana Silva", "role": "candidate",
             "created_at": "2025-03-01T09:00:00Z", "skills": ["Rust", "SQL"],
             "looking_for_job": true, "profile_views": 4},
            {"id": "u2", "email": "boss@acme.test", "role": "employer",
             "created_at": "2025-02-10T09:00:00Z"},
            {"id": "u3", "email": "root@board.test", "role": "admin", "active": false,
             "created_at": "2024-12-01T09:00:00Z"}
        ],
        "companies": [
            {"id": "c1", "name": "Acme, Inc.", "owner_id": "u2", "verified": true,
             "created_at": "2025-02-11T09:00:00Z"}
        ],
        "jobs": [
            {"id": "j1", "company_id": "c1", "title": "Rust Engineer", "status": "active",
             "posted_at": "2025-03-05T00:00:00Z", "skills_required": ["rust"], "views": 40,
             "salary_min": 90000, "salary_max": 120000},
            {"id": "j2", "company_id": "c1", "title": "Office Manager", "status": "filled",
             "posted_at": "2025-02-01T00:00:00Z", "views": 10}
        ],
        "applications": [
            {"id": "a1", "job_id": "j1", "candidate_id": "u1", "applied_at": "2025-03-10T12:00:00Z",
             "status": "interviewing", "cover_letter": "Hello"},
            {"id": "a2", "job_id": "j2", "candidate_id": "u1", "applied_at": "2025-02-03T12:00:00Z",
             "status": "accepted"}
        ]
    }"#;

    fn snapshot() -> Snapshot {
        serde_json::from_str(FIXTURE).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FIXTURE.as_bytes()).unwrap();
        let loaded = Snapshot::load(file.path()).unwrap();
        assert_eq!(loaded, snapshot());
        assert!(loaded.users[0].active);
        assert!(!loaded.users[2].active);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(Snapshot::load(&dir.path().join("missing.json")), Err(Error::Io(_))));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2").unwrap();
        assert!(matches!(Snapshot::load(file.path()), Err(Error::Json(_))));
    }

    #[test]
    fn test_application_records_join_names() {
        let records = snapshot().report_records(ReportType::Applications);
        assert_eq!(records.len(), 2);
        let ReportRecord::Application(row) = &records[0] else {
            panic!("expected an application row");
        };
        assert_eq!(row.job_title.as_deref(), Some("Rust Engineer"));
        assert_eq!(row.company_name.as_deref(), Some("Acme, Inc."));
        assert_eq!(row.candidate_name.as_deref(), Some("Ana Silva"));
        assert_eq!(row.candidate_email.as_deref(), Some("ana@example.com"));
    }

    #[test]
    fn test_job_and_company_counts() {
        let snap = snapshot();
        let jobs = snap.report_records(ReportType::Jobs);
        let ReportRecord::Job(row) = &jobs[0] else {
            panic!("expected a job row");
        };
        assert_eq!(row.application_count, Some(1));

        let companies = snap.report_records(ReportType::Companies);
        let ReportRecord::Company(row) = &companies[0] else {
            panic!("expected a company row");
        };
        assert_eq!(row.job_count, Some(2));

        let users = snap.report_records(ReportType::Users);
        let owned: Vec<Option<u64>> = users
            .iter()
            .map(|r| match r {
                ReportRecord::User(u) => u.companies_owned,
                _ => None,
            })
            .collect();
        assert_eq!(owned, vec![None, Some(1), None]);
    }

    #[test]
    fn test_job_listings_only_active() {
        let listings = snapshot().job_listings();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].id, "j1");
        assert_eq!(listings[0].salary_max, Some(120000.0));
    }

    #[test]
    fn test_job_seeker_inputs() {
        let inputs = snapshot().job_seeker_inputs("u1").unwrap();
        assert_eq!(inputs.applications.len(), 2);
        assert_eq!(inputs.profile_views, Some(4));
        assert_eq!(inputs.saved_jobs, None);
        assert_eq!(inputs.profile.unwrap().skills, vec!["Rust", "SQL"]);
        assert_eq!(inputs.open_jobs.len(), 1);

        assert!(matches!(snapshot().job_seeker_inputs("nobody"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_performance_records() {
        let records = snapshot().performance_records(Some("u2"), today()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].job_id, "j1");
        assert_eq!(records[0].views, 40);
        assert_eq!(records[0].applications, 1);
        assert_eq!(records[0].accepted_applications, 0);
        assert_eq!(records[0].days_active, 10);
        assert_eq!(records[1].accepted_applications, 1);

        // an employer with no companies has no jobs
        assert!(snapshot().performance_records(Some("u1"), today()).unwrap().is_empty());
        assert_eq!(snapshot().performance_records(None, today()).unwrap().len(), 2);
    }

    #[test]
    fn test_employer_inputs() {
        let inputs = snapshot().employer_inputs("u2", today()).unwrap();
        assert_eq!(inputs.jobs.len(), 2);
        assert_eq!(inputs.active_jobs, Some(1));
        assert_eq!(inputs.applications.len(), 2);
        assert!(snapshot().employer_inputs("ghost", today()).is_err());
    }

    #[tokio::test]
    async fn test_general_inputs() {
        let inputs = crate::source::load_general_inputs(&snapshot()).await.unwrap();
        assert_eq!(inputs.total_jobs, Some(2));
        assert_eq!(inputs.active_jobs, Some(1));
        assert_eq!(inputs.total_companies, Some(1));
        assert_eq!(inputs.total_candidates, Some(1));
    }

    #[tokio::test]
    async fn test_snapshot_as_dashboard_source() {
        let snap = snapshot();
        let inputs = crate::source::load_admin_inputs(&snap).await.unwrap();
        assert_eq!(inputs.users.len(), 3);
        assert_eq!(inputs.jobs[1].status, JobStatus::Filled);
        assert_eq!(inputs.applications, snap.admin_inputs().applications);
    }
}
