use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{ApplicationStatus, JobStatus, UserRole};

/// One exportable row. The tag decides which header set and column
/// projection apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReportRecord {
    Application(ApplicationRow),
    Job(JobRow),
    Company(CompanyRow),
    User(UserRow),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRow {
    pub id: String,
    pub applied_at: DateTime<Utc>,
    pub status: ApplicationStatus,
    pub job_title: Option<String>,
    pub company_name: Option<String>,
    pub candidate_name: Option<String>,
    pub candidate_email: Option<String>,
    pub cover_letter: Option<String>,
    pub cv_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRow {
    pub id: String,
    pub title: String,
    pub status: JobStatus,
    pub posted_at: DateTime<Utc>,
    pub company_name: Option<String>,
    pub location: Option<String>,
    pub industry: Option<String>,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub experience_level: Option<String>,
    pub employment_type: Option<String>,
    pub application_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRow {
    pub id: String,
    pub name: String,
    pub website: Option<String>,
    pub size: Option<String>,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
    pub industry: Option<String>,
    pub location: Option<String>,
    pub job_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRow {
    pub id: String,
    pub email: String,
    pub full_name: Option<String>,
    pub role: UserRole,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub experience_level: Option<String>,
    pub looking_for_job: Option<bool>,
    pub companies_owned: Option<u64>,
}

pub(crate) const APPLICATION_HEADERS: &[&str] = &[
    "ID",
    "Applied Date",
    "Status",
    "Job Title",
    "Company Name",
    "Candidate Name",
    "Candidate Email",
    "Has Cover Letter",
    "Has CV",
];

pub(crate) const JOB_HEADERS: &[&str] = &[
    "ID",
    "Title",
    "Status",
    "Posted Date",
    "Company",
    "Location",
    "Industry",
    "Min Salary",
    "Max Salary",
    "Experience Level",
    "Employment Type",
    "Applications",
];

pub(crate) const COMPANY_HEADERS: &[&str] = &[
    "ID",
    "Name",
    "Website",
    "Size",
    "Verification Status",
    "Registration Date",
    "Industry",
    "Location",
    "Jobs Posted",
];

pub(crate) const USER_HEADERS: &[&str] = &[
    "ID",
    "Email",
    "Full Name",
    "Role",
    "Status",
    "Registration Date",
    "Experience Level",
    "Looking For Job",
    "Companies Owned",
];

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

fn date(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d").to_string()
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn amount(value: Option<f64>) -> String {
    value.map_or(String::new(), |v| v.to_string())
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

impl ApplicationRow {
    pub(crate) fn columns(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            date(&self.applied_at),
            self.status.label().to_string(),
            text(&self.job_title),
            text(&self.company_name),
            text(&self.candidate_name),
            text(&self.candidate_email),
            yes_no(present(&self.cover_letter)).to_string(),
            yes_no(present(&self.cv_url)).to_string(),
        ]
    }
}

impl JobRow {
    pub(crate) fn columns(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.title.clone(),
            self.status.label().to_string(),
            date(&self.posted_at),
            text(&self.company_name),
            text(&self.location),
            text(&self.industry),
            amount(self.salary_min),
            amount(self.salary_max),
            text(&self.experience_level),
            text(&self.employment_type),
            self.application_count.unwrap_or(0).to_string(),
        ]
    }
}

impl CompanyRow {
    pub(crate) fn columns(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            text(&self.website),
            text(&self.size),
            if self.verified { "Verified" } else { "Unverified" }.to_string(),
            date(&self.created_at),
            text(&self.industry),
            text(&self.location),
            self.job_count.unwrap_or(0).to_string(),
        ]
    }
}

impl UserRow {
    pub(crate) fn columns(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.email.clone(),
            text(&self.full_name),
            self.role.label().to_string(),
            if self.active { "Active" } else { "Inactive" }.to_string(),
            date(&self.created_at),
            text(&self.experience_level),
            self.looking_for_job.map_or(String::new(), |v| yes_no(v).to_string()),
            self.companies_owned.unwrap_or(0).to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_header_and_column_counts_agree() {
        let ts = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let app = ApplicationRow {
            id: "a1".into(),
            applied_at: ts,
            status: ApplicationStatus::Pending,
            job_title: None,
            company_name: None,
            candidate_name: None,
            candidate_email: None,
            cover_letter: None,
            cv_url: None,
        };
        assert_eq!(app.columns().len(), APPLICATION_HEADERS.len());

        let user = UserRow {
            id: "u1".into(),
            email: "a@b.c".into(),
            full_name: None,
            role: UserRole::Admin,
            active: false,
            created_at: ts,
            experience_level: None,
            looking_for_job: None,
            companies_owned: None,
        };
        let cols = user.columns();
        assert_eq!(cols.len(), USER_HEADERS.len());
        assert_eq!(cols[3], "Administrator");
        assert_eq!(cols[4], "Inactive");
        assert_eq!(cols[5], "2025-01-02");
        assert_eq!(cols[7], "");
        assert_eq!(cols[8], "0");
    }

    #[test]
    fn test_amount_formatting() {
        assert_eq!(amount(Some(85000.0)), "85000");
        assert_eq!(amount(Some(1234.5)), "1234.5");
        assert_eq!(amount(None), "");
    }

    #[test]
    fn test_blank_cover_letter_is_not_present() {
        assert!(!present(&Some("   ".into())));
        assert!(present(&Some("Dear team".into())));
    }
}
