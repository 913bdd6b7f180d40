//! Serializes report rows to CSV or JSON for download.

pub mod records;

pub use records::{ApplicationRow, CompanyRow, JobRow, ReportRecord, UserRow};

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{Error, Result};
use records::{APPLICATION_HEADERS, COMPANY_HEADERS, JOB_HEADERS, USER_HEADERS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    Applications,
    Jobs,
    Companies,
    Users,
}

impl ReportType {
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "applications" | "application" => Ok(Self::Applications),
            "jobs" | "job" => Ok(Self::Jobs),
            "companies" | "company" => Ok(Self::Companies),
            "users" | "user" => Ok(Self::Users),
            other => Err(Error::InvalidIdentifier(format!("unknown report type: {other}"))),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Applications => "applications",
            Self::Jobs => "jobs",
            Self::Companies => "companies",
            Self::Users => "users",
        }
    }

    /// Fixed, ordered CSV header for this report.
    pub const fn headers(self) -> &'static [&'static str] {
        match self {
            Self::Applications => APPLICATION_HEADERS,
            Self::Jobs => JOB_HEADERS,
            Self::Companies => COMPANY_HEADERS,
            Self::Users => USER_HEADERS,
        }
    }

    /// Project a record onto this report's columns, or `None` if the record
    /// belongs to a different report.
    fn columns(self, record: &ReportRecord) -> Option<Vec<String>> {
        match (self, record) {
            (Self::Applications, ReportRecord::Application(row)) => Some(row.columns()),
            (Self::Jobs, ReportRecord::Job(row)) => Some(row.columns()),
            (Self::Companies, ReportRecord::Company(row)) => Some(row.columns()),
            (Self::Users, ReportRecord::User(row)) => Some(row.columns()),
            _ => None,
        }
    }
}

impl std::fmt::Display for ReportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(Error::InvalidIdentifier(format!("unknown export format: {other}"))),
        }
    }

    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Json => "application/json",
        }
    }

    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

/// Rendered export plus the metadata a caller needs to deliver it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportFile {
    pub content: String,
    pub filename: String,
    pub mime_type: &'static str,
}

/// Render `records` in the requested format.
///
/// JSON is the records verbatim, pretty-printed. CSV projects each record
/// onto the report's header set; with nothing to emit it is the empty
/// string, without a header.
pub fn format_records(
    records: &[ReportRecord],
    report_type: ReportType,
    format: ExportFormat,
) -> Result<String> {
    match format {
        ExportFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        ExportFormat::Csv => Ok(to_csv(records, report_type)),
    }
}

/// Render and name an export generated on `generated_on`.
pub fn export(
    records: &[ReportRecord],
    report_type: ReportType,
    format: ExportFormat,
    generated_on: NaiveDate,
) -> Result<ExportFile> {
    let content = format_records(records, report_type, format)?;
    let filename = format!(
        "{}-report-{}.{}",
        report_type.as_str(),
        generated_on.format("%Y-%m-%d"),
        format.extension()
    );
    log::debug!("Exported {} {report_type} records to {filename}", records.len());
    Ok(ExportFile {
        content,
        filename,
        mime_type: format.mime_type(),
    })
}

fn to_csv(records: &[ReportRecord], report_type: ReportType) -> String {
    let rows: Vec<Vec<String>> = records
        .iter()
        .filter_map(|record| {
            let columns = report_type.columns(record);
            if columns.is_none() {
                log::warn!("Skipping record that does not belong in a {report_type} report");
            }
            columns
        })
        .collect();

    if rows.is_empty() {
        return String::new();
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(csv_line(report_type.headers().iter().copied()));
    for row in &rows {
        lines.push(csv_line(row.iter().map(String::as_str)));
    }
    lines.join("\n")
}

fn csv_line<'a>(fields: impl Iterator<Item = &'a str>) -> String {
    fields.map(csv_escape).collect::<Vec<_>>().join(",")
}

/// Quote a field only if it contains a comma, double quote or newline,
/// doubling any inner quotes.
pub fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ApplicationStatus, JobStatus, UserRole};
    use chrono::{TimeZone, Utc};

    fn application(id: &str, job_title: &str, cover_letter: Option<&str>) -> ReportRecord {
        ReportRecord::Application(ApplicationRow {
            id: id.to_string(),
            applied_at: Utc.with_ymd_and_hms(2025, 4, 1, 9, 30, 0).unwrap(),
            status: ApplicationStatus::Reviewing,
            job_title: Some(job_title.to_string()),
            company_name: Some("Acme".to_string()),
            candidate_name: Some("Sam Doe".to_string()),
            candidate_email: Some("sam@example.com".to_string()),
            cover_letter: cover_letter.map(str::to_string),
            cv_url: None,
        })
    }

    fn job() -> ReportRecord {
        ReportRecord::Job(JobRow {
            id: "j1".to_string(),
            title: "Backend Engineer".to_string(),
            status: JobStatus::Active,
            posted_at: Utc.with_ymd_and_hms(2025, 3, 20, 0, 0, 0).unwrap(),
            company_name: Some("Acme".to_string()),
            location: Some("Berlin".to_string()),
            industry: None,
            salary_min: Some(60000.0),
            salary_max: Some(80000.0),
            experience_level: Some("senior".to_string()),
            employment_type: Some("full_time".to_string()),
            application_count: None,
        })
    }

    #[test]
    fn test_csv_escape() {
        assert_eq!(csv_escape("He said \"hi\", ok"), "\"He said \"\"hi\"\", ok\"");
        assert_eq!(csv_escape("plain text"), "plain text");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("line1\nline2"), "\"line1\nline2\"");
        assert_eq!(csv_escape(""), "");
    }

    #[test]
    fn test_applications_csv() {
        let records = vec![
            application("a1", "Rust Dev", Some("Dear team")),
            application("a2", "Dev, Platform", None),
        ];
        let csv = format_records(&records, ReportType::Applications, ExportFormat::Csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "ID,Applied Date,Status,Job Title,Company Name,Candidate Name,Candidate Email,Has Cover Letter,Has CV"
        );
        assert_eq!(lines[1], "a1,2025-04-01,Reviewing,Rust Dev,Acme,Sam Doe,sam@example.com,Yes,No");
        assert_eq!(lines[2], "a2,2025-04-01,Reviewing,\"Dev, Platform\",Acme,Sam Doe,sam@example.com,No,No");
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn test_jobs_csv_counts_default_to_zero() {
        let csv = format_records(&[job()], ReportType::Jobs, ExportFormat::Csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0].split(',').count(), 12);
        assert_eq!(
            lines[1],
            "j1,Backend Engineer,Active,2025-03-20,Acme,Berlin,,60000,80000,senior,full_time,0"
        );
    }

    #[test]
    fn test_company_and_user_csv() {
        let company = ReportRecord::Company(CompanyRow {
            id: "c1".to_string(),
            name: "Acme \"Labs\"".to_string(),
            website: Some("https://acme.test".to_string()),
            size: Some("11-50".to_string()),
            verified: true,
            created_at: Utc.with_ymd_and_hms(2024, 12, 31, 23, 0, 0).unwrap(),
            industry: Some("Software".to_string()),
            location: None,
            job_count: Some(4),
        });
        let csv = format_records(&[company], ReportType::Companies, ExportFormat::Csv).unwrap();
        assert_eq!(
            csv.lines().nth(1).unwrap(),
            "c1,\"Acme \"\"Labs\"\"\",https://acme.test,11-50,Verified,2024-12-31,Software,,4"
        );

        let user = ReportRecord::User(UserRow {
            id: "u1".to_string(),
            email: "kim@example.com".to_string(),
            full_name: Some("Kim Lee".to_string()),
            role: UserRole::Candidate,
            active: true,
            created_at: Utc.with_ymd_and_hms(2025, 1, 5, 0, 0, 0).unwrap(),
            experience_level: Some("junior".to_string()),
            looking_for_job: Some(true),
            companies_owned: None,
        });
        let csv = format_records(&[user], ReportType::Users, ExportFormat::Csv).unwrap();
        assert_eq!(
            csv.lines().nth(1).unwrap(),
            "u1,kim@example.com,Kim Lee,Candidate,Active,2025-01-05,junior,Yes,0"
        );
    }

    #[test]
    fn test_empty_records() {
        assert_eq!(format_records(&[], ReportType::Users, ExportFormat::Csv).unwrap(), "");
        assert_eq!(format_records(&[], ReportType::Users, ExportFormat::Json).unwrap(), "[]");
    }

    #[test]
    fn test_mismatched_records_are_skipped() {
        let records = vec![job(), application("a1", "Rust Dev", None)];
        let csv = format_records(&records, ReportType::Applications, ExportFormat::Csv).unwrap();
        assert_eq!(csv.lines().count(), 2);

        let only_jobs = format_records(&[job()], ReportType::Users, ExportFormat::Csv).unwrap();
        assert_eq!(only_jobs, "");
    }

    #[test]
    fn test_json_round_trip() {
        let records = vec![application("a1", "Rust Dev", Some("Hi")), job()];
        let json = format_records(&records, ReportType::Applications, ExportFormat::Json).unwrap();
        assert!(json.contains("\n  {"));
        assert!(json.contains("\"type\": \"application\""));

        let parsed: Vec<ReportRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn test_export_file_metadata() {
        let day = NaiveDate::from_ymd_opt(2025, 4, 2).unwrap();
        let file = export(&[job()], ReportType::Jobs, ExportFormat::Csv, day).unwrap();
        assert_eq!(file.filename, "jobs-report-2025-04-02.csv");
        assert_eq!(file.mime_type, "text/csv");

        let file = export(&[job()], ReportType::Jobs, ExportFormat::Json, day).unwrap();
        assert_eq!(file.filename, "jobs-report-2025-04-02.json");
        assert_eq!(file.mime_type, "application/json");
    }

    #[test]
    fn test_parse_identifiers() {
        assert_eq!(ReportType::parse("Companies").unwrap(), ReportType::Companies);
        assert!(ReportType::parse("invoices").is_err());
        assert_eq!(ExportFormat::parse("JSON").unwrap(), ExportFormat::Json);
        assert!(ExportFormat::parse("xlsx").is_err());
    }
}
