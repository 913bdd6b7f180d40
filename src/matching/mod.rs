//! Ranks job postings against a candidate by skill and salary overlap.
//!
//! Skill matching is lenient: a candidate skill matches when it and some
//! required skill contain one another, ignoring case, so "React" matches
//! "reactjs" and "React.js".

pub mod types;

pub use types::{CandidateProfile, JobListing, JobMatch, MatchConfig};

use std::collections::BTreeSet;

pub const SKILL_WEIGHT: f64 = 0.7;
pub const SALARY_WEIGHT: f64 = 0.3;

/// Scores and ranks jobs for a candidate.
pub struct JobMatcher {
    config: MatchConfig,
}

impl JobMatcher {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    /// Score every job, drop those under the threshold, and return the best
    /// matches first. Ties keep input order.
    pub fn rank(&self, candidate: &CandidateProfile, jobs: &[JobListing]) -> Vec<JobMatch> {
        let skills = normalize_skills(&candidate.skills);

        let mut matches: Vec<JobMatch> = jobs
            .iter()
            .map(|job| score_job_with(&skills, candidate, job))
            .filter(|m| m.overall_score >= self.config.min_score)
            .collect();

        matches.sort_by(|a, b| b.overall_score.cmp(&a.overall_score));
        matches.truncate(self.config.max_results);

        log::debug!(
            "Matched {} of {} jobs (min score {})",
            matches.len(),
            jobs.len(),
            self.config.min_score
        );
        matches
    }
}

impl Default for JobMatcher {
    fn default() -> Self {
        Self::new(MatchConfig::default())
    }
}

/// Rank with the default threshold and result limit.
pub fn match_jobs(candidate: &CandidateProfile, jobs: &[JobListing]) -> Vec<JobMatch> {
    JobMatcher::default().rank(candidate, jobs)
}

/// Score one job without filtering.
pub fn score_job(candidate: &CandidateProfile, job: &JobListing) -> JobMatch {
    score_job_with(&normalize_skills(&candidate.skills), candidate, job)
}

fn score_job_with(
    candidate_skills: &BTreeSet<String>,
    candidate: &CandidateProfile,
    job: &JobListing,
) -> JobMatch {
    let required: Vec<String> = job
        .skills_required
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();

    let matched_skills: Vec<String> = candidate_skills
        .iter()
        .filter(|skill| {
            required
                .iter()
                .any(|req| req.contains(skill.as_str()) || skill.contains(req.as_str()))
        })
        .cloned()
        .collect();

    let skill_match_count = matched_skills.len();
    let skill_score = if candidate_skills.is_empty() {
        0.0
    } else {
        100.0 * skill_match_count as f64 / candidate_skills.len() as f64
    };

    let salary_score = salary_score(
        candidate.preferred_salary_min,
        candidate.preferred_salary_max,
        job.salary_min,
        job.salary_max,
    );

    let overall = skill_score * SKILL_WEIGHT + salary_score * SALARY_WEIGHT;
    let overall_score = overall.round().clamp(0.0, 100.0) as u8;

    JobMatch {
        job_id: job.id.clone(),
        title: job.title.clone(),
        skill_match_count,
        matched_skills,
        skill_score,
        salary_score,
        overall_score,
    }
}

/// Case-insensitive set of non-blank skills.
fn normalize_skills(skills: &[String]) -> BTreeSet<String> {
    skills
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Overlap of the two salary ranges relative to the wider one, in percent.
///
/// Needs all four bounds. When neither range has any width, identical fixed
/// salaries score 100 and anything else 0.
pub fn salary_score(
    cand_min: Option<f64>,
    cand_max: Option<f64>,
    job_min: Option<f64>,
    job_max: Option<f64>,
) -> f64 {
    let (Some(cand_min), Some(cand_max), Some(job_min), Some(job_max)) =
        (cand_min, cand_max, job_min, job_max)
    else {
        return 0.0;
    };

    let overlap = (cand_max.min(job_max) - cand_min.max(job_min)).max(0.0);
    let span = (cand_max - cand_min).max(job_max - job_min);

    if span <= 0.0 {
        return if cand_min == job_min && cand_max == job_max {
            100.0
        } else {
            0.0
        };
    }

    (100.0 * overlap / span).clamp(0.0, 100.0)
}
