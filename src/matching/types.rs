use serde::{Deserialize, Serialize};

/// What a job seeker brings: skills plus an optional salary expectation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub preferred_salary_min: Option<f64>,
    #[serde(default)]
    pub preferred_salary_max: Option<f64>,
}

/// A job posting as seen by the matcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobListing {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub skills_required: Vec<String>,
    #[serde(default)]
    pub salary_min: Option<f64>,
    #[serde(default)]
    pub salary_max: Option<f64>,
}

/// How well one job fits a candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobMatch {
    pub job_id: String,
    pub title: String,
    pub skill_match_count: usize,
    /// Candidate skills (lower-cased) that matched a requirement.
    pub matched_skills: Vec<String>,
    pub skill_score: f64,
    pub salary_score: f64,
    pub overall_score: u8,
}

/// Tunables for ranking. The skill/salary weights are fixed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Matches scoring below this are dropped as noise.
    pub min_score: u8,
    pub max_results: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            min_score: 30,
            max_results: 10,
        }
    }
}
