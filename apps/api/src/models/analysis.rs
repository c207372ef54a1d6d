//! Analysis value objects and the persisted `job_analyses` row.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Free-text job posting supplied per analysis. Not necessarily tied to a
/// persisted job record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobPosting {
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub company: String,
    pub job_description: String,
}

/// Matched/missing terms for one vocabulary, with a 0-100 coverage percent.
///
/// Invariant: `matched` and `missing` are disjoint, and `coverage_percent`
/// is `matched / (matched + missing)` rounded — except that an empty
/// required set scores 100 (nothing required, nothing missing).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordSet {
    pub matched: BTreeSet<String>,
    pub missing: BTreeSet<String>,
    pub coverage_percent: u32,
}

/// Per-section fit scores, each independently in 0..=100. A missing resume
/// section scores 0; no field is ever null in the persisted form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionScores {
    pub summary: u32,
    pub skills: u32,
    pub experience: u32,
    pub education: u32,
}

/// Years of experience the job asks for vs. what the resume shows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceMatch {
    pub required_years: Option<f64>,
    pub found_years: Option<f64>,
}

/// Degree level the job asks for vs. the highest level in the resume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationMatch {
    pub required: Option<String>,
    pub found: Option<String>,
}

/// Qualitative improvement suggestions from the external oracle.
/// The default (all empty) is the documented degraded-mode value used when
/// the oracle fails or returns something unparseable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestions {
    #[serde(default)]
    pub improved_summary: String,
    #[serde(default)]
    pub skills_to_add: Vec<String>,
    #[serde(default)]
    pub experience_improvements: Vec<String>,
    #[serde(default)]
    pub overall_tips: Vec<String>,
}

/// One persisted analysis. Created once per analyze call, immutable after
/// creation, owned by the requesting user. Structured sub-documents are
/// stored as jsonb.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobAnalysisRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub resume_id: Uuid,
    pub job_title: String,
    pub company: String,
    pub job_description: String,
    pub ats_score: i32,
    pub hard_skills_score: i32,
    pub soft_skills_score: i32,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub hard_skills: Value,
    pub soft_skills: Value,
    pub section_scores: Value,
    pub experience_match: Value,
    pub education_match: Value,
    pub suggestions: Value,
    pub created_at: DateTime<Utc>,
}
