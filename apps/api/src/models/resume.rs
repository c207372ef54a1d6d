//! Resume input types. Owned by the resume-editing subsystem — this
//! service receives a snapshot and never writes back.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A read-only structured resume as supplied by the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumeSnapshot {
    #[serde(default)]
    pub professional_summary: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub description: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_current: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub degree: String,
    pub field: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ResumeSnapshot {
    /// True when there is nothing to analyze: no summary text, no skills,
    /// and no experience entries. Education alone is not analyzable.
    pub fn is_empty(&self) -> bool {
        self.professional_summary.trim().is_empty()
            && self.skills.iter().all(|s| s.trim().is_empty())
            && self.experience.is_empty()
    }
}
