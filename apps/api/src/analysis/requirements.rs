//! Requirement extraction — years of experience and degree level, pulled
//! from raw job text and resume entries for the required-vs-found report.

use chrono::Utc;
use regex::Regex;

use crate::models::analysis::{EducationMatch, ExperienceMatch};
use crate::models::resume::{EducationEntry, ExperienceEntry};

const DAYS_PER_YEAR: f64 = 365.25;

/// Degree levels ordered highest first; the first matching level wins.
const DEGREE_LEVELS: &[(&str, &[&str])] = &[
    ("phd", &["phd", "ph.d", "doctorate", "doctoral"]),
    ("master", &["master", "msc", "m.sc", "mba", "m.s."]),
    ("bachelor", &["bachelor", "bsc", "b.sc", "b.tech", "b.s.", "undergraduate"]),
    ("associate", &["associate degree", "associate's"]),
];

/// Compares the job's stated experience requirement against the total
/// duration of the resume's experience entries.
pub fn experience_match(jd_text: &str, experience: &[ExperienceEntry]) -> ExperienceMatch {
    ExperienceMatch {
        required_years: required_years(jd_text),
        found_years: found_years(experience),
    }
}

/// Compares the degree level named by the job against the highest degree
/// level present in the resume's education entries.
pub fn education_match(jd_text: &str, education: &[EducationEntry]) -> EducationMatch {
    let resume_text = education
        .iter()
        .map(|e| format!("{} {}", e.degree, e.field.as_deref().unwrap_or("")))
        .collect::<Vec<_>>()
        .join(" ");
    EducationMatch {
        required: detect_degree(jd_text),
        found: detect_degree(&resume_text),
    }
}

/// Extracts the first "N years" style requirement from job text.
/// "3-5 years" reads as the lower bound; "5+ years" reads as 5.
pub fn required_years(jd_text: &str) -> Option<f64> {
    let pattern = Regex::new(r"(?i)(\d{1,2})\s*(?:-\s*\d{1,2}\s*)?\+?\s*(?:years?|yrs?)")
        .expect("years pattern is valid");
    pattern
        .captures(jd_text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Total years across experience entries, to one decimal. Entries without
/// a start date are skipped; open-ended current roles run to today.
pub fn found_years(experience: &[ExperienceEntry]) -> Option<f64> {
    let today = Utc::now().date_naive();
    let mut days = 0i64;
    let mut any = false;

    for entry in experience {
        let Some(start) = entry.start_date else {
            continue;
        };
        let end = match entry.end_date {
            Some(end) => end,
            None if entry.is_current => today,
            None => continue,
        };
        if end > start {
            days += end.signed_duration_since(start).num_days();
            any = true;
        }
    }

    any.then(|| (days as f64 / DAYS_PER_YEAR * 10.0).round() / 10.0)
}

fn detect_degree(text: &str) -> Option<String> {
    let lower = text.to_lowercase();
    DEGREE_LEVELS
        .iter()
        .find(|(_, markers)| markers.iter().any(|marker| lower.contains(marker)))
        .map(|(level, _)| level.to_string())
}
