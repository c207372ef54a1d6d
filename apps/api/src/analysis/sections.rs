//! Per-section fit scoring against the job's token set.

use std::collections::BTreeSet;

use crate::analysis::normalize::normalize;
use crate::models::analysis::SectionScores;
use crate::models::resume::ResumeSnapshot;

/// Education present but with no keyword overlap still gets partial credit.
const EDUCATION_PRESENCE_SCORE: u32 = 50;

/// Scores each resume section independently on 0..=100.
pub fn score_sections(resume: &ResumeSnapshot, job_tokens: &BTreeSet<String>) -> SectionScores {
    SectionScores {
        summary: coverage(&normalize(&resume.professional_summary), job_tokens),
        skills: coverage(&normalize(&resume.skills.join(" ")), job_tokens),
        experience: score_experience(resume, job_tokens),
        education: score_education(resume, job_tokens),
    }
}

fn score_experience(resume: &ResumeSnapshot, job_tokens: &BTreeSet<String>) -> u32 {
    if resume.experience.is_empty() {
        return 0;
    }
    let mut text = String::new();
    for entry in &resume.experience {
        text.push_str(&entry.company);
        text.push(' ');
        text.push_str(&entry.position);
        text.push(' ');
        text.push_str(&entry.description);
        text.push(' ');
    }
    coverage(&normalize(&text), job_tokens)
}

/// Binary-leaning heuristic: any keyword overlap scores 100, entries with
/// no overlap score the presence credit, no entries scores 0.
fn score_education(resume: &ResumeSnapshot, job_tokens: &BTreeSet<String>) -> u32 {
    if resume.education.is_empty() {
        return 0;
    }
    let overlaps = resume.education.iter().any(|entry| {
        let text = format!(
            "{} {} {}",
            entry.institution,
            entry.degree,
            entry.field.as_deref().unwrap_or("")
        );
        !normalize(&text).is_disjoint(job_tokens)
    });
    if overlaps {
        100
    } else {
        EDUCATION_PRESENCE_SCORE
    }
}

/// Percent of job tokens present in the section's token set, rounded and
/// clamped to 0..=100. Either side empty scores 0.
fn coverage(section_tokens: &BTreeSet<String>, job_tokens: &BTreeSet<String>) -> u32 {
    if section_tokens.is_empty() || job_tokens.is_empty() {
        return 0;
    }
    let hits = job_tokens.intersection(section_tokens).count();
    (((hits as f64 / job_tokens.len() as f64) * 100.0).round() as u32).min(100)
}
