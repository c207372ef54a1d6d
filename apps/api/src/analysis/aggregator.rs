//! Analysis aggregation — orchestrates the full analyze pipeline.
//!
//! Flow: validate → tokenize → keyword match → section scores →
//!       composite score → oracle suggestions (degraded-mode tolerant) →
//!       persist → return.
//!
//! Everything before the oracle call is deterministic and is the guaranteed
//! part of the contract; suggestion failure never fails the analysis.

use std::collections::BTreeSet;

use chrono::Utc;
use serde::Deserialize;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::keywords::match_vocabulary;
use crate::analysis::normalize::normalize;
use crate::analysis::prompts::{build_suggestion_prompt, SUGGESTION_SYSTEM};
use crate::analysis::requirements::{education_match, experience_match};
use crate::analysis::sections::score_sections;
use crate::analysis::store;
use crate::analysis::vocabulary::{HARD_SKILLS, SOFT_SKILLS};
use crate::errors::AppError;
use crate::models::analysis::{
    EducationMatch, ExperienceMatch, JobAnalysisRow, JobPosting, KeywordSet, SectionScores,
    Suggestions,
};
use crate::models::resume::ResumeSnapshot;
use crate::oracle::{strip_json_fences, SuggestionOracle};

/// Composite score weights. Fixed constants: the stored `ats_score` must be
/// reproducible from the stored sub-scores with this exact formula.
pub const HARD_SKILLS_WEIGHT: f64 = 0.35;
pub const SOFT_SKILLS_WEIGHT: f64 = 0.15;
pub const SECTIONS_WEIGHT: f64 = 0.50;

/// One retry on top of the initial oracle attempt, per the resilience rule.
const SUGGESTION_RETRIES: u32 = 1;
const SUGGESTION_MAX_TOKENS: u32 = 1024;

/// Request body for an analyze call. User identity is an explicit field —
/// there is no ambient request context.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    pub user_id: Uuid,
    pub resume_id: Uuid,
    pub resume: ResumeSnapshot,
    pub job: JobPosting,
}

/// Deterministic local scoring output, before suggestions and persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalReport {
    pub hard_skills: KeywordSet,
    pub soft_skills: KeywordSet,
    pub section_scores: SectionScores,
    pub experience_match: ExperienceMatch,
    pub education_match: EducationMatch,
    pub ats_score: u32,
}

/// Outcome of a full analyze call. `warning` is set when suggestions were
/// degraded; it never blocks the response.
#[derive(Debug)]
pub struct AnalyzeOutcome {
    pub analysis: JobAnalysisRow,
    pub warning: Option<String>,
}

/// Runs the full analyze pipeline and persists the result.
///
/// Each invocation is independent and stateless; re-analyzing the same
/// inputs inserts a new row by design.
pub async fn run_analysis(
    pool: &PgPool,
    oracle: &dyn SuggestionOracle,
    request: AnalyzeRequest,
) -> Result<AnalyzeOutcome, AppError> {
    let report = score_locally(&request.resume, &request.job)?;
    info!(
        "Local ATS score {}/100 for resume {} (user {})",
        report.ats_score, request.resume_id, request.user_id
    );

    let prompt = build_suggestion_prompt(
        &request.job.job_title,
        &request.job.company,
        &request.job.job_description,
        &request.resume.professional_summary,
        &request.resume.skills,
        &missing_keywords(&report),
    );
    let (suggestions, warning) = fetch_suggestions(oracle, &prompt).await;

    let row = build_row(&request, &report, &suggestions)?;
    store::insert_analysis(pool, &row).await?;
    info!(
        "Persisted analysis {} (ats_score={}, degraded_suggestions={})",
        row.id,
        row.ats_score,
        warning.is_some()
    );

    Ok(AnalyzeOutcome {
        analysis: row,
        warning,
    })
}

/// Deterministic local scoring: validation, tokenization, keyword matching,
/// section scores, requirement extraction, composite score.
pub fn score_locally(
    resume: &ResumeSnapshot,
    job: &JobPosting,
) -> Result<LocalReport, AppError> {
    if job.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }
    if resume.is_empty() {
        return Err(AppError::Validation(
            "resume has no analyzable text: summary, skills, and experience are all empty"
                .to_string(),
        ));
    }

    // Title tokens count as required terms too.
    let job_tokens = normalize(&format!("{} {}", job.job_description, job.job_title));
    let resume_tokens = aggregate_resume_tokens(resume);

    let hard_skills = match_vocabulary(&resume_tokens, &job_tokens, HARD_SKILLS);
    let soft_skills = match_vocabulary(&resume_tokens, &job_tokens, SOFT_SKILLS);
    let section_scores = score_sections(resume, &job_tokens);
    let ats_score = composite_ats_score(
        hard_skills.coverage_percent,
        soft_skills.coverage_percent,
        &section_scores,
    );

    Ok(LocalReport {
        experience_match: experience_match(&job.job_description, &resume.experience),
        education_match: education_match(&job.job_description, &resume.education),
        hard_skills,
        soft_skills,
        section_scores,
        ats_score,
    })
}

/// The fixed composite formula:
/// `round(0.35*hard + 0.15*soft + 0.5*mean(section scores))`.
pub fn composite_ats_score(hard: u32, soft: u32, sections: &SectionScores) -> u32 {
    let section_mean = (sections.summary + sections.skills + sections.experience
        + sections.education) as f64
        / 4.0;
    let score = HARD_SKILLS_WEIGHT * hard as f64
        + SOFT_SKILLS_WEIGHT * soft as f64
        + SECTIONS_WEIGHT * section_mean;
    (score.round() as u32).min(100)
}

/// Union of all resume text tokens, for vocabulary matching.
fn aggregate_resume_tokens(resume: &ResumeSnapshot) -> BTreeSet<String> {
    let mut text = resume.professional_summary.clone();
    for skill in &resume.skills {
        text.push(' ');
        text.push_str(skill);
    }
    for entry in &resume.experience {
        text.push(' ');
        text.push_str(&entry.company);
        text.push(' ');
        text.push_str(&entry.position);
        text.push(' ');
        text.push_str(&entry.description);
    }
    for entry in &resume.education {
        text.push(' ');
        text.push_str(&entry.institution);
        text.push(' ');
        text.push_str(&entry.degree);
        if let Some(field) = &entry.field {
            text.push(' ');
            text.push_str(field);
        }
    }
    normalize(&text)
}

/// Calls the oracle with one retry. Any failure, including unparseable
/// output, degrades to the default empty suggestions plus a warning —
/// never an error.
pub async fn fetch_suggestions(
    oracle: &dyn SuggestionOracle,
    prompt: &str,
) -> (Suggestions, Option<String>) {
    for attempt in 0..=SUGGESTION_RETRIES {
        match oracle
            .complete(SUGGESTION_SYSTEM, prompt, SUGGESTION_MAX_TOKENS)
            .await
        {
            Ok(text) => match parse_suggestions(&text) {
                Some(suggestions) => return (suggestions, None),
                None => warn!(
                    "suggestion response was not valid JSON (attempt {}/{})",
                    attempt + 1,
                    SUGGESTION_RETRIES + 1
                ),
            },
            Err(e) => warn!(
                "suggestion oracle call failed (attempt {}/{}): {e}",
                attempt + 1,
                SUGGESTION_RETRIES + 1
            ),
        }
    }
    (
        Suggestions::default(),
        Some(
            "Improvement suggestions are unavailable right now; the match analysis was computed without them."
                .to_string(),
        ),
    )
}

/// Defensive parse of oracle free text into the suggestion structure.
pub fn parse_suggestions(text: &str) -> Option<Suggestions> {
    serde_json::from_str(strip_json_fences(text)).ok()
}

fn missing_keywords(report: &LocalReport) -> Vec<String> {
    report
        .hard_skills
        .missing
        .iter()
        .chain(report.soft_skills.missing.iter())
        .cloned()
        .collect()
}

fn matched_keywords(report: &LocalReport) -> Vec<String> {
    report
        .hard_skills
        .matched
        .iter()
        .chain(report.soft_skills.matched.iter())
        .cloned()
        .collect()
}

/// Assembles the persisted row from the request, local report, and
/// suggestions. Pure except for the generated id and timestamp.
pub fn build_row(
    request: &AnalyzeRequest,
    report: &LocalReport,
    suggestions: &Suggestions,
) -> Result<JobAnalysisRow, AppError> {
    let to_value = |label: &str, value: serde_json::Result<serde_json::Value>| {
        value.map_err(|e| AppError::Internal(anyhow::anyhow!("failed to serialize {label}: {e}")))
    };

    Ok(JobAnalysisRow {
        id: Uuid::new_v4(),
        user_id: request.user_id,
        resume_id: request.resume_id,
        job_title: request.job.job_title.clone(),
        company: request.job.company.clone(),
        job_description: request.job.job_description.clone(),
        ats_score: report.ats_score as i32,
        hard_skills_score: report.hard_skills.coverage_percent as i32,
        soft_skills_score: report.soft_skills.coverage_percent as i32,
        matched_keywords: matched_keywords(report),
        missing_keywords: missing_keywords(report),
        hard_skills: to_value("hard_skills", serde_json::to_value(&report.hard_skills))?,
        soft_skills: to_value("soft_skills", serde_json::to_value(&report.soft_skills))?,
        section_scores: to_value(
            "section_scores",
            serde_json::to_value(&report.section_scores),
        )?,
        experience_match: to_value(
            "experience_match",
            serde_json::to_value(&report.experience_match),
        )?,
        education_match: to_value(
            "education_match",
            serde_json::to_value(&report.education_match),
        )?,
        suggestions: to_value("suggestions", serde_json::to_value(suggestions))?,
        created_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{EducationEntry, ExperienceEntry};
    use crate::oracle::OracleError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn sample_resume() -> ResumeSnapshot {
        ResumeSnapshot {
            professional_summary: "Backend engineer building Python services on AWS".to_string(),
            skills: vec!["Python".to_string(), "SQL".to_string(), "Docker".to_string()],
            experience: vec![ExperienceEntry {
                company: "Acme".to_string(),
                position: "Software Engineer".to_string(),
                description: "Built Python microservices and led deployments".to_string(),
                ..Default::default()
            }],
            education: vec![EducationEntry {
                institution: "State University".to_string(),
                degree: "BSc Computer Science".to_string(),
                ..Default::default()
            }],
        }
    }

    fn sample_job() -> JobPosting {
        JobPosting {
            job_title: "Backend Engineer".to_string(),
            company: "Globex".to_string(),
            job_description:
                "Looking for a Python and AWS engineer with leadership skills. \
                 Bachelor's degree in computer science preferred. 3+ years experience."
                    .to_string(),
        }
    }

    struct FailingOracle {
        calls: AtomicU32,
    }

    #[async_trait]
    impl SuggestionOracle for FailingOracle {
        async fn complete(&self, _: &str, _: &str, _: u32) -> Result<String, OracleError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(OracleError::EmptyContent)
        }
    }

    struct StaticOracle(String);

    #[async_trait]
    impl SuggestionOracle for StaticOracle {
        async fn complete(&self, _: &str, _: &str, _: u32) -> Result<String, OracleError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_empty_job_description_is_validation_error() {
        let job = JobPosting {
            job_description: "   ".to_string(),
            ..Default::default()
        };
        let result = score_locally(&sample_resume(), &job);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_empty_resume_is_validation_error() {
        let result = score_locally(&ResumeSnapshot::default(), &sample_job());
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_ats_score_in_bounds() {
        let report = score_locally(&sample_resume(), &sample_job()).unwrap();
        assert!(report.ats_score <= 100);
    }

    #[test]
    fn test_ats_score_reproducible_from_sub_scores() {
        let report = score_locally(&sample_resume(), &sample_job()).unwrap();
        let recomputed = composite_ats_score(
            report.hard_skills.coverage_percent,
            report.soft_skills.coverage_percent,
            &report.section_scores,
        );
        assert_eq!(report.ats_score, recomputed);
    }

    #[test]
    fn test_composite_formula_exact() {
        let sections = SectionScores {
            summary: 40,
            skills: 60,
            experience: 80,
            education: 100,
        };
        // 0.35*50 + 0.15*0 + 0.5*70 = 17.5 + 35 = 52.5 → 53
        assert_eq!(composite_ats_score(50, 0, &sections), 53);
    }

    #[test]
    fn test_composite_all_full_is_100() {
        let sections = SectionScores {
            summary: 100,
            skills: 100,
            experience: 100,
            education: 100,
        };
        assert_eq!(composite_ats_score(100, 100, &sections), 100);
    }

    #[test]
    fn test_local_scoring_deterministic() {
        let first = score_locally(&sample_resume(), &sample_job()).unwrap();
        let second = score_locally(&sample_resume(), &sample_job()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_scenario_keyword_sets() {
        let report = score_locally(&sample_resume(), &sample_job()).unwrap();
        assert!(report.hard_skills.matched.contains("python"));
        assert!(report.hard_skills.matched.contains("aws"));
        assert!(report.soft_skills.missing.contains("leadership"));
        // SQL appears in the resume but not the job; it is not required.
        assert!(!report.hard_skills.matched.contains("sql"));
        assert!(!report.hard_skills.missing.contains("sql"));
    }

    #[test]
    fn test_requirements_extracted() {
        let report = score_locally(&sample_resume(), &sample_job()).unwrap();
        assert_eq!(report.experience_match.required_years, Some(3.0));
        assert_eq!(report.education_match.required, Some("bachelor".to_string()));
        assert_eq!(report.education_match.found, Some("bachelor".to_string()));
    }

    #[tokio::test]
    async fn test_failing_oracle_degrades_with_warning_after_retry() {
        let oracle = FailingOracle {
            calls: AtomicU32::new(0),
        };
        let (suggestions, warning) = fetch_suggestions(&oracle, "prompt").await;
        assert_eq!(suggestions, Suggestions::default());
        assert!(warning.is_some());
        // Initial attempt plus exactly one retry.
        assert_eq!(oracle.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_valid_oracle_response_is_parsed() {
        let oracle = StaticOracle(
            r#"{"improved_summary": "Better", "skills_to_add": ["aws"],
               "experience_improvements": [], "overall_tips": ["quantify impact"]}"#
                .to_string(),
        );
        let (suggestions, warning) = fetch_suggestions(&oracle, "prompt").await;
        assert_eq!(suggestions.improved_summary, "Better");
        assert_eq!(suggestions.skills_to_add, vec!["aws".to_string()]);
        assert!(warning.is_none());
    }

    #[tokio::test]
    async fn test_malformed_oracle_response_degrades() {
        let oracle = StaticOracle("here are some thoughts about your resume...".to_string());
        let (suggestions, warning) = fetch_suggestions(&oracle, "prompt").await;
        assert_eq!(suggestions, Suggestions::default());
        assert!(warning.is_some());
    }

    #[test]
    fn test_parse_suggestions_strips_fences() {
        let text = "```json\n{\"improved_summary\": \"Hi\", \"skills_to_add\": [],\
                    \"experience_improvements\": [], \"overall_tips\": []}\n```";
        let parsed = parse_suggestions(text).unwrap();
        assert_eq!(parsed.improved_summary, "Hi");
    }

    #[test]
    fn test_build_row_mirrors_report() {
        let request = AnalyzeRequest {
            user_id: Uuid::new_v4(),
            resume_id: Uuid::new_v4(),
            resume: sample_resume(),
            job: sample_job(),
        };
        let report = score_locally(&request.resume, &request.job).unwrap();
        let row = build_row(&request, &report, &Suggestions::default()).unwrap();

        assert_eq!(row.ats_score as u32, report.ats_score);
        assert_eq!(row.hard_skills_score as u32, report.hard_skills.coverage_percent);
        assert_eq!(row.soft_skills_score as u32, report.soft_skills.coverage_percent);
        assert!(row.matched_keywords.contains(&"python".to_string()));
        assert!(row.missing_keywords.contains(&"leadership".to_string()));

        // The stored jsonb sub-documents round-trip to the typed values.
        let sections: SectionScores =
            serde_json::from_value(row.section_scores.clone()).unwrap();
        assert_eq!(sections, report.section_scores);
        let hard: KeywordSet = serde_json::from_value(row.hard_skills.clone()).unwrap();
        assert_eq!(hard, report.hard_skills);
    }

    #[test]
    fn test_build_row_score_reproducible_from_stored_values() {
        let request = AnalyzeRequest {
            user_id: Uuid::new_v4(),
            resume_id: Uuid::new_v4(),
            resume: sample_resume(),
            job: sample_job(),
        };
        let report = score_locally(&request.resume, &request.job).unwrap();
        let row = build_row(&request, &report, &Suggestions::default()).unwrap();

        let sections: SectionScores = serde_json::from_value(row.section_scores.clone()).unwrap();
        let recomputed = composite_ats_score(
            row.hard_skills_score as u32,
            row.soft_skills_score as u32,
            &sections,
        );
        assert_eq!(row.ats_score as u32, recomputed);
    }
}
