// Prompt constants for the suggestion oracle call.

/// System prompt — enforces JSON-only output so the response can be parsed
/// into the four suggestion fields.
pub const SUGGESTION_SYSTEM: &str =
    "You are an expert resume coach helping a candidate tailor their resume \
    to a specific job posting. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Suggestion prompt template. Replace `{job_title}`, `{company}`,
/// `{job_description}`, `{summary}`, `{skills}`, `{missing_keywords}`
/// before sending.
pub const SUGGESTION_PROMPT_TEMPLATE: &str = r#"A candidate is applying for the role below. Suggest concrete improvements to their resume.

ROLE: {job_title} at {company}

JOB DESCRIPTION:
{job_description}

CANDIDATE'S CURRENT SUMMARY:
{summary}

CANDIDATE'S SKILLS:
{skills}

KEYWORDS THE JOB REQUIRES THAT THE RESUME IS MISSING:
{missing_keywords}

Return a JSON object with this EXACT schema (no extra fields):
{
  "improved_summary": "A rewritten professional summary tailored to this role",
  "skills_to_add": ["skill the candidate should add if they have it"],
  "experience_improvements": ["concrete rewrite hint for an experience bullet"],
  "overall_tips": ["short actionable tip"]
}

Rules:
1. Ground every suggestion in the job description — do not invent requirements.
2. Only suggest adding skills that appear in the job description.
3. Keep improved_summary under 80 words.
4. Give at most 5 items per list."#;

/// Fills the suggestion template. Kept separate from the constants so the
/// substitution is testable without an oracle.
pub fn build_suggestion_prompt(
    job_title: &str,
    company: &str,
    job_description: &str,
    summary: &str,
    skills: &[String],
    missing_keywords: &[String],
) -> String {
    SUGGESTION_PROMPT_TEMPLATE
        .replace("{job_title}", job_title)
        .replace("{company}", company)
        .replace("{job_description}", job_description)
        .replace("{summary}", if summary.trim().is_empty() { "(none)" } else { summary })
        .replace(
            "{skills}",
            &if skills.is_empty() {
                "(none)".to_string()
            } else {
                skills.join(", ")
            },
        )
        .replace(
            "{missing_keywords}",
            &if missing_keywords.is_empty() {
                "(none)".to_string()
            } else {
                missing_keywords.join(", ")
            },
        )
}
