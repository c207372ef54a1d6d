//! Persistence for `job_analyses` rows: create, read, list. Rows are
//! immutable — there is no update path by design.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::analysis::JobAnalysisRow;

pub async fn insert_analysis(pool: &PgPool, row: &JobAnalysisRow) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO job_analyses
            (id, user_id, resume_id, job_title, company, job_description,
             ats_score, hard_skills_score, soft_skills_score,
             matched_keywords, missing_keywords,
             hard_skills, soft_skills, section_scores,
             experience_match, education_match, suggestions, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
        "#,
    )
    .bind(row.id)
    .bind(row.user_id)
    .bind(row.resume_id)
    .bind(&row.job_title)
    .bind(&row.company)
    .bind(&row.job_description)
    .bind(row.ats_score)
    .bind(row.hard_skills_score)
    .bind(row.soft_skills_score)
    .bind(&row.matched_keywords)
    .bind(&row.missing_keywords)
    .bind(&row.hard_skills)
    .bind(&row.soft_skills)
    .bind(&row.section_scores)
    .bind(&row.experience_match)
    .bind(&row.education_match)
    .bind(&row.suggestions)
    .bind(row.created_at)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn get_analysis(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<JobAnalysisRow>, sqlx::Error> {
    sqlx::query_as::<_, JobAnalysisRow>("SELECT * FROM job_analyses WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_analyses(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<JobAnalysisRow>, sqlx::Error> {
    sqlx::query_as::<_, JobAnalysisRow>(
        "SELECT * FROM job_analyses WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}
