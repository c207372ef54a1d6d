//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::aggregator::{run_analysis, AnalyzeRequest};
use crate::analysis::store;
use crate::errors::AppError;
use crate::models::analysis::JobAnalysisRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub analysis: JobAnalysisRow,
    /// Set when suggestions were degraded (oracle failure). Non-blocking.
    pub warning: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalysisListResponse {
    pub analyses: Vec<JobAnalysisRow>,
}

/// POST /api/v1/analyses
///
/// Runs a full point-in-time analysis and persists it. Repeat calls with
/// the same inputs create new records; de-duplication is the caller's job.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let outcome = run_analysis(&state.db, state.oracle.as_ref(), request).await?;
    Ok(Json(AnalyzeResponse {
        analysis: outcome.analysis,
        warning: outcome.warning,
    }))
}

/// GET /api/v1/analyses?user_id=<uuid>
pub async fn handle_list_analyses(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<AnalysisListResponse>, AppError> {
    let analyses = store::list_analyses(&state.db, params.user_id).await?;
    Ok(Json(AnalysisListResponse { analyses }))
}

/// GET /api/v1/analyses/:id
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<JobAnalysisRow>, AppError> {
    let analysis = store::get_analysis(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Analysis {id} not found")))?;
    Ok(Json(analysis))
}
