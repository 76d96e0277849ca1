//! Nutrition target API routes

use crate::error::ApiResult;
use crate::services::TargetsService;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    routing::post,
    Json, Router,
};
use chrono::Utc;
use nutrition_planner_shared::types::{
    BackfillRequest, BackfillResponse, TargetsQuery, TargetsResponse,
};
use nutrition_planner_shared::ProfileInput;

/// Create nutrition target routes
pub fn targets_routes() -> Router<AppState> {
    Router::new()
        .route("/targets", post(compute_targets))
        .route("/targets/backfill", post(backfill_targets))
}

/// POST /api/v1/nutrition/targets - Compute daily targets for a profile
///
/// Absent fields fall back to defaults; `?detailed=true` adds the breakdown.
async fn compute_targets(
    Query(query): Query<TargetsQuery>,
    Json(input): Json<ProfileInput>,
) -> ApiResult<Json<TargetsResponse>> {
    let today = Utc::now().date_naive();
    let report = TargetsService::compute(&input, today)?;
    Ok(Json(TargetsResponse::from_report(report, query.detailed)))
}

/// POST /api/v1/nutrition/targets/backfill - Recompute targets for stored profiles
async fn backfill_targets(
    State(state): State<AppState>,
    Json(req): Json<BackfillRequest>,
) -> ApiResult<Json<BackfillResponse>> {
    let today = Utc::now().date_naive();
    let response = TargetsService::backfill(req, state.config().batch.max_items, today)?;
    Ok(Json(response))
}
