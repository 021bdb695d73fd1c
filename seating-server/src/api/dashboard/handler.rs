//! Dashboard API Handlers

use axum::{Json, extract::State};
use shared::models::DashboardStats;

use crate::core::ServerState;
use crate::db::repository::dashboard;
use crate::utils::AppResult;

/// GET /api/dashboard/stats - entity counts and the five newest exams
pub async fn stats(State(state): State<ServerState>) -> AppResult<Json<DashboardStats>> {
    let stats = dashboard::stats(state.get_db()).await?;
    Ok(Json(stats))
}
