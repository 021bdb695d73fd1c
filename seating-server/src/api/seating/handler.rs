//! Seating API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use shared::models::{GenerateSummary, SeatingGenerateRequest, SeatingPlanWithRoom};

use crate::core::ServerState;
use crate::utils::AppResult;

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// POST /api/seating/generate - allocate and replace the exam's plans
pub async fn generate(
    State(state): State<ServerState>,
    Json(request): Json<SeatingGenerateRequest>,
) -> AppResult<Json<GenerateSummary>> {
    let summary = state.seating.generate(&request).await?;
    Ok(Json(summary))
}

/// GET /api/seating/exam/{exam_id} - plans with room details
pub async fn list_for_exam(
    State(state): State<ServerState>,
    Path(exam_id): Path<String>,
) -> AppResult<Json<Vec<SeatingPlanWithRoom>>> {
    let plans = state.seating.plans_with_rooms(&exam_id).await?;
    Ok(Json(plans))
}

/// GET /api/seating/export/{exam_id} - xlsx download
pub async fn export(
    State(state): State<ServerState>,
    Path(exam_id): Path<String>,
) -> AppResult<Response> {
    let (file_name, bytes) = state.seating.export(&exam_id).await?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        file_name.replace(['"', '\\'], "_")
    );

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
