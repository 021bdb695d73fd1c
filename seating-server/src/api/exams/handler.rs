//! Exam API Handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use shared::models::{Exam, ExamCreate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::exam;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_code_list, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

/// GET /api/exams - newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Exam>>> {
    let exams = exam::find_all(state.get_db()).await?;
    Ok(Json(exams))
}

/// GET /api/exams/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Exam>> {
    let found = exam::find_by_id(state.get_db(), &id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ExamNotFound).with_detail("exam_id", id))?;
    Ok(Json(found))
}

/// POST /api/exams - create; the caller is recorded as creator
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<ExamCreate>,
) -> AppResult<Json<Exam>> {
    validate_required_text(&payload.exam_name, "exam_name", MAX_NAME_LEN)?;
    validate_required_text(&payload.date, "date", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.time, "time", MAX_SHORT_TEXT_LEN)?;
    validate_code_list(&payload.departments, "departments", true)?;
    validate_code_list(&payload.subjects, "subjects", true)?;

    let created = exam::create(state.get_db(), payload, &current_user.id).await?;
    tracing::info!(
        exam_id = %created.id,
        exam_name = %created.exam_name,
        created_by = %current_user.username,
        "Exam created"
    );
    Ok(Json(created))
}

/// DELETE /api/exams/{id} - removes the exam and its seating plans
///
/// Waits for any generation run on the same exam to finish first.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let _guard = state.seating.lock_exam(&id).await;

    if !exam::delete(state.get_db(), &id).await? {
        return Err(AppError::new(ErrorCode::ExamNotFound).with_detail("exam_id", id));
    }
    tracing::info!(exam_id = %id, "Exam deleted with its seating plans");
    Ok(Json(true))
}
