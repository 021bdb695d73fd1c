//! Department API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Department, DepartmentCreate};

use crate::core::ServerState;
use crate::db::repository::{RepoError, department};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_code_list, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

/// GET /api/departments - all departments by code
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Department>>> {
    let departments = department::find_all(state.get_db()).await?;
    Ok(Json(departments))
}

/// POST /api/departments - create; codes are unique
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<DepartmentCreate>,
) -> AppResult<Json<Department>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.code, "code", MAX_SHORT_TEXT_LEN)?;
    validate_code_list(&payload.subjects, "subjects", false)?;

    let code = payload.code.clone();
    match department::create(state.get_db(), payload).await {
        Ok(created) => Ok(Json(created)),
        Err(RepoError::Duplicate(_)) => {
            Err(AppError::new(ErrorCode::DepartmentCodeExists).with_detail("code", code))
        }
        Err(e) => Err(e.into()),
    }
}

/// DELETE /api/departments/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    if !department::delete(state.get_db(), &id).await? {
        return Err(AppError::new(ErrorCode::DepartmentNotFound).with_detail("id", id));
    }
    Ok(Json(true))
}
