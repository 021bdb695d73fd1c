//! Student API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{BulkImportResult, Student, StudentCreate, StudentUpdate};

use crate::core::ServerState;
use crate::db::repository::{RepoError, student};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_code_list, validate_email, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

fn validate_create(payload: &StudentCreate) -> AppResult<()> {
    validate_required_text(&payload.roll_number, "roll_number", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.department, "department", MAX_SHORT_TEXT_LEN)?;
    validate_code_list(&payload.subjects, "subjects", true)?;
    if let Some(email) = &payload.email {
        validate_email(email)?;
    }
    Ok(())
}

fn validate_update(payload: &StudentUpdate) -> AppResult<()> {
    if let Some(roll_number) = &payload.roll_number {
        validate_required_text(roll_number, "roll_number", MAX_SHORT_TEXT_LEN)?;
    }
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(department) = &payload.department {
        validate_required_text(department, "department", MAX_SHORT_TEXT_LEN)?;
    }
    if let Some(subjects) = &payload.subjects {
        validate_code_list(subjects, "subjects", true)?;
    }
    if let Some(Some(email)) = &payload.email {
        validate_email(email)?;
    }
    Ok(())
}

fn roll_number_taken(roll_number: &str) -> AppError {
    AppError::new(ErrorCode::RollNumberExists).with_detail("roll_number", roll_number)
}

/// GET /api/students - all students by roll number
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Student>>> {
    let students = student::find_all(state.get_db()).await?;
    Ok(Json(students))
}

/// GET /api/students/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Student>> {
    let found = student::find_by_id(state.get_db(), &id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::StudentNotFound).with_detail("id", id))?;
    Ok(Json(found))
}

/// POST /api/students - create one student
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<StudentCreate>,
) -> AppResult<Json<Student>> {
    validate_create(&payload)?;

    let roll_number = payload.roll_number.clone();
    match student::create(state.get_db(), payload).await {
        Ok(created) => {
            tracing::info!(student_id = %created.id, roll_number = %created.roll_number, "Student created");
            Ok(Json(created))
        }
        Err(RepoError::Duplicate(_)) => Err(roll_number_taken(&roll_number)),
        Err(e) => Err(e.into()),
    }
}

/// POST /api/students/bulk - create many, skipping existing roll numbers
pub async fn create_bulk(
    State(state): State<ServerState>,
    Json(payload): Json<Vec<StudentCreate>>,
) -> AppResult<Json<BulkImportResult>> {
    let db = state.get_db();
    let mut result = BulkImportResult::default();

    for item in payload {
        let roll_number = item.roll_number.clone();

        if let Err(e) = validate_create(&item) {
            result.skipped += 1;
            result
                .errors
                .push(format!("Error creating student {roll_number}: {}", e.message));
            continue;
        }

        match student::create(db, item).await {
            Ok(_) => result.created += 1,
            Err(RepoError::Duplicate(_)) => {
                result.skipped += 1;
                result
                    .errors
                    .push(format!("Roll number {roll_number} already exists"));
            }
            Err(e) => {
                result.skipped += 1;
                result
                    .errors
                    .push(format!("Error creating student {roll_number}: {e}"));
            }
        }
    }

    tracing::info!(
        created = result.created,
        skipped = result.skipped,
        "Bulk student import finished"
    );
    Ok(Json(result))
}

/// PUT /api/students/{id} - partial update
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<StudentUpdate>,
) -> AppResult<Json<Student>> {
    validate_update(&payload)?;

    let roll_number = payload.roll_number.clone().unwrap_or_default();
    match student::update(state.get_db(), &id, payload).await {
        Ok(updated) => Ok(Json(updated)),
        Err(RepoError::NotFound(_)) => {
            Err(AppError::new(ErrorCode::StudentNotFound).with_detail("id", id))
        }
        Err(RepoError::Duplicate(_)) => Err(roll_number_taken(&roll_number)),
        Err(e) => Err(e.into()),
    }
}

/// DELETE /api/students/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    if !student::delete(state.get_db(), &id).await? {
        return Err(AppError::new(ErrorCode::StudentNotFound).with_detail("id", id));
    }
    tracing::info!(student_id = %id, "Student deleted");
    Ok(Json(true))
}
