//! Room API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Room, RoomCreate};

use crate::core::ServerState;
use crate::db::repository::room;
use crate::utils::validation::validate_room;
use crate::utils::{AppError, AppResult, ErrorCode};

/// GET /api/rooms - all rooms by name
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Room>>> {
    let rooms = room::find_all(state.get_db()).await?;
    Ok(Json(rooms))
}

/// GET /api/rooms/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Room>> {
    let found = room::find_by_id(state.get_db(), &id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RoomNotFound).with_detail("id", id))?;
    Ok(Json(found))
}

/// POST /api/rooms - create; desk count and grid must be positive
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<RoomCreate>,
) -> AppResult<Json<Room>> {
    let candidate = Room {
        id: String::new(),
        name: payload.name.clone(),
        capacity: payload.capacity,
        desk_count: payload.desk_count,
        rows: payload.rows,
        columns: payload.columns,
        created_at: 0,
    };
    validate_room(&candidate)?;

    let grid = candidate.rows.saturating_mul(candidate.columns);
    if candidate.desk_count > grid {
        tracing::warn!(
            name = %candidate.name,
            desk_count = candidate.desk_count,
            grid,
            "Room desk count exceeds its grid; only the grid will be used"
        );
    }

    let created = room::create(state.get_db(), payload).await?;
    Ok(Json(created))
}

/// DELETE /api/rooms/{id} - existing plans keep their room id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    if !room::delete(state.get_db(), &id).await? {
        return Err(AppError::new(ErrorCode::RoomNotFound).with_detail("id", id));
    }
    Ok(Json(true))
}
