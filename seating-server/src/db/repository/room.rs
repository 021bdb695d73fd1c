//! Room Repository

use super::{RepoResult, json_list};
use shared::models::{Room, RoomCreate};
use shared::util::{new_id, now_millis};
use sqlx::SqlitePool;

const COLUMNS: &str = r#"id, name, capacity, desk_count, "rows", "columns", created_at"#;

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Room>> {
    let rooms = sqlx::query_as::<_, Room>(&format!("SELECT {COLUMNS} FROM rooms ORDER BY name"))
        .fetch_all(pool)
        .await?;
    Ok(rooms)
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<Room>> {
    let room = sqlx::query_as::<_, Room>(&format!("SELECT {COLUMNS} FROM rooms WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(room)
}

/// Rooms whose id is in `ids`, in no particular order
pub async fn find_by_ids(pool: &SqlitePool, ids: &[String]) -> RepoResult<Vec<Room>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let rooms = sqlx::query_as::<_, Room>(&format!(
        "SELECT {COLUMNS} FROM rooms WHERE id IN (SELECT value FROM json_each(?))"
    ))
    .bind(json_list(ids)?)
    .fetch_all(pool)
    .await?;
    Ok(rooms)
}

pub async fn create(pool: &SqlitePool, data: RoomCreate) -> RepoResult<Room> {
    let room = Room {
        id: new_id(),
        name: data.name,
        capacity: data.capacity,
        desk_count: data.desk_count,
        rows: data.rows,
        columns: data.columns,
        created_at: now_millis(),
    };

    sqlx::query(
        r#"INSERT INTO rooms (id, name, capacity, desk_count, "rows", "columns", created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)"#,
    )
    .bind(&room.id)
    .bind(&room.name)
    .bind(room.capacity)
    .bind(room.desk_count)
    .bind(room.rows)
    .bind(room.columns)
    .bind(room.created_at)
    .execute(pool)
    .await?;

    Ok(room)
}

pub async fn delete(pool: &SqlitePool, id: &str) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM rooms WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
