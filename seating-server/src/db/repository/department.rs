//! Department Repository

use super::{RepoResult, json_list};
use shared::models::{Department, DepartmentCreate};
use shared::util::{new_id, now_millis};
use sqlx::SqlitePool;

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Department>> {
    let departments = sqlx::query_as::<_, Department>(
        "SELECT id, name, code, subjects, created_at FROM departments ORDER BY code",
    )
    .fetch_all(pool)
    .await?;
    Ok(departments)
}

pub async fn find_by_code(pool: &SqlitePool, code: &str) -> RepoResult<Option<Department>> {
    let department = sqlx::query_as::<_, Department>(
        "SELECT id, name, code, subjects, created_at FROM departments WHERE code = ? LIMIT 1",
    )
    .bind(code)
    .fetch_optional(pool)
    .await?;
    Ok(department)
}

pub async fn create(pool: &SqlitePool, data: DepartmentCreate) -> RepoResult<Department> {
    let department = Department {
        id: new_id(),
        name: data.name,
        code: data.code,
        subjects: data.subjects,
        created_at: now_millis(),
    };

    sqlx::query(
        "INSERT INTO departments (id, name, code, subjects, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&department.id)
    .bind(&department.name)
    .bind(&department.code)
    .bind(json_list(&department.subjects)?)
    .bind(department.created_at)
    .execute(pool)
    .await?;

    Ok(department)
}

pub async fn delete(pool: &SqlitePool, id: &str) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM departments WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
