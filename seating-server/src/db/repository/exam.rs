//! Exam Repository

use super::{RepoResult, json_list};
use shared::models::{Exam, ExamCreate};
use shared::util::{new_id, now_millis};
use sqlx::SqlitePool;

const COLUMNS: &str =
    "id, exam_name, exam_type, date, time, departments, subjects, created_at, created_by";

/// Newest first
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Exam>> {
    find_recent(pool, i64::MAX).await
}

pub async fn find_recent(pool: &SqlitePool, limit: i64) -> RepoResult<Vec<Exam>> {
    let exams = sqlx::query_as::<_, Exam>(&format!(
        "SELECT {COLUMNS} FROM exams ORDER BY created_at DESC, id LIMIT ?"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(exams)
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<Exam>> {
    let exam = sqlx::query_as::<_, Exam>(&format!("SELECT {COLUMNS} FROM exams WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(exam)
}

pub async fn create(pool: &SqlitePool, data: ExamCreate, created_by: &str) -> RepoResult<Exam> {
    let exam = Exam {
        id: new_id(),
        exam_name: data.exam_name,
        exam_type: data.exam_type,
        date: data.date,
        time: data.time,
        departments: data.departments,
        subjects: data.subjects,
        created_at: now_millis(),
        created_by: created_by.to_string(),
    };

    sqlx::query(
        "INSERT INTO exams (id, exam_name, exam_type, date, time, departments, subjects, created_at, created_by)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&exam.id)
    .bind(&exam.exam_name)
    .bind(exam.exam_type)
    .bind(&exam.date)
    .bind(&exam.time)
    .bind(json_list(&exam.departments)?)
    .bind(json_list(&exam.subjects)?)
    .bind(exam.created_at)
    .bind(&exam.created_by)
    .execute(pool)
    .await?;

    Ok(exam)
}

/// Delete an exam together with its seating plans, in one transaction
pub async fn delete(pool: &SqlitePool, id: &str) -> RepoResult<bool> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM seating_plans WHERE exam_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    let rows = sqlx::query("DELETE FROM exams WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(rows.rows_affected() > 0)
}
