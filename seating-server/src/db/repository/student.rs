//! Student Repository

use super::{RepoError, RepoResult, json_list};
use shared::models::{Student, StudentCreate, StudentUpdate};
use shared::util::{new_id, now_millis};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, roll_number, name, department, subjects, email, created_at";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Student>> {
    let students = sqlx::query_as::<_, Student>(&format!(
        "SELECT {COLUMNS} FROM students ORDER BY roll_number"
    ))
    .fetch_all(pool)
    .await?;
    Ok(students)
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<Student>> {
    let student =
        sqlx::query_as::<_, Student>(&format!("SELECT {COLUMNS} FROM students WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(student)
}

pub async fn find_by_roll_number(pool: &SqlitePool, roll_number: &str) -> RepoResult<Option<Student>> {
    let student = sqlx::query_as::<_, Student>(&format!(
        "SELECT {COLUMNS} FROM students WHERE roll_number = ? LIMIT 1"
    ))
    .bind(roll_number)
    .fetch_optional(pool)
    .await?;
    Ok(student)
}

/// Students in any of `departments` taking any of `subjects`, by roll number
///
/// Both lists are bound as JSON arrays and expanded with `json_each`.
pub async fn find_matching(
    pool: &SqlitePool,
    departments: &[String],
    subjects: &[String],
) -> RepoResult<Vec<Student>> {
    if departments.is_empty() || subjects.is_empty() {
        return Ok(Vec::new());
    }
    let students = sqlx::query_as::<_, Student>(&format!(
        "SELECT {COLUMNS} FROM students s
         WHERE s.department IN (SELECT value FROM json_each(?1))
           AND EXISTS (
               SELECT 1 FROM json_each(s.subjects) taken
               WHERE taken.value IN (SELECT value FROM json_each(?2))
           )
         ORDER BY s.roll_number"
    ))
    .bind(json_list(departments)?)
    .bind(json_list(subjects)?)
    .fetch_all(pool)
    .await?;
    Ok(students)
}

pub async fn create(pool: &SqlitePool, data: StudentCreate) -> RepoResult<Student> {
    let student = Student {
        id: new_id(),
        roll_number: data.roll_number,
        name: data.name,
        department: data.department,
        subjects: data.subjects,
        email: data.email,
        created_at: now_millis(),
    };

    sqlx::query(
        "INSERT INTO students (id, roll_number, name, department, subjects, email, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&student.id)
    .bind(&student.roll_number)
    .bind(&student.name)
    .bind(&student.department)
    .bind(json_list(&student.subjects)?)
    .bind(&student.email)
    .bind(student.created_at)
    .execute(pool)
    .await?;

    Ok(student)
}

pub async fn update(pool: &SqlitePool, id: &str, data: StudentUpdate) -> RepoResult<Student> {
    let subjects = data.subjects.as_deref().map(json_list).transpose()?;
    let rows = sqlx::query(
        "UPDATE students SET
            roll_number = COALESCE(?1, roll_number),
            name = COALESCE(?2, name),
            department = COALESCE(?3, department),
            subjects = COALESCE(?4, subjects),
            email = CASE WHEN ?5 THEN ?6 ELSE email END
         WHERE id = ?7",
    )
    .bind(data.roll_number)
    .bind(data.name)
    .bind(data.department)
    .bind(subjects)
    .bind(data.email.is_some())
    .bind(data.email.flatten())
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Student {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Student {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: &str) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM students WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
