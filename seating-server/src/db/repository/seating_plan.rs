//! Seating Plan Repository
//!
//! Plans are written only as a whole set per exam. `position` keeps the
//! room order of the generation request.

use super::{RepoResult, json_list};
use shared::models::SeatingPlan;
use sqlx::SqlitePool;

pub async fn find_by_exam(pool: &SqlitePool, exam_id: &str) -> RepoResult<Vec<SeatingPlan>> {
    let plans = sqlx::query_as::<_, SeatingPlan>(
        "SELECT id, exam_id, room_id, seating_mode, desk_assignments, total_students, created_at
         FROM seating_plans WHERE exam_id = ? ORDER BY position",
    )
    .bind(exam_id)
    .fetch_all(pool)
    .await?;
    Ok(plans)
}

/// Atomically swap the exam's plan set for `plans`
///
/// On any error the transaction rolls back on drop and the previous set
/// stays in place.
pub async fn replace_for_exam(
    pool: &SqlitePool,
    exam_id: &str,
    plans: &[SeatingPlan],
) -> RepoResult<()> {
    let mut tx = pool.begin().await?;

    let removed = sqlx::query("DELETE FROM seating_plans WHERE exam_id = ?")
        .bind(exam_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    for (position, plan) in plans.iter().enumerate() {
        sqlx::query(
            "INSERT INTO seating_plans
                (id, exam_id, room_id, seating_mode, desk_assignments, total_students, position, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&plan.id)
        .bind(exam_id)
        .bind(&plan.room_id)
        .bind(plan.seating_mode)
        .bind(json_list(&plan.desk_assignments)?)
        .bind(plan.total_students)
        .bind(position as i64)
        .bind(plan.created_at)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    tracing::debug!(exam_id, removed, inserted = plans.len(), "Seating plans replaced");
    Ok(())
}
