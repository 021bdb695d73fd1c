//! Dashboard Repository

use super::{RepoResult, exam};
use shared::models::DashboardStats;
use sqlx::SqlitePool;

const RECENT_EXAMS: i64 = 5;

pub async fn stats(pool: &SqlitePool) -> RepoResult<DashboardStats> {
    let (total_students, total_exams, total_rooms, total_departments): (i64, i64, i64, i64) =
        sqlx::query_as(
            "SELECT
                (SELECT COUNT(*) FROM students),
                (SELECT COUNT(*) FROM exams),
                (SELECT COUNT(*) FROM rooms),
                (SELECT COUNT(*) FROM departments)",
        )
        .fetch_one(pool)
        .await?;

    Ok(DashboardStats {
        total_students,
        total_exams,
        total_rooms,
        total_departments,
        recent_exams: exam::find_recent(pool, RECENT_EXAMS).await?,
    })
}
