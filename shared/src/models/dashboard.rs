//! Dashboard Model

use serde::{Deserialize, Serialize};

use super::exam::Exam;

/// GET /api/dashboard/stats response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_students: i64,
    pub total_exams: i64,
    pub total_rooms: i64,
    pub total_departments: i64,
    /// Newest first
    pub recent_exams: Vec<Exam>,
}
