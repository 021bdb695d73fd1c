//! Exam Model

use serde::{Deserialize, Serialize};

/// Exam type
///
/// CAT exams are normally seated two per desk, semester exams one per desk.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum ExamType {
    #[serde(rename = "CAT")]
    #[cfg_attr(feature = "db", sqlx(rename = "CAT"))]
    Cat,
    Semester,
}

/// Exam entity
///
/// `departments` and `subjects` define which students are eligible.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Exam {
    pub id: String,
    pub exam_name: String,
    pub exam_type: ExamType,
    pub date: String,
    pub time: String,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub departments: Vec<String>,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub subjects: Vec<String>,
    pub created_at: i64,
    pub created_by: String,
}

/// Create exam payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamCreate {
    pub exam_name: String,
    pub exam_type: ExamType,
    pub date: String,
    pub time: String,
    pub departments: Vec<String>,
    pub subjects: Vec<String>,
}
