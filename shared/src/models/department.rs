//! Department Model

use serde::{Deserialize, Serialize};

/// Department entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Department {
    pub id: String,
    pub name: String,
    /// Unique short code referenced by students and exams
    pub code: String,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub subjects: Vec<String>,
    pub created_at: i64,
}

/// Create department payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentCreate {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub subjects: Vec<String>,
}
