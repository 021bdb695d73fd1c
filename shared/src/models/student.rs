//! Student Model

use serde::{Deserialize, Serialize};

/// Student entity (exam candidate)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Student {
    pub id: String,
    /// Unique, compared byte-wise when ordering candidates
    pub roll_number: String,
    pub name: String,
    /// Department code
    pub department: String,
    /// Order matters: the first subject shared with an exam decides pairing group
    #[cfg_attr(feature = "db", sqlx(json))]
    pub subjects: Vec<String>,
    pub email: Option<String>,
    pub created_at: i64,
}

/// Create student payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentCreate {
    pub roll_number: String,
    pub name: String,
    pub department: String,
    pub subjects: Vec<String>,
    pub email: Option<String>,
}

/// Update student payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentUpdate {
    pub roll_number: Option<String>,
    pub name: Option<String>,
    pub department: Option<String>,
    pub subjects: Option<Vec<String>>,
    /// Absent keeps the stored email, `null` clears it
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<Option<String>>,
}

/// Distinguishes an explicit `null` (`Some(None)`) from a missing field (`None`)
fn nullable<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Bulk import result
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BulkImportResult {
    pub created: usize,
    /// Roll numbers that already existed
    pub skipped: usize,
    pub errors: Vec<String>,
}
