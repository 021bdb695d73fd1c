//! Seating Models
//!
//! Desk maps produced by a generation run and the request/summary types
//! exchanged with clients.

use serde::{Deserialize, Serialize};

use super::room::Room;

/// Desk layout policy
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum SeatingMode {
    /// Two students per desk, paired across subject groups
    TwoPerDesk,
    /// One student per desk, in roll-number order
    OnePerDesk,
}

impl SeatingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeatingMode::TwoPerDesk => "two_per_desk",
            SeatingMode::OnePerDesk => "one_per_desk",
        }
    }
}

/// One desk of a room with its occupants (roll numbers)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeskAssignment {
    /// 1-based, row-major
    pub desk_number: u32,
    pub left_student: Option<String>,
    /// Always `None` in one-per-desk mode
    pub right_student: Option<String>,
    /// 0-based
    pub row: u32,
    /// 0-based
    pub col: u32,
}

impl DeskAssignment {
    /// Number of occupied seats (0..=2)
    pub fn occupied(&self) -> usize {
        usize::from(self.left_student.is_some()) + usize::from(self.right_student.is_some())
    }
}

/// Persisted desk map of one room for one exam
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct SeatingPlan {
    pub id: String,
    pub exam_id: String,
    pub room_id: String,
    pub seating_mode: SeatingMode,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub desk_assignments: Vec<DeskAssignment>,
    /// Occupied seats across all desks
    pub total_students: i64,
    pub created_at: i64,
}

/// Plan joined with the room it belongs to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatingPlanWithRoom {
    #[serde(flatten)]
    pub plan: SeatingPlan,
    /// `None` when the room was deleted after generation
    pub room_details: Option<Room>,
}

/// POST /api/seating/generate body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatingGenerateRequest {
    pub exam_id: String,
    /// Processed in the given order
    pub room_ids: Vec<String>,
    pub seating_mode: SeatingMode,
}

/// Result of a generation run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerateSummary {
    pub message: String,
    pub plans_created: usize,
    pub total_students_assigned: usize,
    pub total_eligible_students: usize,
}

impl GenerateSummary {
    /// Eligible students left without a seat because capacity ran out
    pub fn unseated(&self) -> usize {
        self.total_eligible_students
            .saturating_sub(self.total_students_assigned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seating_mode_wire_format() {
        assert_eq!(
            serde_json::to_string(&SeatingMode::TwoPerDesk).unwrap(),
            "\"two_per_desk\""
        );
        let mode: SeatingMode = serde_json::from_str("\"one_per_desk\"").unwrap();
        assert_eq!(mode, SeatingMode::OnePerDesk);
        assert_eq!(mode.as_str(), "one_per_desk");
    }

    #[test]
    fn test_desk_occupied() {
        let desk = DeskAssignment {
            desk_number: 1,
            left_student: Some("1".into()),
            right_student: None,
            row: 0,
            col: 0,
        };
        assert_eq!(desk.occupied(), 1);
    }

    #[test]
    fn test_plan_with_room_flattens_plan_fields() {
        let with_room = SeatingPlanWithRoom {
            plan: SeatingPlan {
                id: "p".into(),
                exam_id: "e".into(),
                room_id: "r".into(),
                seating_mode: SeatingMode::OnePerDesk,
                desk_assignments: vec![],
                total_students: 0,
                created_at: 0,
            },
            room_details: None,
        };
        let value = serde_json::to_value(&with_room).unwrap();
        assert_eq!(value["exam_id"], "e");
        assert_eq!(value["seating_mode"], "one_per_desk");
        assert!(value["room_details"].is_null());
    }

    #[test]
    fn test_summary_unseated() {
        let summary = GenerateSummary {
            message: String::new(),
            plans_created: 1,
            total_students_assigned: 3,
            total_eligible_students: 5,
        };
        assert_eq!(summary.unseated(), 2);
    }
}
