//! Room Model

use serde::{Deserialize, Serialize};

/// Room entity (examination hall)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Room {
    pub id: String,
    pub name: String,
    /// Informational seat count, not used for allocation
    pub capacity: i64,
    pub desk_count: i64,
    pub rows: i64,
    pub columns: i64,
    pub created_at: i64,
}

impl Room {
    /// Number of desk positions the allocator may fill
    ///
    /// Never exceeds the grid, even when `desk_count` does.
    pub fn usable_desks(&self) -> usize {
        let grid = self.rows.max(0).saturating_mul(self.columns.max(0));
        self.desk_count.max(0).min(grid) as usize
    }
}

/// Create room payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomCreate {
    pub name: String,
    pub capacity: i64,
    pub desk_count: i64,
    pub rows: i64,
    pub columns: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(desk_count: i64, rows: i64, columns: i64) -> Room {
        Room {
            id: "r".into(),
            name: "Hall".into(),
            capacity: desk_count * 2,
            desk_count,
            rows,
            columns,
            created_at: 0,
        }
    }

    #[test]
    fn test_usable_desks_capped_by_grid() {
        assert_eq!(room(3, 2, 2).usable_desks(), 3);
        assert_eq!(room(10, 2, 2).usable_desks(), 4);
        assert_eq!(room(0, 5, 5).usable_desks(), 0);
        assert_eq!(room(4, -1, 5).usable_desks(), 0);
    }
}
