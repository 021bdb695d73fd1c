//! Spreadsheet export of persisted plans
//!
//! [`SeatingSheet`] is the tabular shape of one plan; [`render_workbook`]
//! only writes it out with `rust_xlsxwriter`.

use std::collections::HashSet;

use rust_xlsxwriter::{Format, Workbook, XlsxError};
use shared::models::{Room, SeatingPlan};

use super::SeatingError;

pub const HEADERS: [&str; 5] = ["Desk Number", "Row", "Column", "Left Student", "Right Student"];

/// Placeholder for an unoccupied seat
pub const EMPTY_SEAT: &str = "Empty";

/// Excel's limit on worksheet names
const MAX_SHEET_NAME: usize = 31;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    pub desk_number: u32,
    /// 1-based
    pub row: u32,
    /// 1-based
    pub column: u32,
    pub left_student: String,
    pub right_student: String,
}

/// One worksheet, before sheet-name sanitising
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatingSheet {
    pub title: String,
    pub rows: Vec<SheetRow>,
}

impl SeatingSheet {
    /// `room` is `None` when the room was deleted after generation
    pub fn from_plan(plan: &SeatingPlan, room: Option<&Room>) -> Self {
        let title = match room {
            Some(room) => room.name.clone(),
            None => format!("Room {}", plan.room_id),
        };

        let rows = plan
            .desk_assignments
            .iter()
            .map(|desk| SheetRow {
                desk_number: desk.desk_number,
                row: desk.row + 1,
                column: desk.col + 1,
                left_student: seat(&desk.left_student),
                right_student: seat(&desk.right_student),
            })
            .collect();

        Self { title, rows }
    }
}

fn seat(occupant: &Option<String>) -> String {
    occupant.clone().unwrap_or_else(|| EMPTY_SEAT.to_string())
}

/// `seating_plan_<exam_name>.xlsx`
pub fn file_name(exam_name: &str) -> String {
    format!("seating_plan_{exam_name}.xlsx")
}

/// Make a title acceptable as a worksheet name
///
/// Forbidden characters become `_`, leading and trailing apostrophes are
/// dropped and the result is cut to 31 characters.
pub fn sheet_name(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            c => c,
        })
        .collect();
    let cleaned = cleaned.trim().trim_matches('\'');
    let cleaned: String = cleaned.chars().take(MAX_SHEET_NAME).collect();

    if cleaned.trim().is_empty() {
        "Room".to_string()
    } else {
        cleaned
    }
}

/// Sheet names for `titles`, unique ignoring case
pub fn unique_sheet_names<'a>(titles: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut taken = HashSet::new();
    let mut names = Vec::new();

    for title in titles {
        let base = sheet_name(title);
        let mut name = base.clone();
        let mut n = 2;
        while !taken.insert(name.to_lowercase()) {
            let suffix = format!(" ({n})");
            let keep = MAX_SHEET_NAME - suffix.chars().count();
            name = format!("{}{suffix}", base.chars().take(keep).collect::<String>());
            n += 1;
        }
        names.push(name);
    }

    names
}

/// Render sheets into an xlsx workbook
pub fn render_workbook(sheets: &[SeatingSheet]) -> Result<Vec<u8>, SeatingError> {
    write_workbook(sheets).map_err(|e| SeatingError::Export(e.to_string()))
}

fn write_workbook(sheets: &[SeatingSheet]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let names = unique_sheet_names(sheets.iter().map(|s| s.title.as_str()));

    for (sheet, name) in sheets.iter().zip(names) {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(name)?;

        for (col, title) in HEADERS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *title, &header)?;
            worksheet.set_column_width(col as u16, 16)?;
        }

        for (index, row) in sheet.rows.iter().enumerate() {
            let line = index as u32 + 1;
            worksheet.write_number(line, 0, row.desk_number)?;
            worksheet.write_number(line, 1, row.row)?;
            worksheet.write_number(line, 2, row.column)?;
            worksheet.write_string(line, 3, &row.left_student)?;
            worksheet.write_string(line, 4, &row.right_student)?;
        }
    }

    workbook.save_to_buffer()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{DeskAssignment, SeatingMode};

    fn plan(desks: Vec<DeskAssignment>) -> SeatingPlan {
        SeatingPlan {
            id: "p1".into(),
            exam_id: "e1".into(),
            room_id: "r1".into(),
            seating_mode: SeatingMode::TwoPerDesk,
            total_students: desks.iter().map(|d| d.occupied() as i64).sum(),
            desk_assignments: desks,
            created_at: 0,
        }
    }

    fn desk(number: u32, left: &str, right: Option<&str>, row: u32, col: u32) -> DeskAssignment {
        DeskAssignment {
            desk_number: number,
            left_student: Some(left.into()),
            right_student: right.map(Into::into),
            row,
            col,
        }
    }

    fn hall(name: &str) -> Room {
        Room {
            id: "r1".into(),
            name: name.into(),
            capacity: 8,
            desk_count: 4,
            rows: 2,
            columns: 2,
            created_at: 0,
        }
    }

    #[test]
    fn test_sheet_rows_are_one_based_with_empty_seats() {
        let plan = plan(vec![desk(1, "1", Some("4"), 0, 0), desk(3, "3", None, 1, 0)]);
        let sheet = SeatingSheet::from_plan(&plan, Some(&hall("Hall A")));

        assert_eq!(sheet.title, "Hall A");
        assert_eq!(
            sheet.rows,
            vec![
                SheetRow {
                    desk_number: 1,
                    row: 1,
                    column: 1,
                    left_student: "1".into(),
                    right_student: "4".into(),
                },
                SheetRow {
                    desk_number: 3,
                    row: 2,
                    column: 1,
                    left_student: "3".into(),
                    right_student: EMPTY_SEAT.into(),
                },
            ]
        );
    }

    #[test]
    fn test_deleted_room_falls_back_to_id() {
        let sheet = SeatingSheet::from_plan(&plan(vec![]), None);
        assert_eq!(sheet.title, "Room r1");
    }

    #[test]
    fn test_sheet_name_sanitised_and_truncated() {
        assert_eq!(sheet_name("Lab [2]: CS/IT"), "Lab _2__ CS_IT");
        assert_eq!(sheet_name("'quoted'"), "quoted");
        assert_eq!(sheet_name("   "), "Room");
        let long = "Main Examination Hall Block North Wing";
        assert_eq!(sheet_name(long).chars().count(), 31);
    }

    #[test]
    fn test_sheet_names_deduplicated_case_insensitively() {
        let names = unique_sheet_names(["Hall", "hall", "Hall", "Lab"]);
        assert_eq!(names, vec!["Hall", "hall (2)", "Hall (3)", "Lab"]);

        let long = "A".repeat(40);
        let names = unique_sheet_names([long.as_str(), long.as_str()]);
        assert_eq!(names[1].chars().count(), 31);
        assert!(names[1].ends_with(" (2)"));
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name("CAT 1"), "seating_plan_CAT 1.xlsx");
    }

    #[test]
    fn test_render_workbook_produces_zip() {
        let plan = plan(vec![desk(1, "1", Some("4"), 0, 0)]);
        let sheets = vec![
            SeatingSheet::from_plan(&plan, Some(&hall("Hall"))),
            SeatingSheet::from_plan(&plan, Some(&hall("HALL"))),
        ];
        let bytes = render_workbook(&sheets).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }
}
