//! Input validation helpers
//!
//! Text length limits and the checks shared by CRUD handlers and the
//! seating service. SQLite TEXT has no built-in length enforcement.

use shared::models::Room;

use crate::utils::{AppError, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: student, room, department, exam
pub const MAX_NAME_LEN: usize = 200;

/// Short identifiers: roll number, department code, subject code, date, time
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

pub const MIN_PASSWORD_LEN: usize = 6;

// ── Text helpers ────────────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty"))
            .with_detail("field", field));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate a list of short codes (subjects, department codes)
pub fn validate_code_list(values: &[String], field: &str, required: bool) -> Result<(), AppError> {
    if required && values.is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty"))
            .with_detail("field", field));
    }
    for value in values {
        validate_required_text(value, field, MAX_SHORT_TEXT_LEN)?;
    }
    Ok(())
}

/// Minimal shape check: one `@` with text on both sides
pub fn validate_email(value: &str) -> Result<(), AppError> {
    validate_required_text(value, "email", MAX_EMAIL_LEN)?;
    match value.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(())
        }
        _ => Err(AppError::validation("email is not a valid address").with_detail("field", "email")),
    }
}

// ── Room geometry ───────────────────────────────────────────────────

/// Desk count and grid dimensions must be positive
pub fn validate_room_geometry(
    desk_count: i64,
    rows: i64,
    columns: i64,
) -> Result<(), (&'static str, i64)> {
    for (field, value) in [("desk_count", desk_count), ("rows", rows), ("columns", columns)] {
        if value <= 0 {
            return Err((field, value));
        }
    }
    Ok(())
}

/// Room payload check used by the rooms API
pub fn validate_room(room: &Room) -> Result<(), AppError> {
    validate_required_text(&room.name, "name", MAX_NAME_LEN)?;
    if room.capacity < 0 {
        return Err(AppError::validation("capacity must not be negative")
            .with_detail("field", "capacity"));
    }
    validate_room_geometry(room.desk_count, room.rows, room.columns).map_err(|(field, value)| {
        AppError::with_message(
            ErrorCode::RoomInvalidGeometry,
            format!("{field} must be positive, got {value}"),
        )
        .with_detail("field", field)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("CSE", "code", 10).is_ok());
        assert!(validate_required_text("   ", "code", 10).is_err());
        let err = validate_required_text("ABCDEFGHIJK", "code", 10).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_code_list() {
        assert!(validate_code_list(&[], "subjects", false).is_ok());
        assert!(validate_code_list(&[], "subjects", true).is_err());
        assert!(validate_code_list(&["DBMS".into(), "".into()], "subjects", true).is_err());
    }

    #[test]
    fn test_email() {
        assert!(validate_email("a@b.edu").is_ok());
        assert!(validate_email("ab.edu").is_err());
        assert!(validate_email("@b.edu").is_err());
        assert!(validate_email("a@b@c").is_err());
    }

    #[test]
    fn test_room_geometry() {
        assert!(validate_room_geometry(3, 2, 2).is_ok());
        assert_eq!(validate_room_geometry(0, 2, 2), Err(("desk_count", 0)));
        assert_eq!(validate_room_geometry(3, 2, -1), Err(("columns", -1)));
    }

    #[test]
    fn test_validate_room() {
        let mut room = Room {
            id: "r".into(),
            name: "Hall A".into(),
            capacity: 60,
            desk_count: 30,
            rows: 5,
            columns: 6,
            created_at: 0,
        };
        assert!(validate_room(&room).is_ok());

        room.rows = 0;
        let err = validate_room(&room).unwrap_err();
        assert_eq!(err.code, ErrorCode::RoomInvalidGeometry);
    }
}
