//! Unified error codes for the exam seating service
//!
//! Error codes are shared between the seating server and its clients.
//! They are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Student and department errors
//! - 4xxx: Room errors
//! - 5xxx: Exam errors
//! - 6xxx: Seating errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so that clients can match
/// on a number instead of parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Username already registered
    UsernameExists = 1010,
    /// Email already registered
    EmailExists = 1011,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2003,

    // ==================== 3xxx: Student / Department ====================
    /// Student not found
    StudentNotFound = 3001,
    /// Roll number already registered
    RollNumberExists = 3002,
    /// Department not found
    DepartmentNotFound = 3101,
    /// Department code already registered
    DepartmentCodeExists = 3102,

    // ==================== 4xxx: Room ====================
    /// Room not found
    RoomNotFound = 4001,
    /// Room geometry is unusable for seating
    RoomInvalidGeometry = 4002,

    // ==================== 5xxx: Exam ====================
    /// Exam not found
    ExamNotFound = 5001,

    // ==================== 6xxx: Seating ====================
    /// No student matches the exam's departments and subjects
    NoEligibleStudents = 6001,
    /// No seating plan exists for the exam
    SeatingPlanNotFound = 6002,
    /// Spreadsheet rendering failed
    ExportFailed = 6003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",

            // Auth
            ErrorCode::NotAuthenticated => "Authentication required",
            ErrorCode::InvalidCredentials => "Invalid username or password",
            ErrorCode::TokenExpired => "Token has expired",
            ErrorCode::TokenInvalid => "Token is invalid",
            ErrorCode::UsernameExists => "Username already registered",
            ErrorCode::EmailExists => "Email already registered",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AdminRequired => "Admin access required",

            // Student / Department
            ErrorCode::StudentNotFound => "Student not found",
            ErrorCode::RollNumberExists => "Roll number already exists",
            ErrorCode::DepartmentNotFound => "Department not found",
            ErrorCode::DepartmentCodeExists => "Department code already exists",

            // Room
            ErrorCode::RoomNotFound => "Room not found",
            ErrorCode::RoomInvalidGeometry => "Room geometry is invalid",

            // Exam
            ErrorCode::ExamNotFound => "Exam not found",

            // Seating
            ErrorCode::NoEligibleStudents => "No eligible students found for this exam",
            ErrorCode::SeatingPlanNotFound => "No seating plans found",
            ErrorCode::ExportFailed => "Failed to export seating plan",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1010 => Ok(ErrorCode::UsernameExists),
            1011 => Ok(ErrorCode::EmailExists),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2003 => Ok(ErrorCode::AdminRequired),

            // Student / Department
            3001 => Ok(ErrorCode::StudentNotFound),
            3002 => Ok(ErrorCode::RollNumberExists),
            3101 => Ok(ErrorCode::DepartmentNotFound),
            3102 => Ok(ErrorCode::DepartmentCodeExists),

            // Room
            4001 => Ok(ErrorCode::RoomNotFound),
            4002 => Ok(ErrorCode::RoomInvalidGeometry),

            // Exam
            5001 => Ok(ErrorCode::ExamNotFound),

            // Seating
            6001 => Ok(ErrorCode::NoEligibleStudents),
            6002 => Ok(ErrorCode::SeatingPlanNotFound),
            6003 => Ok(ErrorCode::ExportFailed),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotFound.code(), 3);

        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::InvalidCredentials.code(), 1002);
        assert_eq!(ErrorCode::AdminRequired.code(), 2003);

        assert_eq!(ErrorCode::StudentNotFound.code(), 3001);
        assert_eq!(ErrorCode::RoomNotFound.code(), 4001);
        assert_eq!(ErrorCode::RoomInvalidGeometry.code(), 4002);
        assert_eq!(ErrorCode::ExamNotFound.code(), 5001);
        assert_eq!(ErrorCode::NoEligibleStudents.code(), 6001);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::NotFound.is_success());
        assert!(!ErrorCode::NoEligibleStudents.is_success());
    }

    #[test]
    fn test_try_from_covers_every_variant() {
        let codes = [
            ErrorCode::Success,
            ErrorCode::ValidationFailed,
            ErrorCode::NotFound,
            ErrorCode::AlreadyExists,
            ErrorCode::InvalidRequest,
            ErrorCode::NotAuthenticated,
            ErrorCode::InvalidCredentials,
            ErrorCode::TokenExpired,
            ErrorCode::TokenInvalid,
            ErrorCode::UsernameExists,
            ErrorCode::EmailExists,
            ErrorCode::PermissionDenied,
            ErrorCode::AdminRequired,
            ErrorCode::StudentNotFound,
            ErrorCode::RollNumberExists,
            ErrorCode::DepartmentNotFound,
            ErrorCode::DepartmentCodeExists,
            ErrorCode::RoomNotFound,
            ErrorCode::RoomInvalidGeometry,
            ErrorCode::ExamNotFound,
            ErrorCode::NoEligibleStudents,
            ErrorCode::SeatingPlanNotFound,
            ErrorCode::ExportFailed,
            ErrorCode::InternalError,
            ErrorCode::DatabaseError,
        ];

        for code in codes {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(6999), Err(InvalidErrorCode(6999)));
    }

    #[test]
    fn test_serialize() {
        assert_eq!(serde_json::to_string(&ErrorCode::NotFound).unwrap(), "3");
        assert_eq!(
            serde_json::to_string(&ErrorCode::NoEligibleStudents).unwrap(),
            "6001"
        );
    }

    #[test]
    fn test_deserialize_invalid() {
        let result: Result<ErrorCode, _> = serde_json::from_str("10000");
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ErrorCode::ExamNotFound), "5001");
        assert_eq!(format!("{}", InvalidErrorCode(42)), "invalid error code: 42");
    }

    #[test]
    fn test_message() {
        assert_eq!(ErrorCode::NotFound.message(), "Resource not found");
        assert_eq!(
            ErrorCode::NoEligibleStudents.message(),
            "No eligible students found for this exam"
        );
    }
}
