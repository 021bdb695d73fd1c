use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Failures of a seating run
///
/// Every variant is reported before anything is written, so the exam's
/// previous plans survive any of them.
#[derive(Debug, Error)]
pub enum SeatingError {
    #[error("Exam {0} not found")]
    ExamNotFound(String),

    #[error("No valid rooms found")]
    NoRoomsFound,

    #[error("No eligible students found for this exam")]
    NoEligibleStudents { exam_id: String },

    #[error("Room {room_id} is invalid: {reason}")]
    InvalidRoom { room_id: String, reason: String },

    #[error("No seating plans found for exam {0}")]
    NoPlans(String),

    #[error("Export failed: {0}")]
    Export(String),

    #[error(transparent)]
    Store(#[from] AppError),
}

impl From<SeatingError> for AppError {
    fn from(err: SeatingError) -> Self {
        let message = err.to_string();
        match err {
            SeatingError::ExamNotFound(exam_id) => {
                AppError::with_message(ErrorCode::ExamNotFound, message).with_detail("exam_id", exam_id)
            }
            SeatingError::NoRoomsFound => AppError::with_message(ErrorCode::RoomNotFound, message),
            SeatingError::NoEligibleStudents { exam_id } => {
                AppError::with_message(ErrorCode::NoEligibleStudents, message)
                    .with_detail("exam_id", exam_id)
            }
            SeatingError::InvalidRoom { room_id, .. } => {
                AppError::with_message(ErrorCode::RoomInvalidGeometry, message)
                    .with_detail("room_id", room_id)
            }
            SeatingError::NoPlans(exam_id) => {
                AppError::with_message(ErrorCode::SeatingPlanNotFound, message)
                    .with_detail("exam_id", exam_id)
            }
            SeatingError::Export(_) => AppError::with_message(ErrorCode::ExportFailed, message),
            SeatingError::Store(app) => app,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (SeatingError::ExamNotFound("e".into()), StatusCode::NOT_FOUND),
            (SeatingError::NoRoomsFound, StatusCode::NOT_FOUND),
            (
                SeatingError::NoEligibleStudents { exam_id: "e".into() },
                StatusCode::BAD_REQUEST,
            ),
            (
                SeatingError::InvalidRoom {
                    room_id: "r".into(),
                    reason: "rows must be positive".into(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (SeatingError::NoPlans("e".into()), StatusCode::NOT_FOUND),
        ];

        for (err, status) in cases {
            let app: AppError = err.into();
            assert_eq!(app.http_status(), status, "{}", app.message);
        }
    }

    #[test]
    fn test_store_error_passes_through() {
        let app: AppError = SeatingError::Store(AppError::database("locked")).into();
        assert_eq!(app.code, ErrorCode::DatabaseError);
        assert_eq!(app.message, "locked");
    }
}
