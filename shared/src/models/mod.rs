//! Data models
//!
//! Shared between the seating server and its clients (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are UUID v4 strings, timestamps are epoch milliseconds.

pub mod dashboard;
pub mod department;
pub mod exam;
pub mod room;
pub mod seating;
pub mod student;
pub mod user;

// Re-exports
pub use dashboard::*;
pub use department::*;
pub use exam::*;
pub use room::*;
pub use seating::*;
pub use student::*;
pub use user::*;
