//! Seat assignment
//!
//! [`eligibility`] orders the candidate pool, [`allocator`] turns it into
//! desk maps, [`SeatingService`] persists them through a [`SeatingStore`]
//! and [`export`] renders them as spreadsheets.

pub mod allocator;
pub mod eligibility;
mod error;
pub mod export;
mod service;
mod store;

pub use error::SeatingError;
pub use service::{ExamGuard, ExamLocks, GENERATED_MESSAGE, SeatingService};
pub use store::{MemoryStore, SeatingStore, SqliteSeatingStore};
