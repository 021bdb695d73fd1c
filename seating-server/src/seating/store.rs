//! Persistence port used by [`SeatingService`](super::SeatingService)

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use shared::error::AppResult;
use shared::models::{Exam, Room, SeatingPlan, Student};
use sqlx::SqlitePool;

use crate::db::repository::{exam, room, seating_plan, student};

/// Everything a generation run reads or writes
#[async_trait]
pub trait SeatingStore: Send + Sync {
    async fn find_exam(&self, exam_id: &str) -> AppResult<Option<Exam>>;

    /// A superset of the eligible students is acceptable
    async fn find_students_matching(
        &self,
        departments: &[String],
        subjects: &[String],
    ) -> AppResult<Vec<Student>>;

    /// Rooms among `ids` that exist, any order
    async fn find_rooms(&self, ids: &[String]) -> AppResult<Vec<Room>>;

    /// Plans of an exam in generation order
    async fn find_plans(&self, exam_id: &str) -> AppResult<Vec<SeatingPlan>>;

    /// Swap the exam's whole plan set, all or nothing
    async fn replace_plans(&self, exam_id: &str, plans: &[SeatingPlan]) -> AppResult<()>;
}

/// SQLite-backed store
#[derive(Clone, Debug)]
pub struct SqliteSeatingStore {
    pool: SqlitePool,
}

impl SqliteSeatingStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SeatingStore for SqliteSeatingStore {
    async fn find_exam(&self, exam_id: &str) -> AppResult<Option<Exam>> {
        Ok(exam::find_by_id(&self.pool, exam_id).await?)
    }

    async fn find_students_matching(
        &self,
        departments: &[String],
        subjects: &[String],
    ) -> AppResult<Vec<Student>> {
        Ok(student::find_matching(&self.pool, departments, subjects).await?)
    }

    async fn find_rooms(&self, ids: &[String]) -> AppResult<Vec<Room>> {
        Ok(room::find_by_ids(&self.pool, ids).await?)
    }

    async fn find_plans(&self, exam_id: &str) -> AppResult<Vec<SeatingPlan>> {
        Ok(seating_plan::find_by_exam(&self.pool, exam_id).await?)
    }

    async fn replace_plans(&self, exam_id: &str, plans: &[SeatingPlan]) -> AppResult<()> {
        Ok(seating_plan::replace_for_exam(&self.pool, exam_id, plans).await?)
    }
}

/// In-memory store for tests and tooling
///
/// `find_students_matching` returns every student unfiltered so that the
/// resolver's own filtering is what gets exercised.
#[derive(Debug, Default)]
pub struct MemoryStore {
    exams: RwLock<HashMap<String, Exam>>,
    students: RwLock<Vec<Student>>,
    rooms: RwLock<HashMap<String, Room>>,
    plans: RwLock<HashMap<String, Vec<SeatingPlan>>>,
    replace_calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn insert_exam(&self, exam: Exam) {
        self.exams.write().insert(exam.id.clone(), exam);
    }

    pub fn insert_student(&self, student: Student) {
        self.students.write().push(student);
    }

    pub fn insert_room(&self, room: Room) {
        self.rooms.write().insert(room.id.clone(), room);
    }

    pub fn remove_room(&self, room_id: &str) {
        self.rooms.write().remove(room_id);
    }

    /// Current plans of an exam, without going through the trait
    pub fn plans_of(&self, exam_id: &str) -> Vec<SeatingPlan> {
        self.plans.read().get(exam_id).cloned().unwrap_or_default()
    }

    /// Number of `replace_plans` calls so far
    pub fn replace_calls(&self) -> usize {
        self.replace_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SeatingStore for MemoryStore {
    async fn find_exam(&self, exam_id: &str) -> AppResult<Option<Exam>> {
        Ok(self.exams.read().get(exam_id).cloned())
    }

    async fn find_students_matching(
        &self,
        _departments: &[String],
        _subjects: &[String],
    ) -> AppResult<Vec<Student>> {
        Ok(self.students.read().clone())
    }

    async fn find_rooms(&self, ids: &[String]) -> AppResult<Vec<Room>> {
        let rooms = self.rooms.read();
        Ok(ids.iter().filter_map(|id| rooms.get(id).cloned()).collect())
    }

    async fn find_plans(&self, exam_id: &str) -> AppResult<Vec<SeatingPlan>> {
        Ok(self.plans_of(exam_id))
    }

    async fn replace_plans(&self, exam_id: &str, plans: &[SeatingPlan]) -> AppResult<()> {
        self.replace_calls.fetch_add(1, Ordering::SeqCst);
        self.plans
            .write()
            .insert(exam_id.to_string(), plans.to_vec());
        Ok(())
    }
}
