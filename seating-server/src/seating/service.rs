//! Seating Service
//!
//! Runs a generation against a [`SeatingStore`]: every read and check
//! happens before the single `replace_plans` write.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use dashmap::DashMap;
use shared::models::{
    GenerateSummary, Room, SeatingGenerateRequest, SeatingPlan, SeatingPlanWithRoom,
};
use shared::util::{new_id, now_millis};
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::allocator::{self, Allocation};
use super::export::{self, SeatingSheet};
use super::{SeatingError, SeatingStore, eligibility};
use crate::utils::validation::validate_room_geometry;

pub const GENERATED_MESSAGE: &str = "Seating plans generated successfully";

/// One async mutex per exam id
///
/// Entries live only while some task holds or waits on them.
#[derive(Debug, Default, Clone)]
pub struct ExamLocks {
    inner: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl ExamLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `exam_id`
    pub async fn lock(&self, exam_id: &str) -> ExamGuard {
        let mutex = self
            .inner
            .entry(exam_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        ExamGuard {
            guard: Some(mutex.lock_owned().await),
            exam_id: exam_id.to_string(),
            locks: Arc::clone(&self.inner),
        }
    }

    /// Exams with a live lock entry
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// Held lock on one exam; the map entry is dropped with the last holder
#[derive(Debug)]
pub struct ExamGuard {
    guard: Option<OwnedMutexGuard<()>>,
    exam_id: String,
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl Drop for ExamGuard {
    fn drop(&mut self) {
        drop(self.guard.take());
        // Waiters hold their own clone, so a count of one means the map is the only owner
        self.locks
            .remove_if(&self.exam_id, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}

pub struct SeatingService {
    store: Arc<dyn SeatingStore>,
    locks: ExamLocks,
}

impl std::fmt::Debug for SeatingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeatingService")
            .field("locks", &self.locks)
            .finish_non_exhaustive()
    }
}

impl SeatingService {
    pub fn new(store: Arc<dyn SeatingStore>) -> Self {
        Self {
            store,
            locks: ExamLocks::new(),
        }
    }

    /// Exam lock table, exposed for inspection
    pub fn locks(&self) -> &ExamLocks {
        &self.locks
    }

    /// Hold while mutating an exam outside a generation run (deletion)
    pub async fn lock_exam(&self, exam_id: &str) -> ExamGuard {
        self.locks.lock(exam_id).await
    }

    pub async fn generate(
        &self,
        request: &SeatingGenerateRequest,
    ) -> Result<GenerateSummary, SeatingError> {
        let _guard = self.locks.lock(&request.exam_id).await;

        let exam = self
            .store
            .find_exam(&request.exam_id)
            .await?
            .ok_or_else(|| SeatingError::ExamNotFound(request.exam_id.clone()))?;

        let candidates = self
            .store
            .find_students_matching(&exam.departments, &exam.subjects)
            .await?;
        let students = eligibility::resolve(&exam, candidates)?;

        let rooms = self.resolve_rooms(&request.room_ids).await?;
        for room in &rooms {
            validate_room_geometry(room.desk_count, room.rows, room.columns).map_err(
                |(field, value)| SeatingError::InvalidRoom {
                    room_id: room.id.clone(),
                    reason: format!("{field} must be positive, got {value}"),
                },
            )?;
        }

        let allocation =
            allocator::allocate(&students, &rooms, &exam.subjects, request.seating_mode);
        let plans = self.build_plans(&exam.id, request, &allocation);

        self.store.replace_plans(&exam.id, &plans).await?;

        tracing::info!(
            exam_id = %exam.id,
            mode = request.seating_mode.as_str(),
            rooms = rooms.len(),
            plans = plans.len(),
            eligible = allocation.total_eligible,
            assigned = allocation.total_assigned,
            unseated = allocation.unseated(),
            "Seating plans generated"
        );

        Ok(GenerateSummary {
            message: GENERATED_MESSAGE.to_string(),
            plans_created: plans.len(),
            total_students_assigned: allocation.total_assigned,
            total_eligible_students: allocation.total_eligible,
        })
    }

    /// Rooms in request order, duplicates and unknown ids dropped
    async fn resolve_rooms(&self, room_ids: &[String]) -> Result<Vec<Room>, SeatingError> {
        let mut seen = HashSet::new();
        let wanted: Vec<String> = room_ids
            .iter()
            .filter(|id| seen.insert(id.as_str()))
            .cloned()
            .collect();

        let mut found: HashMap<String, Room> = self
            .store
            .find_rooms(&wanted)
            .await?
            .into_iter()
            .map(|room| (room.id.clone(), room))
            .collect();

        let mut rooms = Vec::with_capacity(wanted.len());
        for id in &wanted {
            match found.remove(id) {
                Some(room) => rooms.push(room),
                None => tracing::warn!(room_id = %id, "Skipping unknown room"),
            }
        }

        if rooms.is_empty() {
            return Err(SeatingError::NoRoomsFound);
        }
        Ok(rooms)
    }

    fn build_plans(
        &self,
        exam_id: &str,
        request: &SeatingGenerateRequest,
        allocation: &Allocation,
    ) -> Vec<SeatingPlan> {
        let created_at = now_millis();
        allocation
            .rooms
            .iter()
            .map(|room| SeatingPlan {
                id: new_id(),
                exam_id: exam_id.to_string(),
                room_id: room.room_id.clone(),
                seating_mode: request.seating_mode,
                desk_assignments: room.desks.clone(),
                total_students: room.seated as i64,
                created_at,
            })
            .collect()
    }

    /// Persisted plans with their rooms; deleted rooms yield `None` details
    pub async fn plans_with_rooms(
        &self,
        exam_id: &str,
    ) -> Result<Vec<SeatingPlanWithRoom>, SeatingError> {
        let plans = self.store.find_plans(exam_id).await?;
        let room_ids: Vec<String> = plans.iter().map(|p| p.room_id.clone()).collect();
        let rooms: HashMap<String, Room> = self
            .store
            .find_rooms(&room_ids)
            .await?
            .into_iter()
            .map(|room| (room.id.clone(), room))
            .collect();

        Ok(plans
            .into_iter()
            .map(|plan| SeatingPlanWithRoom {
                room_details: rooms.get(&plan.room_id).cloned(),
                plan,
            })
            .collect())
    }

    /// Workbook of the exam's plans as `(file_name, bytes)`
    pub async fn export(&self, exam_id: &str) -> Result<(String, Vec<u8>), SeatingError> {
        let exam = self
            .store
            .find_exam(exam_id)
            .await?
            .ok_or_else(|| SeatingError::ExamNotFound(exam_id.to_string()))?;

        let plans = self.plans_with_rooms(exam_id).await?;
        if plans.is_empty() {
            return Err(SeatingError::NoPlans(exam_id.to_string()));
        }

        let sheets: Vec<SeatingSheet> = plans
            .iter()
            .map(|p| SeatingSheet::from_plan(&p.plan, p.room_details.as_ref()))
            .collect();
        let bytes = export::render_workbook(&sheets)?;

        Ok((export::file_name(&exam.exam_name), bytes))
    }
}
