//! Desk Allocator
//!
//! Pure, synchronous. Rooms are filled in the order given, each consuming
//! students from the front of what earlier rooms left behind. Desk
//! positions are row-major up to [`Room::usable_desks`].
//!
//! - [`SeatingMode::OnePerDesk`]: next student, left seat only.
//! - [`SeatingMode::TwoPerDesk`]: students are grouped by the first of
//!   their own subjects that the exam covers, groups ordered by first
//!   appearance. Each desk takes the front of the first two non-empty
//!   groups; with a single group left it takes two from that group.

use shared::models::{DeskAssignment, Room, SeatingMode, Student};

/// Desk map of one room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomAllocation {
    pub room_id: String,
    pub desks: Vec<DeskAssignment>,
    /// Occupied seats
    pub seated: usize,
}

/// Outcome of one allocation over all rooms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    /// Only rooms that received at least one student
    pub rooms: Vec<RoomAllocation>,
    pub total_assigned: usize,
    pub total_eligible: usize,
}

impl Allocation {
    pub fn unseated(&self) -> usize {
        self.total_eligible - self.total_assigned
    }
}

/// Seat `students` (already eligibility-ordered) across `rooms`
pub fn allocate(
    students: &[Student],
    rooms: &[Room],
    exam_subjects: &[String],
    mode: SeatingMode,
) -> Allocation {
    let mut remaining: Vec<&Student> = students.iter().collect();
    let mut allocated = Vec::new();
    let mut total_assigned = 0;

    for room in rooms {
        if remaining.is_empty() {
            break;
        }

        let (desks, seated) = match mode {
            SeatingMode::OnePerDesk => fill_one_per_desk(room, &remaining),
            SeatingMode::TwoPerDesk => fill_two_per_desk(room, &remaining, exam_subjects),
        };

        if desks.is_empty() {
            continue;
        }

        let mut taken = seated.iter();
        let mut next_taken = taken.next().copied();
        let mut index = 0;
        remaining.retain(|_| {
            let keep = next_taken != Some(index);
            if !keep {
                next_taken = taken.next().copied();
            }
            index += 1;
            keep
        });

        total_assigned += seated.len();
        allocated.push(RoomAllocation {
            room_id: room.id.clone(),
            desks,
            seated: seated.len(),
        });
    }

    Allocation {
        rooms: allocated,
        total_assigned,
        total_eligible: students.len(),
    }
}

/// Row-major grid position of a 0-based desk index
fn desk_at(index: usize, room: &Room) -> (u32, u32, u32) {
    let columns = room.columns.max(1) as usize;
    (
        (index + 1) as u32,
        (index / columns) as u32,
        (index % columns) as u32,
    )
}

/// Returns the desks and the sorted indexes into `remaining` that were seated
fn fill_one_per_desk(room: &Room, remaining: &[&Student]) -> (Vec<DeskAssignment>, Vec<usize>) {
    let count = room.usable_desks().min(remaining.len());

    let desks = remaining[..count]
        .iter()
        .enumerate()
        .map(|(index, student)| {
            let (desk_number, row, col) = desk_at(index, room);
            DeskAssignment {
                desk_number,
                left_student: Some(student.roll_number.clone()),
                right_student: None,
                row,
                col,
            }
        })
        .collect();

    (desks, (0..count).collect())
}

fn fill_two_per_desk(
    room: &Room,
    remaining: &[&Student],
    exam_subjects: &[String],
) -> (Vec<DeskAssignment>, Vec<usize>) {
    let mut groups = subject_groups(remaining, exam_subjects);
    let mut seated = Vec::new();
    let mut desks = Vec::new();

    for index in 0..room.usable_desks() {
        let mut open = groups.iter_mut().filter(|g| !g.is_empty());
        let (left, right) = match (open.next(), open.next()) {
            (Some(first), Some(second)) => (first.pop(), second.pop()),
            (Some(only), None) => {
                let left = only.pop();
                (left, only.pop())
            }
            _ => break,
        };

        seated.extend(left.iter().chain(right.iter()).copied());
        let (desk_number, row, col) = desk_at(index, room);
        desks.push(DeskAssignment {
            desk_number,
            left_student: left.map(|i| remaining[i].roll_number.clone()),
            right_student: right.map(|i| remaining[i].roll_number.clone()),
            row,
            col,
        });
    }

    seated.sort_unstable();
    (desks, seated)
}

/// Queue of indexes into the remaining sequence sharing one grouping subject
#[derive(Debug)]
struct SubjectGroup<'a> {
    /// `None` collects students taking none of the exam's subjects
    subject: Option<&'a str>,
    members: Vec<usize>,
    next: usize,
}

impl SubjectGroup<'_> {
    fn is_empty(&self) -> bool {
        self.next >= self.members.len()
    }

    fn pop(&mut self) -> Option<usize> {
        let member = self.members.get(self.next).copied();
        if member.is_some() {
            self.next += 1;
        }
        member
    }
}

/// Groups in order of their first member's position
fn subject_groups<'a>(remaining: &[&'a Student], exam_subjects: &[String]) -> Vec<SubjectGroup<'a>> {
    let mut groups: Vec<SubjectGroup<'a>> = Vec::new();

    for (index, &student) in remaining.iter().enumerate() {
        let key = student
            .subjects
            .iter()
            .find(|s| exam_subjects.contains(*s))
            .map(String::as_str);

        match groups.iter_mut().find(|g| g.subject == key) {
            Some(group) => group.members.push(index),
            None => groups.push(SubjectGroup {
                subject: key,
                members: vec![index],
                next: 0,
            }),
        }
    }

    groups
}
