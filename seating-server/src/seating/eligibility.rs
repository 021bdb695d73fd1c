//! Eligibility Resolver
//!
//! A student may sit an exam when their department is one of the exam's
//! departments and they take at least one of its subjects. Candidates are
//! ordered by roll number, compared byte-wise.

use shared::models::{Exam, Student};

use super::SeatingError;

pub fn is_eligible(exam: &Exam, student: &Student) -> bool {
    exam.departments.contains(&student.department)
        && student.subjects.iter().any(|s| exam.subjects.contains(s))
}

/// Filter and order `candidates` for `exam`
///
/// Store-side filtering is an optimisation only: the predicate and the
/// ordering are applied here regardless, so any superset of the eligible
/// students yields the same output.
pub fn resolve(exam: &Exam, candidates: Vec<Student>) -> Result<Vec<Student>, SeatingError> {
    let mut eligible: Vec<Student> = candidates
        .into_iter()
        .filter(|s| is_eligible(exam, s))
        .collect();

    if eligible.is_empty() {
        return Err(SeatingError::NoEligibleStudents {
            exam_id: exam.id.clone(),
        });
    }

    eligible.sort_by(|a, b| a.roll_number.as_bytes().cmp(b.roll_number.as_bytes()));
    Ok(eligible)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::ExamType;

    fn exam(departments: &[&str], subjects: &[&str]) -> Exam {
        Exam {
            id: "exam-1".into(),
            exam_name: "CAT 1".into(),
            exam_type: ExamType::Cat,
            date: "2025-03-10".into(),
            time: "09:30".into(),
            departments: departments.iter().map(|s| s.to_string()).collect(),
            subjects: subjects.iter().map(|s| s.to_string()).collect(),
            created_at: 0,
            created_by: "admin".into(),
        }
    }

    fn student(roll: &str, department: &str, subjects: &[&str]) -> Student {
        Student {
            id: format!("id-{roll}"),
            roll_number: roll.into(),
            name: format!("Student {roll}"),
            department: department.into(),
            subjects: subjects.iter().map(|s| s.to_string()).collect(),
            email: None,
            created_at: 0,
        }
    }

    fn rolls(students: &[Student]) -> Vec<&str> {
        students.iter().map(|s| s.roll_number.as_str()).collect()
    }

    #[test]
    fn test_filters_by_department_and_subject() {
        let exam = exam(&["CSE", "IT"], &["DBMS", "Networks"]);
        let candidates = vec![
            student("1", "CSE", &["DBMS"]),
            student("2", "ECE", &["DBMS"]),
            student("3", "IT", &["Maths"]),
            student("4", "IT", &["Maths", "Networks"]),
        ];

        let eligible = resolve(&exam, candidates).unwrap();
        assert_eq!(rolls(&eligible), vec!["1", "4"]);
    }

    #[test]
    fn test_orders_by_roll_number_bytewise() {
        let exam = exam(&["CSE"], &["DBMS"]);
        let candidates = vec![
            student("21CS10", "CSE", &["DBMS"]),
            student("21CS02", "CSE", &["DBMS"]),
            student("21CS1", "CSE", &["DBMS"]),
            student("21cs01", "CSE", &["DBMS"]),
        ];

        let eligible = resolve(&exam, candidates).unwrap();
        // Uppercase sorts before lowercase, "1" before "10"
        assert_eq!(rolls(&eligible), vec!["21CS02", "21CS1", "21CS10", "21cs01"]);
    }

    #[test]
    fn test_empty_pool_is_an_error() {
        let exam = exam(&["CSE"], &["DBMS"]);
        let err = resolve(&exam, vec![student("1", "IT", &["DBMS"])]).unwrap_err();
        assert!(matches!(err, SeatingError::NoEligibleStudents { exam_id } if exam_id == "exam-1"));
    }

    #[test]
    fn test_exam_without_subjects_has_no_candidates() {
        let exam = exam(&["CSE"], &[]);
        assert!(!is_eligible(&exam, &student("1", "CSE", &["DBMS"])));
    }
}
