//! Joins one class to its teacher and student usernames.

use homeroom_core::models::ClassRecord;

use crate::index::RosterIndex;

/// The fully joined, username-based view of one class's membership,
/// recomputed from current source data every run.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedClass {
    pub name: String,
    pub description: String,
    pub teachers: Vec<String>,
    pub students: Vec<String>,
}

/// Resolve a class's teacher references and enrolled students into username
/// sets. References that are absent or point at people without a
/// provisioned login are skipped; that is expected roster data, not an
/// error.
pub fn resolve(class: &ClassRecord, index: &RosterIndex) -> ResolvedClass {
    let mut teachers = Vec::with_capacity(class.teachers.len());
    for teacher in &class.teachers {
        let Some(person_fk) = teacher.person_fk else {
            continue;
        };
        if let Some(username) = index.username(person_fk) {
            teachers.push(username.to_string());
        }
    }

    let enrolled = index.enrolled_students(class.class_pk);
    let mut students = Vec::with_capacity(enrolled.len());
    for student_fk in enrolled {
        if let Some(username) = index.username(*student_fk) {
            students.push(username.to_string());
        }
    }

    ResolvedClass {
        name: class.class_id.clone(),
        description: class.description.clone().unwrap_or_default(),
        teachers,
        students,
    }
}
