//! In-memory lookup structures over the pulled roster record sets.

use std::collections::HashMap;

use homeroom_core::models::{ClassRecord, EnrollmentRecord, PersonRecord};

/// O(1) lookups derived once per run from the raw record sets.
///
/// People without a username are omitted, so a hit here always yields a
/// provisioned login.
#[derive(Debug, Default)]
pub struct RosterIndex {
    username_by_person: HashMap<i64, String>,
    students_by_class: HashMap<i64, Vec<i64>>,
}

impl RosterIndex {
    /// Build the index from students, faculty/staff, and enrollments.
    pub fn build(
        students: &[PersonRecord],
        facstaff: &[PersonRecord],
        enrollments: &[EnrollmentRecord],
    ) -> Self {
        let mut username_by_person = HashMap::with_capacity(students.len() + facstaff.len());
        for person in students.iter().chain(facstaff) {
            if let Some(username) = &person.username {
                username_by_person.insert(person.person_pk, username.clone());
            }
        }

        let mut students_by_class: HashMap<i64, Vec<i64>> = HashMap::new();
        for enrollment in enrollments {
            students_by_class
                .entry(enrollment.class_fk)
                .or_default()
                .push(enrollment.student_fk);
        }

        Self {
            username_by_person,
            students_by_class,
        }
    }

    /// Username for a person key, if the person exists and has a login.
    pub fn username(&self, person_pk: i64) -> Option<&str> {
        self.username_by_person.get(&person_pk).map(String::as_str)
    }

    /// Student keys enrolled in a class, in enrollment order.
    pub fn enrolled_students(&self, class_pk: i64) -> &[i64] {
        self.students_by_class
            .get(&class_pk)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Everything one sync run operates on: the pulled class list, the derived
/// index, and whether the pull was complete (a prerequisite for the orphan
/// sweep).
#[derive(Debug)]
pub struct SyncContext {
    pub classes: Vec<ClassRecord>,
    pub index: RosterIndex,
    pub full_pull: bool,
}

impl SyncContext {
    pub fn new(
        classes: Vec<ClassRecord>,
        students: &[PersonRecord],
        facstaff: &[PersonRecord],
        enrollments: &[EnrollmentRecord],
        full_pull: bool,
    ) -> Self {
        Self {
            classes,
            index: RosterIndex::build(students, facstaff, enrollments),
            full_pull,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(pk: i64, username: Option<&str>) -> PersonRecord {
        PersonRecord {
            person_pk: pk,
            username: username.map(String::from),
        }
    }

    fn enrollment(class_fk: i64, student_fk: i64) -> EnrollmentRecord {
        EnrollmentRecord {
            class_fk,
            student_fk,
        }
    }

    #[test]
    fn index_unions_students_and_facstaff() {
        let students = vec![person(1001, Some("alice"))];
        let facstaff = vec![person(301, Some("jsmith"))];
        let index = RosterIndex::build(&students, &facstaff, &[]);

        assert_eq!(index.username(1001), Some("alice"));
        assert_eq!(index.username(301), Some("jsmith"));
    }

    #[test]
    fn index_omits_people_without_username() {
        let students = vec![person(1001, Some("alice")), person(1002, None)];
        let index = RosterIndex::build(&students, &[], &[]);

        assert_eq!(index.username(1001), Some("alice"));
        assert_eq!(index.username(1002), None);
    }

    #[test]
    fn index_unknown_person_is_none() {
        let index = RosterIndex::build(&[], &[], &[]);
        assert_eq!(index.username(42), None);
    }

    #[test]
    fn index_groups_enrollments_by_class() {
        let enrollments = vec![
            enrollment(4401, 1001),
            enrollment(4402, 1003),
            enrollment(4401, 1002),
        ];
        let index = RosterIndex::build(&[], &[], &enrollments);

        assert_eq!(index.enrolled_students(4401), &[1001, 1002]);
        assert_eq!(index.enrolled_students(4402), &[1003]);
    }

    #[test]
    fn index_class_without_enrollments_is_empty() {
        let index = RosterIndex::build(&[], &[], &[]);
        assert!(index.enrolled_students(4401).is_empty());
    }

    #[test]
    fn context_builds_index_from_record_sets() {
        let students = vec![person(1001, Some("alice"))];
        let enrollments = vec![enrollment(4401, 1001)];
        let ctx = SyncContext::new(Vec::new(), &students, &[], &enrollments, true);

        assert!(ctx.full_pull);
        assert_eq!(ctx.index.username(1001), Some("alice"));
        assert_eq!(ctx.index.enrolled_students(4401), &[1001]);
    }
}
