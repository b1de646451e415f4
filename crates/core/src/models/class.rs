use serde::{Deserialize, Serialize};

/// A class offering as reported by the roster provider.
///
/// `class_id` is the display identifier the MDM keys its records on;
/// `class_pk` is the roster-internal primary key referenced by enrollments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassRecord {
    pub class_pk: i64,
    pub class_id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub school_level: Option<String>,
    #[serde(default)]
    pub course_type: Option<String>,
    #[serde(default)]
    pub teachers: Vec<TeacherRef>,
}

/// A teacher reference on a class. The person key may be absent when the
/// roster has a teaching slot with no assigned person.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeacherRef {
    #[serde(default)]
    pub person_fk: Option<i64>,
}
