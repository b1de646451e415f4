use serde::{Deserialize, Serialize};

/// A class/student pair from the roster's enrollment table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrollmentRecord {
    pub class_fk: i64,
    pub student_fk: i64,
}
