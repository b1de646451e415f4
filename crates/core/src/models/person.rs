use serde::{Deserialize, Serialize};

/// A person (student or faculty/staff) as reported by the roster provider.
///
/// A missing username means the person has no provisioned login; such
/// records are tolerated and simply never appear in membership sets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonRecord {
    pub person_pk: i64,
    #[serde(default)]
    pub username: Option<String>,
}
