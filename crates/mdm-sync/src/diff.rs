//! Change detection between the MDM's stored record and a fresh candidate.

use std::fmt;

use crate::record::ClassPayload;

/// First field found differing, in diagnostic order. The MDM protocol has
/// no partial updates, so any reason rewrites the whole record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeReason {
    Name,
    Description,
    Students,
    Teachers,
}

impl fmt::Display for ChangeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeReason::Name => write!(f, "name"),
            ChangeReason::Description => write!(f, "description"),
            ChangeReason::Students => write!(f, "students"),
            ChangeReason::Teachers => write!(f, "teachers"),
        }
    }
}

/// Compare the stored record against the freshly computed candidate.
/// Membership is compared as sorted sequences, so storage order never
/// triggers a write. `None` means the record is already converged.
pub fn needs_update(existing: &ClassPayload, candidate: &ClassPayload) -> Option<ChangeReason> {
    if existing.name != candidate.name {
        return Some(ChangeReason::Name);
    }
    if existing.description != candidate.description {
        return Some(ChangeReason::Description);
    }
    if sorted(&existing.students.entries) != sorted(&candidate.students.entries) {
        return Some(ChangeReason::Students);
    }
    if sorted(&existing.teachers.entries) != sorted(&candidate.teachers.entries) {
        return Some(ChangeReason::Teachers);
    }
    None
}

fn sorted(usernames: &[String]) -> Vec<&str> {
    let mut out: Vec<&str> = usernames.iter().map(String::as_str).collect();
    out.sort_unstable();
    out
}
