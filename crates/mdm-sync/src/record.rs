//! Wire representation of an MDM class record.
//!
//! The record is built as a typed structure and serialized in one pass;
//! markup-significant characters in name and description are escaped by the
//! serializer, and comparisons always operate on parsed values.

use homeroom_core::error::{HomeroomError, Result};
use serde::{Deserialize, Serialize};

use crate::resolve::ResolvedClass;

/// Membership mode tag: the MDM matches members by username.
pub const MEMBERSHIP_TYPE: &str = "Usernames";

/// Placeholder id carried by records that have not been assigned one yet.
pub const UNASSIGNED_ID: i64 = -1;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// A class record as stored by (or posted to) the MDM.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename = "class")]
pub struct ClassPayload {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub membership_type: String,
    #[serde(default)]
    pub students: StudentMembers,
    #[serde(default)]
    pub teachers: TeacherMembers,
}

/// Student username leaves nested under `<students>`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StudentMembers {
    #[serde(default, rename = "student")]
    pub entries: Vec<String>,
}

/// Teacher username leaves nested under `<teachers>`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TeacherMembers {
    #[serde(default, rename = "teacher")]
    pub entries: Vec<String>,
}

impl ClassPayload {
    /// Build a candidate record (unassigned id) from a resolved class view.
    pub fn from_resolved(resolved: &ResolvedClass) -> Self {
        Self {
            id: UNASSIGNED_ID,
            name: resolved.name.clone(),
            description: resolved.description.clone(),
            membership_type: MEMBERSHIP_TYPE.to_string(),
            students: StudentMembers {
                entries: resolved.students.clone(),
            },
            teachers: TeacherMembers {
                entries: resolved.teachers.clone(),
            },
        }
    }

    /// Serialize to the full XML document expected by the MDM.
    pub fn to_xml(&self) -> Result<String> {
        let body = quick_xml::se::to_string(self)
            .map_err(|e| HomeroomError::Serialization(format!("class record: {e}")))?;
        Ok(format!("{XML_DECLARATION}{body}"))
    }

    /// Parse a stored class record from the MDM's XML response.
    pub fn from_xml(xml: &str) -> Result<Self> {
        quick_xml::de::from_str(xml)
            .map_err(|e| HomeroomError::Serialization(format!("class record: {e}")))
    }
}

/// The MDM's full class listing, used only by the orphan sweep.
#[derive(Debug, Default, Deserialize)]
#[serde(rename = "classes")]
pub struct ClassIndex {
    #[serde(default, rename = "class")]
    pub classes: Vec<ClassSummary>,
}

/// One entry of the full listing.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ClassSummary {
    pub id: i64,
    pub name: String,
}
