//! Typed roster entities, validated at the source-pull boundary.

pub mod class;
pub mod enrollment;
pub mod person;

pub use class::{ClassRecord, TeacherRef};
pub use enrollment::EnrollmentRecord;
pub use person::PersonRecord;
