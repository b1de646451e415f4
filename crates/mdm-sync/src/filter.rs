//! Scope rules deciding which roster classes are synced at all.

use homeroom_core::config::SyncConfig;
use homeroom_core::models::ClassRecord;
use tracing::debug;

/// Exclusion rules from the `[sync]` config section. A class is out of
/// scope when its school level or its course type matches either list.
#[derive(Debug, Clone, Default)]
pub struct ExclusionRules {
    school_levels: Vec<String>,
    course_types: Vec<String>,
}

impl ExclusionRules {
    pub fn new(school_levels: Vec<String>, course_types: Vec<String>) -> Self {
        Self {
            school_levels,
            course_types,
        }
    }

    pub fn from_config(config: &SyncConfig) -> Self {
        Self::new(
            config.skip_school_levels.clone(),
            config.skip_course_types.clone(),
        )
    }

    /// Whether the class should be synced.
    pub fn in_scope(&self, class: &ClassRecord) -> bool {
        if let Some(level) = &class.school_level {
            if self.school_levels.contains(level) {
                debug!(class = %class.class_id, school_level = %level, "Class excluded by school level");
                return false;
            }
        }

        if let Some(course_type) = &class.course_type {
            if self.course_types.contains(course_type) {
                debug!(class = %class.class_id, course_type = %course_type, "Class excluded by course type");
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(school_level: Option<&str>, course_type: Option<&str>) -> ClassRecord {
        ClassRecord {
            class_pk: 1,
            class_id: "ART050".to_string(),
            description: None,
            school_level: school_level.map(String::from),
            course_type: course_type.map(String::from),
            teachers: Vec::new(),
        }
    }

    #[test]
    fn empty_rules_keep_everything() {
        let rules = ExclusionRules::default();
        assert!(rules.in_scope(&class(Some("Lower School"), Some("Activity"))));
    }

    #[test]
    fn school_level_match_excludes() {
        let rules = ExclusionRules::new(vec!["Lower School".into()], Vec::new());
        assert!(!rules.in_scope(&class(Some("Lower School"), None)));
        assert!(rules.in_scope(&class(Some("Upper School"), None)));
    }

    #[test]
    fn course_type_match_excludes() {
        let rules = ExclusionRules::new(Vec::new(), vec!["Activity".into()]);
        assert!(!rules.in_scope(&class(None, Some("Activity"))));
        assert!(rules.in_scope(&class(None, Some("Core"))));
    }

    #[test]
    fn either_rule_set_triggers_exclusion() {
        let rules = ExclusionRules::new(vec!["Lower School".into()], vec!["Activity".into()]);
        assert!(!rules.in_scope(&class(Some("Lower School"), Some("Core"))));
        assert!(!rules.in_scope(&class(Some("Upper School"), Some("Activity"))));
        assert!(rules.in_scope(&class(Some("Upper School"), Some("Core"))));
    }

    #[test]
    fn missing_tags_never_match() {
        let rules = ExclusionRules::new(vec!["Lower School".into()], vec!["Activity".into()]);
        assert!(rules.in_scope(&class(None, None)));
    }
}
