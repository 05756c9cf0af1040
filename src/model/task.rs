//! Task and project records as fetched from the store.

use crate::model::due::Due;
use serde::{Deserialize, Serialize};

/// One Todoist item.
///
/// Field names follow the sync API (`content`, `parent_id`, `child_order`,
/// `checked`, `labels`) so a dump of the real store deserializes directly.
/// The mode is derived from `content` at tree-build time and never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique, stable identifier.
    pub id: String,
    /// Display name. May end with a mode marker and a `{…}` due hint.
    pub content: String,
    /// The project this task belongs to.
    pub project_id: String,
    /// Parent task, or `None` for a top-level task of the project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Sibling position as kept by the store. Serial mode treats this
    /// order as the intended execution order.
    #[serde(default)]
    pub child_order: i64,
    /// Due entry, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<Due>,
    /// Completion flag.
    #[serde(default)]
    pub checked: bool,
    /// Applied label names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

impl Task {
    /// Whether the task's due date is recurring.
    pub fn is_recurring(&self) -> bool {
        self.due.as_ref().is_some_and(|due| due.is_recurring)
    }

    /// Whether the task carries the given label.
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }
}

/// One Todoist project: the root container of a task tree.
///
/// A project follows the same mode-marker rule as a task but carries no
/// due date or labels of its own and is never itself activated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Unique, stable identifier.
    pub id: String,
    /// Display name, same marker rule as task content.
    pub name: String,
    /// Position among projects. Not used by the rules, kept for round-trips.
    #[serde(default)]
    pub child_order: i64,
    /// Archived projects are skipped entirely.
    #[serde(default)]
    pub is_archived: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::due::DueDate;
    use chrono::NaiveDate;

    #[test]
    fn test_is_recurring() {
        let mut task = Task {
            id: "1".to_string(),
            content: "Water plants".to_string(),
            project_id: "p1".to_string(),
            parent_id: None,
            child_order: 0,
            due: None,
            checked: false,
            labels: vec![],
        };
        assert!(!task.is_recurring());

        task.due = Some(Due {
            date: DueDate::Day(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()),
            is_recurring: true,
            string: Some("every day".to_string()),
            timezone: None,
        });
        assert!(task.is_recurring());
    }

    #[test]
    fn test_task_toml_defaults() {
        let toml_str = r#"
            id = "42"
            content = "Buy milk"
            project_id = "p1"
        "#;
        let task: Task = toml::from_str(toml_str).unwrap();
        assert_eq!(task.parent_id, None);
        assert_eq!(task.child_order, 0);
        assert!(task.due.is_none());
        assert!(!task.checked);
        assert!(task.labels.is_empty());
    }
}
