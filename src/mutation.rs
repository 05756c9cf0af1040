//! Mutation intents produced by a run.
//!
//! The engine performs no I/O itself: every change it wants is expressed as
//! a [`Mutation`] keyed by task id, and the driver decides whether to print
//! the plan or commit it. Each mutation is independently idempotent, so a
//! partially applied run self-heals on the next pass.

use crate::model::Due;
use std::fmt;

/// One proposed change to a single task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Set the due entry of a task that has none.
    SetDue { id: String, due: Due },
    /// Clear the due entry.
    ClearDue { id: String },
    /// Add a label.
    AddLabel { id: String, label: String },
    /// Remove a label.
    RemoveLabel { id: String, label: String },
    /// Mark the task completed.
    Complete { id: String },
    /// Mark the task not completed.
    Uncomplete { id: String },
}

impl Mutation {
    /// The task this mutation applies to.
    pub fn task_id(&self) -> &str {
        match self {
            Mutation::SetDue { id, .. }
            | Mutation::ClearDue { id }
            | Mutation::AddLabel { id, .. }
            | Mutation::RemoveLabel { id, .. }
            | Mutation::Complete { id }
            | Mutation::Uncomplete { id } => id,
        }
    }
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mutation::SetDue { id, due } => match &due.string {
                Some(text) => write!(f, "task {}: set due date to {} ({})", id, due.date, text),
                None => write!(f, "task {}: set due date to {}", id, due.date),
            },
            Mutation::ClearDue { id } => write!(f, "task {}: clear due date", id),
            Mutation::AddLabel { id, label } => write!(f, "task {}: add label {}", id, label),
            Mutation::RemoveLabel { id, label } => {
                write!(f, "task {}: remove label {}", id, label)
            }
            Mutation::Complete { id } => write!(f, "task {}: complete", id),
            Mutation::Uncomplete { id } => write!(f, "task {}: uncomplete", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_display_forms() {
        let due = Due::on(NaiveDate::from_ymd_opt(2026, 3, 15).unwrap());
        assert_eq!(
            Mutation::SetDue {
                id: "7".to_string(),
                due,
            }
            .to_string(),
            "task 7: set due date to 2026-03-15"
        );
        assert_eq!(
            Mutation::AddLabel {
                id: "7".to_string(),
                label: "NoDate".to_string(),
            }
            .to_string(),
            "task 7: add label NoDate"
        );
    }

    #[test]
    fn test_task_id() {
        let m = Mutation::Complete { id: "9".to_string() };
        assert_eq!(m.task_id(), "9");
    }
}
