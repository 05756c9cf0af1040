//! The full fetched state of the store for one run.

use crate::model::task::{Project, Task};
use crate::mutation::Mutation;
use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

/// Every project and task fetched from the store.
///
/// A `Vec` keeps the store's ordering, which serial mode relies on, and
/// produces stable TOML for predictable diffs (same reasoning as ordered
/// storage elsewhere in this codebase).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// All projects, archived ones included.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<Project>,
    /// All tasks across all projects, in store order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<Task>,
}

impl Snapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a task by id.
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Find a task by id, mutably.
    pub fn task_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Find a project by id.
    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Apply one mutation to the snapshot in place.
    ///
    /// This is the local stand-in for committing the change to the store.
    /// Applying a mutation twice leaves the same state as applying it once.
    ///
    /// # Errors
    /// Fails when the mutation names a task that does not exist.
    pub fn apply(&mut self, mutation: &Mutation) -> Result<()> {
        let task = self
            .task_mut(mutation.task_id())
            .ok_or_else(|| anyhow!("mutation targets unknown task {}", mutation.task_id()))?;
        match mutation {
            Mutation::SetDue { due, .. } => task.due = Some(due.clone()),
            Mutation::ClearDue { .. } => task.due = None,
            Mutation::AddLabel { label, .. } => {
                if !task.has_label(label) {
                    task.labels.push(label.clone());
                }
            }
            Mutation::RemoveLabel { label, .. } => task.labels.retain(|l| l != label),
            Mutation::Complete { .. } => task.checked = true,
            Mutation::Uncomplete { .. } => task.checked = false,
        }
        Ok(())
    }
}
