//! Recurrence rollover.
//!
//! When a recurring parallel or serial task reaches its due time, its whole
//! cycle restarts: every completed descendant is uncompleted (and stripped
//! of any stale due date), then the recurring task itself is completed so
//! the store advances it to the next occurrence. This crate never computes
//! the next occurrence date itself.
//!
//! Rollover runs to completion for a whole tree before activation looks at
//! it. The two passes share a [`RolloverOverlay`] so activation sees the
//! post-rollover completion and due state instead of the stale fetch.

use crate::engine::tree::{ProjectTree, TaskNode};
use crate::model::{Due, Snapshot, Task};
use crate::mutation::Mutation;
use chrono::NaiveDateTime;
use log::debug;
use std::collections::{HashMap, HashSet};

/// Completion and due-date state as it will be once rollover mutations are
/// applied. Tasks the rollover did not touch fall through to the snapshot.
#[derive(Debug, Default)]
pub struct RolloverOverlay {
    checked: HashMap<String, bool>,
    cleared_due: HashSet<String>,
    rolled_over: HashSet<String>,
}

impl RolloverOverlay {
    /// Effective completion flag of a task after rollover.
    pub fn is_checked(&self, task: &Task) -> bool {
        self.checked.get(&task.id).copied().unwrap_or(task.checked)
    }

    /// Whether this run's rollover completed the task. Its subtree still
    /// gets resolved: the new cycle starts in the same run.
    pub fn was_rolled_over(&self, task: &Task) -> bool {
        self.rolled_over.contains(&task.id)
    }

    /// Effective due entry of a task after rollover.
    pub fn due_of<'a>(&self, task: &'a Task) -> Option<&'a Due> {
        if self.cleared_due.contains(&task.id) {
            None
        } else {
            task.due.as_ref()
        }
    }
}

/// Run the rollover pass over one project tree.
///
/// Returns the mutations to commit (descendant uncompletes strictly before
/// the recurring task's own complete) and the overlay for the activation
/// pass.
pub fn roll_over(
    tree: &ProjectTree,
    snapshot: &Snapshot,
    now: NaiveDateTime,
) -> (Vec<Mutation>, RolloverOverlay) {
    let mut mutations = Vec::new();
    let mut overlay = RolloverOverlay::default();
    for root in &tree.roots {
        visit(root, snapshot, now, false, &mut mutations, &mut overlay);
    }
    (mutations, overlay)
}

fn visit(
    node: &TaskNode,
    snapshot: &Snapshot,
    now: NaiveDateTime,
    reactivating: bool,
    mutations: &mut Vec<Mutation>,
    overlay: &mut RolloverOverlay,
) {
    let task = &snapshot.tasks[node.task];

    let triggers = !task.checked
        && node.mode.is_tagged()
        && task
            .due
            .as_ref()
            .is_some_and(|due| due.is_recurring && due.is_past(now));

    if reactivating && task.checked {
        debug!("task {}: uncompleting for recurrence restart", task.id);
        mutations.push(Mutation::Uncomplete {
            id: task.id.clone(),
        });
        if task.due.is_some() {
            mutations.push(Mutation::ClearDue {
                id: task.id.clone(),
            });
            overlay.cleared_due.insert(task.id.clone());
        }
        overlay.checked.insert(task.id.clone(), false);
    }

    let restart_subtree = reactivating || triggers;
    for child in &node.children {
        visit(child, snapshot, now, restart_subtree, mutations, overlay);
    }

    // Completing the recurring task comes after its descendants were
    // uncompleted, so the store never sees a fully-completed cycle vanish.
    if triggers {
        debug!("task {}: recurring cycle is due, completing", task.id);
        mutations.push(Mutation::Complete {
            id: task.id.clone(),
        });
        overlay.checked.insert(task.id.clone(), true);
        overlay.rolled_over.insert(task.id.clone());
    }
}
