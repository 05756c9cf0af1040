//! Assembles the flat task list into one tree per project.
//!
//! The store hands us tasks with parent pointers and a `child_order`; this
//! module turns them into rooted trees with the mode derived once per node.
//! Any structural defect (dangling parent, cross-project parent, parent
//! cycle, unknown project) aborts the whole run before a single mutation is
//! computed: a partial tree must never produce partial due-date changes.

use crate::config::UpdaterConfig;
use crate::model::{Mode, Snapshot};
use log::debug;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Structural defect in the fetched data. Always fatal for the run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    /// A task's parent pointer names no task in the same project.
    #[error("task {task_id} references missing parent {parent_id}")]
    DanglingParent { task_id: String, parent_id: String },
    /// A task's parent chain loops back on itself.
    #[error("task {task_id} sits on a cyclic parent chain")]
    ParentCycle { task_id: String },
    /// A task names a project that does not exist.
    #[error("task {task_id} references missing project {project_id}")]
    UnknownProject { task_id: String, project_id: String },
}

/// One task in a built tree. Indices point into `Snapshot::tasks`.
#[derive(Debug)]
pub struct TaskNode {
    /// Index of the task in the snapshot.
    pub task: usize,
    /// Mode derived from the task name, computed once here.
    pub mode: Mode,
    /// Children in store order.
    pub children: Vec<TaskNode>,
}

/// One project's task tree. The index points into `Snapshot::projects`.
#[derive(Debug)]
pub struct ProjectTree {
    /// Index of the project in the snapshot.
    pub project: usize,
    /// Mode derived from the project name.
    pub mode: Mode,
    /// Top-level tasks in store order.
    pub roots: Vec<TaskNode>,
}

/// Build the forest of non-archived project trees.
///
/// Validates every parent and project reference in the snapshot first, even
/// for archived projects, so stale data is rejected up front.
pub fn build_forest(
    snapshot: &Snapshot,
    config: &UpdaterConfig,
) -> Result<Vec<ProjectTree>, TreeError> {
    let project_index: HashMap<&str, usize> = snapshot
        .projects
        .iter()
        .enumerate()
        .map(|(idx, p)| (p.id.as_str(), idx))
        .collect();
    let task_index: HashMap<&str, usize> = snapshot
        .tasks
        .iter()
        .enumerate()
        .map(|(idx, t)| (t.id.as_str(), idx))
        .collect();

    validate_references(snapshot, &project_index, &task_index)?;

    // Group children by parent id and top-level tasks by project id,
    // keeping the store's sibling order.
    let mut children: HashMap<&str, Vec<usize>> = HashMap::new();
    let mut top_level: HashMap<&str, Vec<usize>> = HashMap::new();
    for (idx, task) in snapshot.tasks.iter().enumerate() {
        match task.parent_id.as_deref() {
            Some(parent_id) => children.entry(parent_id).or_default().push(idx),
            None => top_level
                .entry(task.project_id.as_str())
                .or_default()
                .push(idx),
        }
    }
    for siblings in children.values_mut().chain(top_level.values_mut()) {
        siblings.sort_by_key(|&idx| {
            let task = &snapshot.tasks[idx];
            (task.child_order, task.id.as_str())
        });
    }

    let mut forest = Vec::new();
    for (project_idx, project) in snapshot.projects.iter().enumerate() {
        if project.is_archived {
            debug!("project {} is archived, skipping", project.name);
            continue;
        }
        let mode = config.mode_of(&project.name);
        let roots = top_level
            .get(project.id.as_str())
            .map(|indices| {
                indices
                    .iter()
                    .map(|&idx| build_node(idx, snapshot, config, &children))
                    .collect()
            })
            .unwrap_or_default();
        debug!("project {}: mode {:?}", project.name, mode);
        forest.push(ProjectTree {
            project: project_idx,
            mode,
            roots,
        });
    }
    Ok(forest)
}

fn build_node(
    idx: usize,
    snapshot: &Snapshot,
    config: &UpdaterConfig,
    children: &HashMap<&str, Vec<usize>>,
) -> TaskNode {
    let task = &snapshot.tasks[idx];
    let nodes = children
        .get(task.id.as_str())
        .map(|indices| {
            indices
                .iter()
                .map(|&child| build_node(child, snapshot, config, children))
                .collect()
        })
        .unwrap_or_default();
    TaskNode {
        task: idx,
        mode: config.mode_of(&task.content),
        children: nodes,
    }
}

/// Reject dangling parents, cross-project parents, unknown projects and
/// cyclic parent chains.
fn validate_references(
    snapshot: &Snapshot,
    project_index: &HashMap<&str, usize>,
    task_index: &HashMap<&str, usize>,
) -> Result<(), TreeError> {
    for task in &snapshot.tasks {
        if !project_index.contains_key(task.project_id.as_str()) {
            return Err(TreeError::UnknownProject {
                task_id: task.id.clone(),
                project_id: task.project_id.clone(),
            });
        }
        let mut seen: HashSet<&str> = HashSet::new();
        seen.insert(task.id.as_str());
        let mut current = task;
        while let Some(parent_id) = current.parent_id.as_deref() {
            let parent = match task_index.get(parent_id) {
                Some(&idx) => &snapshot.tasks[idx],
                None => {
                    return Err(TreeError::DanglingParent {
                        task_id: current.id.clone(),
                        parent_id: parent_id.to_string(),
                    });
                }
            };
            // A parent in another project means the fetch was stale or
            // partial; treat it like a dangling reference.
            if parent.project_id != current.project_id {
                return Err(TreeError::DanglingParent {
                    task_id: current.id.clone(),
                    parent_id: parent_id.to_string(),
                });
            }
            if !seen.insert(parent_id) {
                return Err(TreeError::ParentCycle {
                    task_id: task.id.clone(),
                });
            }
            current = parent;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Project, Task};

    fn project(id: &str, name: &str) -> Project {
        Project {
            id: id.to_string(),
            name: name.to_string(),
            child_order: 0,
            is_archived: false,
        }
    }

    fn task(id: &str, content: &str, parent: Option<&str>, order: i64) -> Task {
        Task {
            id: id.to_string(),
            content: content.to_string(),
            project_id: "p1".to_string(),
            parent_id: parent.map(str::to_string),
            child_order: order,
            due: None,
            checked: false,
            labels: vec![],
        }
    }

    #[test]
    fn test_builds_ordered_tree() {
        let snapshot = Snapshot {
            projects: vec![project("p1", "Home (-)")],
            tasks: vec![
                task("b", "Second", None, 2),
                task("a", "First (=)", None, 1),
                task("a2", "Child two", Some("a"), 2),
                task("a1", "Child one", Some("a"), 1),
            ],
        };
        let forest = build_forest(&snapshot, &UpdaterConfig::default()).unwrap();
        assert_eq!(forest.len(), 1);
        let tree = &forest[0];
        assert_eq!(tree.mode, Mode::Serial);
        let root_ids: Vec<&str> = tree
            .roots
            .iter()
            .map(|n| snapshot.tasks[n.task].id.as_str())
            .collect();
        assert_eq!(root_ids, vec!["a", "b"]);
        assert_eq!(tree.roots[0].mode, Mode::Parallel);
        let child_ids: Vec<&str> = tree.roots[0]
            .children
            .iter()
            .map(|n| snapshot.tasks[n.task].id.as_str())
            .collect();
        assert_eq!(child_ids, vec!["a1", "a2"]);
    }

    #[test]
    fn test_archived_project_is_skipped() {
        let mut archived = project("p1", "Old stuff");
        archived.is_archived = true;
        let snapshot = Snapshot {
            projects: vec![archived],
            tasks: vec![task("t", "Task", None, 1)],
        };
        let forest = build_forest(&snapshot, &UpdaterConfig::default()).unwrap();
        assert!(forest.is_empty());
    }

    #[test]
    fn test_dangling_parent_is_fatal() {
        let snapshot = Snapshot {
            projects: vec![project("p1", "Home")],
            tasks: vec![task("t", "Task", Some("ghost"), 1)],
        };
        let err = build_forest(&snapshot, &UpdaterConfig::default()).unwrap_err();
        assert_eq!(
            err,
            TreeError::DanglingParent {
                task_id: "t".to_string(),
                parent_id: "ghost".to_string(),
            }
        );
    }

    #[test]
    fn test_parent_cycle_is_fatal() {
        let snapshot = Snapshot {
            projects: vec![project("p1", "Home")],
            tasks: vec![
                task("x", "One", Some("y"), 1),
                task("y", "Two", Some("x"), 2),
            ],
        };
        let err = build_forest(&snapshot, &UpdaterConfig::default()).unwrap_err();
        assert!(matches!(err, TreeError::ParentCycle { .. }));
    }

    #[test]
    fn test_unknown_project_is_fatal() {
        let mut stray = task("t", "Task", None, 1);
        stray.project_id = "nope".to_string();
        let snapshot = Snapshot {
            projects: vec![project("p1", "Home")],
            tasks: vec![stray],
        };
        let err = build_forest(&snapshot, &UpdaterConfig::default()).unwrap_err();
        assert_eq!(
            err,
            TreeError::UnknownProject {
                task_id: "t".to_string(),
                project_id: "nope".to_string(),
            }
        );
    }

    #[test]
    fn test_cross_project_parent_is_dangling() {
        let mut other = task("o", "Other", None, 1);
        other.project_id = "p2".to_string();
        let snapshot = Snapshot {
            projects: vec![project("p1", "Home"), project("p2", "Work")],
            tasks: vec![other, task("t", "Task", Some("o"), 1)],
        };
        let err = build_forest(&snapshot, &UpdaterConfig::default()).unwrap_err();
        assert!(matches!(err, TreeError::DanglingParent { .. }));
    }
}
