//! Common test utilities for integration tests
#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use todoist_updater::{Due, Mutation, Project, Snapshot, Task, UpdaterConfig};

/// The fixed instant every engine test runs at.
pub fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, 15)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

/// The date part of [`fixed_now`].
pub fn today() -> NaiveDate {
    fixed_now().date()
}

pub fn project(id: &str, name: &str) -> Project {
    Project {
        id: id.to_string(),
        name: name.to_string(),
        child_order: 0,
        is_archived: false,
    }
}

pub fn task(id: &str, project_id: &str, parent: Option<&str>, order: i64, content: &str) -> Task {
    Task {
        id: id.to_string(),
        content: content.to_string(),
        project_id: project_id.to_string(),
        parent_id: parent.map(str::to_string),
        child_order: order,
        due: None,
        checked: false,
        labels: vec![],
    }
}

/// A non-recurring due entry parsed from `YYYY-MM-DD` or
/// `YYYY-MM-DDTHH:MM:SS`.
pub fn due_on(date: &str) -> Due {
    Due {
        date: date.parse().unwrap(),
        is_recurring: false,
        string: None,
        timezone: None,
    }
}

/// A recurring due entry.
pub fn recurring_due(date: &str) -> Due {
    Due {
        is_recurring: true,
        string: Some("every day".to_string()),
        ..due_on(date)
    }
}

/// Plan with the default config at the fixed instant.
pub fn plan(snapshot: &Snapshot) -> Vec<Mutation> {
    todoist_updater::plan(snapshot, &UpdaterConfig::default(), fixed_now()).unwrap()
}

/// Apply every mutation to the snapshot.
pub fn apply_all(snapshot: &mut Snapshot, mutations: &[Mutation]) {
    for mutation in mutations {
        snapshot.apply(mutation).unwrap();
    }
}

/// The mutations that target one task.
pub fn for_task<'a>(mutations: &'a [Mutation], id: &str) -> Vec<&'a Mutation> {
    mutations.iter().filter(|m| m.task_id() == id).collect()
}
