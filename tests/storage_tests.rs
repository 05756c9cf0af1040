//! Snapshot persistence and the end-to-end driver.

mod common;

use common::*;
use todoist_updater::{Snapshot, Storage, Updater, UpdaterConfig};

#[test]
fn test_load_missing_file_yields_empty_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::new(dir.path().join("missing.toml"));
    let snapshot = storage.load().unwrap();
    assert!(snapshot.projects.is_empty());
    assert!(snapshot.tasks.is_empty());
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshot.toml");
    let storage = Storage::new(&path);

    let mut first = task("t1", "p1", None, 1, "Shower");
    first.due = Some(due_on("2026-03-15T07:30:00"));
    first.labels = vec!["::waiting".to_string()];
    let snapshot = Snapshot {
        projects: vec![project("p1", "Morning (-)")],
        tasks: vec![first, task("t2", "p1", None, 2, "Breakfast")],
    };
    storage.save(&snapshot).unwrap();

    let loaded = storage.load().unwrap();
    assert_eq!(loaded.projects.len(), 1);
    assert_eq!(loaded.projects[0].name, "Morning (-)");
    let t1 = loaded.task("t1").unwrap();
    assert_eq!(t1.due, Some(due_on("2026-03-15T07:30:00")));
    assert_eq!(t1.labels, vec!["::waiting"]);
    assert!(loaded.task("t2").unwrap().due.is_none());
}

#[test]
fn test_run_applies_the_plan_and_saves() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshot.toml");
    let storage = Storage::new(&path);
    let snapshot = Snapshot {
        projects: vec![project("p1", "Home")],
        tasks: vec![
            task("par", "p1", None, 1, "Chores (=)"),
            task("dishes", "p1", Some("par"), 1, "Do the dishes"),
            task("laundry", "p1", Some("par"), 2, "Laundry"),
        ],
    };
    storage.save(&snapshot).unwrap();

    let updater = Updater::new(&path, UpdaterConfig::default());
    let summary = updater.run().unwrap();
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.applied, summary.mutations.len());

    let saved = storage.load().unwrap();
    assert!(saved.task("par").unwrap().has_label("NoDate"));
    for id in ["dishes", "laundry"] {
        let t = saved.task(id).unwrap();
        assert!(t.due.is_some());
        assert!(!t.has_label("NoDate"));
    }

    // The applied state is a fixed point: a second run saves nothing new.
    let summary = updater.run().unwrap();
    assert!(summary.mutations.is_empty());
}

#[test]
fn test_plan_fails_on_structurally_broken_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshot.toml");
    let snapshot = Snapshot {
        projects: vec![project("p1", "Home")],
        tasks: vec![task("orphan", "p1", Some("ghost"), 1, "Orphan")],
    };
    Storage::new(&path).save(&snapshot).unwrap();

    let updater = Updater::new(&path, UpdaterConfig::default());
    assert!(updater.plan().is_err());
    // And run() refuses to touch the file.
    assert!(updater.run().is_err());
}

#[test]
fn test_custom_markers_and_label() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshot.toml");
    let snapshot = Snapshot {
        projects: vec![project("p1", "Home")],
        tasks: vec![
            task("par", "p1", None, 1, "Chores //p"),
            task("dishes", "p1", Some("par"), 1, "Do the dishes"),
        ],
    };
    Storage::new(&path).save(&snapshot).unwrap();

    let config = UpdaterConfig {
        nodate_label: "Someday".to_string(),
        parallel_suffix: "//p".to_string(),
        serial_suffix: "//s".to_string(),
        ..Default::default()
    };
    let updater = Updater::new(&path, config);
    updater.run().unwrap();

    let saved = Storage::new(&path).load().unwrap();
    assert!(saved.task("par").unwrap().has_label("Someday"));
    assert!(saved.task("dishes").unwrap().due.is_some());
}
