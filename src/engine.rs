//! The core pipeline: tree building, recurrence rollover, activation
//! resolution, and state reconciliation.
//!
//! One run is a single synchronous pass over a snapshot. Trees are built
//! first and any structural error aborts before a mutation exists; then
//! each tree runs rollover to completion, is resolved against the
//! post-rollover state, and has its due-date/label fixes computed. Rollover
//! mutations for a tree are ordered before that tree's reconcile mutations,
//! since completion state feeds leaf/active determination.

mod activation;
mod reconcile;
mod recurrence;
mod tree;

pub use activation::{ResolvedNode, resolve_tree};
pub use reconcile::reconcile;
pub use recurrence::{RolloverOverlay, roll_over};
pub use tree::{ProjectTree, TaskNode, TreeError, build_forest};

use crate::config::UpdaterConfig;
use crate::model::Snapshot;
use crate::mutation::Mutation;
use chrono::NaiveDateTime;

/// Compute the full mutation plan for one snapshot at one instant.
///
/// # Errors
/// Returns a [`TreeError`] when the snapshot is structurally broken; no
/// mutations are produced in that case.
pub fn plan(
    snapshot: &Snapshot,
    config: &UpdaterConfig,
    now: NaiveDateTime,
) -> Result<Vec<Mutation>, TreeError> {
    let forest = build_forest(snapshot, config)?;
    let mut mutations = Vec::new();
    for project_tree in &forest {
        let (mut rollover, overlay) = roll_over(project_tree, snapshot, now);
        let resolved = resolve_tree(project_tree, snapshot, &overlay);
        let mut fixes = reconcile(&resolved, snapshot, config, &overlay, now.date());
        mutations.append(&mut rollover);
        mutations.append(&mut fixes);
    }
    Ok(mutations)
}
