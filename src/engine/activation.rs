//! The activation resolver.
//!
//! A single depth-first walk per project tree decides, for every task,
//! whether it is active (to be worked on now), whether it is a leaf for
//! activation purposes, and whether the rules own it at all. The walk
//! carries two booleans downward: the inherited activation signal and
//! whether an unbroken parallel/serial ancestor chain reaches this node.
//!
//! Rules, in precedence order:
//! 1. A node is a leaf when it is plain, or tagged with zero children.
//! 2. A leaf's active status is the inherited signal, directly.
//! 3. A tagged non-leaf is itself forced inactive but derives its
//!    children's signals: parallel passes its own signal to every child;
//!    serial grants it to the first child that still blocks advancement
//!    and `false` to everyone else.
//!
//! Plain nodes are opaque units: the resolver does not manage their
//! children. A tagged node nested beneath a plain node restarts its own
//! activation context, seeded by the reachability boolean passed through
//! the plain node, and ownership does not cross the plain boundary.

use crate::engine::recurrence::RolloverOverlay;
use crate::engine::tree::{ProjectTree, TaskNode};
use crate::model::{Mode, Snapshot, Task};
use log::debug;

/// Per-task result of the walk. Recomputed every run, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedNode {
    /// Index of the task in the snapshot.
    pub task: usize,
    /// Whether the task should be worked on now.
    pub active: bool,
    /// Whether the task counted as a leaf under rule 1.
    pub leaf: bool,
    /// Whether the rules own this task's due-date/label state.
    pub owned: bool,
}

/// Resolve one project tree.
///
/// Completed tasks (per the rollover overlay) are skipped entirely: they
/// still take part in serial sequencing, but their stored state stays
/// untouched until a rollover revives them.
pub fn resolve_tree(
    tree: &ProjectTree,
    snapshot: &Snapshot,
    overlay: &RolloverOverlay,
) -> Vec<ResolvedNode> {
    let mut resolved = Vec::new();
    // The project seeds its top-level tasks exactly like any non-leaf
    // node would: its own signal is `true` and is never recorded, since a
    // project has no due-date or label state of its own.
    let signals = child_signals(tree.mode, true, &tree.roots, snapshot, overlay);
    let owned_seed = tree.mode.is_tagged();
    for (root, signal) in tree.roots.iter().zip(signals) {
        visit(root, signal, owned_seed, snapshot, overlay, &mut resolved);
    }
    resolved
}

fn visit(
    node: &TaskNode,
    signal: bool,
    owned_in: bool,
    snapshot: &Snapshot,
    overlay: &RolloverOverlay,
    resolved: &mut Vec<ResolvedNode>,
) {
    let task = &snapshot.tasks[node.task];
    // Completed tasks are the store's business, except a task this run's
    // rollover completed: its restarted cycle is resolved right away.
    if overlay.is_checked(task) && !overlay.was_rolled_over(task) {
        return;
    }

    let owned = owned_in || node.mode.is_tagged();
    let leaf = node.mode == Mode::Plain || node.children.is_empty();
    let active = signal && leaf;
    debug!(
        "task {}: mode {:?} active={} leaf={} owned={}",
        task.id, node.mode, active, leaf, owned
    );
    resolved.push(ResolvedNode {
        task: node.task,
        active,
        leaf,
        owned,
    });

    let signals = child_signals(node.mode, signal, &node.children, snapshot, overlay);
    for (child, child_signal) in node.children.iter().zip(signals) {
        // Ownership crosses only tagged nodes; a plain parent leaves its
        // children unmanaged unless they carry their own marker.
        let child_owned = node.mode.is_tagged();
        visit(child, child_signal, child_owned, snapshot, overlay, resolved);
    }
}

/// Compute the activation signal each child inherits from its parent.
fn child_signals(
    mode: Mode,
    signal: bool,
    children: &[TaskNode],
    snapshot: &Snapshot,
    overlay: &RolloverOverlay,
) -> Vec<bool> {
    match mode {
        // A plain parent is an opaque unit: the reachability boolean passes
        // through so nested tagged subtrees can root themselves, but plain
        // descendants stay unmanaged.
        Mode::Plain => vec![signal; children.len()],
        Mode::Parallel => vec![signal; children.len()],
        Mode::Serial => {
            let mut granted = false;
            children
                .iter()
                .map(|child| {
                    let task = &snapshot.tasks[child.task];
                    let grant = !granted && blocks_advance(task, overlay);
                    if grant {
                        granted = true;
                    }
                    grant && signal
                })
                .collect()
        }
    }
}

/// Whether a child still holds up a serial sequence.
///
/// A recurring task is never treated as fully complete here, even right
/// after its rollover completed it: rollover and activation run within the
/// same pass, and promoting the next sibling on a freshly rolled-over cycle
/// would jump the sequence.
fn blocks_advance(task: &Task, overlay: &RolloverOverlay) -> bool {
    !overlay.is_checked(task) || task.is_recurring()
}
