//! Reconciles resolved activation state with stored due dates and labels.
//!
//! The outcome for every owned, not-completed task:
//! - active leaf: has a due date (today unless the name carries a `{…}`
//!   hint or the task bears a "next" label) and no NoDate label;
//! - inactive (including every tagged non-leaf): no due date and the
//!   NoDate label present.
//!
//! Only the minimal set of mutations to reach that state is emitted, so a
//! second run over already-correct state proposes nothing. Unowned tasks
//! are never touched, whatever their state.

use crate::config::UpdaterConfig;
use crate::engine::activation::ResolvedNode;
use crate::engine::recurrence::RolloverOverlay;
use crate::model::{Due, Snapshot, due_hint};
use crate::mutation::Mutation;
use chrono::NaiveDate;
use log::debug;

/// Compute the mutations that bring stored state in line with the
/// resolution. Performs no I/O.
pub fn reconcile(
    resolved: &[ResolvedNode],
    snapshot: &Snapshot,
    config: &UpdaterConfig,
    overlay: &RolloverOverlay,
    today: NaiveDate,
) -> Vec<Mutation> {
    let mut mutations = Vec::new();
    for node in resolved {
        if !node.owned {
            continue;
        }
        let task = &snapshot.tasks[node.task];
        let due = overlay.due_of(task);
        let has_nodate = task.has_label(&config.nodate_label);

        if node.active {
            let externally_scheduled = task.labels.iter().any(|l| config.is_next_label(l));
            if due.is_none() && !externally_scheduled {
                // A due date the user already chose is never clobbered;
                // only the missing one is filled in.
                debug!("task {}: activating with a due date", task.id);
                let mut new_due = Due::on(today);
                new_due.string = due_hint(&task.content).map(str::to_string);
                mutations.push(Mutation::SetDue {
                    id: task.id.clone(),
                    due: new_due,
                });
            }
            if has_nodate {
                mutations.push(Mutation::RemoveLabel {
                    id: task.id.clone(),
                    label: config.nodate_label.clone(),
                });
            }
        } else {
            match due {
                // A recurring schedule belongs to the store; clearing it
                // would kill the rollover it feeds. Leave the task alone.
                Some(due) if due.is_recurring => {}
                Some(_) => {
                    debug!("task {}: deactivating, clearing due date", task.id);
                    mutations.push(Mutation::ClearDue {
                        id: task.id.clone(),
                    });
                    if !has_nodate {
                        mutations.push(Mutation::AddLabel {
                            id: task.id.clone(),
                            label: config.nodate_label.clone(),
                        });
                    }
                }
                None => {
                    if !has_nodate {
                        mutations.push(Mutation::AddLabel {
                            id: task.id.clone(),
                            label: config.nodate_label.clone(),
                        });
                    }
                }
            }
        }
    }
    mutations
}
