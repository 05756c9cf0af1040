//! Todoist actionability updater.
//!
//! Keeps a Todoist task hierarchy in a consistent "actionability" state by
//! applying rules embedded in task and project names. A name ending in
//! `(=)` makes its children parallel (all actionable together); a name
//! ending in `(-)` makes them serial (one at a time, in stored order).
//! Active leaf tasks get a due date, inactive ones get the NoDate label
//! instead, and recurring parallel/serial tasks restart their subtask
//! cycle when they come due.
//!
//! # Architecture
//!
//! The library follows a 3-layer layout:
//! - **Driver layer**: [`Updater`] - loads a snapshot, runs the engine,
//!   applies or prints the resulting mutations
//! - **Engine layer**: `engine` module - tree building, recurrence
//!   rollover, activation resolution, state reconciliation
//! - **Persistence layer**: `storage` module - TOML snapshot files
//!
//! # Example
//!
//! ```no_run
//! use todoist_updater::{Updater, UpdaterConfig};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let updater = Updater::new("snapshot.toml", UpdaterConfig::default());
//!     for mutation in updater.plan()? {
//!         println!("{mutation}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod engine;
pub mod model;
pub mod mutation;
pub mod storage;

use anyhow::Result;
use log::{error, info};

// Re-export commonly used types
pub use config::UpdaterConfig;
pub use engine::{ResolvedNode, TreeError, plan};
pub use model::{Due, DueDate, Mode, Project, Snapshot, Task, local_now};
pub use mutation::Mutation;
pub use storage::Storage;

/// The sync driver: owns the storage and configuration for one snapshot
/// file and runs the fetch → compute → mutate cycle against it.
pub struct Updater {
    storage: Storage,
    config: UpdaterConfig,
}

/// What one executed run did.
#[derive(Debug)]
pub struct RunSummary {
    /// Every mutation the engine proposed.
    pub mutations: Vec<Mutation>,
    /// How many were applied successfully.
    pub applied: usize,
    /// How many failed to apply. Failures are logged per task and never
    /// abort the rest of the run; the next run self-heals.
    pub failed: usize,
}

impl Updater {
    /// Create an updater over the given snapshot file.
    pub fn new(storage_path: impl AsRef<std::path::Path>, config: UpdaterConfig) -> Self {
        Self {
            storage: Storage::new(storage_path),
            config,
        }
    }

    /// Compute the mutation plan without changing anything.
    ///
    /// # Errors
    /// Fails on I/O or parse errors, or when the snapshot is structurally
    /// broken (dangling parent, parent cycle, unknown project).
    pub fn plan(&self) -> Result<Vec<Mutation>> {
        let snapshot = self.storage.load()?;
        let mutations = engine::plan(&snapshot, &self.config, model::local_now())?;
        Ok(mutations)
    }

    /// Compute the plan, apply it to the snapshot, and save the result.
    ///
    /// A structural error aborts before anything is written. A failure to
    /// apply one mutation is logged and skipped; every mutation is keyed by
    /// its own task id and independently idempotent, so the remaining ones
    /// still apply cleanly.
    pub fn run(&self) -> Result<RunSummary> {
        let mut snapshot = self.storage.load()?;
        let mutations = engine::plan(&snapshot, &self.config, model::local_now())?;
        if mutations.is_empty() {
            info!("nothing to do, skipping save");
            return Ok(RunSummary {
                mutations,
                applied: 0,
                failed: 0,
            });
        }

        let mut applied = 0;
        let mut failed = 0;
        for mutation in &mutations {
            match snapshot.apply(mutation) {
                Ok(()) => applied += 1,
                Err(err) => {
                    error!("failed to apply '{}': {}", mutation, err);
                    failed += 1;
                }
            }
        }
        self.storage.save(&snapshot)?;
        info!("applied {} mutation(s), {} failed", applied, failed);
        Ok(RunSummary {
            mutations,
            applied,
            failed,
        })
    }
}
