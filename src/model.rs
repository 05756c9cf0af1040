//! Domain model: tasks, projects, due dates, modes, and the fetched
//! snapshot they live in.

mod due;
mod mode;
mod snapshot;
mod task;

pub use due::{Due, DueDate};
pub use mode::{Mode, due_hint, parse_mode};
pub use snapshot::Snapshot;
pub use task::{Project, Task};

use chrono::{Local, NaiveDateTime};

/// The current local wall-clock time.
///
/// All due comparisons in one run use a single `now` captured by the driver,
/// so a run is internally consistent even if it straddles midnight.
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}
