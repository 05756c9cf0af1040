//! Mode markers embedded in task and project names.
//!
//! A name ending in the serial marker (default `(-)`) puts the node in
//! serial mode, the parallel marker (default `(=)`) in parallel mode, and
//! anything else is plain. The marker is informational only and is never
//! stripped from the displayed name.

use serde::{Deserialize, Serialize};

/// How a task or project coordinates the activation of its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// All children are worked on together.
    Parallel,
    /// Children are worked on one at a time, in stored order.
    Serial,
    /// No marker: the node does not coordinate its children.
    Plain,
}

impl Mode {
    /// Whether the node carries an explicit parallel or serial marker.
    pub fn is_tagged(self) -> bool {
        !matches!(self, Mode::Plain)
    }
}

/// Derive the mode of a name from its trailing marker.
///
/// Trailing whitespace and a trailing `{…}` due hint are ignored before the
/// marker check. Absence of a marker always yields [`Mode::Plain`]; there is
/// no error case.
pub fn parse_mode(name: &str, parallel_suffix: &str, serial_suffix: &str) -> Mode {
    let name = strip_due_hint(name).trim_end();
    if !serial_suffix.is_empty() && name.ends_with(serial_suffix) {
        Mode::Serial
    } else if !parallel_suffix.is_empty() && name.ends_with(parallel_suffix) {
        Mode::Parallel
    } else {
        Mode::Plain
    }
}

/// Extract the due hint from a trailing `{…}` group, if any.
///
/// The hint is the due text used when the task is activated, e.g.
/// `"Water plants (=) {3 days}"` activates with due text `3 days` instead
/// of `today`.
pub fn due_hint(name: &str) -> Option<&str> {
    let trimmed = name.trim_end();
    if !trimmed.ends_with('}') {
        return None;
    }
    let open = trimmed.rfind('{')?;
    let hint = trimmed[open + 1..trimmed.len() - 1].trim();
    if hint.is_empty() { None } else { Some(hint) }
}

/// Remove a trailing `{…}` due hint so the marker check sees the name end.
fn strip_due_hint(name: &str) -> &str {
    let trimmed = name.trim_end();
    if trimmed.ends_with('}') {
        if let Some(open) = trimmed.rfind('{') {
            return &trimmed[..open];
        }
    }
    trimmed
}
