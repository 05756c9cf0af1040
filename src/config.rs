//! Rule configuration for a run.

use crate::model::{Mode, parse_mode};

/// The markers and labels the rules recognize.
#[derive(Debug, Clone)]
pub struct UpdaterConfig {
    /// Label that marks an inactive task owned by the rules.
    pub nodate_label: String,
    /// Trailing marker for parallel mode.
    pub parallel_suffix: String,
    /// Trailing marker for serial mode.
    pub serial_suffix: String,
    /// Label prefixes that mean "already scheduled elsewhere": a matching
    /// label suppresses the automatic due date on an active task.
    pub next_prefixes: Vec<String>,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            nodate_label: "NoDate".to_string(),
            parallel_suffix: "(=)".to_string(),
            serial_suffix: "(-)".to_string(),
            next_prefixes: vec!["::".to_string()],
        }
    }
}

impl UpdaterConfig {
    /// Derive the mode of a task or project name.
    pub fn mode_of(&self, name: &str) -> Mode {
        parse_mode(name, &self.parallel_suffix, &self.serial_suffix)
    }

    /// Whether a label matches any configured "next" prefix.
    pub fn is_next_label(&self, label: &str) -> bool {
        self.next_prefixes
            .iter()
            .any(|prefix| !prefix.is_empty() && label.starts_with(prefix))
    }
}
