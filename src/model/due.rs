//! Due date handling.
//!
//! Todoist stores a due date either as a bare date (`YYYY-MM-DD`) or as a
//! local date-time (`YYYY-MM-DDTHH:MM:SS`). Both forms round-trip through
//! the snapshot file unchanged.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The stored `date` field of a due entry: date-only or date+time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DueDate {
    /// A whole-day due date.
    Day(NaiveDate),
    /// A due date with a local wall-clock time.
    Moment(NaiveDateTime),
}

impl DueDate {
    /// Whether the due point has been reached at `now`.
    ///
    /// A date-only due is considered reached from midnight of that day,
    /// so a task due "today" counts as due for the whole day.
    pub fn is_past(&self, now: NaiveDateTime) -> bool {
        match self {
            DueDate::Day(date) => *date <= now.date(),
            DueDate::Moment(moment) => *moment <= now,
        }
    }
}

impl FromStr for DueDate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(moment) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
            return Ok(DueDate::Moment(moment));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(DueDate::Day)
            .map_err(|_| {
                format!(
                    "Invalid due date '{}'. Use YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS",
                    s
                )
            })
    }
}

impl TryFrom<String> for DueDate {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DueDate> for String {
    fn from(value: DueDate) -> Self {
        value.to_string()
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DueDate::Day(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            DueDate::Moment(moment) => write!(f, "{}", moment.format("%Y-%m-%dT%H:%M:%S")),
        }
    }
}

/// A task's due entry, mirroring the Todoist sync API shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Due {
    /// The due point.
    pub date: DueDate,
    /// True when the due date repeats (e.g. "every day"). The store owns
    /// the advancement to the next occurrence; this crate never computes it.
    #[serde(default)]
    pub is_recurring: bool,
    /// The human due text the store parsed the date from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string: Option<String>,
    /// Optional IANA timezone name. Carried through unchanged; comparisons
    /// use the local wall clock.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl Due {
    /// A plain, non-recurring due entry on the given day.
    pub fn on(date: NaiveDate) -> Self {
        Self {
            date: DueDate::Day(date),
            is_recurring: false,
            string: None,
            timezone: None,
        }
    }

    /// Whether the due point has been reached at `now`.
    pub fn is_past(&self, now: NaiveDateTime) -> bool {
        self.date.is_past(now)
    }
}
