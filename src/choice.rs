//! Selectable entities offered in list prompts.

use std::fmt;

/// Label of the entry appended to every manager list.
pub const NO_MANAGER: &str = "No Manager";

/// A row offered for selection: its primary key and a human-readable label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub id: i64,
    pub label: String,
}

impl Choice {
    pub fn new(id: i64, label: impl Into<String>) -> Self {
        Choice {
            id,
            label: label.into(),
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.id, self.label)
    }
}

/// Result of a manager prompt. `None` means the employee reports to nobody.
pub type ManagerChoice = Option<Choice>;

/// Manager id to store for a manager selection.
pub fn manager_id(choice: &ManagerChoice) -> Option<i64> {
    choice.as_ref().map(|c| c.id)
}
