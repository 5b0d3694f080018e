use serde::{Deserialize, Serialize};

/// Raw resource counts supplied by the data-fetching layer.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResourceCounts {
    pub accounts: u32,
    pub categories: u32,
    pub budgets: u32,
    pub subscriptions: u32,
}

/// One row of the setup checklist.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ChecklistItem {
    pub id: &'static str,
    pub label: &'static str,
    pub done: bool,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChecklistProgress {
    pub done: usize,
    pub total: usize,
}

impl ChecklistProgress {
    /// An empty checklist counts as complete.
    pub fn is_complete(&self) -> bool {
        self.done >= self.total
    }

    /// Rounded-down completion percentage, 100 for an empty checklist.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        ((self.done.min(self.total) * 100) / self.total) as u8
    }
}
