//! Setup checklist derived from resource counts.

use models::checklist::{ChecklistItem, ChecklistProgress, ResourceCounts};

/// Recompute the checklist; call again whenever the counts change.
pub fn derive_checklist(counts: &ResourceCounts) -> Vec<ChecklistItem> {
    vec![
        ChecklistItem { id: "add-account", label: "Add an account", done: counts.accounts > 0 },
        ChecklistItem { id: "create-category", label: "Create a category", done: counts.categories > 0 },
        ChecklistItem { id: "set-budget", label: "Set a budget", done: counts.budgets > 0 },
        ChecklistItem { id: "track-subscription", label: "Track a subscription", done: counts.subscriptions > 0 },
    ]
}

pub fn progress(items: &[ChecklistItem]) -> ChecklistProgress {
    ChecklistProgress { done: items.iter().filter(|i| i.done).count(), total: items.len() }
}
