//! Checklist completion aggregation.
//!
//! Pure computation over caller-supplied interaction state; the result
//! gates the `complete` transition.

use std::collections::HashMap;

use crate::domain::models::checklist::{Checklist, ChecklistId, ChecklistProgress};

/// Aggregated completion state across a task's checklists.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressReport {
    /// Completion percentage per checklist id.
    pub per_checklist: HashMap<ChecklistId, f64>,
    /// Arithmetic mean of the per-checklist percentages. Zero when the
    /// task has no checklists, by convention.
    pub overall_percent: f64,
    /// Whether nothing blocks the `complete` transition.
    pub ready_to_complete: bool,
}

/// Compute per-checklist and overall completion.
///
/// A checklist with zero items is vacuously 100% complete. A task with
/// no checklists reports 0% overall but is ready to complete, since
/// there is nothing to block it. Checklists missing from `item_state`
/// count as having no completed items.
pub fn compute_progress(
    checklists: &[Checklist],
    item_state: &HashMap<ChecklistId, ChecklistProgress>,
) -> ProgressReport {
    if checklists.is_empty() {
        return ProgressReport {
            per_checklist: HashMap::new(),
            overall_percent: 0.0,
            ready_to_complete: true,
        };
    }

    let mut per_checklist = HashMap::with_capacity(checklists.len());
    let mut ready = true;
    let mut sum = 0.0;

    for checklist in checklists {
        let progress = item_state.get(&checklist.id).copied().unwrap_or(
            ChecklistProgress::new(u32::try_from(checklist.items.len()).unwrap_or(u32::MAX), 0),
        );
        let percent = if progress.total == 0 {
            100.0
        } else {
            f64::from(progress.completed.min(progress.total)) / f64::from(progress.total) * 100.0
        };
        ready &= progress.is_complete();
        sum += percent;
        per_checklist.insert(checklist.id, percent);
    }

    #[allow(clippy::cast_precision_loss)]
    let overall_percent = sum / checklists.len() as f64;

    ProgressReport {
        per_checklist,
        overall_percent,
        ready_to_complete: ready,
    }
}
