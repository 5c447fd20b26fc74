//! Engine-wide serialization of mutating actions.
//!
//! At most one mutation is in flight at a time, mirroring a board UI
//! that disables every task button while any action or modal is open.
//! The gate is deliberately coarse: engine-wide, not per-task.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::NaiveDate;

use crate::domain::errors::{EngineError, EngineResult};
use crate::domain::models::task::{TaskAction, TaskId};

/// The logical mutation currently holding the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionScope {
    Transition { task_id: TaskId, action: TaskAction },
    AssignOne { task_id: TaskId },
    BulkAssign { count: usize },
    Generate { date: NaiveDate },
    ChecklistEdit { task_id: TaskId },
}

impl fmt::Display for ActionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transition { task_id, action } => write!(f, "{action} task {task_id}"),
            Self::AssignOne { task_id } => write!(f, "assign task {task_id}"),
            Self::BulkAssign { count } => write!(f, "bulk-assign {count} tasks"),
            Self::Generate { date } => write!(f, "generate tasks for {date}"),
            Self::ChecklistEdit { task_id } => write!(f, "edit checklists of task {task_id}"),
        }
    }
}

/// Admits at most one mutating action at a time.
///
/// `try_begin` fails fast with [`EngineError::Busy`] instead of queuing;
/// the caller re-presents the command to the user rather than silently
/// retrying. The returned guard releases the gate when dropped, on
/// error paths included.
#[derive(Clone, Default)]
pub struct ActionGate {
    current: Arc<Mutex<Option<ActionScope>>>,
}

impl ActionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_begin(&self, scope: ActionScope) -> EngineResult<ActionGuard> {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(active) = *current {
            return Err(EngineError::Busy { scope: active.to_string() });
        }
        *current = Some(scope);
        Ok(ActionGuard { slot: Arc::clone(&self.current) })
    }

    pub fn is_busy(&self) -> bool {
        self.current_scope().is_some()
    }

    pub fn current_scope(&self) -> Option<ActionScope> {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Releases the gate on drop.
#[derive(Debug)]
pub struct ActionGuard {
    slot: Arc<Mutex<Option<ActionScope>>>,
}

impl Drop for ActionGuard {
    fn drop(&mut self) {
        let mut current = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        *current = None;
    }
}
