//! Domain errors for the turnover engine.
//!
//! Three families matter to callers: client-side validation (no request
//! was sent), transport failures (no response received), and remote
//! failures (the server answered with a non-success status).

use thiserror::Error;

use super::models::staff::Role;
use super::models::task::{TaskAction, TaskId, TaskStatus};

/// Errors surfaced by the engine to its UI layer.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("invalid transition: cannot {action} a task in {from}")]
    InvalidTransition { from: TaskStatus, action: TaskAction },

    #[error("role {role} is not allowed to {action} this task")]
    RoleDenied { action: TaskAction, role: Role },

    #[error("precondition failed: {0}")]
    PreconditionFailed(String),

    #[error("checklists are not finished ({percent:.0}% done)")]
    ChecklistIncomplete { percent: f64 },

    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    #[error("another action is in flight: {scope}")]
    Busy { scope: String },

    #[error("no server response: {0}")]
    Transport(String),

    #[error("server error ({status}): {message}")]
    Remote { status: u16, message: String },
}

pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    /// True when the failure happened before any request was sent.
    pub fn is_client_side(&self) -> bool {
        !matches!(self, Self::Transport(_) | Self::Remote { .. })
    }
}
