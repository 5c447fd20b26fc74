//! Task status transition rules.
//!
//! The lifecycle is encoded as a data table rather than branching logic,
//! so the allowed-action set for any `(task, actor)` pair is derived
//! from the same rows the validator uses.

use super::errors::{EngineError, EngineResult};
use super::models::staff::Actor;
use super::models::task::{CleaningTask, TaskAction, TaskStatus};

/// Who may perform an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleRule {
    /// The assigned housekeeper, or a managing role.
    OwnerOrManaging,
    /// Manager or front desk only.
    ManagingOnly,
}

impl RoleRule {
    fn permits(self, task: &CleaningTask, actor: &Actor) -> bool {
        match self {
            Self::OwnerOrManaging => actor.owns(task) || actor.role.can_manage(),
            Self::ManagingOnly => actor.role.can_manage(),
        }
    }
}

/// One row of the transition table.
#[derive(Debug, Clone, Copy)]
pub struct TransitionRule {
    pub from: TaskStatus,
    pub action: TaskAction,
    pub to: TaskStatus,
    pub roles: RoleRule,
}

const fn rule(from: TaskStatus, action: TaskAction, to: TaskStatus, roles: RoleRule) -> TransitionRule {
    TransitionRule { from, action, to, roles }
}

use RoleRule::{ManagingOnly, OwnerOrManaging};
use TaskAction::{Cancel, Check, Complete, Start};
use TaskStatus::{
    Assigned, Canceled, Checked, Completed, InProgress, OnHold, Unassigned, WaitingInspection,
};

/// Status-changing transitions. `ToggleRush` is handled separately since
/// it never changes status. Nothing transitions *into* `OnHold`: the
/// state is reserved for data arriving from the store.
pub const TRANSITIONS: &[TransitionRule] = &[
    rule(Unassigned, Start, InProgress, OwnerOrManaging),
    rule(Assigned, Start, InProgress, OwnerOrManaging),
    rule(OnHold, Start, InProgress, OwnerOrManaging),
    rule(InProgress, Complete, Completed, OwnerOrManaging),
    rule(Completed, Check, Checked, ManagingOnly),
    rule(WaitingInspection, Check, Checked, ManagingOnly),
    rule(Assigned, Cancel, Canceled, ManagingOnly),
    rule(OnHold, Cancel, Canceled, ManagingOnly),
    rule(InProgress, Cancel, Canceled, ManagingOnly),
    rule(Completed, Cancel, Canceled, ManagingOnly),
    rule(WaitingInspection, Cancel, Canceled, ManagingOnly),
];

fn find_rule(from: TaskStatus, action: TaskAction) -> Option<&'static TransitionRule> {
    TRANSITIONS.iter().find(|r| r.from == from && r.action == action)
}

/// Target status for a `(status, action)` pair, if the pair is known.
/// `ToggleRush` maps every non-terminal status onto itself.
pub fn next_status(from: TaskStatus, action: TaskAction) -> Option<TaskStatus> {
    if action == TaskAction::ToggleRush {
        return from.is_active().then_some(from);
    }
    find_rule(from, action).map(|r| r.to)
}

/// Validate an action against the table, role rules, and preconditions.
/// Returns the status the task will hold once the store accepts the
/// action. The checklist gate on `complete` is enforced one level up,
/// where the caller's item state is available.
pub fn check_transition(
    task: &CleaningTask,
    action: TaskAction,
    actor: &Actor,
) -> EngineResult<TaskStatus> {
    if action == TaskAction::ToggleRush {
        if task.status.is_terminal() {
            return Err(EngineError::InvalidTransition { from: task.status, action });
        }
        if !actor.role.can_manage() {
            return Err(EngineError::RoleDenied { action, role: actor.role });
        }
        return Ok(task.status);
    }

    let rule = find_rule(task.status, action)
        .ok_or(EngineError::InvalidTransition { from: task.status, action })?;

    if !rule.roles.permits(task, actor) {
        return Err(EngineError::RoleDenied { action, role: actor.role });
    }

    if action == TaskAction::Start && task.assigned_to.is_none() {
        return Err(EngineError::PreconditionFailed(
            "cannot start a task with no housekeeper assigned".to_string(),
        ));
    }

    Ok(rule.to)
}

/// Actions an actor may currently take on a task, derived from the
/// table plus role filters. Decoupled from any presentation concern.
pub fn allowed_actions(task: &CleaningTask, actor: &Actor) -> Vec<TaskAction> {
    TaskAction::ALL
        .iter()
        .copied()
        .filter(|&action| check_transition(task, action, actor).is_ok())
        .collect()
}
