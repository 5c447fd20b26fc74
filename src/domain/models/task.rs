//! Cleaning task domain model.
//!
//! A task is one cleaning job against a room or a zone, moving through
//! the status lifecycle via the rules in [`crate::domain::transitions`].

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::checklist::Checklist;
use crate::domain::errors::{EngineError, EngineResult};

pub type TaskId = i64;
pub type RoomId = i64;
pub type ZoneId = i64;
pub type HousekeeperId = i64;

/// Status of a cleaning task in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Created without a housekeeper
    #[default]
    Unassigned,
    /// Has a housekeeper, work not started
    Assigned,
    /// Housekeeper is working on it
    InProgress,
    /// Work done, awaiting inspection
    Completed,
    /// Explicitly queued for inspection
    WaitingInspection,
    /// Inspection passed (terminal)
    Checked,
    /// Abandoned (terminal)
    Canceled,
    /// Reserved: present in data, no workflow currently enters it
    OnHold,
}

impl TaskStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 8] = [
        Self::Unassigned,
        Self::Assigned,
        Self::InProgress,
        Self::Completed,
        Self::WaitingInspection,
        Self::Checked,
        Self::Canceled,
        Self::OnHold,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unassigned => "unassigned",
            Self::Assigned => "assigned",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::WaitingInspection => "waiting_inspection",
            Self::Checked => "checked",
            Self::Canceled => "canceled",
            Self::OnHold => "on_hold",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "unassigned" => Some(Self::Unassigned),
            "assigned" => Some(Self::Assigned),
            "in_progress" => Some(Self::InProgress),
            "completed" | "complete" => Some(Self::Completed),
            "waiting_inspection" => Some(Self::WaitingInspection),
            "checked" => Some(Self::Checked),
            "canceled" | "cancelled" => Some(Self::Canceled),
            "on_hold" => Some(Self::OnHold),
            _ => None,
        }
    }

    /// Check if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Checked | Self::Canceled)
    }

    /// Check if this is an active (non-terminal) state.
    pub fn is_active(&self) -> bool {
        !self.is_terminal()
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A command issued against a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskAction {
    Start,
    Complete,
    Check,
    Cancel,
    ToggleRush,
}

impl TaskAction {
    pub const ALL: [Self; 5] = [
        Self::Start,
        Self::Complete,
        Self::Check,
        Self::Cancel,
        Self::ToggleRush,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Complete => "complete",
            Self::Check => "check",
            Self::Cancel => "cancel",
            Self::ToggleRush => "toggle_rush",
        }
    }

    /// Remote endpoint segment for status-changing actions.
    /// `ToggleRush` goes through its own rush endpoint instead.
    pub fn endpoint(&self) -> Option<&'static str> {
        match self {
            Self::Start => Some("start"),
            Self::Complete => Some("complete"),
            Self::Check => Some("check"),
            Self::Cancel => Some("cancel"),
            Self::ToggleRush => None,
        }
    }

    /// Whether this action moves the task to a new status.
    pub fn changes_status(&self) -> bool {
        !matches!(self, Self::ToggleRush)
    }
}

impl fmt::Display for TaskAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The room-or-zone target of a task. Exactly one side is ever set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    Room(RoomId),
    Zone(ZoneId),
}

impl Location {
    /// Build a location from the nullable room/zone columns the remote
    /// store exposes. Both set or neither set fails validation.
    pub fn from_parts(room: Option<RoomId>, zone: Option<ZoneId>) -> EngineResult<Self> {
        match (room, zone) {
            (Some(room), None) => Ok(Self::Room(room)),
            (None, Some(zone)) => Ok(Self::Zone(zone)),
            (Some(_), Some(_)) => Err(EngineError::Validation(
                "task targets both a room and a zone".to_string(),
            )),
            (None, None) => Err(EngineError::Validation(
                "task targets neither a room nor a zone".to_string(),
            )),
        }
    }

    pub fn room_id(&self) -> Option<RoomId> {
        match self {
            Self::Room(id) => Some(*id),
            Self::Zone(_) => None,
        }
    }

    pub fn zone_id(&self) -> Option<ZoneId> {
        match self {
            Self::Zone(id) => Some(*id),
            Self::Room(_) => None,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Room(id) => write!(f, "room {id}"),
            Self::Zone(id) => write!(f, "zone {id}"),
        }
    }
}

/// One cleaning job against a room or zone on a scheduled date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningTask {
    /// Unique identifier
    pub id: TaskId,
    /// Room or zone being cleaned
    pub location: Location,
    /// Kind of cleaning (checkout, stayover, deep clean, ...)
    pub cleaning_type: String,
    /// Current lifecycle status
    pub status: TaskStatus,
    /// Assigned housekeeper, if any
    pub assigned_to: Option<HousekeeperId>,
    /// Calendar date the task belongs to
    pub scheduled_date: NaiveDate,
    /// Optional deadline within the day
    pub due_time: Option<NaiveTime>,
    /// Priority flag, orthogonal to status
    pub is_rush: bool,
    /// Checklists gating completion
    pub checklist_data: Vec<Checklist>,
    /// When a housekeeper was assigned
    pub assigned_at: Option<DateTime<Utc>>,
    /// When work started
    pub started_at: Option<DateTime<Utc>>,
    /// When work finished
    pub completed_at: Option<DateTime<Utc>>,
    /// When inspection passed
    pub checked_at: Option<DateTime<Utc>>,
}

impl CleaningTask {
    /// Create an unassigned task.
    pub fn new(
        id: TaskId,
        location: Location,
        cleaning_type: impl Into<String>,
        scheduled_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            location,
            cleaning_type: cleaning_type.into(),
            status: TaskStatus::Unassigned,
            assigned_to: None,
            scheduled_date,
            due_time: None,
            is_rush: false,
            checklist_data: Vec::new(),
            assigned_at: None,
            started_at: None,
            completed_at: None,
            checked_at: None,
        }
    }

    /// Assign a housekeeper at creation time. Starts the task in
    /// `Assigned` instead of `Unassigned`.
    pub fn with_housekeeper(mut self, housekeeper_id: HousekeeperId) -> Self {
        self.assigned_to = Some(housekeeper_id);
        self.status = TaskStatus::Assigned;
        self.assigned_at = Some(Utc::now());
        self
    }

    pub fn with_due_time(mut self, due_time: NaiveTime) -> Self {
        self.due_time = Some(due_time);
        self
    }

    pub fn with_rush(mut self, is_rush: bool) -> Self {
        self.is_rush = is_rush;
        self
    }

    pub fn with_checklist(mut self, checklist: Checklist) -> Self {
        self.checklist_data.push(checklist);
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Validate task invariants.
    pub fn validate(&self) -> EngineResult<()> {
        if self.cleaning_type.trim().is_empty() {
            return Err(EngineError::Validation(
                "cleaning type cannot be empty".to_string(),
            ));
        }
        if self.status == TaskStatus::Unassigned && self.assigned_to.is_some() {
            return Err(EngineError::Validation(
                "unassigned task cannot carry a housekeeper".to_string(),
            ));
        }
        Ok(())
    }

    /// Check if task is terminal.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Whether the task is awaiting inspection.
    pub fn awaits_inspection(&self) -> bool {
        matches!(
            self.status,
            TaskStatus::Completed | TaskStatus::WaitingInspection
        )
    }
}

/// Operator review ordering: rush tasks first, then earliest due time,
/// tasks without a due time last.
pub fn review_order(a: &CleaningTask, b: &CleaningTask) -> Ordering {
    b.is_rush.cmp(&a.is_rush).then_with(|| match (a.due_time, b.due_time) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    })
}
