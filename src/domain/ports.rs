//! Ports to external collaborators.
//!
//! The engine never talks to the backend directly; it goes through the
//! [`TaskStore`] trait so the HTTP adapter can be swapped for an
//! in-memory double in tests.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::errors::EngineResult;
use super::models::checklist::ChecklistId;
use super::models::staff::{Housekeeper, Room, Zone};
use super::models::task::{CleaningTask, HousekeeperId, TaskAction, TaskId};

/// Result of a server-side auto-generation request. A zero count means
/// the day's tasks already existed; that is informational, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub created_count: u32,
}

/// The authoritative remote store for tasks and reference lists.
///
/// All mutations are request/response; local state must only change
/// after a success response.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// List tasks scheduled for a date.
    async fn list_tasks_for_date(&self, date: NaiveDate) -> EngineResult<Vec<CleaningTask>>;

    /// List users with the housekeeper role.
    async fn list_housekeepers(&self) -> EngineResult<Vec<Housekeeper>>;

    /// List rooms.
    async fn list_rooms(&self) -> EngineResult<Vec<Room>>;

    /// List zones.
    async fn list_zones(&self) -> EngineResult<Vec<Zone>>;

    /// Submit a status-changing action (start, complete, check, cancel)
    /// and return the updated task.
    async fn submit_action(&self, task_id: TaskId, action: TaskAction)
        -> EngineResult<CleaningTask>;

    /// Set the rush flag to an explicit value.
    async fn set_rush(&self, task_id: TaskId, is_rush: bool) -> EngineResult<CleaningTask>;

    /// Assign one task to a housekeeper.
    async fn assign(
        &self,
        task_id: TaskId,
        housekeeper_id: HousekeeperId,
    ) -> EngineResult<CleaningTask>;

    /// Assign many tasks to one housekeeper for a date.
    async fn assign_multiple(
        &self,
        task_ids: &[TaskId],
        housekeeper_id: HousekeeperId,
        scheduled_date: NaiveDate,
    ) -> EngineResult<()>;

    /// Ask the server to generate the day's recurring tasks. Idempotent.
    async fn auto_generate(&self, date: NaiveDate) -> EngineResult<GenerationReport>;

    /// Attach a checklist from a template to a task.
    async fn attach_checklist(
        &self,
        task_id: TaskId,
        template_id: ChecklistId,
    ) -> EngineResult<CleaningTask>;

    /// Remove a checklist from a task.
    async fn detach_checklist(
        &self,
        task_id: TaskId,
        checklist_id: ChecklistId,
    ) -> EngineResult<CleaningTask>;
}
