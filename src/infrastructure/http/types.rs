//! Wire types for the remote task store API.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::EngineError;
use crate::domain::models::checklist::{Checklist, ChecklistId, ChecklistItem, ChecklistItemId};
use crate::domain::models::task::{
    CleaningTask, HousekeeperId, Location, RoomId, TaskId, TaskStatus, ZoneId,
};

/// Task row as the server sends it: room and zone are separate nullable
/// columns, folded into [`Location`] during conversion.
#[derive(Debug, Deserialize)]
pub struct TaskPayload {
    pub id: TaskId,
    pub room: Option<RoomId>,
    pub zone: Option<ZoneId>,
    pub cleaning_type: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub assigned_to: Option<HousekeeperId>,
    pub scheduled_date: NaiveDate,
    #[serde(default)]
    pub due_time: Option<NaiveTime>,
    #[serde(default)]
    pub is_rush: bool,
    #[serde(default)]
    pub checklist_data: Vec<ChecklistPayload>,
    #[serde(default)]
    pub assigned_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub checked_at: Option<DateTime<Utc>>,
}

impl TryFrom<TaskPayload> for CleaningTask {
    type Error = EngineError;

    fn try_from(payload: TaskPayload) -> Result<Self, Self::Error> {
        let location = Location::from_parts(payload.room, payload.zone)?;
        Ok(Self {
            id: payload.id,
            location,
            cleaning_type: payload.cleaning_type,
            status: payload.status,
            assigned_to: payload.assigned_to,
            scheduled_date: payload.scheduled_date,
            due_time: payload.due_time,
            is_rush: payload.is_rush,
            checklist_data: payload.checklist_data.into_iter().map(Checklist::from).collect(),
            assigned_at: payload.assigned_at,
            started_at: payload.started_at,
            completed_at: payload.completed_at,
            checked_at: payload.checked_at,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ChecklistPayload {
    pub id: ChecklistId,
    pub name: String,
    #[serde(default)]
    pub items: Vec<ChecklistItemPayload>,
}

#[derive(Debug, Deserialize)]
pub struct ChecklistItemPayload {
    pub id: ChecklistItemId,
    pub text: String,
}

impl From<ChecklistPayload> for Checklist {
    fn from(payload: ChecklistPayload) -> Self {
        Self {
            id: payload.id,
            name: payload.name,
            items: payload
                .items
                .into_iter()
                .map(|item| ChecklistItem { id: item.id, text: item.text })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AssignRequest {
    pub assigned_to: HousekeeperId,
}

#[derive(Debug, Serialize)]
pub struct AssignMultipleRequest<'a> {
    pub task_ids: &'a [TaskId],
    pub housekeeper_id: HousekeeperId,
    pub scheduled_date: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct SetRushRequest {
    pub is_rush: bool,
}

#[derive(Debug, Serialize)]
pub struct AutoGenerateRequest {
    pub scheduled_date: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct AttachChecklistRequest {
    pub template_id: ChecklistId,
}

/// Error body shape the server uses; field name varies by endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    pub detail: Option<String>,
    pub error: Option<String>,
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.detail.or(self.error).or(self.message)
    }
}
