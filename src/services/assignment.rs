//! Housekeeper assignment: single, bulk, and day generation.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use super::action_gate::{ActionGate, ActionScope};
use super::directory::TaskDirectory;
use crate::domain::errors::{EngineError, EngineResult};
use crate::domain::models::task::{CleaningTask, HousekeeperId, TaskId};
use crate::domain::ports::{GenerationReport, TaskStore};

/// Assigns tasks to housekeepers and triggers day generation.
///
/// User-input problems (empty selection, missing housekeeper, assigning
/// a task to the housekeeper it already has) are rejected before any
/// request is sent. On success the affected date is invalidated and
/// refetched; on failure the cache is left untouched.
pub struct AssignmentService<S: TaskStore> {
    store: Arc<S>,
    directory: Arc<TaskDirectory>,
    gate: ActionGate,
}

impl<S: TaskStore> AssignmentService<S> {
    pub(crate) fn new(store: Arc<S>, directory: Arc<TaskDirectory>, gate: ActionGate) -> Self {
        Self { store, directory, gate }
    }

    /// Single drag-and-drop style assignment.
    pub async fn assign_one(
        &self,
        task_id: TaskId,
        housekeeper_id: HousekeeperId,
    ) -> EngineResult<Vec<CleaningTask>> {
        let task = self
            .directory
            .lookup(task_id)
            .ok_or(EngineError::TaskNotFound(task_id))?;
        if task.assigned_to == Some(housekeeper_id) {
            return Err(EngineError::Validation(
                "task is already assigned to this housekeeper".to_string(),
            ));
        }

        let _guard = self.gate.try_begin(ActionScope::AssignOne { task_id })?;
        self.store.assign(task_id, housekeeper_id).await?;
        info!(task_id, housekeeper_id, "task assigned");
        self.directory.refresh(self.store.as_ref(), task.scheduled_date).await
    }

    /// Bulk assignment of many tasks to one housekeeper for a date.
    /// Input errors fail immediately with no request sent.
    pub async fn assign_many(
        &self,
        task_ids: &[TaskId],
        housekeeper_id: Option<HousekeeperId>,
        scheduled_date: NaiveDate,
    ) -> EngineResult<Vec<CleaningTask>> {
        if task_ids.is_empty() {
            return Err(EngineError::Validation(
                "no tasks selected for bulk assignment".to_string(),
            ));
        }
        let housekeeper_id = housekeeper_id.ok_or_else(|| {
            EngineError::Validation("no housekeeper selected for bulk assignment".to_string())
        })?;

        let _guard = self
            .gate
            .try_begin(ActionScope::BulkAssign { count: task_ids.len() })?;
        self.store
            .assign_multiple(task_ids, housekeeper_id, scheduled_date)
            .await?;
        info!(
            count = task_ids.len(),
            housekeeper_id,
            %scheduled_date,
            "bulk assignment applied"
        );
        self.directory.refresh(self.store.as_ref(), scheduled_date).await
    }

    /// Ask the server to generate the day's recurring tasks. The server
    /// reports zero created when they already exist; either way the
    /// cached date is invalidated defensively and refetched.
    pub async fn auto_generate(&self, date: NaiveDate) -> EngineResult<GenerationReport> {
        let _guard = self.gate.try_begin(ActionScope::Generate { date })?;
        let report = self.store.auto_generate(date).await?;
        if report.created_count == 0 {
            info!(%date, "auto-generation found existing tasks, none created");
        } else {
            info!(%date, created = report.created_count, "auto-generated tasks");
        }
        self.directory.refresh(self.store.as_ref(), date).await?;
        Ok(report)
    }
}
