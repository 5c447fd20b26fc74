//! HTTP implementation of the remote task store.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{header, Client as ReqwestClient, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use super::types::{
    AssignMultipleRequest, AssignRequest, AttachChecklistRequest, AutoGenerateRequest, ErrorBody,
    SetRushRequest, TaskPayload,
};
use crate::domain::errors::{EngineError, EngineResult};
use crate::domain::models::checklist::ChecklistId;
use crate::domain::models::config::ApiConfig;
use crate::domain::models::staff::{Housekeeper, Room, Zone};
use crate::domain::models::task::{CleaningTask, HousekeeperId, TaskAction, TaskId};
use crate::domain::ports::{GenerationReport, TaskStore};

/// Connection settings for the remote task store.
#[derive(Debug, Clone)]
pub struct HttpStoreConfig {
    /// Base URL, e.g. `https://ops.example.com/api`
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Bearer token attached to every request, when set
    pub bearer_token: Option<String>,
}

impl Default for HttpStoreConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            timeout_secs: 30,
            bearer_token: None,
        }
    }
}

impl From<&ApiConfig> for HttpStoreConfig {
    fn from(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout_secs: config.timeout_secs,
            bearer_token: config.bearer_token.clone(),
        }
    }
}

/// Synchronous request/response client for the task backend.
///
/// No automatic retries: failures are surfaced and the user re-invokes
/// the command. Timeouts come from the client configuration and are
/// reported as transport errors.
pub struct HttpTaskStore {
    http: ReqwestClient,
    base_url: String,
}

impl HttpTaskStore {
    pub fn new(config: HttpStoreConfig) -> EngineResult<Self> {
        let mut headers = header::HeaderMap::new();
        if let Some(token) = &config.bearer_token {
            let value = header::HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| EngineError::Validation(format!("invalid bearer token: {e}")))?;
            headers.insert(header::AUTHORIZATION, value);
        }

        let http = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(10)
            .tcp_nodelay(true)
            .default_headers(headers)
            .build()
            .map_err(|e| EngineError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn transport(err: reqwest::Error) -> EngineError {
        EngineError::Transport(err.to_string())
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> EngineResult<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::remote_error(status, response).await);
        }
        response
            .json()
            .await
            .map_err(|e| EngineError::Transport(format!("invalid response body: {e}")))
    }

    async fn read_unit(response: Response) -> EngineResult<()> {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::remote_error(status, response).await);
        }
        Ok(())
    }

    async fn remote_error(status: StatusCode, response: Response) -> EngineError {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(ErrorBody::into_message)
            .unwrap_or_else(|| "request failed".to_string());
        warn!(status = status.as_u16(), message, "remote task store error");
        EngineError::Remote { status: status.as_u16(), message }
    }

    async fn read_task(response: Response) -> EngineResult<CleaningTask> {
        let payload: TaskPayload = Self::read_json(response).await?;
        CleaningTask::try_from(payload)
    }
}

#[async_trait]
impl TaskStore for HttpTaskStore {
    #[instrument(skip(self))]
    async fn list_tasks_for_date(&self, date: NaiveDate) -> EngineResult<Vec<CleaningTask>> {
        debug!(%date, "GET tasks");
        let response = self
            .http
            .get(self.url("tasks"))
            .query(&[("scheduled_date", date.to_string())])
            .send()
            .await
            .map_err(Self::transport)?;
        let payloads: Vec<TaskPayload> = Self::read_json(response).await?;
        payloads.into_iter().map(CleaningTask::try_from).collect()
    }

    async fn list_housekeepers(&self) -> EngineResult<Vec<Housekeeper>> {
        let response = self
            .http
            .get(self.url("users"))
            .query(&[("role", "housekeeper")])
            .send()
            .await
            .map_err(Self::transport)?;
        Self::read_json(response).await
    }

    async fn list_rooms(&self) -> EngineResult<Vec<Room>> {
        let response = self
            .http
            .get(self.url("rooms"))
            .send()
            .await
            .map_err(Self::transport)?;
        Self::read_json(response).await
    }

    async fn list_zones(&self) -> EngineResult<Vec<Zone>> {
        let response = self
            .http
            .get(self.url("zones"))
            .send()
            .await
            .map_err(Self::transport)?;
        Self::read_json(response).await
    }

    #[instrument(skip(self))]
    async fn submit_action(
        &self,
        task_id: TaskId,
        action: TaskAction,
    ) -> EngineResult<CleaningTask> {
        let endpoint = action.endpoint().ok_or_else(|| {
            EngineError::Validation(format!("{action} has no status endpoint"))
        })?;
        let response = self
            .http
            .post(self.url(&format!("tasks/{task_id}/{endpoint}")))
            .send()
            .await
            .map_err(Self::transport)?;
        Self::read_task(response).await
    }

    async fn set_rush(&self, task_id: TaskId, is_rush: bool) -> EngineResult<CleaningTask> {
        let response = self
            .http
            .patch(self.url(&format!("tasks/{task_id}/set_rush")))
            .json(&SetRushRequest { is_rush })
            .send()
            .await
            .map_err(Self::transport)?;
        Self::read_task(response).await
    }

    async fn assign(
        &self,
        task_id: TaskId,
        housekeeper_id: HousekeeperId,
    ) -> EngineResult<CleaningTask> {
        let response = self
            .http
            .patch(self.url(&format!("tasks/{task_id}")))
            .json(&AssignRequest { assigned_to: housekeeper_id })
            .send()
            .await
            .map_err(Self::transport)?;
        Self::read_task(response).await
    }

    #[instrument(skip(self, task_ids), fields(count = task_ids.len()))]
    async fn assign_multiple(
        &self,
        task_ids: &[TaskId],
        housekeeper_id: HousekeeperId,
        scheduled_date: NaiveDate,
    ) -> EngineResult<()> {
        let response = self
            .http
            .post(self.url("tasks/assign_multiple"))
            .json(&AssignMultipleRequest { task_ids, housekeeper_id, scheduled_date })
            .send()
            .await
            .map_err(Self::transport)?;
        Self::read_unit(response).await
    }

    #[instrument(skip(self))]
    async fn auto_generate(&self, date: NaiveDate) -> EngineResult<GenerationReport> {
        let response = self
            .http
            .post(self.url("tasks/auto_generate"))
            .json(&AutoGenerateRequest { scheduled_date: date })
            .send()
            .await
            .map_err(Self::transport)?;
        Self::read_json(response).await
    }

    async fn attach_checklist(
        &self,
        task_id: TaskId,
        template_id: ChecklistId,
    ) -> EngineResult<CleaningTask> {
        let response = self
            .http
            .post(self.url(&format!("tasks/{task_id}/checklists")))
            .json(&AttachChecklistRequest { template_id })
            .send()
            .await
            .map_err(Self::transport)?;
        Self::read_task(response).await
    }

    async fn detach_checklist(
        &self,
        task_id: TaskId,
        checklist_id: ChecklistId,
    ) -> EngineResult<CleaningTask> {
        let response = self
            .http
            .delete(self.url(&format!("tasks/{task_id}/checklists/{checklist_id}")))
            .send()
            .await
            .map_err(Self::transport)?;
        Self::read_task(response).await
    }
}
