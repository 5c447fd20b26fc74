//! Engine facade tying the cache, state machine, checklist gate, and
//! assignment service together over one remote store.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use super::action_gate::{ActionGate, ActionScope};
use super::assignment::AssignmentService;
use super::cache::ExpiringCache;
use super::directory::TaskDirectory;
use super::progress::compute_progress;
use crate::domain::errors::{EngineError, EngineResult};
use crate::domain::models::checklist::{ChecklistId, ChecklistProgress};
use crate::domain::models::config::CacheConfig;
use crate::domain::models::staff::{Actor, Housekeeper, Room, Zone};
use crate::domain::models::task::{
    review_order, CleaningTask, HousekeeperId, TaskAction, TaskId, TaskStatus,
};
use crate::domain::ports::{GenerationReport, TaskStore};
use crate::domain::transitions;

const REF_HOUSEKEEPERS: &str = "housekeepers";
const REF_ROOMS: &str = "rooms";
const REF_ZONES: &str = "zones";

/// Client-side orchestration over the remote task store.
///
/// Pessimistic throughout: local state changes only after the store
/// accepts a mutation, after which the affected date is invalidated and
/// refetched. Mutations are serialized engine-wide by the action gate.
pub struct HousekeepingEngine<S: TaskStore> {
    store: Arc<S>,
    directory: Arc<TaskDirectory>,
    housekeepers: ExpiringCache<&'static str, Vec<Housekeeper>>,
    rooms: ExpiringCache<&'static str, Vec<Room>>,
    zones: ExpiringCache<&'static str, Vec<Zone>>,
    gate: ActionGate,
    assignment: AssignmentService<S>,
}

impl<S: TaskStore> HousekeepingEngine<S> {
    pub fn new(store: S, cache: &CacheConfig) -> Self {
        let ttl = Duration::from_millis(cache.ttl_ms);
        let store = Arc::new(store);
        let directory = Arc::new(TaskDirectory::new(ttl, cache.enabled));
        let gate = ActionGate::new();
        let assignment =
            AssignmentService::new(Arc::clone(&store), Arc::clone(&directory), gate.clone());
        Self {
            store,
            directory,
            housekeepers: ExpiringCache::new(ttl, cache.enabled),
            rooms: ExpiringCache::new(ttl, cache.enabled),
            zones: ExpiringCache::new(ttl, cache.enabled),
            gate,
            assignment,
        }
    }

    // ---- listing ----------------------------------------------------

    /// Tasks for a date, served from cache while fresh.
    pub async fn list_tasks_for_date(&self, date: NaiveDate) -> EngineResult<Vec<CleaningTask>> {
        if let Some(tasks) = self.directory.cached(date) {
            debug!(%date, count = tasks.len(), "task cache hit");
            return Ok(tasks);
        }
        debug!(%date, "task cache miss, fetching");
        let fresh = self.store.list_tasks_for_date(date).await?;
        self.directory.store_list(date, &fresh);
        Ok(fresh)
    }

    pub async fn list_housekeepers(&self) -> EngineResult<Vec<Housekeeper>> {
        let store = Arc::clone(&self.store);
        Self::reference(&self.housekeepers, REF_HOUSEKEEPERS, || async move {
            store.list_housekeepers().await
        })
        .await
    }

    pub async fn list_rooms(&self) -> EngineResult<Vec<Room>> {
        let store = Arc::clone(&self.store);
        Self::reference(&self.rooms, REF_ROOMS, || async move { store.list_rooms().await }).await
    }

    pub async fn list_zones(&self) -> EngineResult<Vec<Zone>> {
        let store = Arc::clone(&self.store);
        Self::reference(&self.zones, REF_ZONES, || async move { store.list_zones().await }).await
    }

    async fn reference<T, F, Fut>(
        cache: &ExpiringCache<&'static str, Vec<T>>,
        key: &'static str,
        fetch: F,
    ) -> EngineResult<Vec<T>>
    where
        T: Clone,
        F: FnOnce() -> Fut,
        Fut: Future<Output = EngineResult<Vec<T>>>,
    {
        if let Some(cached) = cache.get(&key) {
            debug!(key, "reference cache hit");
            return Ok(cached);
        }
        let fresh = fetch().await?;
        cache.put(key, fresh.clone());
        Ok(fresh)
    }

    // ---- state machine ----------------------------------------------

    /// Validate and execute a status transition (start, complete, check,
    /// cancel). `complete` is additionally gated by the caller-supplied
    /// checklist interaction state. No optimistic local mutation: the
    /// refreshed list comes from the store after it accepts the action.
    pub async fn transition(
        &self,
        task_id: TaskId,
        action: TaskAction,
        actor: &Actor,
        item_state: &HashMap<ChecklistId, ChecklistProgress>,
    ) -> EngineResult<CleaningTask> {
        if !action.changes_status() {
            return Err(EngineError::Validation(
                "rush is toggled through toggle_rush, not transition".to_string(),
            ));
        }
        let task = self.lookup(task_id)?;
        let next = transitions::check_transition(&task, action, actor)?;

        if action == TaskAction::Complete {
            let report = compute_progress(&task.checklist_data, item_state);
            if !report.ready_to_complete {
                return Err(EngineError::ChecklistIncomplete {
                    percent: report.overall_percent,
                });
            }
        }

        let _guard = self.gate.try_begin(ActionScope::Transition { task_id, action })?;
        let updated = self.store.submit_action(task_id, action).await?;
        info!(task_id, %action, from = %task.status, to = %next, "transition applied");
        self.directory.refresh(self.store.as_ref(), task.scheduled_date).await?;
        Ok(updated)
    }

    /// Flip the rush flag. Orthogonal to status; rejected only in
    /// terminal states or for non-managing roles.
    pub async fn toggle_rush(&self, task_id: TaskId, actor: &Actor) -> EngineResult<CleaningTask> {
        let task = self.lookup(task_id)?;
        transitions::check_transition(&task, TaskAction::ToggleRush, actor)?;

        let _guard = self.gate.try_begin(ActionScope::Transition {
            task_id,
            action: TaskAction::ToggleRush,
        })?;
        let updated = self.store.set_rush(task_id, !task.is_rush).await?;
        info!(task_id, is_rush = updated.is_rush, "rush flag toggled");
        self.directory.refresh(self.store.as_ref(), task.scheduled_date).await?;
        Ok(updated)
    }

    /// Actions the actor may currently take on a task.
    pub fn allowed_actions(&self, task_id: TaskId, actor: &Actor) -> EngineResult<Vec<TaskAction>> {
        let task = self.lookup(task_id)?;
        Ok(transitions::allowed_actions(&task, actor))
    }

    // ---- checklists ---------------------------------------------------

    /// Attach a checklist template to a task. Management only, and only
    /// while the task is assigned or in progress.
    pub async fn attach_checklist(
        &self,
        task_id: TaskId,
        template_id: ChecklistId,
        actor: &Actor,
    ) -> EngineResult<CleaningTask> {
        let task = self.lookup(task_id)?;
        Self::ensure_checklist_editable(&task, actor)?;

        let _guard = self.gate.try_begin(ActionScope::ChecklistEdit { task_id })?;
        let updated = self.store.attach_checklist(task_id, template_id).await?;
        info!(task_id, template_id, "checklist attached");
        self.directory.refresh(self.store.as_ref(), task.scheduled_date).await?;
        Ok(updated)
    }

    /// Remove a checklist from a task, under the same rules as attach.
    pub async fn detach_checklist(
        &self,
        task_id: TaskId,
        checklist_id: ChecklistId,
        actor: &Actor,
    ) -> EngineResult<CleaningTask> {
        let task = self.lookup(task_id)?;
        Self::ensure_checklist_editable(&task, actor)?;

        let _guard = self.gate.try_begin(ActionScope::ChecklistEdit { task_id })?;
        let updated = self.store.detach_checklist(task_id, checklist_id).await?;
        info!(task_id, checklist_id, "checklist detached");
        self.directory.refresh(self.store.as_ref(), task.scheduled_date).await?;
        Ok(updated)
    }

    fn ensure_checklist_editable(task: &CleaningTask, actor: &Actor) -> EngineResult<()> {
        if !actor.role.can_manage() {
            return Err(EngineError::Validation(
                "only managing roles may edit checklists".to_string(),
            ));
        }
        if !matches!(task.status, TaskStatus::Assigned | TaskStatus::InProgress) {
            return Err(EngineError::PreconditionFailed(format!(
                "checklists can only be edited while assigned or in progress, task is {}",
                task.status
            )));
        }
        Ok(())
    }

    // ---- assignment ---------------------------------------------------

    pub async fn assign_one(
        &self,
        task_id: TaskId,
        housekeeper_id: HousekeeperId,
    ) -> EngineResult<Vec<CleaningTask>> {
        self.assignment.assign_one(task_id, housekeeper_id).await
    }

    pub async fn assign_many(
        &self,
        task_ids: &[TaskId],
        housekeeper_id: Option<HousekeeperId>,
        scheduled_date: NaiveDate,
    ) -> EngineResult<Vec<CleaningTask>> {
        self.assignment
            .assign_many(task_ids, housekeeper_id, scheduled_date)
            .await
    }

    pub async fn auto_generate(&self, date: NaiveDate) -> EngineResult<GenerationReport> {
        self.assignment.auto_generate(date).await
    }

    // ---- inspection queue ---------------------------------------------

    /// Tasks awaiting inspection for a date, in review order (rush
    /// first, then due time, missing due time last). Backs a background
    /// refresh: fetch failures are logged and the last known list is
    /// served instead of interrupting the operator.
    pub async fn ready_for_inspection(&self, date: NaiveDate) -> Vec<CleaningTask> {
        let tasks = match self.list_tasks_for_date(date).await {
            Ok(tasks) => tasks,
            Err(err) => {
                warn!(%date, error = %err, "inspection refresh failed, serving stale data");
                self.directory.peek_stale(date).unwrap_or_default()
            }
        };
        let mut ready: Vec<CleaningTask> =
            tasks.into_iter().filter(CleaningTask::awaits_inspection).collect();
        ready.sort_by(review_order);
        ready
    }

    // ---- busy state ----------------------------------------------------

    pub fn is_busy(&self) -> bool {
        self.gate.is_busy()
    }

    pub fn current_scope(&self) -> Option<ActionScope> {
        self.gate.current_scope()
    }

    fn lookup(&self, task_id: TaskId) -> EngineResult<CleaningTask> {
        self.directory.lookup(task_id).ok_or(EngineError::TaskNotFound(task_id))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{NaiveTime, Utc};

    use super::*;
    use crate::domain::models::checklist::Checklist;
    use crate::domain::models::staff::Role;
    use crate::domain::models::task::Location;

    /// In-memory store double that applies mutations like the real
    /// backend would, counting calls so tests can assert what went over
    /// the wire.
    #[derive(Default)]
    struct MockStore {
        tasks: Mutex<HashMap<TaskId, CleaningTask>>,
        list_calls: AtomicUsize,
        mutation_calls: AtomicUsize,
        generated: Mutex<HashSet<NaiveDate>>,
        fail_lists: AtomicBool,
    }

    impl MockStore {
        fn with_tasks(tasks: Vec<CleaningTask>) -> Self {
            let store = Self::default();
            {
                let mut map = store.tasks.lock().unwrap();
                for task in tasks {
                    map.insert(task.id, task);
                }
            }
            store
        }

        fn mutate(&self, task_id: TaskId, f: impl FnOnce(&mut CleaningTask)) -> EngineResult<CleaningTask> {
            self.mutation_calls.fetch_add(1, Ordering::SeqCst);
            let mut tasks = self.tasks.lock().unwrap();
            let task = tasks.get_mut(&task_id).ok_or(EngineError::Remote {
                status: 404,
                message: "task not found".to_string(),
            })?;
            f(task);
            Ok(task.clone())
        }
    }

    #[async_trait]
    impl TaskStore for MockStore {
        async fn list_tasks_for_date(&self, date: NaiveDate) -> EngineResult<Vec<CleaningTask>> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_lists.load(Ordering::SeqCst) {
                return Err(EngineError::Transport("connection refused".to_string()));
            }
            let tasks = self.tasks.lock().unwrap();
            Ok(tasks.values().filter(|t| t.scheduled_date == date).cloned().collect())
        }

        async fn list_housekeepers(&self) -> EngineResult<Vec<Housekeeper>> {
            Ok(vec![Housekeeper { id: 5, name: "Mara".to_string() }])
        }

        async fn list_rooms(&self) -> EngineResult<Vec<Room>> {
            Ok(vec![])
        }

        async fn list_zones(&self) -> EngineResult<Vec<Zone>> {
            Ok(vec![])
        }

        async fn submit_action(
            &self,
            task_id: TaskId,
            action: TaskAction,
        ) -> EngineResult<CleaningTask> {
            self.mutate(task_id, |task| {
                if let Some(next) = transitions::next_status(task.status, action) {
                    task.status = next;
                    match next {
                        TaskStatus::InProgress => task.started_at = Some(Utc::now()),
                        TaskStatus::Completed => task.completed_at = Some(Utc::now()),
                        TaskStatus::Checked => task.checked_at = Some(Utc::now()),
                        _ => {}
                    }
                }
            })
        }

        async fn set_rush(&self, task_id: TaskId, is_rush: bool) -> EngineResult<CleaningTask> {
            self.mutate(task_id, |task| task.is_rush = is_rush)
        }

        async fn assign(
            &self,
            task_id: TaskId,
            housekeeper_id: HousekeeperId,
        ) -> EngineResult<CleaningTask> {
            self.mutate(task_id, |task| {
                task.assigned_to = Some(housekeeper_id);
                if task.status == TaskStatus::Unassigned {
                    task.status = TaskStatus::Assigned;
                }
                task.assigned_at = Some(Utc::now());
            })
        }

        async fn assign_multiple(
            &self,
            task_ids: &[TaskId],
            housekeeper_id: HousekeeperId,
            _scheduled_date: NaiveDate,
        ) -> EngineResult<()> {
            for &task_id in task_ids {
                self.mutate(task_id, |task| {
                    task.assigned_to = Some(housekeeper_id);
                    if task.status == TaskStatus::Unassigned {
                        task.status = TaskStatus::Assigned;
                    }
                })?;
            }
            Ok(())
        }

        async fn auto_generate(&self, date: NaiveDate) -> EngineResult<GenerationReport> {
            self.mutation_calls.fetch_add(1, Ordering::SeqCst);
            let mut generated = self.generated.lock().unwrap();
            if !generated.insert(date) {
                return Ok(GenerationReport { created_count: 0 });
            }
            let mut tasks = self.tasks.lock().unwrap();
            for id in [901, 902] {
                tasks.insert(id, CleaningTask::new(id, Location::Room(id), "checkout", date));
            }
            Ok(GenerationReport { created_count: 2 })
        }

        async fn attach_checklist(
            &self,
            task_id: TaskId,
            template_id: ChecklistId,
        ) -> EngineResult<CleaningTask> {
            self.mutate(task_id, |task| {
                task.checklist_data.push(Checklist::new(template_id, "attached"));
            })
        }

        async fn detach_checklist(
            &self,
            task_id: TaskId,
            checklist_id: ChecklistId,
        ) -> EngineResult<CleaningTask> {
            self.mutate(task_id, |task| {
                task.checklist_data.retain(|c| c.id != checklist_id);
            })
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    fn manager() -> Actor {
        Actor::new(100, Role::Manager)
    }

    fn cache_on() -> CacheConfig {
        CacheConfig { enabled: true, ttl_ms: 300_000 }
    }

    fn cache_off() -> CacheConfig {
        CacheConfig { enabled: false, ttl_ms: 300_000 }
    }

    fn engine_with(tasks: Vec<CleaningTask>, cache: &CacheConfig) -> HousekeepingEngine<MockStore> {
        HousekeepingEngine::new(MockStore::with_tasks(tasks), cache)
    }

    fn basic_task(id: TaskId, status: TaskStatus) -> CleaningTask {
        let mut task =
            CleaningTask::new(id, Location::Room(100 + id), "checkout", date()).with_housekeeper(5);
        task.status = status;
        task
    }

    #[tokio::test]
    async fn test_list_serves_from_cache_within_ttl() {
        let engine = engine_with(vec![basic_task(1, TaskStatus::Assigned)], &cache_on());
        engine.list_tasks_for_date(date()).await.unwrap();
        engine.list_tasks_for_date(date()).await.unwrap();
        assert_eq!(engine.store.list_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_disabled_cache_fetches_every_time() {
        let engine = engine_with(vec![basic_task(1, TaskStatus::Assigned)], &cache_off());
        engine.list_tasks_for_date(date()).await.unwrap();
        engine.list_tasks_for_date(date()).await.unwrap();
        assert_eq!(engine.store.list_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_start_transition_refetches_after_success() {
        let engine = engine_with(vec![basic_task(1, TaskStatus::Assigned)], &cache_on());
        engine.list_tasks_for_date(date()).await.unwrap();

        let updated = engine
            .transition(1, TaskAction::Start, &manager(), &HashMap::new())
            .await
            .unwrap();
        assert_eq!(updated.status, TaskStatus::InProgress);
        assert!(updated.started_at.is_some());
        // Initial list + post-mutation refetch.
        assert_eq!(engine.store.list_calls.load(Ordering::SeqCst), 2);

        // The refreshed cache serves the new status without a fetch.
        let tasks = engine.list_tasks_for_date(date()).await.unwrap();
        assert_eq!(tasks[0].status, TaskStatus::InProgress);
        assert_eq!(engine.store.list_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalid_transition_sends_nothing() {
        let engine = engine_with(vec![basic_task(1, TaskStatus::Assigned)], &cache_on());
        engine.list_tasks_for_date(date()).await.unwrap();

        let err = engine
            .transition(1, TaskAction::Check, &manager(), &HashMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidTransition { .. }));
        assert_eq!(engine.store.mutation_calls.load(Ordering::SeqCst), 0);
        // Cache untouched: no refetch happened.
        assert_eq!(engine.store.list_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_complete_gated_by_checklists() {
        let task = basic_task(1, TaskStatus::InProgress).with_checklist(
            Checklist::new(10, "bathroom")
                .with_item(1, "towels")
                .with_item(2, "sink")
                .with_item(3, "floor"),
        );
        let engine = engine_with(vec![task], &cache_on());
        engine.list_tasks_for_date(date()).await.unwrap();

        let partial: HashMap<ChecklistId, ChecklistProgress> =
            [(10, ChecklistProgress::new(3, 2))].into_iter().collect();
        let err = engine
            .transition(1, TaskAction::Complete, &manager(), &partial)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::ChecklistIncomplete { .. }));
        assert_eq!(engine.store.mutation_calls.load(Ordering::SeqCst), 0);

        let full: HashMap<ChecklistId, ChecklistProgress> =
            [(10, ChecklistProgress::new(3, 3))].into_iter().collect();
        let updated = engine
            .transition(1, TaskAction::Complete, &manager(), &full)
            .await
            .unwrap();
        assert_eq!(updated.status, TaskStatus::Completed);
    }

    #[tokio::test]
    async fn test_complete_without_checklists_is_unblocked() {
        let engine = engine_with(vec![basic_task(1, TaskStatus::InProgress)], &cache_on());
        engine.list_tasks_for_date(date()).await.unwrap();

        let updated = engine
            .transition(1, TaskAction::Complete, &manager(), &HashMap::new())
            .await
            .unwrap();
        assert_eq!(updated.status, TaskStatus::Completed);
    }

    #[tokio::test]
    async fn test_toggle_rush_keeps_status() {
        let engine = engine_with(vec![basic_task(1, TaskStatus::Assigned)], &cache_on());
        engine.list_tasks_for_date(date()).await.unwrap();

        let updated = engine.toggle_rush(1, &manager()).await.unwrap();
        assert!(updated.is_rush);
        assert_eq!(updated.status, TaskStatus::Assigned);
    }

    #[tokio::test]
    async fn test_assign_one_rejects_same_housekeeper() {
        let engine = engine_with(vec![basic_task(1, TaskStatus::Assigned)], &cache_on());
        engine.list_tasks_for_date(date()).await.unwrap();

        let err = engine.assign_one(1, 5).await.unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
        assert_eq!(engine.store.mutation_calls.load(Ordering::SeqCst), 0);

        let tasks = engine.assign_one(1, 6).await.unwrap();
        assert_eq!(tasks[0].assigned_to, Some(6));
    }

    #[tokio::test]
    async fn test_assign_many_input_errors_send_nothing() {
        let engine = engine_with(vec![basic_task(1, TaskStatus::Unassigned)], &cache_on());

        let err = engine.assign_many(&[], Some(5), date()).await.unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));

        let err = engine.assign_many(&[1, 2], None, date()).await.unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));

        assert_eq!(engine.store.mutation_calls.load(Ordering::SeqCst), 0);
        assert_eq!(engine.store.list_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_auto_generate_is_idempotent() {
        let engine = engine_with(vec![], &cache_on());

        let first = engine.auto_generate(date()).await.unwrap();
        assert_eq!(first.created_count, 2);

        let second = engine.auto_generate(date()).await.unwrap();
        assert_eq!(second.created_count, 0);

        // No duplicates: the refreshed list still holds two tasks.
        let tasks = engine.list_tasks_for_date(date()).await.unwrap();
        assert_eq!(tasks.len(), 2);
    }

    #[tokio::test]
    async fn test_busy_gate_blocks_second_mutation() {
        let engine = engine_with(vec![basic_task(1, TaskStatus::Assigned)], &cache_on());
        engine.list_tasks_for_date(date()).await.unwrap();

        let _held = engine.gate.try_begin(ActionScope::BulkAssign { count: 2 }).unwrap();
        assert!(engine.is_busy());

        let err = engine
            .transition(1, TaskAction::Start, &manager(), &HashMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Busy { .. }));
        assert_eq!(engine.store.mutation_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_ready_for_inspection_sorted_with_stale_fallback() {
        let mk = |id: TaskId, rush: bool, due: Option<(u32, u32)>| {
            let mut task = basic_task(id, TaskStatus::Completed).with_rush(rush);
            task.due_time = due.map(|(h, m)| NaiveTime::from_hms_opt(h, m, 0).unwrap());
            task
        };
        let engine = engine_with(
            vec![
                mk(1, false, Some((10, 0))),
                mk(2, true, Some((12, 0))),
                mk(3, false, None),
                basic_task(4, TaskStatus::InProgress),
            ],
            &cache_off(),
        );
        engine.list_tasks_for_date(date()).await.unwrap();

        let queue = engine.ready_for_inspection(date()).await;
        let ids: Vec<TaskId> = queue.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);

        // A failing refresh logs and serves the last known list.
        engine.store.fail_lists.store(true, Ordering::SeqCst);
        let queue = engine.ready_for_inspection(date()).await;
        let ids: Vec<TaskId> = queue.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[tokio::test]
    async fn test_checklist_edit_rules() {
        let engine = engine_with(vec![basic_task(1, TaskStatus::Completed)], &cache_on());
        engine.list_tasks_for_date(date()).await.unwrap();

        // Wrong state.
        let err = engine.attach_checklist(1, 7, &manager()).await.unwrap_err();
        assert!(matches!(err, EngineError::PreconditionFailed(_)));

        // Wrong role.
        let engine = engine_with(vec![basic_task(2, TaskStatus::Assigned)], &cache_on());
        engine.list_tasks_for_date(date()).await.unwrap();
        let housekeeper = Actor::new(5, Role::Housekeeper);
        let err = engine.attach_checklist(2, 7, &housekeeper).await.unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));

        // Allowed.
        let updated = engine.attach_checklist(2, 7, &manager()).await.unwrap();
        assert_eq!(updated.checklist_data.len(), 1);
        let updated = engine.detach_checklist(2, 7, &manager()).await.unwrap();
        assert!(updated.checklist_data.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_task_fails_before_any_request() {
        let engine = engine_with(vec![], &cache_on());
        let err = engine
            .transition(42, TaskAction::Start, &manager(), &HashMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::TaskNotFound(42)));
        assert!(err.is_client_side());
    }
}
