//! Cached task lists plus an id index over every task seen.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use chrono::NaiveDate;

use super::cache::ExpiringCache;
use crate::domain::errors::EngineResult;
use crate::domain::models::task::{CleaningTask, TaskId};
use crate::domain::ports::TaskStore;

/// Per-date task lists behind the TTL cache, plus an index of the last
/// fetched version of every task. The index is not time-boxed: it lets
/// commands resolve a task by id even when caching is disabled, since
/// the UI always lists a date before acting on its tasks.
pub struct TaskDirectory {
    lists: ExpiringCache<NaiveDate, Vec<CleaningTask>>,
    index: Mutex<HashMap<TaskId, CleaningTask>>,
}

impl TaskDirectory {
    pub fn new(ttl: Duration, enabled: bool) -> Self {
        Self {
            lists: ExpiringCache::new(ttl, enabled),
            index: Mutex::new(HashMap::new()),
        }
    }

    /// Fresh cached list for a date, if any.
    pub fn cached(&self, date: NaiveDate) -> Option<Vec<CleaningTask>> {
        self.lists.get(&date)
    }

    /// Last known list for a date, ignoring the TTL.
    pub fn peek_stale(&self, date: NaiveDate) -> Option<Vec<CleaningTask>> {
        self.lists.peek_stale(&date)
    }

    /// Record a fetched list and update the id index.
    pub fn store_list(&self, date: NaiveDate, tasks: &[CleaningTask]) {
        let mut index = self.index.lock().unwrap_or_else(PoisonError::into_inner);
        for task in tasks {
            index.insert(task.id, task.clone());
        }
        drop(index);
        self.lists.put(date, tasks.to_vec());
    }

    /// Drop the cached list for a date. The index keeps its entries so
    /// stale-but-consistent lookups keep working until the refetch.
    pub fn invalidate(&self, date: NaiveDate) {
        self.lists.invalidate(&date);
    }

    /// Last fetched version of a task.
    pub fn lookup(&self, task_id: TaskId) -> Option<CleaningTask> {
        self.index
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&task_id)
            .cloned()
    }

    /// Invalidate a date and refetch it from the store. Called only
    /// after a mutation succeeded; mutation failures never reach this,
    /// leaving the cache untouched.
    pub async fn refresh<S: TaskStore + ?Sized>(
        &self,
        store: &S,
        date: NaiveDate,
    ) -> EngineResult<Vec<CleaningTask>> {
        self.invalidate(date);
        let fresh = store.list_tasks_for_date(date).await?;
        self.store_list(date, &fresh);
        Ok(fresh)
    }
}
