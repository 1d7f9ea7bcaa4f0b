//! Application state shared by every command.
//!
//! [`App`] owns the store, the last loaded task list and the latest AI
//! results. Handlers receive it by reference; the only code that mutates
//! tasks is the store it wraps. The local list is kept in step with each
//! successful mutation so a command can render without reloading.
//!
//! Persistence failures never escape as panics. A failed load leaves an empty
//! list (the blob backend recovers to its seed data on its own); failed
//! mutations are returned to the caller with the list untouched.

use super::digest::{AiOutcome, Digest};
use super::due::{sort_by_due, today_utc};
use super::generation::Latest;
use super::task::{NewTask, Task, TaskPatch};
use crate::api::Completion;
use crate::db::{StoreError, TaskStore};

pub struct App<S, C> {
    store: S,
    digest: Digest<C>,
    tasks: Vec<Task>,
    summary: Latest<AiOutcome>,
    suggestion: Latest<AiOutcome>,
}

impl<S: TaskStore, C: Completion> App<S, C> {
    pub fn new(store: S, client: C) -> Self {
        Self {
            store,
            digest: Digest::new(client),
            tasks: Vec::new(),
            summary: Latest::new(),
            suggestion: Latest::new(),
        }
    }

    /// Tasks as last loaded, in store order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn find(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Tasks in display order: soonest due first, dateless last.
    pub fn sorted_tasks(&self) -> Vec<Task> {
        let mut tasks = self.tasks.clone();
        sort_by_due(&mut tasks);
        tasks
    }

    /// Reloads the list from the store. Returns the load error, if any,
    /// after falling back to an empty list.
    pub async fn reload(&mut self) -> Option<StoreError> {
        match self.store.list().await {
            Ok(tasks) => {
                self.tasks = tasks;
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load tasks");
                self.tasks.clear();
                Some(e)
            }
        }
    }

    pub async fn add_task(&mut self, task: NewTask) -> Result<Task, StoreError> {
        let created = self.store.create(task).await?;
        tracing::info!(id = %created.id, "task created");
        self.tasks.insert(0, created.clone());
        Ok(created)
    }

    pub async fn edit_task(&mut self, id: &str, patch: &TaskPatch) -> Result<Option<Task>, StoreError> {
        let updated = self.store.update(id, patch).await?;
        self.replace(updated.as_ref());
        Ok(updated)
    }

    pub async fn remove_task(&mut self, id: &str) -> Result<bool, StoreError> {
        let removed = self.store.remove(id).await?;
        self.tasks.retain(|t| t.id != id);
        Ok(removed)
    }

    pub async fn cycle_status(&mut self, id: &str) -> Result<Option<Task>, StoreError> {
        let updated = self.store.cycle_status(id).await?;
        self.replace(updated.as_ref());
        Ok(updated)
    }

    pub async fn set_due_date(&mut self, id: &str, date: &str) -> Result<Option<Task>, StoreError> {
        let updated = self.store.set_due_date(id, date).await?;
        self.replace(updated.as_ref());
        Ok(updated)
    }

    /// Removes every completed task. Returns how many loaded tasks the store
    /// no longer holds afterwards.
    pub async fn clear_done(&mut self) -> Result<usize, StoreError> {
        let remaining = self.store.clear_done().await?;
        let removed = self
            .tasks
            .iter()
            .filter(|t| !remaining.iter().any(|r| r.id == t.id))
            .count();
        self.tasks = remaining;
        Ok(removed)
    }

    /// Requests a digest of the loaded tasks. Only the newest request's
    /// outcome is kept in [`App::summary`].
    pub async fn generate_summary(&self) -> AiOutcome {
        let ticket = self.summary.begin();
        let outcome = self.digest.summarize(&self.tasks, today_utc()).await;
        self.summary.offer(ticket, outcome.clone());
        outcome
    }

    /// Requests a description suggestion for a draft title.
    pub async fn fetch_suggestion(&self, draft: &str) -> AiOutcome {
        let ticket = self.suggestion.begin();
        let outcome = self.digest.suggest(draft).await;
        self.suggestion.offer(ticket, outcome.clone());
        outcome
    }

    /// Outcome of the newest digest request that has completed.
    pub fn summary(&self) -> Option<AiOutcome> {
        self.summary.get()
    }

    pub fn suggestion(&self) -> Option<AiOutcome> {
        self.suggestion.get()
    }

    fn replace(&mut self, updated: Option<&Task>) {
        let Some(updated) = updated else { return };
        match self.tasks.iter_mut().find(|t| t.id == updated.id) {
            Some(task) => *task = updated.clone(),
            None => self.tasks.push(updated.clone()),
        }
    }
}
