//! Task persistence layer.
//!
//! Two interchangeable backends implement [`TaskStore`]:
//!
//! - **Blob** ([`blob::BlobStore`]): the whole collection serialized into one
//!   local file with cookie semantics (fixed key, 30 day lifetime, seed data
//!   when absent). Every mutation rewrites the entire collection.
//! - **REST** ([`rest::RestStore`]): a remote `/tasks` resource.
//!
//! Both report an unknown id as a silent no-op (`Ok(None)` / `Ok(false)`)
//! rather than an error, so repeated submissions of the same intent are
//! harmless.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use duetask::db::{Store, TaskStore};
//! use duetask::libs::config::StoreConfig;
//! use duetask::libs::task::NewTask;
//!
//! # async fn run() -> Result<(), duetask::db::StoreError> {
//! let store = Store::from_config(&StoreConfig::default())?;
//! let task = store.create(NewTask::new("Ship release")).await?;
//! store.cycle_status(&task.id).await?;
//! # Ok(())
//! # }
//! ```

use crate::libs::config::{Backend, StoreConfig};
use crate::libs::task::{NewTask, Task, TaskError, TaskPatch};
use thiserror::Error;

pub mod blob;
pub mod rest;

pub use blob::BlobStore;
pub use rest::RestStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] TaskError),
    #[error("task service request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("task service answered {status} for {url}")]
    Status { status: u16, url: String },
    #[error("task storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("task data could not be (de)serialized: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("REST backend selected but no API URL is configured")]
    MissingApiUrl,
}

/// CRUD access to the task collection.
#[allow(async_fn_in_trait)]
pub trait TaskStore {
    /// All tasks in store-defined order.
    async fn list(&self) -> Result<Vec<Task>, StoreError>;

    async fn get(&self, id: &str) -> Result<Option<Task>, StoreError>;

    /// Stores a new task with a fresh id and status `TODO`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] for an empty title or oversized
    /// notes; nothing is written in that case.
    async fn create(&self, task: NewTask) -> Result<Task, StoreError>;

    /// Merges the fields present in `patch`. `Ok(None)` for an unknown id.
    async fn update(&self, id: &str, patch: &TaskPatch) -> Result<Option<Task>, StoreError>;

    /// Returns whether a task was removed.
    async fn remove(&self, id: &str) -> Result<bool, StoreError>;

    /// Advances the status one step. `Ok(None)` for an unknown id.
    async fn cycle_status(&self, id: &str) -> Result<Option<Task>, StoreError>;

    /// Removes every `DONE` task and returns what remains.
    async fn clear_done(&self) -> Result<Vec<Task>, StoreError>;

    /// Sets the due date; an empty string clears it.
    async fn set_due_date(&self, id: &str, date: &str) -> Result<Option<Task>, StoreError> {
        let patch = TaskPatch {
            date: Some(date.to_string()),
            ..Default::default()
        };
        self.update(id, &patch).await
    }
}

/// The backend selected by configuration.
#[derive(Debug, Clone)]
pub enum Store {
    Blob(BlobStore),
    Rest(RestStore),
}

impl Store {
    pub fn from_config(config: &StoreConfig) -> Result<Self, StoreError> {
        match config.backend {
            Backend::Blob => Ok(Store::Blob(BlobStore::new()?)),
            Backend::Rest if config.api_url.trim().is_empty() => Err(StoreError::MissingApiUrl),
            Backend::Rest => Ok(Store::Rest(RestStore::new(&config.api_url))),
        }
    }

    pub fn backend(&self) -> Backend {
        match self {
            Store::Blob(_) => Backend::Blob,
            Store::Rest(_) => Backend::Rest,
        }
    }

    /// Blob file path or REST collection URL.
    pub fn location(&self) -> String {
        match self {
            Store::Blob(store) => store.path().display().to_string(),
            Store::Rest(store) => store.base_url().to_string(),
        }
    }
}

impl TaskStore for Store {
    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        match self {
            Store::Blob(store) => store.list().await,
            Store::Rest(store) => store.list().await,
        }
    }

    async fn get(&self, id: &str) -> Result<Option<Task>, StoreError> {
        match self {
            Store::Blob(store) => store.get(id).await,
            Store::Rest(store) => store.get(id).await,
        }
    }

    async fn create(&self, task: NewTask) -> Result<Task, StoreError> {
        match self {
            Store::Blob(store) => store.create(task).await,
            Store::Rest(store) => store.create(task).await,
        }
    }

    async fn update(&self, id: &str, patch: &TaskPatch) -> Result<Option<Task>, StoreError> {
        match self {
            Store::Blob(store) => store.update(id, patch).await,
            Store::Rest(store) => store.update(id, patch).await,
        }
    }

    async fn remove(&self, id: &str) -> Result<bool, StoreError> {
        match self {
            Store::Blob(store) => store.remove(id).await,
            Store::Rest(store) => store.remove(id).await,
        }
    }

    async fn cycle_status(&self, id: &str) -> Result<Option<Task>, StoreError> {
        match self {
            Store::Blob(store) => store.cycle_status(id).await,
            Store::Rest(store) => store.cycle_status(id).await,
        }
    }

    async fn clear_done(&self) -> Result<Vec<Task>, StoreError> {
        match self {
            Store::Blob(store) => store.clear_done().await,
            Store::Rest(store) => store.clear_done().await,
        }
    }
}
