//! Whole-collection blob storage with cookie semantics.
//!
//! The collection is a JSON array wrapped in an envelope carrying its expiry,
//! stored in a file named after a fixed key. Reading an absent, expired or
//! unparsable blob yields the seed collection instead of an error.
//!
//! Every mutation is a read-modify-write of the entire collection. There is
//! no locking across processes: two concurrent writers can lose each other's
//! updates and the last write wins. A backend that needs concurrent writers
//! must replace this one.

use super::{StoreError, TaskStore};
use crate::libs::data_storage::DataStorage;
use crate::libs::task::{NewTask, Task, TaskPatch, TaskStatus};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

/// Fixed key of the blob. Also used as the file name.
pub const BLOB_NAME: &str = "tm_tasks_v1";

/// Lifetime granted by every write.
pub const BLOB_MAX_AGE_DAYS: i64 = 30;

#[derive(Serialize, Deserialize, Debug)]
struct Envelope {
    expires_at: DateTime<Utc>,
    /// Serialized `Vec<Task>`, kept opaque like a cookie value.
    value: String,
}

#[derive(Debug, Clone)]
pub struct BlobStore {
    path: PathBuf,
}

impl BlobStore {
    /// Blob in the platform data directory.
    pub fn new() -> io::Result<Self> {
        Ok(Self::at(DataStorage::new().get_path(BLOB_NAME)?))
    }

    /// Blob at an explicit path.
    pub fn at(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Collection returned when no usable blob exists.
    pub fn seed() -> Vec<Task> {
        vec![
            Task::new("t1", "Design the base layout").with_status(TaskStatus::Done),
            Task::new("t2", "Create the tasks page").with_status(TaskStatus::InProgress),
            Task::new("t3", "Add a button to create tasks"),
        ]
    }

    async fn read(&self) -> Vec<Task> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Self::seed(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "task blob unreadable, using seed tasks");
                return Self::seed();
            }
        };

        let envelope: Envelope = match serde_json::from_str(&raw) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::warn!(error = %e, "task blob envelope unparsable, using seed tasks");
                return Self::seed();
            }
        };

        if envelope.expires_at <= Utc::now() {
            tracing::debug!(expired_at = %envelope.expires_at, "task blob expired, using seed tasks");
            return Self::seed();
        }

        match serde_json::from_str::<Vec<Task>>(&envelope.value) {
            Ok(tasks) => tasks,
            Err(e) => {
                tracing::warn!(error = %e, "task blob value unparsable, using seed tasks");
                Self::seed()
            }
        }
    }

    async fn write(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let envelope = Envelope {
            expires_at: Utc::now() + Duration::days(BLOB_MAX_AGE_DAYS),
            value: serde_json::to_string(tasks)?,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        // Replace the blob in one rename so readers never see half a write.
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, serde_json::to_vec(&envelope)?).await?;
        fs::rename(&tmp_path, &self.path).await?;
        tracing::debug!(count = tasks.len(), "task blob written");
        Ok(())
    }

    /// Read-modify-write of a single task. `None` when the id is unknown.
    async fn modify<F>(&self, id: &str, change: F) -> Result<Option<Task>, StoreError>
    where
        F: FnOnce(&mut Task),
    {
        let mut tasks = self.read().await;
        let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        change(task);
        let updated = task.clone();
        self.write(&tasks).await?;
        Ok(Some(updated))
    }
}

impl TaskStore for BlobStore {
    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        Ok(self.read().await)
    }

    async fn get(&self, id: &str) -> Result<Option<Task>, StoreError> {
        Ok(self.read().await.into_iter().find(|t| t.id == id))
    }

    async fn create(&self, task: NewTask) -> Result<Task, StoreError> {
        let task = task.validate()?.into_task(&Uuid::new_v4().to_string());

        let mut tasks = self.read().await;
        tasks.insert(0, task.clone());
        self.write(&tasks).await?;
        Ok(task)
    }

    async fn update(&self, id: &str, patch: &TaskPatch) -> Result<Option<Task>, StoreError> {
        patch.validate()?;
        self.modify(id, |task| task.apply(patch)).await
    }

    async fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let mut tasks = self.read().await;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Ok(false);
        }
        self.write(&tasks).await?;
        Ok(true)
    }

    async fn cycle_status(&self, id: &str) -> Result<Option<Task>, StoreError> {
        self.modify(id, |task| task.status = task.status.next()).await
    }

    async fn clear_done(&self) -> Result<Vec<Task>, StoreError> {
        let mut tasks = self.read().await;
        tasks.retain(|t| t.status != TaskStatus::Done);
        self.write(&tasks).await?;
        Ok(tasks)
    }
}
