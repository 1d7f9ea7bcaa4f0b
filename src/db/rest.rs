use super::{StoreError, TaskStore};
use crate::libs::task::{NewTask, Task, TaskPatch, TaskStatus};
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use std::time::Duration;

const TASKS_PATH: &str = "tasks";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Serialize, Debug)]
struct CreateBody<'a> {
    #[serde(flatten)]
    task: &'a NewTask,
    status: TaskStatus,
}

/// Full record sent on `PUT`. Cleared optional fields go out as `null`.
#[derive(Serialize, Debug)]
struct UpdateBody<'a> {
    title: &'a str,
    status: TaskStatus,
    date: Option<&'a str>,
    notes: Option<&'a str>,
}

impl<'a> From<&'a Task> for UpdateBody<'a> {
    fn from(task: &'a Task) -> Self {
        Self {
            title: &task.title,
            status: task.status,
            date: task.date.as_deref(),
            notes: task.notes.as_deref(),
        }
    }
}

/// Client for a remote `/tasks` resource.
///
/// | operation      | request                     |
/// |----------------|-----------------------------|
/// | list           | `GET /tasks`                |
/// | get            | `GET /tasks/{id}`           |
/// | create         | `POST /tasks`               |
/// | update         | `PUT /tasks/{id}`           |
/// | cycle status   | `PUT /tasks/{id}/cycle`     |
/// | remove         | `DELETE /tasks/{id}`        |
/// | clear done     | `DELETE /tasks?status=DONE` |
///
/// A `404` on any single-task request is the unknown-id no-op.
#[derive(Debug, Clone)]
pub struct RestStore {
    client: Client,
    base_url: String,
}

impl RestStore {
    pub fn new(api_url: &str) -> Self {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build().unwrap_or_default();
        Self {
            client,
            base_url: format!("{}/{}", api_url.trim_end_matches('/'), TASKS_PATH),
        }
    }

    /// URL of the `/tasks` collection.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn task_url(&self, id: &str) -> String {
        format!("{}/{}", self.base_url, id)
    }

    fn check(res: Response) -> Result<Response, StoreError> {
        if res.status().is_success() {
            Ok(res)
        } else {
            Err(StoreError::Status {
                status: res.status().as_u16(),
                url: res.url().to_string(),
            })
        }
    }

    /// `None` for a 404, the checked response otherwise.
    fn check_found(res: Response) -> Result<Option<Response>, StoreError> {
        if res.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::check(res).map(Some)
    }
}

impl TaskStore for RestStore {
    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        let res = self.client.get(&self.base_url).send().await?;
        Ok(Self::check(res)?.json::<Vec<Task>>().await?)
    }

    async fn get(&self, id: &str) -> Result<Option<Task>, StoreError> {
        let res = self.client.get(self.task_url(id)).send().await?;
        match Self::check_found(res)? {
            Some(res) => Ok(Some(res.json::<Task>().await?)),
            None => Ok(None),
        }
    }

    async fn create(&self, task: NewTask) -> Result<Task, StoreError> {
        let task = task.validate()?;
        let body = CreateBody {
            task: &task,
            status: TaskStatus::Todo,
        };
        let res = self.client.post(&self.base_url).json(&body).send().await?;
        Ok(Self::check(res)?.json::<Task>().await?)
    }

    async fn update(&self, id: &str, patch: &TaskPatch) -> Result<Option<Task>, StoreError> {
        patch.validate()?;
        // PUT replaces the record, so merge onto the current state first.
        let Some(mut task) = self.get(id).await? else {
            return Ok(None);
        };
        task.apply(patch);

        let res = self.client.put(self.task_url(id)).json(&UpdateBody::from(&task)).send().await?;
        match Self::check_found(res)? {
            Some(res) => Ok(Some(res.json::<Task>().await?)),
            None => Ok(None),
        }
    }

    async fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let res = self.client.delete(self.task_url(id)).send().await?;
        Ok(Self::check_found(res)?.is_some())
    }

    async fn cycle_status(&self, id: &str) -> Result<Option<Task>, StoreError> {
        let res = self.client.put(format!("{}/cycle", self.task_url(id))).send().await?;
        let Some(res) = Self::check_found(res)? else {
            return Ok(None);
        };

        // Some services answer with a bare acknowledgement; re-read in that case.
        let body = res.text().await?;
        match serde_json::from_str::<Task>(&body) {
            Ok(task) => Ok(Some(task)),
            Err(_) => self.get(id).await,
        }
    }

    async fn clear_done(&self) -> Result<Vec<Task>, StoreError> {
        let res = self
            .client
            .delete(&self.base_url)
            .query(&[("status", TaskStatus::Done.as_str())])
            .send()
            .await?;
        Self::check(res)?;
        self.list().await
    }
}
