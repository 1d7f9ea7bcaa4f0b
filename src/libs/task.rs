//! Task records and their input types.
//!
//! A [`Task`] is the only persisted entity. It is created from a [`NewTask`]
//! and mutated through a [`TaskPatch`], both of which are validated here
//! before any store sees them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Maximum length of the free-text notes, in characters.
pub const NOTES_MAX_LEN: usize = 1000;

/// Position of a task in the status cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    /// Cycle order. `next` wraps around the end of this slice.
    pub const ORDER: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done];

    pub fn next(self) -> Self {
        let idx = Self::ORDER.iter().position(|s| *s == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "TODO",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Done => "DONE",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace([' ', '-'], "_").as_str() {
            "TODO" => Ok(TaskStatus::Todo),
            "IN_PROGRESS" => Ok(TaskStatus::InProgress),
            "DONE" => Ok(TaskStatus::Done),
            _ => Err(TaskError::UnknownStatus(s.to_string())),
        }
    }
}

/// Input validation failures. Raised before any store is touched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskError {
    #[error("task title must not be empty")]
    EmptyTitle,
    #[error("notes exceed {max} characters ({0})", max = NOTES_MAX_LEN)]
    NotesTooLong(usize),
    #[error("unknown task status '{0}'")]
    UnknownStatus(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub status: TaskStatus,
    /// Due date. Older blobs wrote this field as `due`.
    #[serde(default, alias = "due")]
    pub date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Task {
    pub fn new(id: &str, title: &str) -> Self {
        Task {
            id: id.to_string(),
            title: title.to_string(),
            status: TaskStatus::Todo,
            date: None,
            notes: None,
        }
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_date(mut self, date: &str) -> Self {
        self.date = normalize_optional(Some(date));
        self
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = normalize_optional(Some(notes));
        self
    }

    /// Merges every field present in `patch` into this task.
    pub fn apply(&mut self, patch: &TaskPatch) {
        if let Some(title) = &patch.title {
            self.title = title.trim().to_string();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(date) = &patch.date {
            self.date = normalize_optional(Some(date.as_str()));
        }
        if let Some(notes) = &patch.notes {
            self.notes = normalize_optional(Some(notes.as_str()));
        }
    }
}

/// Creation input. The store assigns the id and the initial status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewTask {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewTask {
    pub fn new(title: &str) -> Self {
        NewTask {
            title: title.to_string(),
            date: None,
            notes: None,
        }
    }

    pub fn date(mut self, date: Option<&str>) -> Self {
        self.date = date.map(str::to_string);
        self
    }

    pub fn notes(mut self, notes: Option<&str>) -> Self {
        self.notes = notes.map(str::to_string);
        self
    }

    /// Trims every field and rejects empty titles and oversized notes.
    pub fn validate(self) -> Result<NewTask, TaskError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(TaskError::EmptyTitle);
        }
        let notes = normalize_optional(self.notes.as_deref());
        check_notes(notes.as_deref())?;

        Ok(NewTask {
            title,
            date: normalize_optional(self.date.as_deref()),
            notes,
        })
    }

    /// Builds the stored record for a freshly assigned id.
    pub fn into_task(self, id: &str) -> Task {
        Task {
            id: id.to_string(),
            title: self.title,
            status: TaskStatus::Todo,
            date: self.date,
            notes: self.notes,
        }
    }
}

/// Partial update. For `date` and `notes` an empty string clears the field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub status: Option<TaskStatus>,
    pub date: Option<String>,
    pub notes: Option<String>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.status.is_none() && self.date.is_none() && self.notes.is_none()
    }

    pub fn validate(&self) -> Result<(), TaskError> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(TaskError::EmptyTitle);
            }
        }
        check_notes(self.notes.as_deref())
    }
}

/// Maps `None`, empty and whitespace-only strings to `None`; trims the rest.
pub fn normalize_optional(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

fn check_notes(notes: Option<&str>) -> Result<(), TaskError> {
    match notes.map(|n| n.chars().count()) {
        Some(len) if len > NOTES_MAX_LEN => Err(TaskError::NotesTooLong(len)),
        _ => Ok(()),
    }
}
