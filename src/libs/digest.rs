//! AI digest and suggestion generation.
//!
//! Prompt construction is pure and deterministic: the same tasks in the same
//! order always produce the same messages. The [`Digest`] generator wraps a
//! [`Completion`] client and turns every failure into an [`AiOutcome`], so
//! nothing past this boundary ever sees a transport or parse error.
//!
//! A client without a credential answers [`AiOutcome::NotConfigured`] to every
//! request, before relevance or draft checks run.
//!
//! ## Relevance
//!
//! Only tasks with a parsable due date at most one day away make it into the
//! digest prompt: overdue tasks, tasks due today and tasks due tomorrow.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use duetask::libs::digest::is_relevant;
//! use duetask::libs::task::Task;
//!
//! let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
//! assert!(is_relevant(&Task::new("a", "overdue").with_date("2024-03-01"), today));
//! assert!(!is_relevant(&Task::new("b", "later").with_date("2024-03-12"), today));
//! assert!(!is_relevant(&Task::new("c", "whenever"), today));
//! ```

use super::due::days_until;
use super::task::Task;
use crate::api::{AiError, ChatMessage, Completion};
use chrono::NaiveDate;
use std::fmt::Write;

pub const DIGEST_FALLBACK: &str = "No summary.";
pub const SUGGESTION_FALLBACK: &str = "No response.";

const DIGEST_SYSTEM: &str = "You are an assistant that analyzes a user's tasks and writes a summary of the day: \
     priorities, overdue items and next steps.";
const SUGGESTION_SYSTEM: &str = "You are an assistant that suggests a short description for a task. \
     Answer with one or two sentences.";
const DIGEST_SECTIONS: [&str; 4] = [
    "Executive summary (3 lines max)",
    "List of immediate priorities",
    "Useful observations",
    "List of completed tasks",
];

/// Overdue, due today or due tomorrow.
pub fn is_relevant(task: &Task, today: NaiveDate) -> bool {
    matches!(days_until(task.date.as_deref(), today), Some(days) if days <= 1)
}

/// Relevant tasks in input order.
pub fn relevant_tasks(tasks: &[Task], today: NaiveDate) -> Vec<&Task> {
    tasks.iter().filter(|t| is_relevant(t, today)).collect()
}

/// System instruction plus one block per task and the requested sections.
pub fn digest_prompt(tasks: &[&Task]) -> Vec<ChatMessage> {
    let blocks: Vec<String> = tasks
        .iter()
        .enumerate()
        .map(|(i, t)| {
            format!(
                "Task {}:\n  Title: {}\n  Status: {}\n  Due date: {}\n  Notes: {}",
                i + 1,
                t.title,
                t.status,
                t.date.as_deref().unwrap_or("No date"),
                t.notes.as_deref().unwrap_or("No notes"),
            )
        })
        .collect();

    let mut content = format!("These are the tasks:\n\n{}\n\nReturn:\n\n", blocks.join("\n\n"));
    for (i, section) in DIGEST_SECTIONS.iter().enumerate() {
        let _ = writeln!(content, "{}. {}", i + 1, section);
    }

    vec![ChatMessage::system(DIGEST_SYSTEM), ChatMessage::user(content)]
}

/// `None` for a blank draft: there is nothing to ask about.
pub fn suggestion_prompt(draft: &str) -> Option<Vec<ChatMessage>> {
    let draft = draft.trim();
    if draft.is_empty() {
        return None;
    }
    Some(vec![ChatMessage::system(SUGGESTION_SYSTEM), ChatMessage::user(draft)])
}

/// Result of a digest or suggestion request as seen by callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiOutcome {
    /// Service text, or the fallback string when the reply carried no content
    /// at all. Blank content is passed through unchanged.
    Text(String),
    /// No task qualified, or the draft was blank. The service was not called.
    NothingToAsk,
    /// The request or its response failed. Details are logged.
    Unavailable,
    /// No API credential is configured.
    NotConfigured,
}

impl AiOutcome {
    /// The text to show, empty for every non-text outcome.
    pub fn text(&self) -> &str {
        match self {
            AiOutcome::Text(text) => text,
            _ => "",
        }
    }
}

/// Digest and suggestion generator over a completion client.
#[derive(Debug, Clone)]
pub struct Digest<C> {
    client: C,
}

impl<C: Completion> Digest<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_configured()
    }

    /// Summarizes the tasks due by tomorrow, relative to `today`.
    pub async fn summarize(&self, tasks: &[Task], today: NaiveDate) -> AiOutcome {
        if !self.is_configured() {
            return AiOutcome::NotConfigured;
        }
        let relevant = relevant_tasks(tasks, today);
        if relevant.is_empty() {
            return AiOutcome::NothingToAsk;
        }
        tracing::info!(tasks = relevant.len(), "requesting digest");
        self.ask(&digest_prompt(&relevant), DIGEST_FALLBACK).await
    }

    /// Suggests a description for a draft title.
    pub async fn suggest(&self, draft: &str) -> AiOutcome {
        if !self.is_configured() {
            return AiOutcome::NotConfigured;
        }
        match suggestion_prompt(draft) {
            Some(messages) => self.ask(&messages, SUGGESTION_FALLBACK).await,
            None => AiOutcome::NothingToAsk,
        }
    }

    async fn ask(&self, messages: &[ChatMessage], fallback: &str) -> AiOutcome {
        match self.client.complete(messages).await {
            Ok(Some(text)) => AiOutcome::Text(text),
            Ok(None) => AiOutcome::Text(fallback.to_string()),
            Err(AiError::NotConfigured) => AiOutcome::NotConfigured,
            Err(e) => {
                tracing::warn!(error = %e, "completion request failed");
                AiOutcome::Unavailable
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::task::TaskStatus;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    fn dated(id: &str, offset: i64) -> Task {
        let date = (today() + Duration::days(offset)).format("%Y-%m-%d").to_string();
        Task::new(id, &format!("offset {}", offset)).with_date(&date)
    }

    #[test]
    fn test_relevance_by_offset() {
        let tasks = vec![
            dated("a", -5),
            dated("b", -1),
            dated("c", 0),
            dated("d", 1),
            dated("e", 2),
            Task::new("f", "no date"),
            Task::new("g", "bad date").with_date("tomorrow-ish"),
        ];
        let ids: Vec<&str> = relevant_tasks(&tasks, today()).iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_digest_prompt_blocks() {
        let first = Task::new("1", "Pay rent").with_date("2024-03-09").with_status(TaskStatus::InProgress);
        let second = Task::new("2", "Call mom").with_notes("before noon");
        let messages = digest_prompt(&[&first, &second]);

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, crate::api::Role::System);
        let expected = "These are the tasks:\n\n\
            Task 1:\n  Title: Pay rent\n  Status: IN_PROGRESS\n  Due date: 2024-03-09\n  Notes: No notes\n\n\
            Task 2:\n  Title: Call mom\n  Status: TODO\n  Due date: No date\n  Notes: before noon\n\n\
            Return:\n\n\
            1. Executive summary (3 lines max)\n\
            2. List of immediate priorities\n\
            3. Useful observations\n\
            4. List of completed tasks\n";
        assert_eq!(messages[1].content, expected);
    }

    #[test]
    fn test_digest_prompt_is_deterministic() {
        let task = dated("x", 0);
        assert_eq!(digest_prompt(&[&task]), digest_prompt(&[&task]));
    }

    #[test]
    fn test_suggestion_prompt() {
        assert!(suggestion_prompt("   ").is_none());
        let messages = suggestion_prompt("  Renew passport ").unwrap();
        assert_eq!(messages[1].content, "Renew passport");
    }

    #[test]
    fn test_outcome_text() {
        assert_eq!(AiOutcome::Text("hi".into()).text(), "hi");
        assert_eq!(AiOutcome::Unavailable.text(), "");
        assert_eq!(AiOutcome::NotConfigured.text(), "");
    }
}
