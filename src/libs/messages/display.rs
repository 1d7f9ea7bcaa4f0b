//! Display implementation for duetask messages.
//!
//! All user-facing text is defined here, in one place, so wording stays
//! consistent between commands and can be changed without touching the code
//! that emits it.

use super::types::Message;
use std::fmt;

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            // === TASK MESSAGES ===
            Message::TaskCreated(title) => format!("Task '{}' created", title),
            Message::TaskUpdated(title) => format!("Task '{}' updated", title),
            Message::TaskDeleted(id) => format!("Task {} deleted", id),
            Message::TaskNotFound(id) => format!("Task {} not found, nothing changed", id),
            Message::TaskStatusChanged(title, status) => format!("Task '{}' is now {}", title, status),
            Message::TaskDueDateSet(title, label) => format!("Task '{}' is due: {}", title, label),
            Message::TaskDueDateCleared(title) => format!("Task '{}' no longer has a due date", title),
            Message::TaskCreateFailed(reason) => format!("Failed to create task: {}", reason),
            Message::TaskUpdateFailed(reason) => format!("Failed to update task: {}", reason),
            Message::TaskDeleteFailed(reason) => format!("Failed to delete task: {}", reason),
            Message::TasksLoadFailed(reason) => format!("Failed to load tasks, showing an empty list: {}", reason),
            Message::TasksHeader(count) => format!("Tasks ({})", count),
            Message::NoTasksYet => "No tasks yet. Create the first one with `duetask add`.".to_string(),
            Message::NoChangesDetected => "No changes given".to_string(),
            Message::NoDoneTasks => "There are no completed tasks".to_string(),
            Message::DoneTasksCleared(count) => format!("Deleted {} completed task(s)", count),
            Message::ConfirmClearDone(count) => format!("Delete {} completed task(s)?", count),
            Message::ClearDoneCancelled => "Nothing deleted".to_string(),

            // === AI MESSAGES ===
            Message::DigestHeader => "Daily digest".to_string(),
            Message::DigestNothingDue => "Nothing is overdue or due by tomorrow".to_string(),
            Message::DigestUnavailable => "No summary available right now".to_string(),
            Message::SuggestionHeader => "Suggestion".to_string(),
            Message::SuggestionEmptyDraft => "Type a title to get a suggestion".to_string(),
            Message::SuggestionUnavailable => "No suggestion available right now".to_string(),
            Message::SuggestionUsedAsNotes => "Used the AI suggestion as notes".to_string(),
            Message::AiNotConfigured(var) => format!("AI features are not configured: set {}", var),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved".to_string(),
            Message::ConfigDeleted => "Configuration removed".to_string(),
            Message::ConfigLoadFailed(reason) => format!("Failed to read configuration, using defaults: {}", reason),
            Message::ConfigModuleStore => "Task storage".to_string(),
            Message::ConfigModuleAi => "AI digest".to_string(),
            Message::BackendBlob => "Local blob".to_string(),
            Message::BackendRest => "REST service".to_string(),
            Message::StoreOpenFailed(reason) => format!("Failed to open task storage: {}", reason),
            Message::StoreOpened(backend, location) => format!("Using {} task storage at {}", backend, location),

            // === PROMPTS ===
            Message::PromptSelectModules => "Select modules to configure".to_string(),
            Message::PromptBackend => "Where should tasks be stored?".to_string(),
            Message::PromptStoreApiUrl => "Enter the task service URL".to_string(),
            Message::PromptAiApiUrl => "Enter the chat-completion endpoint".to_string(),
            Message::PromptAiModel => "Enter the model name".to_string(),
            Message::PromptAiTemperature => "Enter the sampling temperature".to_string(),
        };
        write!(f, "{}", text)
    }
}
