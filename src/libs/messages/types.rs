/// Every user-facing message. Text lives in `display.rs`.
#[derive(Debug, Clone)]
pub enum Message {
    // === TASK MESSAGES ===
    TaskCreated(String),               // title
    TaskUpdated(String),               // title
    TaskDeleted(String),               // id
    TaskNotFound(String),              // id
    TaskStatusChanged(String, String), // title, status
    TaskDueDateSet(String, String),    // title, due label
    TaskDueDateCleared(String),        // title
    TaskCreateFailed(String),          // reason
    TaskUpdateFailed(String),          // reason
    TaskDeleteFailed(String),          // reason
    TasksLoadFailed(String),           // reason
    TasksHeader(usize),                // count
    NoTasksYet,
    NoChangesDetected,
    NoDoneTasks,
    DoneTasksCleared(usize), // removed count
    ConfirmClearDone(usize), // count to remove
    ClearDoneCancelled,

    // === AI MESSAGES ===
    DigestHeader,
    DigestNothingDue,
    DigestUnavailable,
    SuggestionHeader,
    SuggestionEmptyDraft,
    SuggestionUnavailable,
    SuggestionUsedAsNotes,
    AiNotConfigured(String), // env var

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigLoadFailed(String), // reason
    ConfigModuleStore,
    ConfigModuleAi,
    BackendBlob,
    BackendRest,
    StoreOpenFailed(String),     // reason
    StoreOpened(String, String),     // backend, location

    // === PROMPTS ===
    PromptSelectModules,
    PromptBackend,
    PromptStoreApiUrl,
    PromptAiApiUrl,
    PromptAiModel,
    PromptAiTemperature,
}
