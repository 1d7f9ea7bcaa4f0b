//! Clients for external services.
//!
//! The only external service duetask talks to directly is a chat-completion
//! API used for digests and suggestions. The [`Completion`] trait is the seam
//! between prompt construction and transport, so the digest generator can be
//! driven by the real client or by a test double.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use duetask::api::{ChatMessage, Completion, OpenAi};
//! use duetask::libs::config::AiConfig;
//!
//! # async fn run() -> Result<(), duetask::api::AiError> {
//! let client = OpenAi::from_env(&AiConfig::default());
//! let reply = client.complete(&[ChatMessage::user("Hello")]).await?;
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod openai;

pub use openai::OpenAi;

/// Environment variable holding the chat-completion credential.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One role-tagged entry of a chat prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AiError {
    #[error("{} is not set", API_KEY_ENV)]
    NotConfigured,
    #[error("completion request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("completion API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("failed to parse completion response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A single request/response exchange with a chat-completion service.
#[allow(async_fn_in_trait)]
pub trait Completion {
    /// Whether a credential is available. Unconfigured clients are never called.
    fn is_configured(&self) -> bool;

    /// Sends `messages` and returns the first choice's text, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the credential is missing, the request cannot be
    /// sent, the service answers with a non-success status or the body is not
    /// a valid completion response.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<Option<String>, AiError>;
}
