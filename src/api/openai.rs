use super::{AiError, ChatMessage, Completion, API_KEY_ENV};
use crate::libs::config::AiConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Serialize, Debug)]
struct CompletionRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: &'a [ChatMessage],
}

#[derive(Deserialize, Debug)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize, Debug)]
struct CompletionChoice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize, Debug)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize, Debug)]
struct ErrorBody {
    message: String,
}

/// Chat-completion client for OpenAI-compatible endpoints.
#[derive(Debug, Clone)]
pub struct OpenAi {
    client: Client,
    api_key: Option<String>,
    config: AiConfig,
}

impl OpenAi {
    pub fn new(config: &AiConfig, api_key: Option<String>) -> Self {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build().unwrap_or_default();
        Self {
            client,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            config: config.clone(),
        }
    }

    /// Reads the credential from the environment. A missing key is not an
    /// error here; it surfaces as [`AiError::NotConfigured`] on use.
    pub fn from_env(config: &AiConfig) -> Self {
        Self::new(config, env::var(API_KEY_ENV).ok())
    }
}

impl Completion for OpenAi {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<Option<String>, AiError> {
        let api_key = self.api_key.as_deref().ok_or(AiError::NotConfigured)?;
        let request = CompletionRequest {
            model: &self.config.model,
            temperature: self.config.temperature,
            messages,
        };

        tracing::debug!(model = %self.config.model, messages = messages.len(), "sending completion request");
        let res = self.client.post(&self.config.api_url).bearer_auth(api_key).json(&request).send().await?;

        let status = res.status();
        let body = res.text().await?;
        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&body).map(|e| e.error.message).unwrap_or(body);
            return Err(AiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let response: CompletionResponse = serde_json::from_str(&body)?;
        Ok(response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content))
    }
}
