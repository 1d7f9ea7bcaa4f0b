//! Configuration management for duetask.
//!
//! Settings live in a single JSON file in the platform data directory. Every
//! section is optional: a fresh install with no file at all runs against the
//! local blob store and reads the AI credential from the environment.
//!
//! ## Configuration Structure
//!
//! - **Store Config**: which persistence backend to use and, for the REST
//!   backend, the base URL of the task service
//! - **AI Config**: chat-completion endpoint, model and sampling temperature
//!
//! The AI credential itself is never written to `config.json`. It is read from
//! `OPENAI_API_KEY`, which may also come from a `.env` file.
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use duetask::libs::config::Config;
//!
//! let config = Config::read()?;
//! let ai = config.ai_or_default();
//! println!("Digest model: {}", ai.model);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect, Select};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Configuration file name inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

pub const DEFAULT_AI_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_AI_MODEL: &str = "gpt-4o";
pub const DEFAULT_AI_TEMPERATURE: f32 = 0.3;

/// Represents a configurable module shown by the setup wizard.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    /// Unique identifier used to route the module's setup
    pub key: String,
    /// Display name shown to users during interactive setup
    pub name: String,
}

/// Persistence backend selector.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Serialized collection in a local file with cookie semantics.
    #[default]
    Blob,
    /// Remote `/tasks` REST resource.
    Rest,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Blob => f.write_str("blob"),
            Backend::Rest => f.write_str("rest"),
        }
    }
}

/// Task persistence settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct StoreConfig {
    pub backend: Backend,

    /// Base URL of the task service, without the `/tasks` suffix.
    ///
    /// Only used by the REST backend. Example: `http://localhost:3001`
    #[serde(default)]
    pub api_url: String,
}

/// Chat-completion settings for digests and suggestions.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AiConfig {
    /// Full URL of the chat-completion endpoint.
    pub api_url: String,
    pub model: String,
    /// Sampling temperature. Low values keep digests terse and repeatable.
    pub temperature: f32,
}

impl Default for AiConfig {
    fn default() -> Self {
        AiConfig {
            api_url: DEFAULT_AI_URL.to_string(),
            model: DEFAULT_AI_MODEL.to_string(),
            temperature: DEFAULT_AI_TEMPERATURE,
        }
    }
}

/// Root configuration object.
///
/// Unconfigured sections are omitted from the JSON output, keeping the file
/// small and readable.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<StoreConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai: Option<AiConfig>,
}

impl Config {
    /// Path of the configuration file in the data directory.
    pub fn path() -> Result<PathBuf> {
        Ok(DataStorage::new().get_path(CONFIG_FILE_NAME)?)
    }

    /// Reads configuration from the data directory.
    ///
    /// A missing file yields the default configuration. A file that exists but
    /// cannot be parsed is an error.
    pub fn read() -> Result<Config> {
        Self::read_from(&Self::path()?)
    }

    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Writes the configuration as pretty-printed JSON.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes the configuration file. Missing files are not an error.
    pub fn delete() -> Result<()> {
        let path = Self::path()?;
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    pub fn store_or_default(&self) -> StoreConfig {
        self.store.clone().unwrap_or_default()
    }

    pub fn ai_or_default(&self) -> AiConfig {
        self.ai.clone().unwrap_or_default()
    }

    /// Runs the interactive setup wizard.
    ///
    /// Existing values are offered as defaults so re-running `init` only
    /// changes what the user edits. Modules left unselected keep their
    /// current settings.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = vec![
            ConfigModule {
                key: "store".to_string(),
                name: Message::ConfigModuleStore.to_string(),
            },
            ConfigModule {
                key: "ai".to_string(),
                name: Message::ConfigModuleAi.to_string(),
            },
        ];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "store" => config.store = Some(Self::init_store(config.store_or_default())?),
                "ai" => config.ai = Some(Self::init_ai(config.ai_or_default())?),
                _ => {}
            }
        }

        Ok(config)
    }

    fn init_store(default: StoreConfig) -> Result<StoreConfig> {
        msg_print!(Message::ConfigModuleStore);
        let backends = [Backend::Blob, Backend::Rest];
        let labels = [Message::BackendBlob.to_string(), Message::BackendRest.to_string()];
        let current = backends.iter().position(|b| *b == default.backend).unwrap_or(0);

        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptBackend.to_string())
            .items(&labels)
            .default(current)
            .interact()?;

        let backend = backends[choice];
        let api_url = match backend {
            Backend::Rest => Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptStoreApiUrl.to_string())
                .default(default.api_url)
                .interact_text()?,
            Backend::Blob => default.api_url,
        };

        Ok(StoreConfig { backend, api_url })
    }

    fn init_ai(default: AiConfig) -> Result<AiConfig> {
        msg_print!(Message::ConfigModuleAi);
        Ok(AiConfig {
            api_url: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptAiApiUrl.to_string())
                .default(default.api_url)
                .interact_text()?,
            model: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptAiModel.to_string())
                .default(default.model)
                .interact_text()?,
            temperature: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptAiTemperature.to_string())
                .default(default.temperature)
                .interact_text()?,
        })
    }
}
