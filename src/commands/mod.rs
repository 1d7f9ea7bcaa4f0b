pub mod digest;
pub mod init;
pub mod task;

use crate::api::OpenAi;
use crate::db::Store;
use crate::libs::app::App;
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::{msg_debug, msg_error_anyhow, msg_warning};
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configure storage and AI settings")]
    Init(init::InitArgs),
    #[command(about = "Create a task")]
    Add(task::AddArgs),
    #[command(about = "List tasks, soonest due first", visible_alias = "ls")]
    List,
    #[command(about = "Show one task")]
    Show(task::IdArgs),
    #[command(about = "Edit a task")]
    Edit(task::EditArgs),
    #[command(about = "Delete a task", visible_alias = "rm")]
    Delete(task::IdArgs),
    #[command(about = "Advance a task to its next status")]
    Next(task::IdArgs),
    #[command(about = "Set or clear a task's due date")]
    Due(task::DueArgs),
    #[command(about = "Delete all completed tasks")]
    Clear(task::ClearArgs),
    #[command(about = "AI digest of overdue and upcoming tasks")]
    Digest,
    #[command(about = "AI suggestion for a task description")]
    Suggest(digest::SuggestArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Add(args) => task::add(&mut open_app().await?, args).await,
            Commands::List => task::list(&open_app().await?),
            Commands::Show(args) => task::show(&open_app().await?, args),
            Commands::Edit(args) => task::edit(&mut open_app().await?, args).await,
            Commands::Delete(args) => task::delete(&mut open_app().await?, args).await,
            Commands::Next(args) => task::next(&mut open_app().await?, args).await,
            Commands::Due(args) => task::due(&mut open_app().await?, args).await,
            Commands::Clear(args) => task::clear(&mut open_app().await?, args).await,
            Commands::Digest => digest::digest(&open_app().await?).await,
            Commands::Suggest(args) => digest::suggest(&open_app().await?, args).await,
        }
    }
}

/// Application state as configured, with the task list loaded.
pub type CliApp = App<Store, OpenAi>;

async fn open_app() -> Result<CliApp> {
    let config = Config::read().unwrap_or_else(|e| {
        msg_warning!(Message::ConfigLoadFailed(e.to_string()));
        Config::default()
    });

    let store = Store::from_config(&config.store_or_default())
        .map_err(|e| msg_error_anyhow!(Message::StoreOpenFailed(e.to_string())))?;
    msg_debug!(Message::StoreOpened(store.backend().to_string(), store.location()));
    let client = OpenAi::from_env(&config.ai_or_default());

    let mut app = App::new(store, client);
    if let Some(e) = app.reload().await {
        msg_warning!(Message::TasksLoadFailed(e.to_string()));
    }
    Ok(app)
}
