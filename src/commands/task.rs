//! Task management commands.
//!
//! Each handler takes the application state, performs one store operation
//! and reports the outcome. An unknown id is a warning, not an error: the
//! same command can be repeated without failing.

use super::CliApp;
use crate::{
    libs::{
        due::{days_until_now, due_label, today_utc},
        messages::Message,
        task::{NewTask, TaskPatch, TaskStatus},
        view::View,
    },
    msg_bail_anyhow, msg_info, msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Task title
    #[arg(required = true)]
    title: String,
    /// Due date, YYYY-MM-DD
    #[arg(short, long)]
    date: Option<String>,
    /// Free-text description
    #[arg(short, long)]
    notes: Option<String>,
    /// Fill missing notes with an AI suggestion for the title
    #[arg(short, long)]
    suggest: bool,
}

#[derive(Debug, Args)]
pub struct IdArgs {
    /// Task id, or a unique prefix of it
    id: String,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Task id, or a unique prefix of it
    id: String,
    #[arg(short, long)]
    title: Option<String>,
    /// TODO, IN_PROGRESS or DONE
    #[arg(short, long)]
    status: Option<TaskStatus>,
    /// Due date, YYYY-MM-DD; empty clears it
    #[arg(short, long)]
    date: Option<String>,
    /// Description; empty clears it
    #[arg(short, long)]
    notes: Option<String>,
}

#[derive(Debug, Args)]
pub struct DueArgs {
    /// Task id, or a unique prefix of it
    id: String,
    /// Due date, YYYY-MM-DD; omit to clear
    date: Option<String>,
}

#[derive(Debug, Args)]
pub struct ClearArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

pub async fn add(app: &mut CliApp, args: AddArgs) -> Result<()> {
    let mut notes = args.notes;
    if args.suggest && notes.as_deref().map_or(true, |n| n.trim().is_empty()) {
        let suggestion = app.fetch_suggestion(&args.title).await;
        if !suggestion.text().is_empty() {
            notes = Some(suggestion.text().to_string());
            msg_info!(Message::SuggestionUsedAsNotes);
        } else {
            super::digest::report_missing(&suggestion, Message::SuggestionUnavailable);
        }
    }

    let task = NewTask::new(&args.title).date(args.date.as_deref()).notes(notes.as_deref());
    match app.add_task(task).await {
        Ok(task) => {
            msg_success!(Message::TaskCreated(task.title.clone()));
            View::task(&task, today_utc());
            Ok(())
        }
        Err(e) => msg_bail_anyhow!(Message::TaskCreateFailed(e.to_string())),
    }
}

pub fn list(app: &CliApp) -> Result<()> {
    let tasks = app.sorted_tasks();
    if tasks.is_empty() {
        msg_info!(Message::NoTasksYet);
        return Ok(());
    }

    msg_print!(Message::TasksHeader(tasks.len()), true);
    View::tasks(&tasks, today_utc());
    Ok(())
}

pub fn show(app: &CliApp, args: IdArgs) -> Result<()> {
    let id = resolve_id(app, &args.id);
    match app.find(&id) {
        Some(task) => View::task(task, today_utc()),
        None => msg_warning!(Message::TaskNotFound(id)),
    }
    Ok(())
}

pub async fn edit(app: &mut CliApp, args: EditArgs) -> Result<()> {
    let patch = TaskPatch {
        title: args.title,
        status: args.status,
        date: args.date,
        notes: args.notes,
    };
    if patch.is_empty() {
        msg_info!(Message::NoChangesDetected);
        return Ok(());
    }

    let id = resolve_id(app, &args.id);
    match app.edit_task(&id, &patch).await {
        Ok(Some(task)) => msg_success!(Message::TaskUpdated(task.title)),
        Ok(None) => msg_warning!(Message::TaskNotFound(id)),
        Err(e) => msg_bail_anyhow!(Message::TaskUpdateFailed(e.to_string())),
    }
    Ok(())
}

pub async fn delete(app: &mut CliApp, args: IdArgs) -> Result<()> {
    let id = resolve_id(app, &args.id);
    match app.remove_task(&id).await {
        Ok(true) => msg_success!(Message::TaskDeleted(id)),
        Ok(false) => msg_warning!(Message::TaskNotFound(id)),
        Err(e) => msg_bail_anyhow!(Message::TaskDeleteFailed(e.to_string())),
    }
    Ok(())
}

pub async fn next(app: &mut CliApp, args: IdArgs) -> Result<()> {
    let id = resolve_id(app, &args.id);
    match app.cycle_status(&id).await {
        Ok(Some(task)) => msg_success!(Message::TaskStatusChanged(task.title, task.status.to_string())),
        Ok(None) => msg_warning!(Message::TaskNotFound(id)),
        Err(e) => msg_bail_anyhow!(Message::TaskUpdateFailed(e.to_string())),
    }
    Ok(())
}

pub async fn due(app: &mut CliApp, args: DueArgs) -> Result<()> {
    let id = resolve_id(app, &args.id);
    let date = args.date.unwrap_or_default();
    match app.set_due_date(&id, &date).await {
        Ok(Some(task)) if task.date.is_some() => {
            let label = due_label(days_until_now(task.date.as_deref()));
            msg_success!(Message::TaskDueDateSet(task.title, label));
        }
        Ok(Some(task)) => msg_success!(Message::TaskDueDateCleared(task.title)),
        Ok(None) => msg_warning!(Message::TaskNotFound(id)),
        Err(e) => msg_bail_anyhow!(Message::TaskUpdateFailed(e.to_string())),
    }
    Ok(())
}

pub async fn clear(app: &mut CliApp, args: ClearArgs) -> Result<()> {
    let done = app.tasks().iter().filter(|t| t.status == TaskStatus::Done).count();
    if done == 0 {
        msg_info!(Message::NoDoneTasks);
        return Ok(());
    }

    if !args.yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmClearDone(done).to_string())
            .default(false)
            .interact()?;
        if !confirmed {
            msg_info!(Message::ClearDoneCancelled);
            return Ok(());
        }
    }

    match app.clear_done().await {
        Ok(removed) => msg_success!(Message::DoneTasksCleared(removed)),
        Err(e) => msg_bail_anyhow!(Message::TaskDeleteFailed(e.to_string())),
    }
    Ok(())
}

/// Expands a unique id prefix to the full id. Anything else is passed
/// through unchanged and left for the store to report as not found.
fn resolve_id(app: &CliApp, input: &str) -> String {
    if app.find(input).is_some() {
        return input.to_string();
    }
    let mut matches = app.tasks().iter().filter(|t| t.id.starts_with(input));
    match (matches.next(), matches.next()) {
        (Some(task), None) => task.id.clone(),
        _ => input.to_string(),
    }
}
