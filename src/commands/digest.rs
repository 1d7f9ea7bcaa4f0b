//! AI digest and suggestion commands.

use super::CliApp;
use crate::{
    api::API_KEY_ENV,
    libs::{digest::AiOutcome, messages::Message},
    msg_info, msg_print, msg_warning,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct SuggestArgs {
    /// Draft task title
    #[arg(required = true)]
    draft: String,
}

pub async fn digest(app: &CliApp) -> Result<()> {
    match app.generate_summary().await {
        AiOutcome::Text(summary) => {
            msg_print!(Message::DigestHeader, true);
            msg_print!(summary);
        }
        AiOutcome::NothingToAsk => msg_info!(Message::DigestNothingDue),
        outcome => report_missing(&outcome, Message::DigestUnavailable),
    }
    Ok(())
}

pub async fn suggest(app: &CliApp, args: SuggestArgs) -> Result<()> {
    match app.fetch_suggestion(&args.draft).await {
        AiOutcome::Text(suggestion) => {
            msg_print!(Message::SuggestionHeader, true);
            msg_print!(suggestion);
        }
        AiOutcome::NothingToAsk => msg_info!(Message::SuggestionEmptyDraft),
        outcome => report_missing(&outcome, Message::SuggestionUnavailable),
    }
    Ok(())
}

/// Explains why there is no AI text. Never fails the command.
pub(super) fn report_missing(outcome: &AiOutcome, unavailable: Message) {
    match outcome {
        AiOutcome::NotConfigured => msg_warning!(Message::AiNotConfigured(API_KEY_ENV.to_string())),
        AiOutcome::Unavailable => msg_warning!(unavailable),
        AiOutcome::Text(_) | AiOutcome::NothingToAsk => {}
    }
}
