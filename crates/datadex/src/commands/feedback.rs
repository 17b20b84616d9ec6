use datadex_core::feature::feedback;
use datadex_core::{FeedbackForm, Store};

use crate::cli::{FeedbackArgs, FeedbackCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(
    store: &Store,
    args: FeedbackArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let form = form_from(args.command);
    let kind = form.feedback_type();
    util::request(store, feedback::submit_feedback(form), "submit feedback").await?;
    output::success(global, &format!("{kind} sent"));
    Ok(())
}

fn form_from(command: FeedbackCommand) -> FeedbackForm {
    match command {
        FeedbackCommand::Rating { rating, comment } => FeedbackForm::Rating { rating, comment },
        FeedbackCommand::Request {
            summary,
            value_prop,
            subject,
        } => FeedbackForm::Request {
            feature_summary: summary,
            value_prop,
            subject,
        },
        FeedbackCommand::Bug {
            summary,
            repro,
            subject,
        } => FeedbackForm::BugReport {
            bug_summary: summary,
            repro_steps: repro,
            subject,
        },
    }
}
