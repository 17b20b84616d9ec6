//! Data issue command handlers.

use tabled::Tabled;

use datadex_core::feature::issue::{self, CreateIssueRequest};
use datadex_core::feature::{table_metadata, user};
use datadex_core::{Issue, Store, TableKey, select};

use crate::cli::{GlobalOpts, IssuesArgs, IssuesCommand, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::util;

/// Titles longer than this are cut in table output.
const TITLE_WIDTH: usize = 60;

#[derive(Tabled)]
struct IssueRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "URL")]
    url: String,
}

impl From<&Issue> for IssueRow {
    fn from(i: &Issue) -> Self {
        Self {
            key: i.issue_key.clone(),
            title: select::issue_display_title(&i.title, TITLE_WIDTH),
            status: i.status.clone().unwrap_or_default(),
            priority: i.priority_display_name.clone().unwrap_or_default(),
            url: i.url.clone(),
        }
    }
}

pub async fn handle(store: &Store, args: IssuesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        IssuesCommand::List { key } => {
            let state = util::request(store, issue::get_issues(&key), "get issues").await?;
            let issues = state.issues();
            let mut out = output::render_list(
                &global.output(),
                &issues.issues,
                |i| IssueRow::from(i),
                |i| i.issue_key.clone(),
            );
            if global.output() == OutputFormat::Table && issues.remaining > 0 {
                out.push_str(&format!("\n{} more", issues.remaining));
                if let Some(ref url) = issues.remaining_url {
                    out.push_str(&format!(": {url}"));
                }
            }
            output::print_output(&out, global.quiet);
            Ok(())
        }

        IssuesCommand::Create {
            key,
            title,
            description,
        } => {
            let table: TableKey = key.parse()?;

            // Owners and the reporter are read from state to notify owners.
            if let Err(e) = util::request(store, user::get_logged_in_user(), "get user").await {
                tracing::debug!(error = %e, "continuing without a logged-in user");
            }
            util::request(
                store,
                table_metadata::get_table_data(&key, None, Some("cli".into())),
                "get table",
            )
            .await?;

            let state = util::request(
                store,
                issue::create_issue(CreateIssueRequest {
                    key: key.clone(),
                    title,
                    description,
                    resource_name: table.resource_name(),
                    resource_path: table.detail_path(),
                }),
                "create issue",
            )
            .await?;

            if let Some(created) = state.issues().issues.first() {
                output::success(
                    global,
                    &format!("Created {} ({})", created.issue_key, created.url),
                );
            } else {
                output::success(global, &format!("Issue filed against {key}"));
            }
            Ok(())
        }
    }
}
