//! Ask a table's owners to add a description.

use datadex_core::feature::notification::{self, RequestMetadataType};
use datadex_core::feature::{table_metadata, user};
use datadex_core::{Store, TableKey, select};

use crate::cli::{GlobalOpts, RequestMetadataArgs};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(
    store: &Store,
    args: RequestMetadataArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let table: TableKey = args.key.parse()?;

    if let Err(e) = util::request(store, user::get_logged_in_user(), "get user").await {
        tracing::debug!(error = %e, "sending without a sender address");
    }
    let state = util::request(
        store,
        table_metadata::get_table_data(&args.key, None, Some("cli".into())),
        "get table",
    )
    .await?;

    if let Some(ref column) = args.column {
        let known = state
            .table_metadata()
            .table_data
            .columns
            .iter()
            .any(|c| &c.name == column);
        if !known {
            return Err(CliError::NotFound {
                resource_type: "column".into(),
                identifier: column.clone(),
            });
        }
    }

    let context = select::notification_context(&state);
    if context.recipients.is_empty() {
        return Err(CliError::Validation {
            field: "key".into(),
            reason: format!("{} has no owners to ask", args.key),
        });
    }
    let owners = context.recipients.len();

    let request_type = if args.column.is_some() {
        RequestMetadataType::ColumnDescription
    } else {
        RequestMetadataType::TableDescription
    };
    util::request(
        store,
        notification::request_metadata(
            &table,
            context.recipients,
            context.sender,
            request_type,
            args.column.as_deref(),
            args.comment.as_deref(),
        ),
        "request metadata",
    )
    .await?;

    output::success(global, &format!("Asked {owners} owner(s) of {}", args.key));
    Ok(())
}
