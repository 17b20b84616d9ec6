// Table detail coordinators.
//
// Description, owner, and tag operations act on the table currently
// loaded in state rather than carrying its key in the message.

use futures_util::FutureExt;
use futures_util::future::{BoxFuture, join_all, try_join_all};
use tracing::{debug, warn};

use datadex_api::Error;

use crate::convert::{owner_dict, sort_tags, table_payload};
use crate::feature::table_metadata::{
    ColumnDescription, OwnerUpdate, PreviewPayload, TableMetadataMessage as M, TagUpdate,
};
use crate::message::{Async, ErrorInfo};
use crate::model::{
    NotificationOptions, NotificationPayload, NotificationType, OwnerDict, Tag, TableKey,
    UpdateMethod,
};
use crate::select;

use super::{EffectContext, settle};

pub(super) fn route(ctx: &EffectContext, message: &M) -> Option<BoxFuture<'static, ()>> {
    let ctx = ctx.clone();
    let effect = match message {
        M::GetTableData(Async::Request(request)) => {
            let request = request.clone();
            async move {
                let result = ctx
                    .api
                    .get_table(
                        &request.key,
                        request.index.as_deref(),
                        request.source.as_deref(),
                    )
                    .await
                    .map(table_payload);
                ctx.dispatch(M::GetTableData(settle(result, "get_table")));
            }
            .boxed()
        }

        M::GetTableDescription(Async::Request(())) => async move {
            let Some(key) = current_key(&ctx, "get_table_description") else {
                return ctx.dispatch(M::GetTableDescription(Async::Failure(ErrorInfo::default())));
            };
            let result = ctx.api.get_table_description(&key).await;
            ctx.dispatch(M::GetTableDescription(settle(result, "get_table_description")));
        }
        .boxed(),

        M::UpdateTableDescription(Async::Request(description)) => {
            let description = description.clone();
            async move {
                let Some(key) = current_key(&ctx, "put_table_description") else {
                    return ctx
                        .dispatch(M::UpdateTableDescription(Async::Failure(ErrorInfo::default())));
                };
                let result = ctx
                    .api
                    .put_table_description(&key, &description)
                    .await
                    .map(|()| description);
                ctx.dispatch(M::UpdateTableDescription(settle(result, "put_table_description")));
            }
            .boxed()
        }

        M::GetColumnDescription(Async::Request(column_index)) => {
            let column_index = *column_index;
            async move {
                let Some((key, column)) = current_column(&ctx, column_index) else {
                    return ctx.dispatch(M::GetColumnDescription(Async::Failure(
                        ErrorInfo::default(),
                    )));
                };
                let result = ctx
                    .api
                    .get_column_description(&key, &column)
                    .await
                    .map(|description| ColumnDescription {
                        column_index,
                        description,
                    });
                ctx.dispatch(M::GetColumnDescription(settle(result, "get_column_description")));
            }
            .boxed()
        }

        M::UpdateColumnDescription(Async::Request(update)) => {
            let update = update.clone();
            async move {
                let Some((key, column)) = current_column(&ctx, update.column_index) else {
                    return ctx
                        .dispatch(M::UpdateColumnDescription(Async::Failure(ErrorInfo::default())));
                };
                let result = ctx
                    .api
                    .put_column_description(&key, &column, &update.description)
                    .await
                    .map(|()| update);
                ctx.dispatch(M::UpdateColumnDescription(settle(
                    result,
                    "put_column_description",
                )));
            }
            .boxed()
        }

        M::UpdateTableOwner(Async::Request(updates)) => {
            let updates = updates.clone();
            async move {
                let Some(key) = current_key(&ctx, "update_table_owner") else {
                    return ctx.dispatch(M::UpdateTableOwner(Async::Failure(ErrorInfo::default())));
                };
                let result = update_owners(&ctx, &key, &updates).await;
                ctx.dispatch(M::UpdateTableOwner(settle(result, "update_table_owner")));
            }
            .boxed()
        }

        M::UpdateTags(Async::Request(updates)) => {
            let updates = updates.clone();
            async move {
                let Some(key) = current_key(&ctx, "update_table_tag") else {
                    return ctx.dispatch(M::UpdateTags(Async::Failure(ErrorInfo::default())));
                };
                let result = update_tags(&ctx, &key, &updates).await;
                ctx.dispatch(M::UpdateTags(settle(result, "update_table_tag")));
            }
            .boxed()
        }

        M::GetPreviewData(Async::Request(query)) => {
            let query = query.clone();
            async move {
                let result = ctx
                    .api
                    .get_preview_data(&query)
                    .await
                    .map(|data| PreviewPayload {
                        data,
                        status_code: 200,
                    });
                ctx.dispatch(M::GetPreviewData(settle(result, "get_preview_data")));
            }
            .boxed()
        }

        M::GetTableLineage(Async::Request(key)) => {
            let key = key.clone();
            async move {
                let result = ctx.api.get_table_lineage(&key).await;
                ctx.dispatch(M::GetTableLineage(settle(result, "get_table_lineage")));
            }
            .boxed()
        }

        _ => return None,
    };
    Some(effect)
}

// ── State lookups ────────────────────────────────────────────────────

fn current_key(ctx: &EffectContext, operation: &str) -> Option<String> {
    let key = ctx.snapshot().table_metadata().table_data.key.clone();
    if key.is_empty() {
        warn!(operation, "no table loaded");
        return None;
    }
    Some(key)
}

fn current_column(ctx: &EffectContext, column_index: usize) -> Option<(String, String)> {
    let state = ctx.snapshot();
    let table = &state.table_metadata().table_data;
    if table.key.is_empty() {
        warn!(column_index, "no table loaded");
        return None;
    }
    let Some(column) = table.columns.get(column_index) else {
        warn!(column_index, columns = table.columns.len(), "column index out of range");
        return None;
    };
    Some((table.key.clone(), column.name.clone()))
}

// ── Owners ───────────────────────────────────────────────────────────

async fn update_owners(
    ctx: &EffectContext,
    key: &str,
    updates: &[OwnerUpdate],
) -> Result<OwnerDict, Error> {
    try_join_all(
        updates
            .iter()
            .map(|update| ctx.api.update_table_owner(key, &update.id, update.method)),
    )
    .await?;

    if ctx.config.features.notifications_enabled {
        notify_owner_changes(ctx, key, updates).await;
    }

    let table = ctx.api.get_table(key, None, None).await?;
    Ok(owner_dict(table.owners))
}

/// Tell each added or removed owner, skipping inactive accounts and
/// group aliases (which have no display name).
async fn notify_owner_changes(ctx: &EffectContext, key: &str, updates: &[OwnerUpdate]) {
    let sender = select::notification_context(&ctx.snapshot()).sender;
    let table: Option<TableKey> = key.parse().ok();

    join_all(updates.iter().map(|update| {
        let sender = sender.clone();
        let table = table.as_ref();
        async move {
            let user = match ctx.api.get_user(&update.id).await {
                Ok(user) => user,
                Err(e) => {
                    warn!(error = %e, owner = %update.id, "skipping owner notification");
                    return;
                }
            };
            if !user.is_active || user.display_name.is_empty() {
                debug!(owner = %update.id, "owner not notifiable");
                return;
            }
            let payload = NotificationPayload {
                recipients: vec![update.id.clone()],
                sender,
                notification_type: match update.method {
                    UpdateMethod::Put => NotificationType::Added,
                    UpdateMethod::Delete => NotificationType::Removed,
                },
                options: NotificationOptions {
                    resource_name: table.map(TableKey::resource_name),
                    resource_path: table.map(TableKey::detail_path),
                    ..NotificationOptions::default()
                },
            };
            if let Err(e) = ctx.api.send_notification(&payload).await {
                warn!(error = %e, owner = %update.id, "failed to notify owner");
            }
        }
    }))
    .await;
}

// ── Tags ─────────────────────────────────────────────────────────────

async fn update_tags(
    ctx: &EffectContext,
    key: &str,
    updates: &[TagUpdate],
) -> Result<Vec<Tag>, Error> {
    try_join_all(
        updates
            .iter()
            .map(|update| ctx.api.update_table_tag(key, &update.tag_name, update.method)),
    )
    .await?;

    let table = ctx.api.get_table(key, None, None).await?;
    Ok(sort_tags(table.tags))
}
