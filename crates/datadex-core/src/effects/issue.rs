use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use tracing::{debug, warn};

use crate::feature::issue::{CreateIssueRequest, IssueMessage};
use crate::message::Async;
use crate::model::{Issue, NotificationOptions, NotificationPayload, NotificationType};
use crate::select;

use super::{EffectContext, settle};

pub(super) fn route(ctx: &EffectContext, message: &IssueMessage) -> Option<BoxFuture<'static, ()>> {
    let ctx = ctx.clone();
    match message {
        IssueMessage::GetIssues(Async::Request(key)) => {
            let key = key.clone();
            Some(
                async move {
                    let result = ctx.api.get_issues(&key).await;
                    ctx.dispatch(IssueMessage::GetIssues(settle(result, "get_issues")));
                }
                .boxed(),
            )
        }
        IssueMessage::CreateIssue(Async::Request(request)) => {
            let request = request.clone();
            Some(
                async move {
                    let result = ctx.api.create_issue(&request.new_issue()).await;
                    let created = result.as_ref().ok().cloned();
                    ctx.dispatch(IssueMessage::CreateIssue(settle(result, "create_issue")));
                    if let Some(issue) = created {
                        notify_owners(&ctx, &request, &issue).await;
                    }
                }
                .boxed(),
            )
        }
        _ => None,
    }
}

/// Best effort: a failed notification never fails the issue.
async fn notify_owners(ctx: &EffectContext, request: &CreateIssueRequest, issue: &Issue) {
    if !ctx.config.features.notifications_enabled {
        return;
    }
    let context = select::notification_context(&ctx.snapshot());
    if context.recipients.is_empty() {
        debug!(issue = %issue.issue_key, "no owners to notify");
        return;
    }

    let payload = NotificationPayload {
        recipients: context.recipients,
        sender: context.sender,
        notification_type: NotificationType::DataIssueReported,
        options: NotificationOptions {
            resource_name: Some(request.resource_name.clone()),
            resource_path: Some(request.resource_path.clone()),
            data_issue_url: Some(issue.url.clone()),
            ..NotificationOptions::default()
        },
    };
    if let Err(e) = ctx.api.send_notification(&payload).await {
        warn!(error = %e, issue = %issue.issue_key, "failed to notify owners of new issue");
    }
}
