use futures_util::FutureExt;
use futures_util::future::BoxFuture;

use crate::feature::notification::NotificationMessage;
use crate::message::Async;

use super::{EffectContext, settle};

pub(super) fn route(
    ctx: &EffectContext,
    message: &NotificationMessage,
) -> Option<BoxFuture<'static, ()>> {
    let NotificationMessage::SubmitNotification(Async::Request(payload)) = message else {
        return None;
    };
    let ctx = ctx.clone();
    let payload = payload.clone();
    Some(
        async move {
            let result = ctx.api.send_notification(&payload).await;
            ctx.dispatch(NotificationMessage::SubmitNotification(settle(
                result,
                "send_notification",
            )));
        }
        .boxed(),
    )
}
