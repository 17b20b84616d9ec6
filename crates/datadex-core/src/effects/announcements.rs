use futures_util::FutureExt;
use futures_util::future::BoxFuture;

use crate::feature::announcements::AnnouncementsMessage;
use crate::message::Async;

use super::{EffectContext, settle};

pub(super) fn route(
    ctx: &EffectContext,
    message: &AnnouncementsMessage,
) -> Option<BoxFuture<'static, ()>> {
    let AnnouncementsMessage::GetAnnouncements(Async::Request(())) = message else {
        return None;
    };
    let ctx = ctx.clone();
    Some(
        async move {
            let outcome = settle(ctx.api.get_announcements().await, "get_announcements");
            ctx.dispatch(AnnouncementsMessage::GetAnnouncements(outcome));
        }
        .boxed(),
    )
}
