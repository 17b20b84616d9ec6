use futures_util::FutureExt;
use futures_util::future::BoxFuture;

use crate::feature::user::UserMessage;
use crate::message::Async;

use super::{EffectContext, settle};

pub(super) fn route(ctx: &EffectContext, message: &UserMessage) -> Option<BoxFuture<'static, ()>> {
    let ctx = ctx.clone();
    match message {
        UserMessage::GetLoggedInUser(Async::Request(())) => Some(
            async move {
                let outcome = settle(ctx.api.get_logged_in_user().await, "get_logged_in_user");
                ctx.dispatch(UserMessage::GetLoggedInUser(outcome));
            }
            .boxed(),
        ),
        UserMessage::GetUser(Async::Request(user_id)) => {
            let user_id = user_id.clone();
            Some(
                async move {
                    let outcome = settle(ctx.api.get_user(&user_id).await, "get_user");
                    ctx.dispatch(UserMessage::GetUser(outcome));
                }
                .boxed(),
            )
        }
        _ => None,
    }
}
