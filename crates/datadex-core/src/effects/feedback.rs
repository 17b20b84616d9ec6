use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use tracing::debug;

use crate::feature::feedback::{FeedbackMessage, reset_feedback};
use crate::message::Async;

use super::{EffectContext, TimerSlot, settle};

pub(super) fn route(
    ctx: &EffectContext,
    message: &FeedbackMessage,
) -> Option<BoxFuture<'static, ()>> {
    let FeedbackMessage::SubmitFeedback(Async::Request(form)) = message else {
        return None;
    };
    // A new submission owns the form now; the old confirmation must not
    // clear it.
    ctx.timers.cancel(TimerSlot::FeedbackReset);

    let ctx = ctx.clone();
    let form = form.clone();
    Some(
        async move {
            let result = ctx.api.submit_feedback(&form).await;
            ctx.dispatch(FeedbackMessage::SubmitFeedback(settle(result, "submit_feedback")));

            let delay = ctx.config.feedback_reset_delay;
            if ctx.timers.sleep(TimerSlot::FeedbackReset, delay).await {
                debug!("resetting feedback form");
                ctx.dispatch(reset_feedback());
            }
        }
        .boxed(),
    )
}
