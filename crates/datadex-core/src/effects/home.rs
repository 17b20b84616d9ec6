// Home page widgets: popular tables, last-indexed time, and the tag cloud.

use futures_util::FutureExt;
use futures_util::future::BoxFuture;

use crate::convert::sort_tags;
use crate::feature::last_indexed::LastIndexedMessage;
use crate::feature::popular_tables::PopularTablesMessage;
use crate::feature::tags::TagsMessage;
use crate::message::Async;

use super::{EffectContext, settle};

pub(super) fn route_popular_tables(
    ctx: &EffectContext,
    message: &PopularTablesMessage,
) -> Option<BoxFuture<'static, ()>> {
    let PopularTablesMessage::GetPopularTables(Async::Request(())) = message else {
        return None;
    };
    let ctx = ctx.clone();
    Some(
        async move {
            let outcome = settle(ctx.api.get_popular_tables().await, "get_popular_tables");
            ctx.dispatch(PopularTablesMessage::GetPopularTables(outcome));
        }
        .boxed(),
    )
}

pub(super) fn route_last_indexed(
    ctx: &EffectContext,
    message: &LastIndexedMessage,
) -> Option<BoxFuture<'static, ()>> {
    let LastIndexedMessage::GetLastIndexed(Async::Request(())) = message else {
        return None;
    };
    let ctx = ctx.clone();
    Some(
        async move {
            let outcome = settle(ctx.api.get_last_indexed().await, "get_last_indexed");
            ctx.dispatch(LastIndexedMessage::GetLastIndexed(outcome));
        }
        .boxed(),
    )
}

pub(super) fn route_tags(
    ctx: &EffectContext,
    message: &TagsMessage,
) -> Option<BoxFuture<'static, ()>> {
    let TagsMessage::GetAllTags(Async::Request(())) = message else {
        return None;
    };
    let ctx = ctx.clone();
    Some(
        async move {
            let result = ctx.api.get_all_tags().await.map(sort_tags);
            ctx.dispatch(TagsMessage::GetAllTags(settle(result, "get_all_tags")));
        }
        .boxed(),
    )
}
