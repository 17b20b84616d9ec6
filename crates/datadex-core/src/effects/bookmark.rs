use futures_util::FutureExt;
use futures_util::future::BoxFuture;

use crate::feature::bookmark::BookmarkMessage;
use crate::message::Async;

use super::{EffectContext, settle};

pub(super) fn route(
    ctx: &EffectContext,
    message: &BookmarkMessage,
) -> Option<BoxFuture<'static, ()>> {
    let ctx = ctx.clone();
    match message {
        // The service answers a PUT with nothing useful, so re-read the list.
        BookmarkMessage::AddBookmark(Async::Request(bookmark)) => {
            let bookmark = bookmark.clone();
            Some(
                async move {
                    let result = match ctx
                        .api
                        .add_bookmark(&bookmark.key, bookmark.resource_type)
                        .await
                    {
                        Ok(()) => ctx.api.get_bookmarks(None).await,
                        Err(e) => Err(e),
                    };
                    ctx.dispatch(BookmarkMessage::AddBookmark(settle(result, "add_bookmark")));
                }
                .boxed(),
            )
        }
        BookmarkMessage::RemoveBookmark(Async::Request(bookmark)) => {
            let bookmark = bookmark.clone();
            Some(
                async move {
                    let result = ctx
                        .api
                        .remove_bookmark(&bookmark.key, bookmark.resource_type)
                        .await
                        .map(|()| bookmark);
                    ctx.dispatch(BookmarkMessage::RemoveBookmark(settle(
                        result,
                        "remove_bookmark",
                    )));
                }
                .boxed(),
            )
        }
        BookmarkMessage::GetBookmarks(Async::Request(())) => Some(
            async move {
                let result = ctx.api.get_bookmarks(None).await;
                ctx.dispatch(BookmarkMessage::GetBookmarks(settle(result, "get_bookmarks")));
            }
            .boxed(),
        ),
        BookmarkMessage::GetBookmarksForUser(Async::Request(user_id)) => {
            let user_id = user_id.clone();
            Some(
                async move {
                    let result = ctx.api.get_bookmarks(Some(&user_id)).await;
                    ctx.dispatch(BookmarkMessage::GetBookmarksForUser(settle(
                        result,
                        "get_bookmarks_for_user",
                    )));
                }
                .boxed(),
            )
        }
        _ => None,
    }
}
