// ── Effect coordinators ──
//
// Each Request message may start one coordinator task. A coordinator
// calls the catalog, then dispatches exactly one Success or Failure for
// the operation it was started for. Errors never escape a coordinator;
// they are logged and collapsed into `ErrorInfo`.

mod announcements;
mod bookmark;
mod feedback;
mod home;
mod issue;
mod notification;
mod search;
mod table_metadata;
mod timer;
mod user;

use std::sync::Arc;

use futures_util::future::BoxFuture;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use datadex_api::CatalogClient;

use crate::config::ClientConfig;
use crate::message::{Async, ErrorInfo, Message};
use crate::store::GlobalState;

pub use timer::{TimerSlot, Timers};

/// Handle coordinators use to feed outcomes back into the store.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    tx: mpsc::UnboundedSender<Message>,
}

impl Dispatcher {
    pub(crate) fn new(tx: mpsc::UnboundedSender<Message>) -> Self {
        Self { tx }
    }

    pub fn dispatch(&self, message: impl Into<Message>) {
        if self.tx.send(message.into()).is_err() {
            debug!("store closed, dropping outcome");
        }
    }
}

/// Everything a coordinator may touch.
#[derive(Clone)]
pub struct EffectContext {
    pub api: CatalogClient,
    pub dispatcher: Dispatcher,
    state: watch::Receiver<Arc<GlobalState>>,
    pub config: Arc<ClientConfig>,
    pub timers: Timers,
    pub cancel: CancellationToken,
}

impl EffectContext {
    pub(crate) fn new(
        api: CatalogClient,
        dispatcher: Dispatcher,
        state: watch::Receiver<Arc<GlobalState>>,
        config: Arc<ClientConfig>,
        timers: Timers,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            api,
            dispatcher,
            state,
            config,
            timers,
            cancel,
        }
    }

    /// The state tree as of now. Coordinators read context (current
    /// table key, logged-in user) here rather than from their message.
    pub fn snapshot(&self) -> Arc<GlobalState> {
        self.state.borrow().clone()
    }

    pub fn dispatch(&self, message: impl Into<Message>) {
        self.dispatcher.dispatch(message);
    }
}

/// Pick the coordinator for `message`, if it starts one.
///
/// Synchronous bookkeeping (cancelling timers) happens here, before the
/// returned future is spawned, so it is ordered with the reducer.
pub fn route(ctx: &EffectContext, message: &Message) -> Option<BoxFuture<'static, ()>> {
    match message {
        Message::Announcements(m) => announcements::route(ctx, m),
        Message::Bookmark(m) => bookmark::route(ctx, m),
        Message::Feedback(m) => feedback::route(ctx, m),
        Message::Issue(m) => issue::route(ctx, m),
        Message::LastIndexed(m) => home::route_last_indexed(ctx, m),
        Message::Notification(m) => notification::route(ctx, m),
        Message::PopularTables(m) => home::route_popular_tables(ctx, m),
        Message::Search(m) => search::route(ctx, m),
        Message::TableMetadata(m) => table_metadata::route(ctx, m),
        Message::Tags(m) => home::route_tags(ctx, m),
        Message::User(m) => user::route(ctx, m),
    }
}

/// Collapse an API result into the outcome half of a lifecycle.
pub(crate) fn settle<Req, T>(
    result: Result<T, datadex_api::Error>,
    operation: &str,
) -> Async<Req, T> {
    match result {
        Ok(value) => Async::Success(value),
        Err(e) => {
            warn!(error = %e, operation, "catalog request failed");
            Async::Failure(ErrorInfo::from(&e))
        }
    }
}
