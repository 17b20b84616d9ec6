// ── State subscriptions ──

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use super::GlobalState;

/// A subscription to the state tree.
///
/// Provides both point-in-time snapshot access and change notification
/// via `changed()` or by converting into a `Stream`.
pub struct StateStream {
    current: Arc<GlobalState>,
    receiver: watch::Receiver<Arc<GlobalState>>,
}

impl StateStream {
    pub(crate) fn new(receiver: watch::Receiver<Arc<GlobalState>>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// The snapshot captured at creation time (or at the last `changed()`).
    pub fn current(&self) -> &Arc<GlobalState> {
        &self.current
    }

    /// The latest snapshot (may have changed since creation).
    pub fn latest(&self) -> Arc<GlobalState> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next change, returning the new snapshot.
    /// Returns `None` once the store has shut down.
    pub async fn changed(&mut self) -> Option<Arc<GlobalState>> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = snap.clone();
        Some(snap)
    }

    /// Convert into a `Stream` for use with `StreamExt` combinators.
    pub fn into_stream(self) -> StateWatchStream {
        StateWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter yielding a snapshot each time the tree changes.
pub struct StateWatchStream {
    inner: WatchStream<Arc<GlobalState>>,
}

impl Stream for StateWatchStream {
    type Item = Arc<GlobalState>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
