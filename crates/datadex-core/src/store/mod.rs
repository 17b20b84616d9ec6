// ── Store ──
//
// Owns the single state tree. Messages enter through an unbounded queue
// and a single reducer task applies them in arrival order, publishing
// each new snapshot through a `watch` channel. Request messages are
// handed to the effect router, whose tasks feed their outcomes back
// through the same queue.

mod state;
mod stream;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, trace, warn};

use datadex_api::CatalogClient;

use crate::config::ClientConfig;
use crate::effects::{self, Dispatcher, EffectContext, Timers};
use crate::error::CoreError;
use crate::feature::Reducer;
use crate::message::Message;

pub use state::GlobalState;
pub use stream::{StateStream, StateWatchStream};

const MESSAGE_TAP_SIZE: usize = 256;

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<StoreInner>`. Call [`start()`](Self::start)
/// once inside a Tokio runtime before dispatching.
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    config: Arc<ClientConfig>,
    api: CatalogClient,
    message_tx: mpsc::UnboundedSender<Message>,
    message_rx: Mutex<Option<mpsc::UnboundedReceiver<Message>>>,
    state: watch::Sender<Arc<GlobalState>>,
    /// Every reduced message, for observers that care about order.
    tap: broadcast::Sender<Message>,
    cancel: CancellationToken,
    effects: TaskTracker,
    timers: Timers,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
}

impl Store {
    /// Build a store and its HTTP client from configuration.
    /// Does not spawn anything until [`start()`](Self::start).
    pub fn new(config: ClientConfig) -> Result<Self, CoreError> {
        let api = CatalogClient::new(config.url.clone(), &config.transport())?;
        Ok(Self::with_client(api, config))
    }

    /// Build a store around an existing client.
    pub fn with_client(api: CatalogClient, config: ClientConfig) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        let (state, _) = watch::channel(Arc::new(GlobalState::default()));
        let (tap, _) = broadcast::channel(MESSAGE_TAP_SIZE);
        let cancel = CancellationToken::new();
        let timers = Timers::new(cancel.child_token());

        Self {
            inner: Arc::new(StoreInner {
                config: Arc::new(config),
                api,
                message_tx,
                message_rx: Mutex::new(Some(message_rx)),
                state,
                tap,
                cancel,
                effects: TaskTracker::new(),
                timers,
                task_handles: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Access the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Spawn the reducer loop. Calling this twice is a no-op.
    pub async fn start(&self) {
        let Some(rx) = self.inner.message_rx.lock().await.take() else {
            warn!("store already started");
            return;
        };

        let ctx = EffectContext::new(
            self.inner.api.clone(),
            Dispatcher::new(self.inner.message_tx.clone()),
            self.inner.state.subscribe(),
            Arc::clone(&self.inner.config),
            self.inner.timers.clone(),
            self.inner.cancel.clone(),
        );

        let handle = tokio::spawn(reducer_loop(Arc::clone(&self.inner), rx, ctx));
        self.inner.task_handles.lock().await.push(handle);
        info!(url = %self.inner.config.url, "store started");
    }

    /// Stop the reducer loop and every in-flight effect.
    ///
    /// Outcomes that arrive after this point are dropped.
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();
        self.inner.effects.close();
        self.inner.effects.wait().await;

        let mut handles = self.inner.task_handles.lock().await;
        for handle in handles.drain(..) {
            let _ = handle.await;
        }
        debug!("store shut down");
    }

    // ── Dispatch ─────────────────────────────────────────────────────

    /// Enqueue a message. Never blocks; the reducer applies it in order.
    pub fn dispatch(&self, message: impl Into<Message>) -> Result<(), CoreError> {
        if self.inner.cancel.is_cancelled() {
            return Err(CoreError::StoreClosed);
        }
        self.inner
            .message_tx
            .send(message.into())
            .map_err(|_| CoreError::StoreClosed)
    }

    // ── Snapshots ────────────────────────────────────────────────────

    /// The current state tree.
    pub fn state(&self) -> Arc<GlobalState> {
        self.inner.state.borrow().clone()
    }

    /// Project a value out of the current state.
    pub fn select<T>(&self, selector: impl FnOnce(&GlobalState) -> T) -> T {
        selector(&self.inner.state.borrow())
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> StateStream {
        StateStream::new(self.inner.state.subscribe())
    }

    /// Subscribe to every message after it has been reduced.
    pub fn messages(&self) -> broadcast::Receiver<Message> {
        self.inner.tap.subscribe()
    }

    /// Wait until `predicate` holds for the state tree, or `timeout` elapses.
    pub async fn wait_for(
        &self,
        predicate: impl FnMut(&Arc<GlobalState>) -> bool,
        timeout: Duration,
    ) -> Result<Arc<GlobalState>, CoreError> {
        let mut rx = self.inner.state.subscribe();
        match tokio::time::timeout(timeout, rx.wait_for(predicate)).await {
            Ok(Ok(state)) => Ok(state.clone()),
            Ok(Err(_)) => Err(CoreError::StoreClosed),
            Err(_) => Err(CoreError::Timeout { waited: timeout }),
        }
    }
}

// ── Reducer loop ─────────────────────────────────────────────────────

async fn reducer_loop(
    inner: Arc<StoreInner>,
    mut rx: mpsc::UnboundedReceiver<Message>,
    ctx: EffectContext,
) {
    loop {
        tokio::select! {
            biased;
            () = inner.cancel.cancelled() => break,
            message = rx.recv() => {
                let Some(message) = message else { break };
                apply(&inner, &ctx, message);
            }
        }
    }
    debug!("reducer loop exited");
}

fn apply(inner: &StoreInner, ctx: &EffectContext, message: Message) {
    let current = inner.state.borrow().clone();
    let next = GlobalState::clone(&current).reduce(&message);
    let changed = next != *current;
    if changed {
        inner.state.send_replace(Arc::new(next));
    }
    debug!(
        feature = message.feature(),
        phase = %message.phase(),
        changed,
        "reduced message"
    );
    trace!(?message);

    if let Some(effect) = effects::route(ctx, &message) {
        let cancel = inner.cancel.clone();
        inner.effects.spawn(async move {
            tokio::select! {
                biased;
                () = cancel.cancelled() => {}
                () = effect => {}
            }
        });
    }

    let _ = inner.tap.send(message);
}
