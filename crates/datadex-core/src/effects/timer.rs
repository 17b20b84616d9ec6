// ── Cancellable timers ──
//
// One named slot per delayed follow-up. Arming a slot cancels whatever
// was pending in it, so only the latest delay can fire.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use dashmap::DashMap;
use tokio_util::sync::CancellationToken;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerSlot {
    /// Return the feedback form to idle after a confirmation.
    FeedbackReset,
    /// Debounce typeahead input.
    InlineSearch,
}

#[derive(Debug, Clone)]
pub struct Timers {
    slots: Arc<DashMap<TimerSlot, (u64, CancellationToken)>>,
    generation: Arc<AtomicU64>,
    root: CancellationToken,
}

impl Timers {
    pub fn new(root: CancellationToken) -> Self {
        Self {
            slots: Arc::new(DashMap::new()),
            generation: Arc::new(AtomicU64::new(0)),
            root,
        }
    }

    /// Cancel any pending delay in `slot` without arming a new one.
    pub fn cancel(&self, slot: TimerSlot) {
        if let Some((_, (_, token))) = self.slots.remove(&slot) {
            trace!(?slot, "timer cancelled");
            token.cancel();
        }
    }

    fn arm(&self, slot: TimerSlot) -> (u64, CancellationToken) {
        let generation = self.generation.fetch_add(1, Ordering::Relaxed);
        let token = self.root.child_token();
        if let Some((_, previous)) = self.slots.insert(slot, (generation, token.clone())) {
            trace!(?slot, "timer re-armed");
            previous.cancel();
        }
        (generation, token)
    }

    /// Sleep for `delay` in `slot`. Returns `true` if the delay elapsed,
    /// `false` if it was superseded or cancelled.
    pub async fn sleep(&self, slot: TimerSlot, delay: Duration) -> bool {
        let (generation, token) = self.arm(slot);
        tokio::select! {
            biased;
            () = token.cancelled() => false,
            () = tokio::time::sleep(delay) => {
                self.slots.remove_if(&slot, |_, (current, _)| *current == generation);
                true
            }
        }
    }
}
