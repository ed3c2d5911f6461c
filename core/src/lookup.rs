//! Incremental lookup with cooperative cancellation.
//!
//! A [`LookupStream`] keeps one endpoint field's suggestion list in sync
//! with its latest text. Every text change cancels the in-flight lookup
//! (if any) and dispatches a new one; responses carry the sequence number
//! of the request that produced them and are dropped unless that number
//! is still current, so stale responses can never overwrite newer results
//! regardless of arrival order.
//!
//! The stream also maintains a pending counter used to derive the
//! per-field loading indicator. The counter is incremented before every
//! dispatch and decremented exactly once when that dispatch settles —
//! success, cancellation, or transport error — so the indicator cannot
//! stick on after a superseded or failed call.

use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use tokio_util::sync::CancellationToken;

use crate::client::PathClient;

/// Result of one settled lookup, tagged with the sequence number of the
/// request that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupUpdate {
    pub seq: u64,
    pub names: Vec<String>,
}

/// Callback invoked from the dispatch task when a lookup completes with
/// a result worth applying. Cancelled and failed lookups never reach it.
pub type LookupCallback = Arc<dyn Fn(LookupUpdate) + Send + Sync>;

/// Incremental lookup controller for one endpoint field.
///
/// Owns the current cancellation token, the sequence counter that
/// distinguishes current from superseded requests, the pending counter,
/// and the suggestion list itself. The owner routes [`LookupUpdate`]s
/// delivered through the callback back into [`LookupStream::apply`].
pub struct LookupStream {
    client: Arc<PathClient>,
    on_update: LookupCallback,
    /// Token for the in-flight lookup, if any. Replaced (and the old one
    /// cancelled) on every text change.
    cancel: Option<CancellationToken>,
    /// Sequence number of the most recently dispatched lookup. Responses
    /// for any other sequence are stale.
    seq: u64,
    /// In-flight lookups not yet settled. May exceed 1 transiently while
    /// a superseded request races its cancellation.
    pending: Arc<AtomicUsize>,
    suggestions: Vec<String>,
}

impl LookupStream {
    pub fn new(client: Arc<PathClient>, on_update: LookupCallback) -> Self {
        Self {
            client,
            on_update,
            cancel: None,
            seq: 0,
            pending: Arc::new(AtomicUsize::new(0)),
            suggestions: Vec::new(),
        }
    }

    /// React to a text change: cancel the previous lookup and dispatch a
    /// new one. Returns the sequence number of the new dispatch.
    ///
    /// There is deliberately no short-circuit for text equal to the
    /// current value — selecting a suggestion that matches the field
    /// verbatim still re-dispatches, the same as a typed edit.
    pub fn set_text(&mut self, text: &str) -> u64 {
        if let Some(previous) = self.cancel.take() {
            previous.cancel();
        }

        let token = CancellationToken::new();
        self.cancel = Some(token.clone());
        self.seq += 1;
        let seq = self.seq;

        self.pending.fetch_add(1, Ordering::SeqCst);

        let client = Arc::clone(&self.client);
        let pending = Arc::clone(&self.pending);
        let on_update = Arc::clone(&self.on_update);
        let text = text.to_string();
        tokio::spawn(async move {
            let result = tokio::select! {
                _ = token.cancelled() => None,
                result = client.lookup(&text) => Some(result),
            };

            // Settled: decrement whether or not the result is applied.
            pending.fetch_sub(1, Ordering::SeqCst);

            match result {
                None => {
                    tracing::debug!("lookup superseded: {text:?}");
                }
                Some(Err(error)) => {
                    // Expected under churn (aborted connections report as
                    // transport errors); never shown to the user.
                    tracing::warn!("lookup request failed: {error}");
                }
                Some(Ok(names)) => {
                    if token.is_cancelled() {
                        tracing::debug!("lookup superseded after response: {text:?}");
                    } else {
                        on_update(LookupUpdate { seq, names });
                    }
                }
            }
        });

        seq
    }

    /// Apply a delivered update if its sequence number is still current.
    ///
    /// Returns whether the suggestion list was replaced. Stale updates —
    /// the token check in the dispatch task cannot catch a cancellation
    /// that lands while the update is queued — leave the list unchanged.
    pub fn apply(&mut self, update: LookupUpdate) -> bool {
        if update.seq != self.seq {
            return false;
        }
        self.suggestions = update.names;
        true
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// Sequence number of the most recent dispatch.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Whether any dispatched lookup has not yet settled.
    pub fn is_loading(&self) -> bool {
        self.pending.load(Ordering::SeqCst) > 0
    }
}

impl Drop for LookupStream {
    fn drop(&mut self) {
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
    }
}
