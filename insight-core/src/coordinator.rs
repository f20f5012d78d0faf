//! Last-writer-wins sequencing of asynchronous requests.
//!
//! A [`RequestCoordinator`] owns one logical lane. Starting an operation
//! cancels whatever was running on the lane before, and only the operation
//! that is still current when it completes gets to apply its outcome.

use std::{
    fmt,
    future::Future,
    sync::atomic::{AtomicU64, Ordering},
};

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Logical lane a coordinator sequences. Each lane gets its own coordinator
/// so that work on one never cancels work on the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Search,
    Suggestions,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Channel::Search => "search",
            Channel::Suggestions => "suggestions",
        })
    }
}

/// Identity of one registered operation plus the handle used to cancel it.
#[derive(Debug, Clone)]
pub struct PendingRequestToken {
    id: u64,
    cancel: CancellationToken,
}

impl PendingRequestToken {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

#[derive(Debug)]
pub struct RequestCoordinator {
    channel: Channel,
    next_id: AtomicU64,
    current: Mutex<Option<PendingRequestToken>>,
}

impl RequestCoordinator {
    pub fn new(channel: Channel) -> Self {
        Self {
            channel,
            next_id: AtomicU64::new(1),
            current: Mutex::new(None),
        }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Register a new current operation, cancelling the previous one.
    pub fn begin(&self) -> PendingRequestToken {
        let token = PendingRequestToken {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            cancel: CancellationToken::new(),
        };
        if let Some(previous) = self.current.lock().replace(token.clone()) {
            debug!(channel = %self.channel, superseded = previous.id, by = token.id, "request superseded");
            previous.cancel.cancel();
        }
        token
    }

    pub fn is_current(&self, token: &PendingRequestToken) -> bool {
        self.current
            .lock()
            .as_ref()
            .is_some_and(|current| current.id == token.id)
    }

    /// An operation is registered and has not settled.
    pub fn has_pending(&self) -> bool {
        self.current.lock().is_some()
    }

    /// Run `operation` as the lane's current operation.
    ///
    /// `settle` receives the outcome only if this operation is still current
    /// when it completes, and runs while the lane is locked: a newer operation
    /// cannot begin halfway through it. Returns `None` when the operation was
    /// cancelled or superseded; nothing is delivered in that case.
    pub async fn run<T, E, Fut, S, R>(&self, operation: Fut, settle: S) -> Option<R>
    where
        Fut: Future<Output = Result<T, E>>,
        S: FnOnce(Result<T, E>) -> R,
    {
        let token = self.begin();
        let outcome = self.race(&token, operation).await;

        let mut current = self.current.lock();
        match outcome {
            Some(result) if Self::take_if_current(&mut current, &token) => Some(settle(result)),
            _ => {
                debug!(channel = %self.channel, id = token.id, "discarding stale outcome");
                None
            }
        }
    }

    /// Drive an operation registered earlier with [`RequestCoordinator::begin`]
    /// until it finishes or its token is cancelled.
    ///
    /// Callers that snapshot their request under their own lock call `begin`
    /// inside that lock, so lane order always matches snapshot order. The
    /// outcome must still pass [`RequestCoordinator::complete`] before it is
    /// applied.
    pub async fn race<Fut>(&self, token: &PendingRequestToken, operation: Fut) -> Option<Fut::Output>
    where
        Fut: Future,
    {
        tokio::select! {
            biased;
            _ = token.cancel.cancelled() => None,
            result = operation => Some(result),
        }
    }

    /// Retire `token` if it is still the lane's current operation. Returns
    /// whether its outcome may be applied.
    pub fn complete(&self, token: &PendingRequestToken) -> bool {
        let completed = Self::take_if_current(&mut self.current.lock(), token);
        if !completed {
            debug!(channel = %self.channel, id = token.id, "discarding stale outcome");
        }
        completed
    }

    fn take_if_current(
        current: &mut Option<PendingRequestToken>,
        token: &PendingRequestToken,
    ) -> bool {
        let still_current = current
            .as_ref()
            .is_some_and(|registered| registered.id == token.id)
            && !token.cancel.is_cancelled();
        if still_current {
            *current = None;
        }
        still_current
    }

    /// Cancel the current operation, if any.
    pub fn cancel(&self) {
        if let Some(current) = self.current.lock().take() {
            debug!(channel = %self.channel, id = current.id, "request cancelled");
            current.cancel.cancel();
        }
    }
}

impl Drop for RequestCoordinator {
    fn drop(&mut self) {
        if let Some(current) = self.current.get_mut().take() {
            current.cancel.cancel();
        }
    }
}
