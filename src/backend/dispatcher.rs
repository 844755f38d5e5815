//! Off-thread execution of backend requests.
//!
//! The UI thread owns all state. Each request runs on a short-lived worker
//! thread that sends its [`FetchOutcome`] back over a channel; the event loop
//! drains the channel and applies outcomes on its own thread. Outcomes keep
//! the token of their request, so state can drop stale ones.

use super::{Backend, FetchOutcome, FetchRequest};
use crate::model::FetchError;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

/// Runs backend requests on worker threads and collects their outcomes.
pub struct FetchDispatcher {
    backend: Arc<dyn Backend>,
    tx: Sender<FetchOutcome>,
    rx: Receiver<FetchOutcome>,
}

impl FetchDispatcher {
    /// Create a dispatcher for `backend`.
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { backend, tx, rx }
    }

    /// Start `request` on a worker thread.
    ///
    /// Never fails: if no thread can be spawned, a failed outcome for the
    /// request is queued instead.
    pub fn dispatch(&self, request: FetchRequest) {
        debug!(token = %request.token(), ?request, "Dispatching fetch");

        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        // Kept so a spawn failure can still be reported against the request
        let fallback = request.clone();

        let spawned = thread::Builder::new()
            .name("crawlview-fetch".to_string())
            .spawn(move || {
                let outcome = request.execute(backend.as_ref());
                // Receiver gone means the app is shutting down
                let _ = tx.send(outcome);
            });

        if let Err(e) = spawned {
            warn!(error = %e, "Failed to spawn fetch worker");
            let _ = self
                .tx
                .send(fallback.fail(FetchError::Transport(format!("worker thread: {e}"))));
        }
    }

    /// Dispatch every request in order.
    pub fn dispatch_all(&self, requests: impl IntoIterator<Item = FetchRequest>) {
        for request in requests {
            self.dispatch(request);
        }
    }

    /// Take every outcome that has arrived so far. Non-blocking.
    pub fn drain(&self) -> Vec<FetchOutcome> {
        self.rx.try_iter().collect()
    }

    /// Wait up to `timeout` for the next outcome.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<FetchOutcome> {
        match self.rx.recv_timeout(timeout) {
            Ok(outcome) => Some(outcome),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}
