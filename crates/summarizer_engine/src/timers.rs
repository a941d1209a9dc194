use std::collections::HashMap;
use std::time::Duration;

use engine_logging::engine_trace;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

struct PendingTimer {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl PendingTimer {
    fn cancel(self) {
        self.cancel.cancel();
        self.task.abort();
    }
}

/// One-shot timers keyed by name, at most one pending per key.
///
/// Scheduling a key that already has a pending timer cancels the old one
/// first, so a superseded timer never fires.
#[derive(Default)]
pub struct ExpiryTimers {
    pending: HashMap<String, PendingTimer>,
}

impl ExpiryTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `on_expire` once `after` has elapsed unless cancelled or replaced.
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&mut self, key: impl Into<String>, after: Duration, on_expire: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let key = key.into();
        self.cancel(&key);

        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let task = tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(after) => on_expire(),
            }
        });

        engine_trace!("expiry scheduled key={} after={:?}", key, after);
        self.pending.insert(key, PendingTimer { cancel, task });
    }

    /// Returns whether a timer that had not fired yet was cancelled.
    pub fn cancel(&mut self, key: &str) -> bool {
        match self.pending.remove(key) {
            Some(timer) => {
                let was_pending = !timer.task.is_finished();
                timer.cancel();
                was_pending
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, timer) in self.pending.drain() {
            timer.cancel();
        }
    }

    /// Number of timers that have not fired or been cancelled.
    #[cfg(test)]
    fn pending_count(&self) -> usize {
        self.pending
            .values()
            .filter(|timer| !timer.task.is_finished())
            .count()
    }
}

impl Drop for ExpiryTimers {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
