//! Debounced search scheduling.

use std::{future, time::Duration};

use tokio::time::{self, Instant};

/// A cancellable handle to at most one scheduled search.
///
/// Scheduling replaces whatever was pending, so a burst of keystrokes ends in a single
/// search for the last value once input has been quiet for the delay.
#[derive(Debug)]
pub struct Debouncer {
    /// Quiet period required before a search fires.
    delay: Duration,
    /// Deadline and query of the pending search.
    pending: Option<(Instant, String)>,
}

impl Debouncer {
    /// Creates a debouncer with the given quiet period.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedules a search for `query`, cancelling any pending one.
    pub fn schedule(&mut self, query: String) {
        self.pending = Some((Instant::now() + self.delay, query));
    }

    /// Cancels the pending search, if any.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Returns true if a search is scheduled.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Removes and returns the pending query without waiting.
    pub fn take(&mut self) -> Option<String> {
        self.pending.take().map(|(_, query)| query)
    }

    /// Waits for the pending search to come due and returns its query.
    ///
    /// Never resolves while nothing is scheduled. Safe to use in `select!`: dropping the
    /// future before the deadline leaves the schedule intact.
    pub async fn fired(&mut self) -> String {
        let Some(deadline) = self.pending.as_ref().map(|(deadline, _)| *deadline) else {
            return future::pending().await;
        };
        time::sleep_until(deadline).await;
        self.take().unwrap_or_default()
    }
}
