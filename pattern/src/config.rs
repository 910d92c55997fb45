//! Configuration for searches

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared flag that stops running searches.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Configuration for searches
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Search seeds concurrently on the rayon pool
    pub parallel: bool,
    /// Abort once this instant has passed
    pub deadline: Option<Instant>,
    /// Abort once this much time has passed since the search started
    pub timeout: Option<Duration>,
    /// Abort once this token is cancelled
    pub cancel: Option<CancelToken>,
    /// Stop after this many matches
    pub max_matches: Option<usize>,
    /// Drop structurally identical matches
    pub dedup: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            parallel: false,
            deadline: None,
            timeout: None,
            cancel: None,
            max_matches: None,
            dedup: true,
        }
    }
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Budget measured from the start of each search, so a reused
    /// `Searcher` gets the full budget on every run.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn with_max_matches(mut self, count: usize) -> Self {
        self.max_matches = Some(count);
        self
    }

    pub fn with_dedup(mut self, dedup: bool) -> Self {
        self.dedup = dedup;
        self
    }

    /// The earlier of the fixed deadline and the timeout counted from `started`.
    pub fn deadline_from(&self, started: Instant) -> Option<Instant> {
        let relative = self.timeout.and_then(|t| started.checked_add(t));
        match (self.deadline, relative) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// One seed after another on the calling thread.
    pub fn sequential() -> Self {
        Self::default()
    }

    /// One task per seed.
    pub fn parallel() -> Self {
        Self {
            parallel: true,
            ..Self::default()
        }
    }
}
