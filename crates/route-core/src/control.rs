use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::{Error, Result};

/// How many permutations pass between deadline checks. The cancel flag is
/// checked after every permutation.
pub const DEADLINE_CHECK_INTERVAL: u64 = 1024;

/// Cloneable trigger for cancelling a running search from another thread.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
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

/// Cooperative interruption for one search: a cancel flag plus an optional
/// deadline. Solvers call [`SearchControl::checkpoint`] between permutations.
#[derive(Clone, Debug, Default)]
pub struct SearchControl {
    cancel: CancelHandle,
    deadline: Option<Instant>,
}

impl SearchControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancel(mut self, cancel: CancelHandle) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Deadline `limit` from now. An existing earlier deadline is kept.
    pub fn with_time_limit(self, limit: Duration) -> Self {
        let deadline = Instant::now() + limit;
        match self.deadline {
            Some(existing) if existing <= deadline => self,
            _ => self.with_deadline(deadline),
        }
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// `evaluated` is the caller's running permutation count; it decides when
    /// the clock is read.
    #[inline]
    pub fn checkpoint(&self, evaluated: u64) -> Result<()> {
        if self.cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        if let Some(deadline) = self.deadline {
            if evaluated % DEADLINE_CHECK_INTERVAL == 0 && Instant::now() >= deadline {
                return Err(Error::DeadlineExceeded { evaluated });
            }
        }
        Ok(())
    }
}
