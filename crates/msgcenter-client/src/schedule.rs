//! Debounce and throttle primitives.
//!
//! Both run on tokio's clock, so tests can drive them deterministically
//! with a paused runtime.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Runs a task once a quiet period has passed without a newer schedule.
///
/// Scheduling again before the delay elapses cancels the earlier task.
/// Once the delay has elapsed the task is considered fired and runs to
/// completion even if something newer is scheduled. Dropping the debouncer
/// cancels a task that has not fired.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<Scheduled>,
}

#[derive(Debug)]
struct Scheduled {
    handle: JoinHandle<()>,
    fired: Arc<AtomicBool>,
}

impl Debouncer {
    /// Create a debouncer with the given quiet period.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Quiet period.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Arm `task` to run after the quiet period, replacing any unfired task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        let fired = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&fired);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            flag.store(true, Ordering::SeqCst);
            task.await;
        });
        self.pending = Some(Scheduled { handle, fired });
    }

    /// Cancel the armed task if it has not fired yet.
    pub fn cancel(&mut self) {
        if let Some(scheduled) = self.pending.take()
            && !scheduled.fired.load(Ordering::SeqCst)
        {
            scheduled.handle.abort();
        }
    }

    /// True while a task is armed and waiting for its quiet period.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|s| {
            !s.fired.load(Ordering::SeqCst) && !s.handle.is_finished()
        })
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Leading-edge throttle: lets one call through, then refuses calls until
/// the interval has passed.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    /// Create a throttle with the given interval.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Interval between accepted calls.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns true and records `now` if the interval has passed since the
    /// last accepted call.
    pub fn ready(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.saturating_duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// Forget the last accepted call.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
