//! Single-shot task scheduling for debounced rescans
//!
//! The colorizer never sleeps or spawns. It asks a `Scheduler` for a
//! handle that fires after a delay and the host calls back with that
//! handle when it is due. Everything runs on the host's thread.

use std::time::{Duration, Instant};

/// Identifies one scheduled callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

/// Schedule and cancel single-shot callbacks
pub trait Scheduler {
    /// Arrange for `handle` to become due after `delay`
    fn schedule(&mut self, delay: Duration) -> TaskHandle;

    /// Forget a pending handle; unknown handles are ignored
    fn cancel(&mut self, handle: TaskHandle);
}

/// Scheduler driven by an explicit clock
///
/// Time only moves when `advance` is called, which makes debouncing
/// deterministic in tests and lets hosts plug in their own event loop.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    pending: Vec<(TaskHandle, Duration)>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current time on this scheduler's clock
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of callbacks not yet due
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Move the clock forward, returning handles that became due in order
    pub fn advance(&mut self, by: Duration) -> Vec<TaskHandle> {
        self.advance_to(self.now + by)
    }

    /// Move the clock to `now` (never backwards)
    pub fn advance_to(&mut self, now: Duration) -> Vec<TaskHandle> {
        self.now = self.now.max(now);
        let mut due: Vec<(TaskHandle, Duration)> = Vec::new();
        self.pending.retain(|&(handle, deadline)| {
            if deadline <= now {
                due.push((handle, deadline));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|&(_, deadline)| deadline);
        due.into_iter().map(|(handle, _)| handle).collect()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.pending.push((handle, self.now + delay));
        handle
    }

    fn cancel(&mut self, handle: TaskHandle) {
        self.pending.retain(|&(pending, _)| pending != handle);
    }
}

/// Scheduler on the wall clock, polled by the host loop
#[derive(Debug)]
pub struct ClockScheduler {
    start: Instant,
    inner: ManualScheduler,
}

impl ClockScheduler {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            inner: ManualScheduler::new(),
        }
    }

    /// Handles whose delay has elapsed since they were scheduled
    pub fn poll(&mut self) -> Vec<TaskHandle> {
        let elapsed = self.start.elapsed();
        self.inner.advance_to(elapsed)
    }

    /// Sync the inner clock before computing a deadline
    fn sync(&mut self) {
        let elapsed = self.start.elapsed();
        self.inner.now = self.inner.now.max(elapsed);
    }
}

impl Default for ClockScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for ClockScheduler {
    fn schedule(&mut self, delay: Duration) -> TaskHandle {
        self.sync();
        self.inner.schedule(delay)
    }

    fn cancel(&mut self, handle: TaskHandle) {
        self.inner.cancel(handle);
    }
}
