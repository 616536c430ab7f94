//! Cancellable timer scheduling.
//!
//! Every timed behaviour on the page (auto-play ticks, the transition lock,
//! staggered class changes) goes through the [`Scheduler`] trait so that it can
//! be driven by real browser timers in production and by a manual clock in
//! tests.

use gloo_timers::callback::{Interval, Timeout};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

/// Opaque handle identifying a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

/// Schedule-once and schedule-repeating primitives with cancellation by handle.
pub trait Scheduler {
    /// Run `task` once after `delay_ms`.
    fn schedule_once(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TaskHandle;

    /// Run `task` every `period_ms` until cancelled.
    fn schedule_repeating(&self, period_ms: u32, task: Box<dyn FnMut()>) -> TaskHandle;

    /// Cancel a task. Unknown or already-fired handles are ignored.
    fn cancel(&self, handle: TaskHandle);

    /// Cancel `handle` and schedule `task` in its place.
    fn reschedule(
        &self,
        handle: TaskHandle,
        period_ms: u32,
        task: Box<dyn FnMut()>,
    ) -> TaskHandle {
        self.cancel(handle);
        self.schedule_repeating(period_ms, task)
    }
}

// Held only for their Drop impls.
#[allow(dead_code)]
enum BrowserTimer {
    Once(Timeout),
    Repeating(Interval),
}

/// [`Scheduler`] backed by `setTimeout` / `setInterval` through `gloo-timers`.
///
/// Dropping a gloo timer clears it, so cancelling is just removing the entry.
#[derive(Default)]
pub struct GlooScheduler {
    next_id: Cell<u64>,
    timers: Rc<RefCell<HashMap<TaskHandle, BrowserTimer>>>,
}

impl GlooScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_handle(&self) -> TaskHandle {
        let id = self.next_id.get();
        self.next_id.set(id.wrapping_add(1));
        TaskHandle(id)
    }
}

impl Scheduler for GlooScheduler {
    fn schedule_once(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TaskHandle {
        let handle = self.next_handle();
        let timers: Weak<RefCell<HashMap<TaskHandle, BrowserTimer>>> = Rc::downgrade(&self.timers);
        let timeout = Timeout::new(delay_ms, move || {
            task();
            if let Some(timers) = timers.upgrade() {
                timers.borrow_mut().remove(&handle);
            }
        });
        self.timers
            .borrow_mut()
            .insert(handle, BrowserTimer::Once(timeout));
        handle
    }

    fn schedule_repeating(&self, period_ms: u32, mut task: Box<dyn FnMut()>) -> TaskHandle {
        let handle = self.next_handle();
        let interval = Interval::new(period_ms, move || task());
        self.timers
            .borrow_mut()
            .insert(handle, BrowserTimer::Repeating(interval));
        handle
    }

    fn cancel(&self, handle: TaskHandle) {
        // Bind first so the timer is dropped after the borrow ends.
        let removed = self.timers.borrow_mut().remove(&handle);
        drop(removed);
    }
}

#[cfg(test)]
pub use manual::ManualScheduler;
