//! Debouncer
//!
//! Collapses bursts of calls into one delayed task: each call cancels the
//! pending timer and schedules a fresh one.

use crate::timers::{Scheduler, TimerId};

/// Debounced task
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay_ms: u64,
    task: T,
    pending: Option<TimerId>,
}

impl<T: Clone> Debouncer<T> {
    pub fn new(delay_ms: u64, task: T) -> Self {
        Self { delay_ms, task, pending: None }
    }

    /// Invoke: reschedule the task `delay_ms` from now
    pub fn call(&mut self, scheduler: &mut Scheduler<T>) -> TimerId {
        if let Some(id) = self.pending.take() {
            scheduler.cancel(id);
        }
        let id = scheduler.schedule(self.delay_ms, self.task.clone());
        self.pending = Some(id);
        id
    }

    /// Cancel without rescheduling
    pub fn cancel(&mut self, scheduler: &mut Scheduler<T>) -> bool {
        self.pending.take().is_some_and(|id| scheduler.cancel(id))
    }

    /// Mark the timer `id` as fired. Returns false for a timer this
    /// debouncer no longer owns.
    pub fn complete(&mut self, id: TimerId) -> bool {
        if self.pending == Some(id) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }
}
