//! Timers
//!
//! Virtual-clock timer queue. Time only moves when the host advances it,
//! which keeps debounce behavior deterministic.

/// Timer handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// A queued timer
#[derive(Debug, Clone)]
pub struct ScheduledTask<T> {
    pub id: TimerId,
    pub due_at: u64,
    pub task: T,
}

/// Timer queue over a virtual millisecond clock
#[derive(Debug)]
pub struct Scheduler<T> {
    now_ms: u64,
    next_id: u64,
    queue: Vec<ScheduledTask<T>>,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self { now_ms: 0, next_id: 1, queue: Vec::new() }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Queue `task` to run `delay_ms` from now
    pub fn schedule(&mut self, delay_ms: u64, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let due_at = self.now_ms.saturating_add(delay_ms);
        tracing::trace!("[timer] schedule {:?} due_at={}", id, due_at);
        self.queue.push(ScheduledTask { id, due_at, task });
        id
    }

    /// Drop a pending timer; false if it already ran or never existed
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.queue.len();
        self.queue.retain(|t| t.id != id);
        let removed = self.queue.len() != before;
        if removed {
            tracing::trace!("[timer] cancel {:?}", id);
        }
        removed
    }

    /// Handle the next `schedule` call will return. Every timer queued
    /// before this call has a smaller id.
    pub fn next_timer_id(&self) -> TimerId {
        TimerId(self.next_id)
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.queue.iter().any(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Pending timers as (id, due_at), in run order
    pub fn pending(&self) -> Vec<(TimerId, u64)> {
        let mut timers: Vec<_> = self.queue.iter().map(|t| (t.id, t.due_at)).collect();
        timers.sort_by_key(|&(id, due)| (due, id));
        timers
    }

    fn next_index(&self, limit_ms: Option<u64>) -> Option<usize> {
        self.queue
            .iter()
            .enumerate()
            .filter(|(_, t)| limit_ms.is_none_or(|limit| t.due_at <= limit))
            .min_by_key(|(_, t)| (t.due_at, t.id))
            .map(|(i, _)| i)
    }

    /// Remove the earliest timer due at or before `limit_ms`, moving the
    /// clock forward to its due time.
    pub fn pop_due(&mut self, limit_ms: u64) -> Option<ScheduledTask<T>> {
        let idx = self.next_index(Some(limit_ms))?;
        Some(self.take(idx))
    }

    /// Remove the earliest timer regardless of due time
    pub fn pop_next(&mut self) -> Option<ScheduledTask<T>> {
        let idx = self.next_index(None)?;
        Some(self.take(idx))
    }

    fn take(&mut self, idx: usize) -> ScheduledTask<T> {
        let task = self.queue.remove(idx);
        self.now_ms = self.now_ms.max(task.due_at);
        task
    }

    /// Move the clock forward without running anything
    pub fn advance_to(&mut self, target_ms: u64) {
        self.now_ms = self.now_ms.max(target_ms);
    }

    /// Drop every pending timer
    pub fn clear(&mut self) -> usize {
        let cleared = self.queue.len();
        self.queue.clear();
        cleared
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_due_in_order() {
        let mut timers = Scheduler::new();
        timers.schedule(30, "late");
        timers.schedule(10, "early");
        timers.schedule(10, "early-second");

        assert!(timers.pop_due(5).is_none());
        assert_eq!(timers.pop_due(100).map(|t| t.task), Some("early"));
        assert_eq!(timers.now_ms(), 10);
        assert_eq!(timers.pop_due(100).map(|t| t.task), Some("early-second"));
        assert_eq!(timers.pop_due(100).map(|t| t.task), Some("late"));
        assert_eq!(timers.now_ms(), 30);
    }

    #[test]
    fn test_next_timer_id_orders_after_queued() {
        let mut timers = Scheduler::new();
        let queued = timers.schedule(10, ());
        let mark = timers.next_timer_id();
        assert!(queued < mark);
        assert_eq!(timers.schedule(0, ()), mark);
    }

    #[test]
    fn test_cancel() {
        let mut timers = Scheduler::new();
        let id = timers.schedule(10, ());
        assert!(timers.cancel(id));
        assert!(!timers.cancel(id));
        assert!(timers.pop_next().is_none());
    }

    #[test]
    fn test_schedule_relative_to_now() {
        let mut timers = Scheduler::new();
        timers.advance_to(250);
        timers.schedule(100, ());
        assert_eq!(timers.pending()[0].1, 350);

        // Clock never runs backwards
        timers.advance_to(10);
        assert_eq!(timers.now_ms(), 250);
    }
}
