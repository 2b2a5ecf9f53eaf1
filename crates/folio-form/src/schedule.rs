//! Deterministic timer queue.
//!
//! The UI runs on a single cooperative event loop, so timers are modelled as
//! a deadline-ordered queue of typed tasks rather than real threads. The host
//! supplies the current time on every call and arms one platform timer for
//! [`Scheduler::next_deadline`]. Ties fire in scheduling order.

use std::collections::{BTreeMap, HashMap};
use std::ops::Add;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Milliseconds on the host's monotonic clock.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp(0);

    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Time elapsed since `earlier`, zero if `earlier` is in the future.
    pub fn saturating_since(self, earlier: Timestamp) -> Duration {
        Duration::from_millis(self.0.saturating_sub(earlier.0))
    }
}

impl Add<Duration> for Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: Duration) -> Timestamp {
        let ms = u64::try_from(rhs.as_millis()).unwrap_or(u64::MAX);
        Timestamp(self.0.saturating_add(ms))
    }
}

/// Handle to a scheduled task, usable for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskHandle(u64);

/// A task that has come due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Due<T> {
    /// The deadline the task was scheduled for (not the time it was popped).
    pub at: Timestamp,
    pub handle: TaskHandle,
    pub task: T,
}

/// Deadline-ordered queue of pending tasks.
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    queue: BTreeMap<(Timestamp, TaskHandle), T>,
    deadlines: HashMap<TaskHandle, Timestamp>,
    next_handle: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self {
            queue: BTreeMap::new(),
            deadlines: HashMap::new(),
            next_handle: 0,
        }
    }

    /// Schedule `task` to run at `at`.
    pub fn schedule(&mut self, at: Timestamp, task: T) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        self.queue.insert((at, handle), task);
        self.deadlines.insert(handle, at);
        handle
    }

    /// Cancel a pending task. Returns it if it had not fired yet.
    pub fn cancel(&mut self, handle: TaskHandle) -> Option<T> {
        let at = self.deadlines.remove(&handle)?;
        self.queue.remove(&(at, handle))
    }

    /// Whether `handle` is still waiting to fire.
    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.deadlines.contains_key(&handle)
    }

    /// Deadline of a pending task.
    pub fn deadline(&self, handle: TaskHandle) -> Option<Timestamp> {
        self.deadlines.get(&handle).copied()
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.queue.keys().next().map(|(at, _)| *at)
    }

    /// Pop the earliest task whose deadline is at or before `now`.
    pub fn pop_due(&mut self, now: Timestamp) -> Option<Due<T>> {
        let (&(at, handle), _) = self.queue.iter().next()?;
        if at > now {
            return None;
        }
        let task = self.queue.remove(&(at, handle))?;
        self.deadlines.remove(&handle);
        Some(Due { at, handle, task })
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Timestamp {
        Timestamp::from_millis(v)
    }

    #[test]
    fn fires_in_deadline_order() {
        let mut s = Scheduler::new();
        s.schedule(ms(300), "c");
        s.schedule(ms(100), "a");
        s.schedule(ms(200), "b");

        let fired: Vec<_> = std::iter::from_fn(|| s.pop_due(ms(1000)))
            .map(|d| d.task)
            .collect();
        assert_eq!(fired, vec!["a", "b", "c"]);
        assert!(s.is_empty());
    }

    #[test]
    fn ties_fire_in_scheduling_order() {
        let mut s = Scheduler::new();
        s.schedule(ms(100), 1);
        s.schedule(ms(100), 2);
        s.schedule(ms(100), 3);

        let fired: Vec<_> = std::iter::from_fn(|| s.pop_due(ms(100)))
            .map(|d| d.task)
            .collect();
        assert_eq!(fired, vec![1, 2, 3]);
    }

    #[test]
    fn nothing_due_before_deadline() {
        let mut s = Scheduler::new();
        s.schedule(ms(500), ());
        assert!(s.pop_due(ms(499)).is_none());
        assert_eq!(s.next_deadline(), Some(ms(500)));

        let due = s.pop_due(ms(500)).unwrap();
        assert_eq!(due.at, ms(500));
    }

    #[test]
    fn due_reports_scheduled_deadline() {
        let mut s = Scheduler::new();
        s.schedule(ms(10), ());
        let due = s.pop_due(ms(9_999)).unwrap();
        assert_eq!(due.at, ms(10));
    }

    #[test]
    fn cancel_removes_pending_task() {
        let mut s = Scheduler::new();
        let keep = s.schedule(ms(100), "keep");
        let drop = s.schedule(ms(50), "drop");

        assert_eq!(s.cancel(drop), Some("drop"));
        assert!(!s.is_pending(drop));
        assert_eq!(s.deadline(drop), None);
        assert!(s.is_pending(keep));
        assert_eq!(s.deadline(keep), Some(ms(100)));
        assert_eq!(s.next_deadline(), Some(ms(100)));

        // Second cancel is a no-op
        assert_eq!(s.cancel(drop), None);
    }

    #[test]
    fn fired_task_is_no_longer_pending() {
        let mut s = Scheduler::new();
        let h = s.schedule(ms(1), ());
        assert_eq!(s.deadline(h), Some(ms(1)));
        s.pop_due(ms(1));
        assert!(!s.is_pending(h));
        assert_eq!(s.deadline(h), None);
        assert_eq!(s.cancel(h), None);
    }

    #[test]
    fn timestamp_arithmetic() {
        assert_eq!(ms(1000) + Duration::from_millis(500), ms(1500));
        assert_eq!(ms(1500).saturating_since(ms(1000)), Duration::from_millis(500));
        assert_eq!(ms(1000).saturating_since(ms(1500)), Duration::ZERO);
        assert_eq!(ms(u64::MAX) + Duration::from_secs(1), ms(u64::MAX));
    }
}
