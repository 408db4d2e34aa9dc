//! Virtual-time task scheduler.
//!
//! Every timer the dashboard uses is a task owned by a `Scheduler`. Nothing
//! here reads the wall clock: time only moves when `advance` is called, so
//! tests can step through minutes of dashboard activity instantly.

use std::time::Duration;

use thiserror::Error;

/// Handle to a scheduled task, usable for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("recurring task period must be greater than zero")]
    ZeroPeriod,
}

/// A task that came due during `advance`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<T> {
    pub id: TaskId,
    pub at: Duration,
    pub task: T,
}

#[derive(Debug)]
struct Entry<T> {
    id: TaskId,
    due: Duration,
    period: Option<Duration>,
    task: T,
}

#[derive(Debug)]
pub struct Scheduler<T> {
    now: Duration,
    next_id: u64,
    entries: Vec<Entry<T>>,
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            entries: Vec::new(),
        }
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of pending tasks.
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    fn push(&mut self, due: Duration, period: Option<Duration>, task: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            due,
            period,
            task,
        });
        id
    }

    /// Run `task` once, `delay` from now.
    pub fn schedule_once(&mut self, delay: Duration, task: T) -> TaskId {
        self.push(self.now + delay, None, task)
    }

    /// Run `task` after `first`, then every `period`.
    pub fn schedule_every(
        &mut self,
        first: Duration,
        period: Duration,
        task: T,
    ) -> Result<TaskId, ScheduleError> {
        if period.is_zero() {
            return Err(ScheduleError::ZeroPeriod);
        }
        Ok(self.push(self.now + first, Some(period), task))
    }

    /// Cancel a task. Returns false if it already ran or was never scheduled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Move the clock forward by `by` and collect every firing in time order.
    ///
    /// Ties are broken by scheduling order. A recurring task whose period is
    /// shorter than the step fires once per elapsed period.
    pub fn advance(&mut self, by: Duration) -> Vec<Fired<T>> {
        let target = self.now + by;
        let mut fired = Vec::new();
        while let Some(f) = self.pop_due(target) {
            fired.push(f);
        }
        self.settle(target);
        fired
    }

    /// Take the earliest task due at or before `until`, moving the clock to
    /// its due time. Tasks scheduled between pops are relative to that time.
    pub fn pop_due(&mut self, until: Duration) -> Option<Fired<T>> {
        let idx = self.next_due(until)?;
        let entry = &mut self.entries[idx];
        let at = entry.due;
        let id = entry.id;
        let task = entry.task.clone();
        let period = entry.period;
        match period {
            Some(period) => entry.due += period,
            None => {
                self.entries.remove(idx);
            }
        }
        self.now = at;
        Some(Fired { id, at, task })
    }

    /// Move the clock to `until` once nothing more is due. Never goes back.
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    /// Index of the earliest entry due at or before `target`.
    fn next_due(&self, target: Duration) -> Option<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= target)
            .min_by_key(|(_, e)| (e.due, e.id))
            .map(|(idx, _)| idx)
    }
}

impl<T: Clone> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
