//! Deferred task scheduler
//!
//! Every "wait" in the controllers (debounce, transition completion, guard
//! release, autoplay) is an entry in a [`TaskScheduler`] driven by a virtual
//! millisecond clock. The owner advances the clock and runs whatever is due:
//!
//! ```rust
//! use folio_core::scheduler::TaskScheduler;
//!
//! let mut timers = TaskScheduler::new();
//! let id = timers.schedule(250, "relayout");
//! assert!(timers.pop_due(100).is_none());
//! assert_eq!(timers.pop_due(300), Some((id, "relayout")));
//! ```
//!
//! While a due task is being handed out the scheduler clock sits at the
//! task's due time, so follow-up tasks armed from its handler are measured
//! from when it fired rather than from when the host got around to ticking.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a pending task
    pub struct TaskId;
}

struct ScheduledTask<T> {
    due: u64,
    /// Re-arm period for recurring tasks
    interval: Option<u64>,
    /// Arming order, breaks ties between tasks due at the same instant
    seq: u64,
    task: T,
}

/// Timer wheel for one controller
pub struct TaskScheduler<T> {
    tasks: SlotMap<TaskId, ScheduledTask<T>>,
    now: u64,
    seq: u64,
}

impl<T: Clone> TaskScheduler<T> {
    pub fn new() -> Self {
        Self {
            tasks: SlotMap::with_key(),
            now: 0,
            seq: 0,
        }
    }

    /// Current scheduler clock in milliseconds
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Move the clock forward without running anything. Never moves backwards.
    pub fn set_now(&mut self, now: u64) {
        self.now = self.now.max(now);
    }

    /// Run `task` once, `delay_ms` from now
    pub fn schedule(&mut self, delay_ms: u64, task: T) -> TaskId {
        self.insert(delay_ms, None, task)
    }

    /// Run `task` every `interval_ms`, first after one interval
    pub fn schedule_repeating(&mut self, interval_ms: u64, task: T) -> TaskId {
        let interval = interval_ms.max(1);
        self.insert(interval, Some(interval), task)
    }

    /// Cancel whatever `slot` holds, then arm a one-shot task into it
    pub fn replace(&mut self, slot: &mut Option<TaskId>, delay_ms: u64, task: T) {
        if let Some(previous) = slot.take() {
            self.cancel(previous);
        }
        *slot = Some(self.schedule(delay_ms, task));
    }

    /// Cancel whatever `slot` holds, then arm a recurring task into it
    pub fn replace_repeating(&mut self, slot: &mut Option<TaskId>, interval_ms: u64, task: T) {
        if let Some(previous) = slot.take() {
            self.cancel(previous);
        }
        *slot = Some(self.schedule_repeating(interval_ms, task));
    }

    /// Cancel a pending task, returning it if it had not fired yet
    pub fn cancel(&mut self, id: TaskId) -> Option<T> {
        self.tasks.remove(id).map(|t| t.task)
    }

    /// Cancel the task held in `slot`, if any
    pub fn clear(&mut self, slot: &mut Option<TaskId>) {
        if let Some(id) = slot.take() {
            self.cancel(id);
        }
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.tasks.contains_key(id)
    }

    /// Due time of a pending task
    pub fn due_at(&self, id: TaskId) -> Option<u64> {
        self.tasks.get(id).map(|t| t.due)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Hand out the earliest task due at or before `now`.
    ///
    /// One-shot tasks are removed; recurring tasks are re-armed one interval
    /// after their due time. Returns `None` (and sets the clock to `now`) once
    /// nothing else is due.
    pub fn pop_due(&mut self, now: u64) -> Option<(TaskId, T)> {
        let next = self
            .tasks
            .iter()
            .filter(|(_, t)| t.due <= now)
            .min_by_key(|(_, t)| (t.due, t.seq))
            .map(|(id, _)| id);

        let Some(id) = next else {
            self.set_now(now);
            return None;
        };

        let seq = self.next_seq();
        let entry = self.tasks.get_mut(id)?;
        self.now = self.now.max(entry.due);
        let task = entry.task.clone();
        let interval = entry.interval;

        match interval {
            Some(interval) => {
                entry.due += interval;
                entry.seq = seq;
            }
            None => {
                self.tasks.remove(id);
            }
        }

        Some((id, task))
    }

    fn insert(&mut self, delay_ms: u64, interval: Option<u64>, task: T) -> TaskId {
        let seq = self.next_seq();
        self.tasks.insert(ScheduledTask {
            due: self.now.saturating_add(delay_ms),
            interval,
            seq,
            task,
        })
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }
}

impl<T: Clone> Default for TaskScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
