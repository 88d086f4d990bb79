//! Deferred tasks and frame requests
//!
//! Tasks are posted with a delivery time and handed back once that time has
//! passed, in due order with ties in scheduling order. Every task gets a
//! [`TaskId`] ticket that can cancel it; a cancelled or delivered ticket is
//! stale and never matches again.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Ticket of a scheduled task
    pub struct TaskId;
}

#[derive(Debug)]
struct Pending<T> {
    due_ms: f64,
    sequence: u64,
    task: T,
}

/// Queue of deferred tasks keyed by cancellable tickets
#[derive(Debug)]
pub struct TaskQueue<T> {
    pending: SlotMap<TaskId, Pending<T>>,
    next_sequence: u64,
}

impl<T> TaskQueue<T> {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            pending: SlotMap::with_key(),
            next_sequence: 0,
        }
    }

    /// Post `task` for delivery `delay_ms` after `now_ms`
    pub fn schedule(&mut self, now_ms: f64, delay_ms: f64, task: T) -> TaskId {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.pending.insert(Pending {
            due_ms: now_ms + delay_ms.max(0.0),
            sequence,
            task,
        })
    }

    /// Cancel a task, returning it if it was still pending
    pub fn cancel(&mut self, id: TaskId) -> Option<T> {
        self.pending.remove(id).map(|p| p.task)
    }

    /// Cancel every pending task, returning how many were dropped
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }

    /// Whether the ticket still refers to a pending task
    pub fn is_pending(&self, id: TaskId) -> bool {
        self.pending.contains_key(id)
    }

    /// Number of pending tasks
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is pending
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Earliest delivery time
    pub fn next_due(&self) -> Option<f64> {
        self.pending.values().map(|p| p.due_ms).min_by(f64::total_cmp)
    }

    /// Remove and return every task due at `now_ms`
    pub fn drain_due(&mut self, now_ms: f64) -> Vec<(TaskId, T)> {
        let mut due: Vec<(TaskId, f64, u64)> = self
            .pending
            .iter()
            .filter(|(_, p)| p.due_ms <= now_ms)
            .map(|(id, p)| (id, p.due_ms, p.sequence))
            .collect();
        due.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.2.cmp(&b.2)));

        due.into_iter()
            .filter_map(|(id, _, _)| self.pending.remove(id).map(|p| (id, p.task)))
            .collect()
    }
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Pending display-refresh callback
///
/// A controller requests the next frame at the end of every frame and the
/// host only drives `frame` while a request is outstanding.
#[derive(Debug, Clone, Default)]
pub struct FrameRequest {
    requested: bool,
    issued: u64,
}

impl FrameRequest {
    /// Request the next frame
    pub fn request(&mut self) {
        if !self.requested {
            self.requested = true;
            self.issued += 1;
        }
    }

    /// Drop the outstanding request
    pub fn cancel(&mut self) {
        self.requested = false;
    }

    /// Consume the outstanding request
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.requested)
    }

    /// Whether a request is outstanding
    pub fn is_requested(&self) -> bool {
        self.requested
    }

    /// Requests issued so far
    pub fn issued(&self) -> u64 {
        self.issued
    }
}
