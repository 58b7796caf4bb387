//! Deferred task queue driven by explicit clock ticks.
//!
//! Stands in for the host's `setTimeout`: tasks are scheduled relative to a
//! monotonic millisecond clock that only moves when [`DeferredQueue::advance`]
//! is called. Tasks cannot be cancelled once scheduled; owners that need to
//! ignore a stale task tag it and compare on delivery.

/// A single-threaded timer queue.
#[derive(Debug)]
pub struct DeferredQueue<T> {
    now_ms: u64,
    next_seq: u64,
    /// `(due_ms, seq, task)`; kept unsorted, drained in due/seq order.
    pending: Vec<(u64, u64, T)>,
}

impl<T> DeferredQueue<T> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_seq: 0,
            pending: Vec::new(),
        }
    }

    /// Current clock value in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of tasks waiting to fire.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Schedule `task` to fire `delay_ms` from now. Returns the due time.
    pub fn schedule(&mut self, delay_ms: u64, task: T) -> u64 {
        let due = self.now_ms.saturating_add(delay_ms);
        self.pending.push((due, self.next_seq, task));
        self.next_seq += 1;
        due
    }

    /// Move the clock forward and return every task now due, earliest
    /// first; tasks due at the same instant fire in scheduling order.
    pub fn advance(&mut self, dt_ms: u64) -> Vec<T> {
        self.now_ms = self.now_ms.saturating_add(dt_ms);
        let now = self.now_ms;

        let mut due = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].0 <= now {
                due.push(self.pending.swap_remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by_key(|(due_ms, seq, _)| (*due_ms, *seq));
        due.into_iter().map(|(_, _, task)| task).collect()
    }
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
